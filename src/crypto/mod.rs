//! Cryptographic primitives backing the PKG container cipher.
//!
//! | module | provides |
//! |---|---|
//! | [`aes`] | AES-128 single-block encryption (FIPS-197) |
//! | [`sha1`] | SHA-1 one-shot hash (FIPS-180-4) |
//! | [`keystream`] | the PKG block-counter keystream built on the above |

pub mod aes;
pub mod keystream;
pub mod sha1;
