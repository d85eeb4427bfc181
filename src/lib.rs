//! **pkgfmt** - a read-only core for PS3 PKG archives, bzip2 decompression,
//! and the host archive-tool plug-in contract they sit behind.
//!
//! # Supported formats
//! | Type | Format |
//! |--------|--------|
//! | [`formats::PkgArchive`] | PS3 PKG - encrypted package container |
//! | [`formats::ExFatArchive`] | ExFAT - filesystem image (sniffed, not parsed) |
//! | [`formats::InstallShieldArchive`] | InstallShield - installer archive (sniffed, not parsed) |
//! | [`bzip2`] | bzip2 - block-sorting decompressor used by outer handlers |
//!
//! # Core
//! [`crypto`] holds the AES-128 and SHA-1 primitives backing the PKG
//! stream cipher in [`crypto::keystream`]. [`pkg`] is the container parser
//! built on top of it.

pub mod bzip2;
pub mod crypto;
pub mod error;
pub mod formats;
pub mod pkg;
pub mod utils;

pub use error::{Error, Result};
