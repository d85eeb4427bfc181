//! PS3 PKG stream cipher.
//!
//! A block-counter keystream: the key buffer is reinterpreted as a
//! big-endian multi-precision integer and incremented once per 16-byte
//! block; the keystream for a block is either the SHA-1 digest of a
//! 64-byte key buffer (retail, `pkg_type == 1`) or an AES-128 encryption
//! of a 16-byte key buffer (debug/PSP, `pkg_type` `0x8001`/`0x8002`).
//!
//! Modeled as a stateful iterator yielding `[u8; 16]` keystream blocks, so
//! decrypting a buffer is `zip(ciphertext_blocks, keystream).map(xor)`.

use crate::crypto::aes::Aes128;
use crate::crypto::sha1::sha1;
use crate::{Error, Result};

/// Fixed AES-128 key for `pkg_type == 0x8001` (PS3 debug/NPDRM packages).
pub const PS3_PKG_AES_KEY: [u8; 16] = [
    0x2E, 0x7B, 0x71, 0xD7, 0xC9, 0xC9, 0xA1, 0x4E, 0xA3, 0x22, 0x1F, 0x18, 0x88, 0x28, 0xB8, 0xF8,
];

/// Fixed AES-128 key for `pkg_type == 0x8002` (PSP packages).
pub const PSP_PKG_AES_KEY: [u8; 16] = [
    0x07, 0xF2, 0xC6, 0x82, 0x90, 0xB5, 0x0D, 0x2C, 0x33, 0x81, 0x8D, 0x70, 0x9B, 0x60, 0xE6, 0x2B,
];

/// The per-call key buffer, sized according to `pkg_type`.
///
/// Retail (`pkg_type == 1`) uses a 64-byte buffer built by doubling the two
/// halves of the 16-byte digest; every other recognised type uses the
/// digest directly as a 16-byte buffer.
#[derive(Clone)]
enum KeyBuffer {
    Retail([u8; 64]),
    Block([u8; 16]),
}

impl KeyBuffer {
    fn build(digest: &[u8; 16], pkg_type: u16) -> Self {
        if pkg_type == 1 {
            let mut buf = [0u8; 64];
            buf[0..8].copy_from_slice(&digest[0..8]);
            buf[8..16].copy_from_slice(&digest[0..8]);
            buf[16..24].copy_from_slice(&digest[8..16]);
            buf[24..32].copy_from_slice(&digest[8..16]);
            KeyBuffer::Retail(buf)
        } else {
            KeyBuffer::Block(*digest)
        }
    }

    /// Increment the buffer, interpreted as a big-endian unsigned integer,
    /// by one, with carry propagation from the least significant byte.
    fn increment(&mut self) {
        let bytes: &mut [u8] = match self {
            KeyBuffer::Retail(b) => b.as_mut_slice(),
            KeyBuffer::Block(b) => b.as_mut_slice(),
        };
        for byte in bytes.iter_mut().rev() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                break;
            }
        }
    }
}

/// A stateful keystream generator for one decryption call.
///
/// Produced from the PKG header's `digest` and `pkg_type`. Each call to
/// [`next_block`](Keystream::next_block) advances the counter by exactly
/// one 16-byte block.
pub struct Keystream {
    key: KeyBuffer,
    pkg_type: u16,
    aes: Option<Aes128>,
}

impl Keystream {
    /// Build a keystream seeded from `digest` and `pkg_type`, aligned to
    /// block index 0 (relative offset 0 in the encrypted region).
    ///
    /// Returns [`Error::Unsupported`] if `pkg_type` names no recognised
    /// cipher.
    pub fn new(digest: &[u8; 16], pkg_type: u16) -> Result<Self> {
        let aes = match pkg_type {
            1 => None,
            0x8001 => Some(Aes128::new(&PS3_PKG_AES_KEY)),
            0x8002 => Some(Aes128::new(&PSP_PKG_AES_KEY)),
            _ => return Err(Error::Unsupported("unknown PKG cipher type")),
        };
        Ok(Self {
            key: KeyBuffer::build(digest, pkg_type),
            pkg_type,
            aes,
        })
    }

    /// Build a keystream seeded from `digest`/`pkg_type`, with the counter
    /// advanced to the block containing byte offset `relative_offset`.
    ///
    /// `relative_offset` must be a multiple of 16; the PKG parser always
    /// aligns its reads, so this is an internal invariant rather than a
    /// caller-facing convenience.
    pub fn seek(digest: &[u8; 16], pkg_type: u16, relative_offset: u64) -> Result<Self> {
        debug_assert_eq!(relative_offset % 16, 0, "PKG decryption must be block-aligned");
        let mut ks = Self::new(digest, pkg_type)?;
        let start_block = relative_offset / 16;
        for _ in 0..start_block {
            ks.key.increment();
        }
        Ok(ks)
    }

    /// Produce the next 16-byte keystream block and advance the counter.
    pub fn next_block(&mut self) -> [u8; 16] {
        let block = match (&self.key, self.pkg_type) {
            (KeyBuffer::Retail(buf), 1) => {
                let digest = sha1(buf);
                let mut out = [0u8; 16];
                out.copy_from_slice(&digest[..16]);
                out
            }
            (KeyBuffer::Block(buf), _) => self
                .aes
                .as_ref()
                .expect("non-retail keystream always carries an AES cipher")
                .encrypt_block(buf),
            _ => unreachable!("key buffer shape always matches pkg_type"),
        };
        self.key.increment();
        block
    }

    /// XOR `data` in place with successive keystream blocks, starting at
    /// whatever block this keystream is currently positioned at.
    ///
    /// The final block may be shorter than 16 bytes; the keystream is
    /// still advanced by a full block in that case.
    pub fn apply(&mut self, data: &mut [u8]) {
        for chunk in data.chunks_mut(16) {
            let block = self.next_block();
            for (b, k) in chunk.iter_mut().zip(block.iter()) {
                *b ^= k;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_increment_propagates_carry() {
        let mut key = KeyBuffer::Block([0xFF; 16]);
        key.increment();
        assert_eq!(key_bytes(&key), [0u8; 16]);
    }

    #[test]
    fn counter_increment_from_zero_counts_up() {
        let mut key = KeyBuffer::Block([0u8; 16]);
        for _ in 0..300 {
            key.increment();
        }
        let mut expected = [0u8; 16];
        expected[14..16].copy_from_slice(&300u16.to_be_bytes());
        assert_eq!(key_bytes(&key), expected);
    }

    fn key_bytes(k: &KeyBuffer) -> [u8; 16] {
        match k {
            KeyBuffer::Block(b) => *b,
            _ => panic!("expected block-shaped key"),
        }
    }

    #[test]
    fn keystream_determinism_seek_matches_manual_advance() {
        let digest = [0x11u8; 16];
        let mut manual = Keystream::new(&digest, 1).unwrap();
        for _ in 0..3 {
            manual.next_block();
        }
        let mut seeked = Keystream::seek(&digest, 1, 3 * 16).unwrap();
        assert_eq!(manual.next_block(), seeked.next_block());
    }

    #[test]
    fn xor_involution_round_trips() {
        let digest = [0x22u8; 16];
        let mut plaintext = b"the quick brown fox jumps over".to_vec();
        let original = plaintext.clone();

        let mut enc = Keystream::new(&digest, 0x8001).unwrap();
        enc.apply(&mut plaintext);
        assert_ne!(plaintext, original);

        let mut dec = Keystream::new(&digest, 0x8001).unwrap();
        dec.apply(&mut plaintext);
        assert_eq!(plaintext, original);
    }

    #[test]
    fn unknown_cipher_type_is_unsupported() {
        let digest = [0u8; 16];
        assert!(matches!(
            Keystream::new(&digest, 0x9999),
            Err(Error::Unsupported(_))
        ));
    }
}
