//! The 128-byte PKG header.

use std::io::Read;

use crate::utils::{be_u16, be_u32, be_u64, bytesa, truncate_at_nul};
use crate::{Error, Result};

const MAGIC: [u8; 4] = [0x7F, 0x50, 0x4B, 0x47];

/// Parsed PKG header.
///
/// All multi-byte fields are stored in host order; the wire format is
/// entirely big-endian.
#[derive(Debug, Clone)]
pub struct PkgHeader {
    pub revision: u16,
    /// 1 = PS3, 2 = PSP, 3 = PSV, 4 = PSM.
    pub pkg_type: u16,
    pub metadata_offset: u32,
    pub metadata_count: u32,
    pub metadata_size: u32,
    pub item_count: u32,
    pub total_size: u64,
    pub data_offset: u64,
    pub data_size: u64,
    /// NUL-terminated content identifier (truncated at the first NUL byte).
    pub content_id: String,
    /// Key material for the stream cipher. The cipher is keyed off this
    /// field, not `pkg_data_riv`, despite both being present on the wire.
    pub digest: [u8; 16],
    pub pkg_data_riv: [u8; 16],
}

impl PkgHeader {
    /// Parse the header from the first 128 bytes of `r`.
    ///
    /// `r` must be positioned at the start of the PKG stream.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        let magic = bytesa::<4>(r)?;
        if magic != MAGIC {
            return Err(Error::BadMagic);
        }

        let revision = be_u16(r)?;
        let pkg_type = be_u16(r)?;
        let metadata_offset = be_u32(r)?;
        let metadata_count = be_u32(r)?;
        let metadata_size = be_u32(r)?;
        let item_count = be_u32(r)?;
        let total_size = be_u64(r)?;
        let data_offset = be_u64(r)?;
        let data_size = be_u64(r)?;
        let content_id_raw = bytesa::<0x30>(r)?;
        let digest = bytesa::<16>(r)?;
        let pkg_data_riv = bytesa::<16>(r)?;

        Ok(Self {
            revision,
            pkg_type,
            metadata_offset,
            metadata_count,
            metadata_size,
            item_count,
            total_size,
            data_offset,
            data_size,
            content_id: truncate_at_nul(&content_id_raw),
            digest,
            pkg_data_riv,
        })
    }

    /// Whether the payload and file table are encrypted under the PKG
    /// stream cipher.
    ///
    /// Only `pkg_type == 1` (retail PS3) is encrypted in this model; the
    /// keystream also supports `0x8001`/`0x8002` debug/PSP ciphers for
    /// callers that construct a [`crate::crypto::keystream::Keystream`]
    /// directly, but the container parser only ever sets this flag for
    /// the retail type.
    pub fn is_encrypted(&self) -> bool {
        self.pkg_type == 1
    }
}
