//! ExFAT filesystem handler.
//!
//! The ExFAT parser itself is out of scope (it depends on allocation-
//! bitmap and cluster-chain logic not present in this core); this handler
//! only implements enough of [`ArchiveHandler`] to recognise the format
//! and fail clearly when asked to do real work.

use std::io::{Read, Seek, SeekFrom};

use crate::formats::{ArchiveHandler, ArchiveItem};
use crate::utils::magic;
use crate::{Error, Result};

/// Stub ExFAT handler: recognises the format but does not parse it.
pub struct ExFatArchive<R> {
    _stream: R,
}

impl<R: Read + Seek> ArchiveHandler for ExFatArchive<R> {
    type Stream = R;

    fn open(mut stream: R) -> Result<Self> {
        stream.seek(SeekFrom::Start(3))?;
        magic(&mut stream, b"EXFAT   ")?;
        stream.seek(SeekFrom::Start(0))?;
        Ok(Self { _stream: stream })
    }

    fn items(&self) -> &[ArchiveItem] {
        &[]
    }

    fn extract(&mut self, _index: usize) -> Result<Vec<u8>> {
        Err(Error::Unsupported("ExFAT extraction is not implemented"))
    }
}
