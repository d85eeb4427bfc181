//! InstallShield installer handler.
//!
//! Like [`crate::formats::ExFatArchive`], this is a thin client: the
//! InstallShield cabinet format's own compression and header parsing are
//! out of scope for this core.

use std::io::{Read, Seek, SeekFrom};

use crate::formats::{ArchiveHandler, ArchiveItem};
use crate::utils::bytesa;
use crate::{Error, Result};

/// Stub InstallShield handler: recognises the format but does not parse it.
pub struct InstallShieldArchive<R> {
    _stream: R,
}

impl<R: Read + Seek> ArchiveHandler for InstallShieldArchive<R> {
    type Stream = R;

    fn open(mut stream: R) -> Result<Self> {
        stream.seek(SeekFrom::Start(0))?;
        let header = bytesa::<14>(&mut stream)?;
        if &header != b"InstallShield\0" && &header != b"ISSetupStream\0" {
            return Err(Error::BadMagic);
        }
        stream.seek(SeekFrom::Start(0))?;
        Ok(Self { _stream: stream })
    }

    fn items(&self) -> &[ArchiveItem] {
        &[]
    }

    fn extract(&mut self, _index: usize) -> Result<Vec<u8>> {
        Err(Error::Unsupported(
            "InstallShield extraction is not implemented",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn open_recognises_installshield_magic() {
        let mut data = b"InstallShield\0".to_vec();
        data.resize(64, 0);
        let archive = InstallShieldArchive::open(Cursor::new(data)).unwrap();
        assert_eq!(archive.items().len(), 0);
    }

    #[test]
    fn open_recognises_issetupstream_magic() {
        let mut data = b"ISSetupStream\0".to_vec();
        data.resize(64, 0);
        let archive = InstallShieldArchive::open(Cursor::new(data)).unwrap();
        assert_eq!(archive.items().len(), 0);
    }

    #[test]
    fn open_rejects_wrong_magic() {
        let data = vec![0u8; 64];
        assert!(matches!(
            InstallShieldArchive::open(Cursor::new(data)),
            Err(Error::BadMagic)
        ));
    }
}
