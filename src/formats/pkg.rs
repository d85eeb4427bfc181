//! [`ArchiveHandler`] implementation over [`crate::pkg`].

use std::io::{Read, Seek};

use crate::formats::{ArchiveHandler, ArchiveItem};
use crate::pkg::PkgReader;
use crate::{Error, Result};

/// A PKG archive opened for item listing and extraction.
pub struct PkgArchive<R> {
    reader: PkgReader<R>,
    items: Vec<ArchiveItem>,
}

impl<R: Read + Seek> ArchiveHandler for PkgArchive<R> {
    type Stream = R;

    fn open(stream: R) -> Result<Self> {
        let reader = PkgReader::new(stream)?;
        let items = reader
            .pkg
            .files
            .iter()
            .map(|f| ArchiveItem {
                path: f.path.clone(),
                size: f.size,
                is_dir: f.is_folder,
            })
            .collect();
        Ok(Self { reader, items })
    }

    fn items(&self) -> &[ArchiveItem] {
        &self.items
    }

    fn extract(&mut self, index: usize) -> Result<Vec<u8>> {
        let file = self
            .reader
            .pkg
            .files
            .get(index)
            .cloned()
            .ok_or(Error::InvalidRange("extract index out of range"))?;
        self.reader.extract(&file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn opens_and_lists_items() {
        // Minimal unencrypted single-file PKG, built by hand to exercise
        // the ArchiveHandler surface rather than the parser internals
        // (those are covered in `crate::pkg`'s own tests).
        let mut pkg = Vec::new();
        pkg.extend_from_slice(&[0x7F, 0x50, 0x4B, 0x47]);
        pkg.extend_from_slice(&1u16.to_be_bytes());
        pkg.extend_from_slice(&2u16.to_be_bytes()); // PSP, unencrypted
        pkg.extend_from_slice(&0u32.to_be_bytes());
        pkg.extend_from_slice(&0u32.to_be_bytes());
        pkg.extend_from_slice(&0u32.to_be_bytes());
        pkg.extend_from_slice(&0u32.to_be_bytes()); // item_count = 0
        pkg.extend_from_slice(&160u64.to_be_bytes());
        pkg.extend_from_slice(&128u64.to_be_bytes());
        pkg.extend_from_slice(&32u64.to_be_bytes());
        pkg.extend_from_slice(&[0u8; 0x30]);
        pkg.extend_from_slice(&[0u8; 16]);
        pkg.extend_from_slice(&[0u8; 16]);
        let mut data_region = vec![0u8; 32];
        data_region[8..16].copy_from_slice(&32u64.to_be_bytes()); // tableSize1 = 32
        pkg.extend_from_slice(&data_region); // probe/table region, empty table

        let cursor = Cursor::new(pkg);
        let archive = PkgArchive::open(cursor).unwrap();
        assert_eq!(archive.items().len(), 0);
    }

    #[test]
    fn extract_out_of_range_index_is_an_error() {
        let mut pkg = Vec::new();
        pkg.extend_from_slice(&[0x7F, 0x50, 0x4B, 0x47]);
        pkg.extend_from_slice(&1u16.to_be_bytes());
        pkg.extend_from_slice(&2u16.to_be_bytes()); // PSP, unencrypted
        pkg.extend_from_slice(&0u32.to_be_bytes());
        pkg.extend_from_slice(&0u32.to_be_bytes());
        pkg.extend_from_slice(&0u32.to_be_bytes());
        pkg.extend_from_slice(&0u32.to_be_bytes()); // item_count = 0
        pkg.extend_from_slice(&160u64.to_be_bytes());
        pkg.extend_from_slice(&128u64.to_be_bytes());
        pkg.extend_from_slice(&32u64.to_be_bytes());
        pkg.extend_from_slice(&[0u8; 0x30]);
        pkg.extend_from_slice(&[0u8; 16]);
        pkg.extend_from_slice(&[0u8; 16]);
        let mut data_region = vec![0u8; 32];
        data_region[8..16].copy_from_slice(&32u64.to_be_bytes());
        pkg.extend_from_slice(&data_region);

        let mut archive = PkgArchive::open(Cursor::new(pkg)).unwrap();
        assert!(matches!(
            archive.extract(0),
            Err(Error::InvalidRange(_))
        ));
    }
}
