//! PS3 PKG container: header, encrypted file table, and payload extraction.
//!
//! Mirrors the crate's `Pfs0`/`Pfs0Reader` split: [`Pkg`] parses metadata
//! only (the header plus the decrypted file table), while [`PkgReader`]
//! owns the stream and materialises file payloads on demand.

pub mod entry;
pub mod header;

use std::io::{Read, Seek, SeekFrom};

use crate::crypto::keystream::Keystream;
use crate::utils::{be_u32, be_u64, bytesv};
use crate::{Error, Result};

pub use entry::{EntryType, PkgFile};
pub use header::PkgHeader;

const ENTRY_SIZE: u64 = 32;

/// Parsed PKG container metadata: header plus resolved file entries.
#[derive(Debug)]
pub struct Pkg {
    pub header: PkgHeader,
    pub files: Vec<PkgFile>,
}

impl Pkg {
    /// Parse the header and file table from `r`.
    ///
    /// `r` must be positioned at the start of the PKG stream; on return it
    /// is left at an unspecified position.
    pub fn parse<R: Read + Seek>(r: &mut R) -> Result<Self> {
        r.seek(SeekFrom::Start(0))?;
        let header = PkgHeader::parse(r)?;
        let files = parse_file_table(r, &header)?;
        Ok(Self { header, files })
    }
}

fn read_and_decrypt<R: Read + Seek>(
    r: &mut R,
    header: &PkgHeader,
    abs_offset: u64,
    size: u64,
) -> Result<Vec<u8>> {
    r.seek(SeekFrom::Start(abs_offset))?;
    let mut buf = bytesv(r, size as usize)?;
    if header.is_encrypted() {
        let relative_offset = abs_offset - header.data_offset;
        let mut ks = Keystream::seek(&header.digest, header.pkg_type, relative_offset)?;
        ks.apply(&mut buf);
    }
    Ok(buf)
}

fn parse_file_table<R: Read + Seek>(r: &mut R, header: &PkgHeader) -> Result<Vec<PkgFile>> {
    let table_start = header.data_offset;

    let probe = read_and_decrypt(r, header, table_start, 32)?;
    let table_size_1 = be_u64(&mut &probe[8..16])?;
    let table_size_2 = be_u64(&mut &probe[16..24])?;

    let table_size = if table_size_2 > 0 && table_size_2 < header.data_size {
        table_size_2
    } else {
        table_size_1
    };

    if table_size == 0 || table_size > header.data_size {
        return Err(Error::Malformed("PKG file-table size out of range"));
    }

    let table = read_and_decrypt(r, header, table_start, table_size)?;

    let mut files = Vec::with_capacity(header.item_count as usize);
    let mut name_read_offset = header.item_count as u64 * ENTRY_SIZE;

    for i in 0..header.item_count {
        let entry_pos = (i as u64 * ENTRY_SIZE) as usize;
        if entry_pos + ENTRY_SIZE as usize > table.len() {
            break;
        }
        let p = &table[entry_pos..entry_pos + ENTRY_SIZE as usize];

        let name_len = be_u32(&mut &p[4..8])? as u64;
        let data_offset = be_u64(&mut &p[8..16])?;
        let data_size = be_u64(&mut &p[16..24])?;
        let flags = be_u32(&mut &p[24..28])?;

        if name_len == 0 || name_len > 4096 {
            continue;
        }
        if data_offset > header.data_size {
            continue;
        }

        let entry_type = EntryType::from((flags >> 24) as u8);
        let is_folder = entry_type == EntryType::Folder;

        let path = resolve_name(&table, name_read_offset, name_len, i);

        files.push(PkgFile {
            offset: header.data_offset + data_offset,
            size: data_size,
            flags,
            entry_type,
            path,
            is_folder,
        });

        name_read_offset += name_len;
        while name_read_offset % 16 != 0 {
            name_read_offset += 1;
        }
    }

    Ok(files)
}

fn resolve_name(table: &[u8], name_read_offset: u64, name_len: u64, index: u32) -> String {
    let start = name_read_offset as usize;
    let end = start + name_len as usize;
    if name_read_offset < table.len() as u64 && end <= table.len() {
        let raw = &table[start..end];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let name = String::from_utf8_lossy(&raw[..end]).into_owned();
        name.replace('\\', "/")
    } else {
        format!("file_{index}")
    }
}

/// Owns a stream and an already-parsed [`Pkg`]; extracts file payloads into
/// owned buffers, decrypting as needed.
///
/// There is no streaming extraction API: every extracted file is
/// materialised in memory in one call.
pub struct PkgReader<R> {
    inner: R,
    pub pkg: Pkg,
}

impl<R: Read + Seek> PkgReader<R> {
    /// Parse `reader`'s PKG container and wrap it for extraction.
    pub fn new(mut reader: R) -> Result<Self> {
        let pkg = Pkg::parse(&mut reader)?;
        Ok(Self { inner: reader, pkg })
    }

    /// Extract a file's decrypted (and, if compressed by an outer handler,
    /// still-compressed) payload bytes.
    ///
    /// Folders and zero-size entries return an empty buffer.
    pub fn extract(&mut self, file: &PkgFile) -> Result<Vec<u8>> {
        if file.is_folder || file.size == 0 {
            return Ok(Vec::new());
        }
        read_and_decrypt(&mut self.inner, &self.pkg.header, file.offset, file.size)
    }

    /// Find a file by path. Returns [`None`] if not found.
    pub fn get_file_by_path(&self, path: &str) -> Option<&PkgFile> {
        self.pkg.files.iter().find(|f| f.path == path)
    }

    /// Iterate over all file entries.
    pub fn files(&self) -> impl Iterator<Item = &PkgFile> {
        self.pkg.files.iter()
    }

    /// Consume the reader, returning the inner stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
