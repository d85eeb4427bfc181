//! PKG file-table entries and the derived file descriptors they produce.

/// Entry type, taken from the high byte of a file-table entry's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Npdrm,
    NpdrmEdat,
    Regular,
    Folder,
    /// Any type byte not enumerated above; preserved rather than rejected.
    Other(u8),
}

impl From<u8> for EntryType {
    fn from(b: u8) -> Self {
        match b {
            1 => EntryType::Npdrm,
            3 => EntryType::NpdrmEdat,
            4 => EntryType::Regular,
            5 => EntryType::Folder,
            other => EntryType::Other(other),
        }
    }
}

/// A single file's metadata, derived from a 32-byte file-table entry plus
/// its resolved name.
#[derive(Debug, Clone)]
pub struct PkgFile {
    /// Absolute byte offset in the PKG stream (`header.data_offset +
    /// entry.data_offset`).
    pub offset: u64,
    pub size: u64,
    pub flags: u32,
    pub entry_type: EntryType,
    /// Path with `\` normalised to `/`.
    pub path: String,
    pub is_folder: bool,
}
