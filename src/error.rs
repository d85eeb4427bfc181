//! Library-wide error and result types.

use std::fmt;
use std::io;

/// Result alias used throughout pkgfmt.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Error messages are kept intentionally terse; callers that need richer
/// context should wrap `Error` in their own type.
#[derive(Debug)]
pub enum Error {
    /// A magic/signature field did not match the expected value.
    BadMagic,
    /// The stream ended before all expected bytes could be read.
    UnexpectedEof,
    /// A structural constraint was violated (message describes which one).
    Malformed(&'static str),
    /// A recognised construct is not implemented by this decoder (e.g. a
    /// randomized bzip2 block, or an unknown PKG cipher type).
    Unsupported(&'static str),
    /// Decryption produced output that downstream checks reject (the PKG
    /// cipher has no authenticator, so this is best-effort).
    DecryptionFailed,
    /// A decoded value would exceed a hard size limit (e.g. a bzip2 block
    /// larger than 900,000 bytes).
    Truncated,
    /// An index or offset fell outside the bounds it's required to fall
    /// within (e.g. an out-of-range archive item index).
    InvalidRange(&'static str),
    /// An underlying I/O operation failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadMagic => write!(f, "bad magic value"),
            Error::UnexpectedEof => write!(f, "unexpected end of file"),
            Error::Malformed(s) => write!(f, "malformed input: {s}"),
            Error::Unsupported(s) => write!(f, "unsupported: {s}"),
            Error::DecryptionFailed => write!(f, "decryption failed"),
            Error::Truncated => write!(f, "decoded size exceeds limit"),
            Error::InvalidRange(s) => write!(f, "invalid range: {s}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Error::Io(e) = self {
            Some(e)
        } else {
            None
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
