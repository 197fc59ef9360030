//! Error handling.

use crate::region::RegionKind;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[must_use]
pub enum Error {
    #[error("invalid rom path {path:?}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },
    #[error("nes header signature not found (found: {found:02X?})")]
    BadMagic { found: [u8; 4] },
    #[error("invalid nes header (found: ${value:02X} at byte: {byte}). {message}")]
    BadHeader {
        byte: u8,
        value: u8,
        message: String,
    },
    #[error("truncated rom: {region} ends at byte {end} but rom is only {len} bytes")]
    TruncatedRom {
        region: RegionKind,
        end: usize,
        len: usize,
    },
    #[error("{context}: {source:?}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error was caused by the caller-supplied input rather than the rom contents.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::Io { .. })
    }
}
