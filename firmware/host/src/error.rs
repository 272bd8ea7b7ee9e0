//! Error types for the host-side reader.
//!
//! - **`BusError`**: the register transport failed (I/O, address outside the mapped
//!   window, misaligned access). Always a hard failure; nothing here retries.
//! - **`ReaderError`**: what `LogReader` surfaces. Wraps bus failures and rejects
//!   header words the firmware writer can never produce.
//!
//! Torn snapshots are not errors. The reader reports them through tracing only.

use std::path::PathBuf;

use ringlog_common::HeaderError;
use thiserror::Error;

/// Convenience alias for reader results.
pub type ReaderResult<T> = std::result::Result<T, ReaderError>;

/// Register transport failure.
#[derive(Error, Debug)]
pub enum BusError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("register access at {address:#06x} (+{len} bytes) is outside the {size}-byte window")]
    OutOfRange { address: u32, len: usize, size: usize },

    #[error("register address {address:#06x} is not word aligned")]
    Unaligned { address: u32 },

    #[error("ring base offset {offset:#x} is not word aligned")]
    UnalignedBase { offset: u64 },

    #[error("{} is {size} bytes, the ring region needs {required}", .path.display())]
    Truncated { path: PathBuf, size: u64, required: u64 },
}

/// Failure of a log ring read.
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("register bus error: {0}")]
    Bus(#[from] BusError),

    #[error("invalid ring header {word:#010x}: {source}")]
    InvalidHeader {
        word: u32,
        #[source]
        source: HeaderError,
    },
}
