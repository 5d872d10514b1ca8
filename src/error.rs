use thiserror::Error;

/// Result type alias for Apex disk operations
pub type Result<T> = std::result::Result<T, ApexError>;

/// Errors that can occur when working with Apex disk images
#[derive(Debug, Error)]
pub enum ApexError {
    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed filename or wildcard pattern
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// Date component outside the representable range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Sector or block access beyond the image bounds
    #[error("Access at offset {offset} for {length} bytes is beyond image size {size}")]
    OutOfRange {
        /// Byte offset of the attempted access
        offset: usize,
        /// Length of the attempted access in bytes
        length: usize,
        /// Total image size in bytes
        size: usize,
    },

    /// Attempt to overwrite a directory entry that is in use
    #[error("Directory entry {index} is in use and cannot be overwritten")]
    EntryInUse {
        /// Slot index of the occupied entry
        index: usize,
    },

    /// No unused directory entries remain
    #[error("Directory full: no unused entries available")]
    DirectoryFull,

    /// No free extent large enough for the requested allocation
    #[error("Disk full: no free extent of {blocks} blocks available")]
    DiskFull {
        /// Number of contiguous blocks requested
        blocks: u16,
    },
}

impl ApexError {
    /// Create an invalid filename error
    pub fn filename<S: Into<String>>(message: S) -> Self {
        ApexError::InvalidFilename(message.into())
    }

    /// Create an invalid date error
    pub fn date<S: Into<String>>(message: S) -> Self {
        ApexError::InvalidDate(message.into())
    }
}
