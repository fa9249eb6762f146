//! Resource lookup used to load script prelude fragments

use thiserror::Error;

/// Resource lookup errors
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The lookup backend cannot serve requests (e.g. no hosting context)
    #[error("Resource lookup unavailable: {0}")]
    Unavailable(String),

    /// I/O error while reading the resource
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Named resource source
pub trait ResourceLookup: Send + Sync {
    /// Read a resource; `Ok(None)` if it does not exist
    fn find_resource(&self, name: &str) -> Result<Option<Vec<u8>>, ResourceError>;
}
