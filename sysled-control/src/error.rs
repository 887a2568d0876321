//! LED control error types

use std::path::PathBuf;

use sysled_hal::PortError;
use thiserror::Error;

/// Errors from LED control operations
#[derive(Debug, Error)]
pub enum LedError {
    /// Hardware attribute access failed
    #[error("hardware attribute error: {0}")]
    Port(#[from] PortError),

    /// Raw LED name could not be parsed into a descriptor
    #[error("malformed LED name {0:?}")]
    MalformedName(String),

    /// LED device directory is absent from the class root
    #[error("LED device not found: {}", .0.display())]
    DeviceNotFound(PathBuf),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
