//! Hardware attribute error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from LED control attribute access
///
/// All three variants mean the same thing to callers: the attribute is
/// unavailable right now and the operation did not take effect. They
/// are split so logs say whether the file was missing, unwritable, or
/// carrying garbage.
#[derive(Debug, Error)]
pub enum PortError {
    /// Attribute file missing or unreadable
    #[error("failed to read {attr} from {path}: {source}")]
    AttributeRead {
        attr: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Attribute write could not be committed
    #[error("failed to write {attr} to {path}: {source}")]
    AttributeWrite {
        attr: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Attribute content did not parse as the expected type
    #[error("malformed {attr} value {value:?} in {path}")]
    AttributeParse {
        attr: &'static str,
        path: PathBuf,
        value: String,
    },
}
