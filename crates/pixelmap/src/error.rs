//! Error type shared by every mapper operation.

use thiserror::Error;

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, querying or restoring a mapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A concrete coordinate was appended twice.
    #[error("duplicate coordinate ({x}, {y}): already assigned to wire position {index}")]
    DuplicateCoordinate {
        /// X coordinate of the collision.
        x: i32,
        /// Y coordinate of the collision.
        y: i32,
        /// Wire position that already holds the coordinate.
        index: usize,
    },

    /// A line that is neither axis-aligned nor exactly diagonal.
    #[error("line ({dx}, {dy}) must be horizontal, vertical or diagonal")]
    InvalidGeometry {
        /// Requested x extent.
        dx: i32,
        /// Requested y extent.
        dy: i32,
    },

    /// A line or zigzag whose points fall outside the `i32` coordinate range.
    #[error("shape at ({x}, {y}) with extent ({dx}, {dy}) leaves the coordinate range")]
    CoordinateOverflow {
        /// Start column.
        x: i32,
        /// Start row.
        y: i32,
        /// Requested x extent.
        dx: i32,
        /// Requested y extent.
        dy: i32,
    },

    /// An operation asks for more entries than can be allocated.
    #[error("cannot allocate {requested} more entries")]
    CapacityExceeded {
        /// Number of entries requested.
        requested: u64,
    },

    /// Lookup of a wire position that holds no entry.
    #[error("wire position {index} does not exist (mapper has {len} entries)")]
    IndexOutOfRange {
        /// Requested wire position.
        index: usize,
        /// Number of entries in the mapper.
        len: usize,
    },

    /// The serialized log could not be parsed.
    #[error("malformed operation log: {0}")]
    MalformedLog(String),

    /// The log names an operation this crate does not implement.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// An operation was recorded with the wrong number or kind of arguments.
    #[error("invalid arguments for '{name}': {reason}")]
    InvalidArguments {
        /// Operation name as it appeared in the log.
        name: String,
        /// What was wrong with the arguments.
        reason: String,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedLog(err.to_string())
    }
}
