//! Error types for the ketama library.
//!
//! Ring operations themselves are total; errors only arise while turning
//! user-supplied configuration into a ring.

use thiserror::Error;

/// Result type alias for the ketama library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or parsing ring configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// A `key=weight` node description could not be parsed.
    #[error("invalid node spec `{spec}`: {reason}")]
    InvalidNodeSpec { spec: String, reason: String },

    /// The named hash algorithm is not supported.
    #[error("unknown hash algorithm `{0}` (expected one of: sha1, xxh3, sip, blake3)")]
    UnknownHashAlgorithm(String),

    /// A topology document was malformed.
    #[error("invalid ring config: {0}")]
    Config(#[from] serde_json::Error),

    /// A topology file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_spec_message() {
        let err = Error::InvalidNodeSpec {
            spec: "=3".to_owned(),
            reason: "empty key".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid node spec `=3`: empty key");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
