/// Structured error types for crmctl-core.
///
/// Library consumers get composable `thiserror` errors; the `crmctl` binary
/// wraps them in `anyhow` with context.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for crmctl-core operations
#[derive(Error, Debug)]
pub enum CrmError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file exists but is not valid TOML for `CrmConfig`
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be serialized back to TOML
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        #[from]
        source: toml::ser::Error,
    },
}

/// Result type alias for crmctl-core operations
pub type Result<T> = std::result::Result<T, CrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: CrmError = io_err.into();
        assert!(matches!(err, CrmError::Io { .. }));
    }
}
