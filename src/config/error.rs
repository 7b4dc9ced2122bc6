//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or checking `cmsweave.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid cmsweave.toml")]
    Toml(#[from] toml::de::Error),

    /// A setting that parsed but cannot work, e.g. a zero timeout.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("cmsweave.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{io_err}");
        assert!(display.starts_with("cannot read config"));
        assert!(display.contains("cmsweave.toml"));

        let validation_err = ConfigError::Validation("[api.timeout] must be positive".into());
        assert!(format!("{validation_err}").contains("[api.timeout]"));
    }
}
