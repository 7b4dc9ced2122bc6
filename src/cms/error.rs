//! Errors raised while talking to the CMS API.

use thiserror::Error;

/// A failed CMS request. Every variant aborts the build.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with a non-2xx status.
    #[error("Failed to fetch {resource}: {status}")]
    Status {
        resource: &'static str,
        status: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Failed to fetch {resource}")]
    Transport {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON shape.
    #[error("Malformed {resource} response")]
    Decode {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Status text the way the API reports it, e.g. `Unauthorized`.
    pub fn from_status(resource: &'static str, status: reqwest::StatusCode) -> Self {
        let status = status
            .canonical_reason()
            .map(str::to_owned)
            .unwrap_or_else(|| status.as_str().to_owned());
        Self::Status { resource, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_error_display() {
        let err = FetchError::from_status("collections", StatusCode::UNAUTHORIZED);
        assert_eq!(format!("{err}"), "Failed to fetch collections: Unauthorized");
    }

    #[test]
    fn test_status_without_reason_uses_code() {
        let status = StatusCode::from_u16(599).unwrap();
        let err = FetchError::from_status("items", status);
        assert_eq!(format!("{err}"), "Failed to fetch items: 599");
    }
}
