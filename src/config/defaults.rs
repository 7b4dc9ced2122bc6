//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [api] Section Defaults
// ============================================================================

pub mod api {
    pub fn base_url() -> String {
        "https://api.webflow.com/v2".into()
    }

    pub fn accept_version() -> String {
        "1.0.0".into()
    }

    pub fn token_env() -> String {
        "WEBFLOW_API_TOKEN".into()
    }

    pub fn site_env() -> String {
        "WEBFLOW_SITE_ID".into()
    }

    /// Request timeout in seconds.
    pub fn timeout() -> u64 {
        30
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn input() -> PathBuf {
        "index.html".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn assets() -> Vec<PathBuf> {
        vec!["images".into(), "js".into(), "css".into()]
    }
}
