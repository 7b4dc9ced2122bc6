//! `[api]` section configuration.
//!
//! Where the CMS lives and which environment variables hold its credentials.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::env;

/// `[api]` section in cmsweave.toml - CMS endpoint settings.
///
/// # Example
/// ```toml
/// [api]
/// base_url = "https://api.webflow.com/v2"
/// token_env = "WEBFLOW_API_TOKEN"
/// site_env = "WEBFLOW_SITE_ID"
/// parallel = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// API root, without a trailing slash.
    #[serde(default = "defaults::api::base_url")]
    #[educe(Default = defaults::api::base_url())]
    pub base_url: String,

    /// Value of the `accept-version` header.
    #[serde(default = "defaults::api::accept_version")]
    #[educe(Default = defaults::api::accept_version())]
    pub accept_version: String,

    /// Environment variable holding the bearer token.
    #[serde(default = "defaults::api::token_env")]
    #[educe(Default = defaults::api::token_env())]
    pub token_env: String,

    /// Environment variable holding the site identifier.
    #[serde(default = "defaults::api::site_env")]
    #[educe(Default = defaults::api::site_env())]
    pub site_env: String,

    /// Request timeout in seconds.
    #[serde(default = "defaults::api::timeout")]
    #[educe(Default = defaults::api::timeout())]
    pub timeout: u64,

    /// Fetch the role collections concurrently.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub parallel: bool,
}

/// Credentials read from the environment.
///
/// Missing variables become empty strings: the CMS rejects them and the
/// build fails at the first request, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub site_id: String,
}

impl ApiConfig {
    /// Read the token and site id from the configured variables.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            token: env::var(&self.token_env).unwrap_or_default(),
            site_id: env::var(&self.site_env).unwrap_or_default(),
        }
    }
}
