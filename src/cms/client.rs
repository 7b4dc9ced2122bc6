//! Blocking HTTP client for the CMS API.

use super::{Collection, CollectionList, FetchError, Item, ItemList};
use crate::config::{Credentials, SiteConfig};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// User agent sent with every request
const USER_AGENT: &str = concat!("cmsweave/", env!("CARGO_PKG_VERSION"));

/// Authenticated client bound to one site.
///
/// `reqwest::blocking::Client` is `Send + Sync`, so one instance can serve
/// concurrent fetches.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    base_url: String,
    accept_version: String,
    credentials: Credentials,
}

impl CmsClient {
    /// Build a client from `[api]` settings and resolved credentials.
    pub fn new(config: &SiteConfig, credentials: Credentials) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.api.timeout))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_owned(),
            accept_version: config.api.accept_version.clone(),
            credentials,
        })
    }

    /// List every collection of the configured site, in API order.
    pub fn collections(&self) -> Result<Vec<Collection>, FetchError> {
        let url = format!(
            "{}/sites/{}/collections",
            self.base_url, self.credentials.site_id
        );
        let list: CollectionList = self.get_json("collections", self.http.get(url))?;
        Ok(list.collections)
    }

    /// List the items of one collection, in API order.
    pub fn items(&self, collection_id: &str) -> Result<Vec<Item>, FetchError> {
        let url = format!("{}/collections/{}/items", self.base_url, collection_id);
        let list: ItemList = self.get_json("items", self.http.get(url))?;
        Ok(list.items)
    }

    /// Send an authenticated request and decode the JSON body.
    ///
    /// No retries: the first failure is final.
    fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        request: RequestBuilder,
    ) -> Result<T, FetchError> {
        let response = request
            .bearer_auth(&self.credentials.token)
            .header("accept-version", &self.accept_version)
            .send()
            .map_err(|source| FetchError::Transport { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(resource, status));
        }

        response
            .json()
            .map_err(|source| FetchError::Decode { resource, source })
    }
}
