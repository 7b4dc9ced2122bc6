//! Headless-CMS data model and HTTP client.
//!
//! Only two endpoints are used:
//!
//! ```text
//! GET /sites/{site_id}/collections       → { collections: [{ id, displayName }] }
//! GET /collections/{collection_id}/items → { items: [{ id, fieldData }] }
//! ```

mod client;
mod error;

pub use client::CmsClient;
pub use error::FetchError;

use serde::Deserialize;
use serde_json::{Map, Value};

/// A CMS collection. The display name is the only signal used for roles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub display_name: String,
}

/// A collection item with its free-form field bag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub field_data: Map<String, Value>,
}

impl Item {
    /// Field value as display text.
    ///
    /// Strings are returned as-is; numbers and booleans are stringified.
    /// Empty strings, null, objects and arrays count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.field_data.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// The `url` of an image reference field such as `main-image`.
    pub fn image_url(&self, key: &str) -> Option<String> {
        match self.field_data.get(key)?.get("url")? {
            Value::String(url) if !url.is_empty() => Some(url.clone()),
            _ => None,
        }
    }
}

/// Body of `GET /sites/{site_id}/collections`.
#[derive(Debug, Deserialize)]
pub(crate) struct CollectionList {
    #[serde(default)]
    pub collections: Vec<Collection>,
}

/// Body of `GET /collections/{collection_id}/items`.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemList {
    #[serde(default)]
    pub items: Vec<Item>,
}
