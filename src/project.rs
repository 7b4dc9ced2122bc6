//! Projection of raw CMS items into fixed-shape views.
//!
//! Every field has a fallback, so rendering never has to deal with missing
//! data. Values are copied verbatim: nothing here escapes HTML.

use crate::cms::Item;

/// Image shown when a post has no `main-image.url`.
pub const PLACEHOLDER_IMAGE: &str =
    "https://d3e54v103j8qbb.cloudfront.net/plugins/Basic/assets/placeholder.60f9b1840c.svg";

/// Field keys read from a post item.
mod field {
    pub const SLUG: &str = "slug";
    pub const IMAGE: &str = "main-image";
    pub const NAME: &str = "name";
    pub const TOPICS: &str = "topics";
    pub const GRADE: &str = "grade";
    pub const DESCRIPTION: &str = "description";
    pub const SUMMARY: &str = "summary";
}

/// Normalized view of a post item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedPost {
    pub slug: Option<String>,
    pub image_url: String,
    pub title: String,
    pub topics_label: String,
    pub grade_label: String,
    pub description_text: String,
}

impl ProjectedPost {
    /// Link target: `/posts/{slug}`, or `/posts/#` without a slug.
    pub fn href(&self) -> String {
        format!("/posts/{}", self.slug.as_deref().unwrap_or("#"))
    }

    /// Title in the form used for search matching.
    pub fn title_key(&self) -> String {
        normalize_lower(&self.title)
    }

    /// Description in the form used for search matching.
    pub fn description_key(&self) -> String {
        normalize_lower(&self.description_text)
    }
}

/// Normalized view of a grade or topic item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedTaxonomyEntry {
    pub id: String,
    pub name: String,
}

pub fn project_post(item: &Item) -> ProjectedPost {
    ProjectedPost {
        slug: item.text(field::SLUG),
        image_url: item
            .image_url(field::IMAGE)
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned()),
        title: item.text(field::NAME).unwrap_or_default(),
        topics_label: item.text(field::TOPICS).unwrap_or_default(),
        grade_label: item.text(field::GRADE).unwrap_or_default(),
        description_text: item
            .text(field::DESCRIPTION)
            .or_else(|| item.text(field::SUMMARY))
            .unwrap_or_default(),
    }
}

pub fn project_taxonomy_entry(item: &Item) -> ProjectedTaxonomyEntry {
    ProjectedTaxonomyEntry {
        id: item.id.clone(),
        name: item.text(field::NAME).unwrap_or_default(),
    }
}

/// Lowercase with whitespace runs collapsed to one space and ends trimmed.
pub fn normalize_lower(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
