//! `[build]` section configuration.
//!
//! Input document, output directory and the asset folders to publish.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in cmsweave.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// input = "index.html"     # Page holding the list containers
/// output = "dist"          # Output directory
/// assets = ["images", "js", "css"]
/// minify = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// HTML document the collections are bound into.
    #[serde(default = "defaults::build::input")]
    #[educe(Default = defaults::build::input())]
    pub input: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Asset directories copied verbatim into the output root.
    /// Missing directories are skipped.
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: Vec<PathBuf>,

    /// Minify the generated document.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Remove the output directory before writing.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,
}
