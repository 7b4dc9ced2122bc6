//! Site configuration management for `cmsweave.toml`.
//!
//! The file is optional: every field has a default matching a plain Webflow
//! export (`index.html` plus `images/`, `js/`, `css/` next to it).
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[api]`     | CMS endpoint, credential variables, timeouts   |
//! | `[build]`   | Input page, output directory, assets, minify   |
//!
//! # Example
//!
//! ```toml
//! [api]
//! parallel = true
//!
//! [build]
//! output = "public"
//! minify = true
//! ```

mod api;
mod build;
pub mod defaults;
mod error;

pub use api::Credentials;

use api::ApiConfig;
use build::BuildConfig;
use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing cmsweave.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// CMS API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.input, cli.input.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.update_path_with_root(&root, &cli.config);

        if let Commands::Build { build_args } = &cli.command {
            Self::update_option(&mut self.build.minify, build_args.minify.as_ref());
            Self::update_option(&mut self.api.parallel, build_args.parallel.as_ref());
            if build_args.clean {
                self.build.clean = true;
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every path against the root and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.input = Self::normalize_path(&root.join(&self.build.input));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.assets = self
            .build
            .assets
            .iter()
            .map(|dir| Self::normalize_path(&root.join(dir)))
            .collect();
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        if !self.api.base_url.starts_with("http") {
            bail!(ConfigError::Validation(
                "[api.base_url] must start with http:// or https://".into()
            ));
        }

        if self.api.timeout == 0 {
            bail!(ConfigError::Validation(
                "[api.timeout] must be a positive number of seconds".into()
            ));
        }

        if cli.is_build() && !self.build.input.is_file() {
            bail!(ConfigError::Validation(format!(
                "input document `{}` not found",
                self.build.input.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("cmsweave").chain(args.iter().copied()))
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(!config.api.parallel);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = SiteConfig::from_str("[serve]\nport = 8080");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SiteConfig::from_path(Path::new("/nonexistent/cmsweave.toml")).unwrap_err();
        assert!(format!("{err}").contains("cannot read config"));
    }

    #[test]
    fn test_update_with_cli_resolves_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = cli(&["--root", root, "-o", "public", "build", "--minify", "--parallel"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root.as_path());
        assert_eq!(config.build.input, root.join("index.html"));
        assert_eq!(config.build.output, root.join("public"));
        assert_eq!(config.build.assets[0], root.join("images"));
        assert_eq!(config.config_path, root.join("cmsweave.toml"));
        assert!(config.build.minify);
        assert!(config.api.parallel);
    }

    #[test]
    fn test_cli_clean_only_turns_on() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();

        let mut config = SiteConfig::from_str("[build]\nclean = true").unwrap();
        config.update_with_cli(&cli(&["--root", root, "build"]));
        assert!(config.build.clean);
    }

    #[test]
    fn test_validate_requires_input_for_build() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();

        let build = cli(&["--root", root, "build"]);
        let mut config = SiteConfig::default();
        config.update_with_cli(&build);
        let err = config.validate(&build).unwrap_err();
        assert!(format!("{err}").contains("not found"));

        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(&build);
        assert!(config.validate(&build).is_ok());
    }

    #[test]
    fn test_validate_inspect_skips_input_check() {
        let dir = TempDir::new().unwrap();
        let inspect = cli(&["--root", dir.path().to_str().unwrap(), "inspect"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(&inspect);
        assert!(config.validate(&inspect).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_api_settings() {
        let inspect = cli(&["inspect"]);

        let config = SiteConfig::from_str("[api]\nbase_url = \"ftp://cms\"").unwrap();
        assert!(config.validate(&inspect).is_err());

        let config = SiteConfig::from_str("[api]\ntimeout = 0").unwrap();
        assert!(config.validate(&inspect).is_err());
    }
}
