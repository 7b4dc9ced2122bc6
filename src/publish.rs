//! Output directory writer.
//!
//! ```text
//! dist/
//! ├── index.html      bound document (optionally minified)
//! ├── images/         ┐
//! ├── js/             ├ copied verbatim when present under the root
//! └── css/            ┘
//! ```

use crate::{config::SiteConfig, log, utils::minify::minify};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Files that are never copied.
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Name of the written document inside the output directory.
const OUTPUT_DOCUMENT: &str = "index.html";

/// What a publish run wrote.
#[derive(Debug)]
pub struct Published {
    pub document: PathBuf,
    pub assets: usize,
}

/// Write `html` and the configured asset directories into `[build] output`.
pub fn publish(html: &str, config: &SiteConfig) -> Result<Published> {
    let output = &config.build.output;

    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clean output directory `{}`", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory `{}`", output.display()))?;

    let document = output.join(OUTPUT_DOCUMENT);
    fs::write(&document, minify(html.as_bytes(), config))
        .with_context(|| format!("failed to write `{}`", document.display()))?;

    let mut assets = 0;
    for dir in &config.build.assets {
        if !dir.is_dir() {
            continue;
        }
        assets += copy_asset_dir(dir, output)?;
    }

    Ok(Published { document, assets })
}

/// Copy `dir` to `output/<dir name>`, returning the number of files copied.
fn copy_asset_dir(dir: &Path, output: &Path) -> Result<usize> {
    let Some(name) = dir.file_name() else {
        return Ok(0);
    };
    let dest_root = output.join(name);

    let files = collect_all_files(dir);
    for file in &files {
        let relative = file.strip_prefix(dir)?;
        let dest = dest_root.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(file, &dest).with_context(|| {
            format!("failed to copy `{}` to `{}`", file.display(), dest.display())
        })?;
    }

    log!("assets"; "{} ({} files)", name.to_string_lossy(), files.len());
    Ok(files.len())
}

/// Recursively collect all files in a directory.
fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}
