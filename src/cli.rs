//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bind CMS collections into a static listing page
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root (directory holding the input page and asset folders)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Input HTML document (relative to project root)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Config file name (default: cmsweave.toml)
    #[arg(short = 'C', long, default_value = "cmsweave.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments of the `build` subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Remove the output directory before writing
    #[arg(long)]
    pub clean: bool,

    /// Minify the generated html
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Fetch the three role collections concurrently
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub parallel: Option<bool>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch collections, bind them into the page and write the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// List the site's collections and the role each one resolves to
    Inspect,
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}
