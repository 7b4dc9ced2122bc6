//! cmsweave - bind headless-CMS collections into a static Webflow page.

mod bind;
mod build;
mod cli;
mod cms;
mod config;
mod dom;
mod filter;
mod project;
mod publish;
mod render;
mod resolve;
mod utils;

use anyhow::Result;
use build::{build_site, inspect_site};
use clap::Parser;
use cli::{Cli, Commands};
use cms::CmsClient;
use config::SiteConfig;
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let client = CmsClient::new(&config, config.api.credentials())?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config, &client).map(|_| ()),
        Commands::Inspect => inspect_site(&client),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing `cmsweave.toml` is not an error: defaults apply.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    if !config.config_path.is_file() {
        log!("config"; "{} not found, using defaults", config.config_path.display());
    }
    config.validate(cli)?;

    Ok(config)
}
