//! Layered configuration for the CLI
//!
//! Load order (later wins):
//! 1. built-in defaults
//! 2. `~/.cardsearch/config.toml`
//! 3. `./cardsearch.toml`
//! 4. `.env` files (loaded in `main` before argument parsing)
//! 5. `CARDSEARCH_API_URL`
//! 6. `--api-url`
//!
//! Steps 5 and 6 arrive together as the `--api-url` argument, which clap
//! fills from the environment when the flag is absent.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use cardsearch_core::UiConfig;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write a config file with default values
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

/// `~/.cardsearch/config.toml`
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cardsearch")
        .join("config.toml")
}

/// Project-local override file
pub fn local_config_path() -> PathBuf {
    PathBuf::from("cardsearch.toml")
}

/// Effective configuration. Unreadable or invalid files are warned about and
/// skipped.
pub fn load(api_url: Option<&str>) -> UiConfig {
    let mut merged = toml::Value::Table(toml::map::Map::new());
    for path in [config_path(), local_config_path()] {
        if let Some(layer) = read_layer(&path) {
            merge_toml(&mut merged, layer);
        }
    }

    let mut config = match merged.try_into::<UiConfig>() {
        Ok(config) => match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                UiConfig::default()
            }
        },
        Err(e) => {
            warn!("invalid configuration ({}); using defaults", e);
            UiConfig::default()
        }
    };

    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api_base_url = url.to_string();
    }
    config
}

fn read_layer(path: &Path) -> Option<toml::Value> {
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read config file");
            return None;
        }
    };
    match content.parse::<toml::Value>() {
        Ok(value) => {
            debug!(path = %path.display(), "loaded config layer");
            Some(value)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping invalid config file");
            None
        }
    }
}

/// Deep-merge `overlay` into `base`; tables merge key by key, anything else
/// is replaced.
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

pub fn run_config(args: ConfigArgs, api_url: Option<&str>) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(api_url),
        ConfigCommands::Init(args) => run_init(args),
    }
}

fn run_path() -> Result<()> {
    println!("{}", config_path().display());
    Ok(())
}

fn run_show(api_url: Option<&str>) -> Result<()> {
    let config = load(api_url);
    let toml_str = config
        .to_toml_string()
        .context("Failed to serialize config to TOML")?;
    println!("{}", toml_str);
    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))?;
    }

    let content = UiConfig::default()
        .to_toml_string()
        .context("Failed to render default config")?;
    std::fs::write(&config_path, content)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("✅ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", config_path);
    println!("  2. Set api_base_url to your search API");
    println!("  3. Run: cardsearch config show");

    Ok(())
}
