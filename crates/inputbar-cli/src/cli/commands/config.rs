//! Config command handlers.

use anyhow::{Context, Result};
use inputbar_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn check() -> Result<()> {
    let config_path = config::paths::config_path();
    let config = config::Config::load_from(&config_path)?;
    let warnings = config.validate();
    if warnings.is_empty() {
        println!("{}: ok", config_path.display());
        return Ok(());
    }
    for warning in &warnings {
        println!("{}: {}", warning.field, warning.message);
    }
    anyhow::bail!("{} problem(s) in {}", warnings.len(), config_path.display())
}
