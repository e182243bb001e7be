//! Config file command.

use std::path::Path;

use crate::config::{self, Config};

/// Print the effective config, or write the defaults with `--init`
pub fn cmd_config(config: &Config, path: Option<&Path>, init: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config::config_path().ok_or(config::ConfigError::NoConfigDir)?,
    };

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
            return Ok(());
        }
        config::save_to(&Config::default(), &path)?;
        println!("✓ Wrote default config to {}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    println!("{}", toml::to_string_pretty(&redacted(config))?);
    Ok(())
}

/// Copy of `config` with credentials masked
fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    let mask = |secret: &mut Option<String>| {
        if secret.is_some() {
            *secret = Some("********".to_string());
        }
    };
    mask(&mut config.providers.genius.access_token);
    mask(&mut config.providers.musixmatch.api_key);
    config
}
