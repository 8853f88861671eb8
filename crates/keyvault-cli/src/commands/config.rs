use std::path::Path;

use crate::config::{write_config, KeyvaultConfig};
use crate::errors::CliError;
use crate::output::config_json;

pub fn handle_config_init(config_path: &Path, force: bool, quiet: bool) -> anyhow::Result<()> {
    if config_path.exists() && !force {
        return Err(CliError::invalid_input(format!(
            "Config already exists: {} (use --force to overwrite)",
            config_path.display()
        ))
        .into());
    }

    write_config(config_path, &KeyvaultConfig::default())?;
    if !quiet {
        println!("Wrote default config to {}", config_path.display());
    }
    Ok(())
}

pub fn handle_config_show(
    config_path: &Path,
    config: &KeyvaultConfig,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&config_json(config))?);
        return Ok(());
    }

    if config_path.exists() {
        println!("# {}", config_path.display());
    } else {
        println!("# {} (not found, using defaults)", config_path.display());
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    print!("{}", contents);
    Ok(())
}
