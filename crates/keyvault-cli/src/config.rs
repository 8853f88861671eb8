use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use keyvault_core::KdfParams;

pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KeyvaultConfig {
    #[serde(default)]
    pub kdf: KdfSection,
    #[serde(default)]
    pub derivation: DerivationSection,
}

/// Argon2id cost parameters used for new blobs.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfSection {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationSection {
    pub default_path: String,
}

impl Default for KdfSection {
    fn default() -> Self {
        let params = KdfParams::default();
        Self {
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
        }
    }
}

impl Default for DerivationSection {
    fn default() -> Self {
        Self {
            default_path: DEFAULT_DERIVATION_PATH.to_string(),
        }
    }
}

impl KdfSection {
    pub fn params(&self) -> KdfParams {
        KdfParams::new(self.memory_kib, self.iterations, self.parallelism)
    }
}

/// Config path from `--config` / `KEYVAULT_CONFIG`, else the XDG default.
pub fn resolve_config_path(override_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Read the config at `path`, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> anyhow::Result<KeyvaultConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(KeyvaultConfig::default());
    }
    read_config(path)
}

pub fn read_config(path: &Path) -> anyhow::Result<KeyvaultConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &KeyvaultConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("keyvault"));
        }
    }
    Ok(home_dir()?.join(".config").join("keyvault"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: KeyvaultConfig = toml::from_str("[kdf]\nmemory_kib = 256\n").unwrap();
        assert_eq!(config.kdf.memory_kib, 256);
        assert_eq!(config.kdf.iterations, KdfParams::default().iterations);
        assert_eq!(config.derivation.default_path, DEFAULT_DERIVATION_PATH);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: KeyvaultConfig = toml::from_str("").unwrap();
        assert_eq!(config.kdf.params(), KdfParams::default());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = KeyvaultConfig::default();
        config.derivation.default_path = "m/44'/60'/1'/0/0".to_string();
        write_config(&path, &config).unwrap();

        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded.derivation.default_path, "m/44'/60'/1'/0/0");
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.derivation.default_path, DEFAULT_DERIVATION_PATH);
    }
}
