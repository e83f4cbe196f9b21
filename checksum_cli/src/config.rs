use anyhow::{Context, Result};
use checksum_core::DigestConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub digest: DigestConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DefaultsConfig {
    /// Algorithms used when no `--algorithm` is given
    pub algorithms: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_enabled: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            algorithms: vec!["MD5".to_string(), "SHA-1".to_string()],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_enabled: true,
        }
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        // Check for XDG_CONFIG_HOME override first (Linux/macOS)
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("checksum/config.toml");
        }

        dirs::config_dir()
            .map(|d| d.join("checksum").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".checksum/config.toml"))
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed("CHECKSUM_").split("__"));

        let config: AppConfig = figment.extract().context("Failed to load configuration")?;
        config
            .digest
            .validate()
            .context("Invalid [digest] configuration")?;
        Ok(config)
    }

    /// List all configuration values as dotted keys
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            toml::Value::Array(values) => {
                let joined: Vec<String> = values
                    .iter()
                    .map(|v| match v {
                        toml::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                items.push((prefix, joined.join(",")));
            }
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Float(f) => items.push((prefix, f.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {} // Skip datetimes
        }
    }
}

/// Get the default configuration
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("missing.toml"));
        let config = manager.load().unwrap();

        assert_eq!(config.digest, DigestConfig::default());
        assert_eq!(config.defaults.algorithms, vec!["MD5", "SHA-1"]);
        assert_eq!(config.output.default_format, "text");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[digest]\nbuffer_size = 4096\n\n[defaults]\nalgorithms = [\"SHA-256\"]\n",
        )
        .unwrap();

        let config = ConfigManager::with_path(path).load().unwrap();
        assert_eq!(config.digest.buffer_size, 4096);
        assert_eq!(config.defaults.algorithms, vec!["SHA-256"]);
        assert!(config.output.color_enabled);
    }

    #[test]
    fn test_zero_buffer_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[digest]\nbuffer_size = 0\n").unwrap();

        let err = ConfigManager::with_path(path).load().unwrap_err();
        assert!(format!("{err:#}").contains("buffer_size"));
    }

    #[test]
    fn test_oversized_buffer_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[digest]\nbuffer_size = 70368744177664\n").unwrap();

        let err = ConfigManager::with_path(path).load().unwrap_err();
        assert!(format!("{err:#}").contains("buffer_size must be at most"));
    }

    #[test]
    fn test_list_flattens_keys() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("missing.toml"));
        let items = manager.list().unwrap();

        assert!(items.contains(&("defaults.algorithms".to_string(), "MD5,SHA-1".to_string())));
        assert!(items.contains(&("output.color_enabled".to_string(), "true".to_string())));
        assert!(items.iter().any(|(k, _)| k == "digest.buffer_size"));
    }
}
