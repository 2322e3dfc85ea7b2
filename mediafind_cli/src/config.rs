use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use mediafind_core::{ExtensionOverrides, FinderConfig, MediaKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub finder: FinderConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_enabled: true,
        }
    }
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, follow_links: bool, max_depth: Option<usize>) {
        if follow_links {
            self.finder.follow_links = true;
        }
        if let Some(depth) = max_depth {
            self.finder.max_depth = Some(depth);
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

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("mediafind/config.toml");
        }

        #[cfg(target_os = "linux")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/mediafind/config.toml")
        }

        #[cfg(target_os = "macos")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Library/Application Support/mediafind/config.toml")
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mediafind")
                .join("config.toml")
        }
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
        figment = figment.merge(Env::prefixed("MEDIAFIND_").split("__"));

        let config: AppConfig = figment.extract().context("Failed to load configuration")?;
        config
            .finder
            .validate()
            .context("Invalid finder configuration")?;
        Ok(config)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// Set a configuration value by key (dot notation)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (parts, parsed_value) = Self::parse_config_value(key, value)?;

        // Load existing file or start a new table
        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let (last, parents) = parts
            .split_last()
            .ok_or_else(|| anyhow::anyhow!("Empty key"))?;

        let mut current = &mut config;
        for part in parents {
            let toml::Value::Table(table) = current else {
                anyhow::bail!("Invalid key path: expected table at '{}'", part);
            };
            current = table
                .entry(part.to_string())
                .or_insert(toml::Value::Table(toml::map::Map::new()));
        }

        match current {
            toml::Value::Table(table) => {
                table.insert(last.to_string(), parsed_value);
            }
            _ => anyhow::bail!("Cannot set value on non-table"),
        }

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)?;

        Ok(())
    }

    /// List all configuration values
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
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {}
        }
    }

    /// Validate a value for a known key and convert it to its TOML type
    ///
    /// Returns the canonical table path of the key along with the value.
    fn parse_config_value(key: &str, value: &str) -> Result<(Vec<String>, toml::Value)> {
        if let Some(ext) = key.strip_prefix("finder.overrides.") {
            let kind: MediaKind = value.parse()?;
            let overrides = ExtensionOverrides::empty()
                .with(ext, kind)
                .with_context(|| format!("Invalid override key: {key}"))?;
            let (ext, kind) = overrides
                .iter()
                .next()
                .ok_or_else(|| anyhow::anyhow!("Invalid override key: {key}"))?;
            let path = vec!["finder".to_string(), "overrides".to_string(), ext.to_string()];
            return Ok((path, toml::Value::String(kind.as_str().to_string())));
        }

        let path = key.split('.').map(str::to_string).collect();
        let parsed = match key {
            "finder.follow_links" | "output.color_enabled" => {
                let flag: bool = value.parse().context("Value must be 'true' or 'false'")?;
                toml::Value::Boolean(flag)
            }
            "finder.max_depth" => {
                let depth: i64 = value
                    .parse()
                    .context("max_depth must be a positive integer")?;
                if depth < 1 {
                    anyhow::bail!("max_depth must be at least 1");
                }
                toml::Value::Integer(depth)
            }
            "output.default_format" => {
                let format = OutputFormat::from_string(value)?;
                toml::Value::String(format.as_str().to_string())
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        };
        Ok((path, parsed))
    }
}

/// Load configuration from an explicit file or the default location
pub fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => ConfigManager::with_path(path).load(),
        None => ConfigManager::new().load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(dir.path().join("config.toml"))
    }

    #[test]
    fn test_load_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = manager(&dir).load().unwrap();

        assert!(!config.finder.follow_links);
        assert_eq!(config.finder.max_depth, None);
        assert_eq!(config.output.default_format, "text");
        assert!(
            config
                .finder
                .overrides
                .matches(Path::new("x.rmvb"), MediaKind::Video)
        );
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager(&dir);

        mgr.set("finder.max_depth", "3").unwrap();
        mgr.set("output.color_enabled", "false").unwrap();

        assert_eq!(mgr.get("finder.max_depth").unwrap(), "3");
        assert_eq!(mgr.get("output.color_enabled").unwrap(), "false");
        assert_eq!(mgr.load().unwrap().finder.max_depth, Some(3));
    }

    #[test]
    fn test_override_is_added_to_defaults() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager(&dir);

        mgr.set("finder.overrides.ra", "Audio").unwrap();
        let config = mgr.load().unwrap();

        assert!(config.finder.overrides.matches(Path::new("a.ra"), MediaKind::Audio));
        assert!(config.finder.overrides.matches(Path::new("a.rm"), MediaKind::Video));
        assert_eq!(mgr.get("finder.overrides.ra").unwrap(), "audio");
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager(&dir);

        assert!(mgr.set("finder.max_depth", "0").is_err());
        assert!(mgr.set("finder.max_depth", "deep").is_err());
        assert!(mgr.set("finder.follow_links", "maybe").is_err());
        assert!(mgr.set("finder.overrides.ra", "podcast").is_err());
        assert!(mgr.set("finder.overrides.tar.gz", "video").is_err());
        assert!(mgr.set("finder.overrides.", "video").is_err());
        assert!(mgr.set("output.default_format", "xml").is_err());
        assert!(mgr.set("nonsense.key", "1").is_err());
        assert!(!dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_set_override_stores_normalized_extension() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager(&dir);

        mgr.set("finder.overrides.OGM", "Video").unwrap();
        mgr.set("finder.overrides..ra", "audio").unwrap();

        let config = mgr.load().unwrap();
        assert_eq!(config.finder.overrides.lookup(Path::new("a.ogm")), Some(MediaKind::Video));
        assert_eq!(config.finder.overrides.lookup(Path::new("a.ra")), Some(MediaKind::Audio));
        assert_eq!(mgr.get("finder.overrides.ogm").unwrap(), "video");
    }

    #[test]
    fn test_list_is_sorted_and_flat() {
        let dir = TempDir::new().unwrap();
        let items = manager(&dir).list().unwrap();
        let keys: Vec<_> = items.iter().map(|(k, _)| k.as_str()).collect();

        assert!(keys.contains(&"finder.follow_links"));
        assert!(keys.contains(&"finder.overrides.rmvb"));
        assert!(keys.contains(&"output.default_format"));
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_get_unknown_key_fails() {
        let dir = TempDir::new().unwrap();
        assert!(manager(&dir).get("finder.missing").is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(true, Some(4));
        assert!(config.finder.follow_links);
        assert_eq!(config.finder.max_depth, Some(4));

        config.apply_cli_overrides(false, None);
        assert!(config.finder.follow_links);
        assert_eq!(config.finder.max_depth, Some(4));
    }
}
