use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::{
    client::{DEFAULT_GEOIP_URI, DEFAULT_SERVER_URI},
    units::UnitSystem,
};

const UNKNOWN_UNITS: &str =
    "Unknown unit system. Supported: auto, us, si, ca, uk, uk2, metric, imperial.";

/// API keys used when running the proxy server.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyKeys {
    pub darksky_api_key: Option<String>,
    pub geocode_api_key: Option<String>,
}

/// Top-level configuration stored on disk. Command-line flags win over
/// anything set here.
///
/// Example TOML:
/// ```toml
/// server = "https://geocode.jessfraz.com"
/// units = "si"
/// days = 3
///
/// [proxy]
/// darksky_api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Proxy server URI.
    pub server: Option<String>,
    /// Default unit system, e.g. "us" or "si".
    pub units: Option<String>,
    /// Default number of forecast days.
    pub days: Option<u32>,
    /// IP geolocation service URI.
    pub geoip: Option<String>,
    pub proxy: ProxyKeys,
}

impl Config {
    pub fn server_uri(&self) -> &str {
        self.server.as_deref().unwrap_or(DEFAULT_SERVER_URI)
    }

    pub fn geoip_uri(&self) -> &str {
        self.geoip.as_deref().unwrap_or(DEFAULT_GEOIP_URI)
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.units.as_deref().map(UnitSystem::parse).unwrap_or_default()
    }

    pub fn set_server(&mut self, uri: &str) -> Result<()> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(anyhow!(
                "please enter a weather API server uri or leave blank to use the default"
            ));
        }
        self.server = Some(uri.trim_end_matches('/').to_string());
        Ok(())
    }

    pub fn set_units(&mut self, units: UnitSystem) -> Result<()> {
        if units == UnitSystem::Unknown {
            return Err(anyhow!("{UNKNOWN_UNITS}"));
        }
        self.units = Some(units.as_str().to_string());
        Ok(())
    }

    /// Reject values a hand-edited file can hold but the setters refuse.
    pub fn validate(&self) -> Result<()> {
        let unknown = self.units.as_deref().filter(|u| UnitSystem::parse(u) == UnitSystem::Unknown);
        if let Some(units) = unknown {
            return Err(anyhow!("units = {units:?}: {UNKNOWN_UNITS}"));
        }
        if self.server.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(anyhow!(
                "please enter a weather API server uri or leave blank to use the default"
            ));
        }
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_services() {
        let cfg = Config::default();
        assert_eq!(cfg.server_uri(), DEFAULT_SERVER_URI);
        assert_eq!(cfg.geoip_uri(), DEFAULT_GEOIP_URI);
        assert_eq!(cfg.unit_system(), UnitSystem::Auto);
    }

    #[test]
    fn empty_server_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg.set_server("  ").unwrap_err();
        assert!(err.to_string().contains("please enter a weather API server uri"));

        cfg.set_server("http://localhost:1234/").unwrap();
        assert_eq!(cfg.server_uri(), "http://localhost:1234");
    }

    #[test]
    fn unknown_units_are_rejected() {
        let mut cfg = Config::default();
        assert!(cfg.set_units(UnitSystem::Unknown).is_err());

        cfg.set_units(UnitSystem::Uk2).unwrap();
        assert_eq!(cfg.unit_system(), UnitSystem::Uk2);
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: Config = toml::from_str(
            r#"
            units = "si"

            [proxy]
            geocode_api_key = "GEO"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.unit_system(), UnitSystem::Si);
        assert_eq!(cfg.proxy.geocode_api_key.as_deref(), Some("GEO"));
        assert!(cfg.proxy.darksky_api_key.is_none());
        assert_eq!(cfg.server_uri(), DEFAULT_SERVER_URI);
    }

    #[test]
    fn unknown_units_in_file_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "units = \"kelvin\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Invalid config file"), "{message}");
        assert!(message.contains("kelvin"), "{message}");

        std::fs::write(&path, "server = \"\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn save_and_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut cfg = Config::default();
        cfg.set_server("https://weather.example.com").unwrap();
        cfg.days = Some(3);
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }
}
