use crate::domain::device::{DeviceRange, CARD_TIMESTAMP_FORMAT};
use anyhow::Context;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub assets: AssetSettings,
    #[serde(default)]
    pub device: DeviceSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataSettings {
    pub production_file: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            production_file: PathBuf::from("production_data.json"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AssetSettings {
    pub logo_path: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            logo_path: PathBuf::from("images/logo.svg"),
        }
    }
}

/// Period preselected in the device view, as `YYYY-MM-DD HH:MM`.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DeviceSettings {
    pub default_start: String,
    pub default_end: String,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            default_start: "2025-06-01 08:00".to_string(),
            default_end: "2025-07-01 18:00".to_string(),
        }
    }
}

impl DeviceSettings {
    pub fn default_range(&self) -> anyhow::Result<DeviceRange> {
        let parse = |value: &str, key: &str| {
            NaiveDateTime::parse_from_str(value, CARD_TIMESTAMP_FORMAT)
                .with_context(|| format!("device.{} must look like 2025-06-01 08:00, got {:?}", key, value))
        };
        Ok(DeviceRange {
            start: parse(&self.default_start, "default_start")?,
            end: parse(&self.default_end, "default_end")?,
        })
    }
}

/// Load `config/dashboard.*` (optional) overridden by `DASHBOARD__*` variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from("config/dashboard")
}

pub fn load_app_config_from(name: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name).required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
