use crate::keygen::DEFAULT_KEY_BITS;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub issuance: IssuanceConfig,
    #[serde(default)]
    pub root_ca_defaults: RootCaDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

#[derive(Debug, Deserialize, Clone)]
pub struct IssuanceConfig {
    #[serde(default = "default_key_bits")]
    pub key_bits: u32,
}

impl Default for IssuanceConfig {
    fn default() -> Self {
        Self {
            key_bits: default_key_bits(),
        }
    }
}

fn default_key_bits() -> u32 {
    DEFAULT_KEY_BITS
}

/// Subject used by the one-shot root generation mode (`--genroot`).
#[derive(Debug, Deserialize, Clone)]
pub struct RootCaDefaults {
    #[serde(default = "default_root_ca_cn")]
    pub common_name: String,
    #[serde(default = "default_root_ca_org")]
    pub organization: String,
    #[serde(default)]
    pub organizational_unit: String,
    #[serde(default)]
    pub country: String,
}

impl Default for RootCaDefaults {
    fn default() -> Self {
        Self {
            common_name: default_root_ca_cn(),
            organization: default_root_ca_org(),
            organizational_unit: String::new(),
            country: String::new(),
        }
    }
}

fn default_root_ca_cn() -> String {
    "webca".to_string()
}

fn default_root_ca_org() -> String {
    "webca root CA".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let config_str =
            fs::read_to_string(path).context(format!("Failed to read config file: {}", path))?;

        let config: AppConfig =
            toml::from_str(&config_str).context("Failed to parse config file")?;

        Ok(config)
    }
}
