use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{ServiceError, ServiceResult};
use crate::randomizer::OpenQuota;

/// Service configuration, loaded once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_server")]
    pub server: ServerConfig,

    #[serde(default = "default_assets")]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub randomizer: RandomizerConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Hero portrait assets
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding `Icon-<key>.webp` files. Missing files are not an error.
    #[serde(default = "default_portrait_dir")]
    pub portrait_dir: PathBuf,

    /// Edge length in pixels of the square portraits served to clients
    #[serde(default = "default_portrait_size")]
    pub portrait_size: u32,
}

/// Randomizer behaviour
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RandomizerConfig {
    /// Fixed RNG seed. When unset the generator is seeded from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Role quota table used by the Open mode
    #[serde(default)]
    pub open_quota: OpenQuota,
}

impl ServiceConfig {
    /// Load configuration from `config.toml` (optional) and
    /// `TEAM_RANDOMIZER__*` environment variables.
    pub fn load() -> ServiceResult<Self> {
        Self::load_from(File::with_name("config").required(false))
    }

    fn load_from(file: File<config::FileSourceFile, config::FileFormat>) -> ServiceResult<Self> {
        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("TEAM_RANDOMIZER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ServiceError::Config {
                message: format!("Failed to build config: {}", e),
            })?
            .try_deserialize()
            .map_err(|e| ServiceError::Config {
                message: format!("Failed to deserialize config: {}", e),
            })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            assets: default_assets(),
            randomizer: RandomizerConfig::default(),
        }
    }
}

// ==================== Default Value Functions ====================

fn default_server() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_assets() -> AssetsConfig {
    AssetsConfig {
        portrait_dir: default_portrait_dir(),
        portrait_size: default_portrait_size(),
    }
}

fn default_portrait_dir() -> PathBuf {
    PathBuf::from("./assets")
}

fn default_portrait_size() -> u32 {
    50
}
