use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::error::WeatherError;

pub const KAKAO_API_KEY_VAR: &str = "KAKAO_API_KEY";
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";

pub const DEFAULT_KAKAO_BASE_URL: &str = "https://dapi.kakao.com";
pub const DEFAULT_KMA_BASE_URL: &str = "http://apis.data.go.kr";

/// Non-secret server settings, optionally read from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listen address, e.g. "0.0.0.0:8080".
    pub bind: String,

    /// Timeout applied to each outbound geocoding/forecast request.
    pub request_timeout_secs: u64,

    pub kakao_base_url: String,
    pub kma_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 10,
            kakao_base_url: DEFAULT_KAKAO_BASE_URL.to_string(),
            kma_base_url: DEFAULT_KMA_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbot", "weatherbot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Upstream credentials. Injected into the provider clients at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeys {
    /// Sent verbatim as the geocoder's `Authorization` header ("KakaoAK ...").
    pub kakao: String,
    /// Forecast API `serviceKey`.
    pub weather: String,
}

impl ApiKeys {
    /// Read both keys from the process environment.
    pub fn from_env() -> Result<Self, WeatherError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both keys through `lookup`; absent or blank values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WeatherError> {
        let require = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    WeatherError::Config(format!("{name} environment variable is not set"))
                })
        };

        Ok(Self {
            kakao: require(KAKAO_API_KEY_VAR)?,
            weather: require(WEATHER_API_KEY_VAR)?,
        })
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys")
            .field("kakao", &"<redacted>")
            .field("weather", &"<redacted>")
            .finish()
    }
}
