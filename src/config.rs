//! TOML configuration parsing.
//!
//! Every section is optional. A missing config file is not an error for the
//! CLI: [`Config::minimal`] supplies the public endpoints and a database under
//! `./data/`.
//!
//! ```toml
//! [db]
//! path = "./data/nameinfo.sqlite"
//!
//! [lookup]
//! gender_url = "https://api.genderize.io"
//! age_url = "https://api.agify.io"
//! nationality_url = "https://api.nationalize.io"
//! timeout_secs = 30
//! country = "US"
//!
//! [display]
//! flag_base_url = "https://flagcdn.com/w80"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/nameinfo.sqlite")
}

#[derive(Debug, Deserialize, Clone)]
pub struct LookupConfig {
    #[serde(default = "default_gender_url")]
    pub gender_url: String,
    #[serde(default = "default_age_url")]
    pub age_url: String,
    #[serde(default = "default_nationality_url")]
    pub nationality_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// ISO country hint sent as `country_id`. Falls back to the system locale.
    #[serde(default)]
    pub country: Option<String>,
    /// Optional key for the paid tiers of the inference services.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            gender_url: default_gender_url(),
            age_url: default_age_url(),
            nationality_url: default_nationality_url(),
            timeout_secs: default_timeout_secs(),
            country: None,
            api_key: None,
        }
    }
}

fn default_gender_url() -> String {
    "https://api.genderize.io".to_string()
}
fn default_age_url() -> String {
    "https://api.agify.io".to_string()
}
fn default_nationality_url() -> String {
    "https://api.nationalize.io".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_flag_base_url")]
    pub flag_base_url: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            flag_base_url: default_flag_base_url(),
        }
    }
}

fn default_flag_base_url() -> String {
    "https://flagcdn.com/w80".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file is present.
    pub fn minimal() -> Self {
        Self {
            db: DbConfig::default(),
            lookup: LookupConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl LookupConfig {
    /// The API key from config, or from `NAMEINFO_API_KEY` when unset.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("NAMEINFO_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::minimal())
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.lookup.timeout_secs == 0 {
        anyhow::bail!("lookup.timeout_secs must be > 0");
    }

    for (key, url) in [
        ("lookup.gender_url", &config.lookup.gender_url),
        ("lookup.age_url", &config.lookup.age_url),
        ("lookup.nationality_url", &config.lookup.nationality_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("{} must be an http(s) URL, got '{}'", key, url);
        }
    }

    if let Some(country) = &config.lookup.country {
        parse_country(country).with_context(|| "invalid lookup.country")?;
    }

    Ok(())
}

/// Check a country hint is a two-letter ISO code and return it uppercased.
pub fn parse_country(country: &str) -> Result<String> {
    let country = country.trim();
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        anyhow::bail!("country must be a two-letter ISO code, got '{}'", country);
    }
    Ok(country.to_ascii_uppercase())
}
