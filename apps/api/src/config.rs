use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::analysis::scoring::ScoreWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("STORAGE_BACKEND must be 'file' or 'memory', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage_backend: StorageBackend,
    pub data_dir: PathBuf,
    pub history_cap: usize,
    pub score_weights: ScoreWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            storage_backend: StorageBackend::File,
            data_dir: PathBuf::from(".prep-data"),
            history_cap: 50,
            score_weights: ScoreWeights::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let weights = defaults.score_weights.clone();

        let history_cap: usize = env_or("HISTORY_CAP", defaults.history_cap)?;
        if history_cap == 0 {
            bail!("HISTORY_CAP must be at least 1");
        }

        Ok(Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            storage_backend: env_or("STORAGE_BACKEND", defaults.storage_backend)?,
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            history_cap,
            score_weights: ScoreWeights {
                base: env_or("SCORE_BASE", weights.base)?,
                per_category: env_or("SCORE_PER_CATEGORY", weights.per_category)?,
                per_field: env_or("SCORE_PER_FIELD", weights.per_field)?,
                long_jd_bonus: env_or("SCORE_LONG_JD_BONUS", weights.long_jd_bonus)?,
                long_jd_threshold: env_or("SCORE_LONG_JD_THRESHOLD", weights.long_jd_threshold)?,
                confidence_step: env_or("SCORE_CONFIDENCE_STEP", weights.confidence_step)?,
            },
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_var(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'"))
}
