use crate::analysis::recommender::DEFAULT_LIMIT;
use crate::api::endpoints::HEROES_ENDPOINT;
use crate::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_CACHE_MAX_AGE_MINS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_url: String,
    pub data_dir: PathBuf,
    pub meta_path: Option<PathBuf>,
    pub matchup_seed: Option<u64>,
    pub cache_max_age_mins: u64,
    pub suggestion_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_url = lookup("MLBB_CATALOG_URL").unwrap_or_else(|| HEROES_ENDPOINT.to_string());

        let data_dir = lookup("MLBB_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let meta_path = lookup("MLBB_META_PATH").map(PathBuf::from);

        let matchup_seed = parse_var(&lookup, "MLBB_MATCHUP_SEED")?;

        let cache_max_age_mins =
            parse_var(&lookup, "MLBB_CACHE_MAX_AGE_MINS")?.unwrap_or(DEFAULT_CACHE_MAX_AGE_MINS);

        let suggestion_limit =
            parse_var(&lookup, "MLBB_SUGGESTION_LIMIT")?.unwrap_or(DEFAULT_LIMIT);

        Ok(Config {
            catalog_url,
            data_dir,
            meta_path,
            matchup_seed,
            cache_max_age_mins,
            suggestion_limit,
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mlbb_draft")
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::ConfigError(format!("{} must be a number, got '{}'", key, raw))
        }),
    }
}
