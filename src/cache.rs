use crate::api::models::HeroesResponse;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CACHE_FILE: &str = "catalog.json";

/// Last catalog payload fetched, kept on disk so the roster survives
/// restarts without hitting the wiki API every time.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogCache {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub payload: HeroesResponse,
}

impl CatalogCache {
    pub fn new(source: &str, payload: HeroesResponse) -> Self {
        CatalogCache {
            source: source.to_string(),
            fetched_at: Utc::now(),
            payload,
        }
    }

    pub fn get_cache_path(data_dir: &Path) -> PathBuf {
        data_dir.join(CACHE_FILE)
    }

    /// `Ok(None)` when nothing has been cached yet.
    pub fn load(data_dir: &Path) -> Result<Option<Self>, AppError> {
        let path = Self::get_cache_path(data_dir);

        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| AppError::CacheError(format!("Failed to parse cache: {}", e))),
            Err(_) => Ok(None),
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), AppError> {
        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::CacheError(format!("Failed to create {}: {}", data_dir.display(), e))
        })?;

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::CacheError(format!("Failed to serialize cache: {}", e)))?;

        fs::write(Self::get_cache_path(data_dir), json)
            .map_err(|e| AppError::CacheError(format!("Failed to write cache: {}", e)))?;

        Ok(())
    }

    pub fn is_stale(&self, max_age_mins: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.fetched_at);
        age.num_minutes() > max_age_mins as i64
    }

    /// Usable only if it came from the same source and is fresh enough.
    pub fn is_usable_for(&self, source: &str, max_age_mins: u64) -> bool {
        self.source == source && !self.is_stale(max_age_mins)
    }
}
