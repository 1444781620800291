use crate::api::endpoints::USER_AGENT;
use crate::error::AppError;
use governor::{clock::DefaultClock, state::{InMemoryState, NotKeyed}, Quota, RateLimiter};
use std::fs;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::HeroesResponse;

const MAX_RETRIES: u32 = 3;

/// Anything that can hand over the raw hero catalog.
pub trait HeroSource {
    fn fetch(&self) -> Result<HeroesResponse, AppError>;

    /// Human readable origin, used for cache bookkeeping and messages.
    fn describe(&self) -> String;
}

pub struct CatalogClient {
    url: String,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl CatalogClient {
    pub fn new(url: impl Into<String>) -> Self {
        // The wiki API is a shared free host, stay well below its limits
        let per_second = NonZeroU32::new(2).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));
        CatalogClient {
            url: url.into(),
            rate_limiter,
        }
    }

    fn wait_for_permit(&self) {
        while self.rate_limiter.check().is_err() {
            thread::sleep(Duration::from_millis(50));
        }
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let mut retry_count = 0;

        loop {
            self.wait_for_permit();
            debug!(url, attempt = retry_count + 1, "requesting hero catalog");

            let response = ureq::get(url).set("User-Agent", USER_AGENT).call();

            match response {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    warn!(wait_ms, "catalog host rate limited us, backing off");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, _)) => {
                    return Err(AppError::ApiError(format!(
                        "Failed to fetch heroes: HTTP {}",
                        code
                    )));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }
}

impl HeroSource for CatalogClient {
    fn fetch(&self) -> Result<HeroesResponse, AppError> {
        let body = self.execute_request(&self.url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads a catalog payload saved to disk, same shape as the HTTP response.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl HeroSource for FileSource {
    fn fetch(&self) -> Result<HeroesResponse, AppError> {
        let body = fs::read_to_string(&self.path).map_err(|e| {
            AppError::ApiError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_source_reads_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"success": false, "data": []}}"#).unwrap();

        let source = FileSource::new(file.path());
        let response = source.fetch().unwrap();
        assert!(!response.success);
        assert!(response.data.is_empty());
        assert!(source.describe().starts_with("file://"));
    }

    #[test]
    fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("nope.json"));
        assert!(matches!(source.fetch(), Err(AppError::ApiError(_))));
    }

    #[test]
    fn test_file_source_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let source = FileSource::new(file.path());
        assert!(matches!(source.fetch(), Err(AppError::JsonError(_))));
    }
}
