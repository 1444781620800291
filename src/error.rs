use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid hero catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid matchup data: {0}")]
    InvalidMatchup(String),

    #[error("Hero not found: {0}")]
    HeroNotFound(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
