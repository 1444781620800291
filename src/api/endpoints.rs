// Catalog endpoint used when MLBB_CATALOG_URL is not set

pub const HEROES_ENDPOINT: &str = "https://mlbb-wiki-api.vercel.app/api/heroes";

pub const USER_AGENT: &str = concat!("mlbb_draft/", env!("CARGO_PKG_VERSION"));
