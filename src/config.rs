use serde::Deserialize;

/// Development fallback for the internal API key. Fine for local compose
/// setups, unsafe anywhere else; deployments must set `INTERNAL_API_KEY`.
pub const DEFAULT_INTERNAL_API_KEY: &str = "dev_internal_key_123";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub internal_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let internal_api_key = std::env::var("INTERNAL_API_KEY")
            .unwrap_or_else(|_| DEFAULT_INTERNAL_API_KEY.to_string());
        Ok(Self {
            database_url,
            internal_api_key,
        })
    }

    pub fn uses_default_internal_key(&self) -> bool {
        self.internal_api_key == DEFAULT_INTERNAL_API_KEY
    }
}
