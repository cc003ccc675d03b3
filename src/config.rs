use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend, e.g. `http://localhost:5000`.
    pub api_base_url: String,
    /// Directory holding the persisted state blob.
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            api_base_url: env::var("PORTFOLIO_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            data_dir: env::var("PORTFOLIO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
