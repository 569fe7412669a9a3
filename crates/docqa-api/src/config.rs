use std::env;
use std::path::PathBuf;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub upload_dir: PathBuf,
    /// Optional TOML file feeding the pipeline configuration
    pub config_file: Option<PathBuf>,
    /// OpenAI API key; requests fail with a recoverable service error when absent
    pub openai_api_key: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("DOCQA_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8000);

        let cors_origin =
            env::var("DOCQA_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let upload_dir =
            PathBuf::from(env::var("DOCQA_UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

        let config_file = env::var("DOCQA_CONFIG").ok().map(PathBuf::from);

        let openai_api_key = env::var("OPENAI_API_KEY").ok();

        Self { port, cors_origin, upload_dir, config_file, openai_api_key }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
