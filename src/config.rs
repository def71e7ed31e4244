use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;

const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_TICKETS_FILE: &str = "sample_tickets.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub tickets_path: PathBuf,
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the process environment. Every field has a
    /// default except the Gemini API key, which stays `None` so callers can
    /// decide whether its absence is fatal.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: non_empty_var("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            tickets_path: non_empty_var("TRIAGE_TICKETS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TICKETS_FILE)),
            port: non_empty_var("TRIAGE_PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
