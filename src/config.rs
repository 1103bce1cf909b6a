use std::env;
use std::path::PathBuf;

pub struct Config {
    pub base_url: String,
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".taskpilot-session.json")),
        }
    }
}
