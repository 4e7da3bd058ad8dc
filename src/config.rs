//! Runtime configuration
//!
//! Read once at startup and passed down explicitly.

use std::path::PathBuf;

const DEFAULT_AI_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
const DEFAULT_AI_MODEL: &str = "google/gemini-3-flash-preview";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;

/// AI gateway settings
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer token; requests fail with `NotConfigured` when absent
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
            timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
        }
    }
}

impl AiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("MACROMATE_AI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            base_url: std::env::var("MACROMATE_AI_BASE_URL").unwrap_or(defaults.base_url),
            model: std::env::var("MACROMATE_AI_MODEL").unwrap_or(defaults.model),
            timeout_secs: std::env::var("MACROMATE_AI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub ai: AiConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_path: database_path(),
            ai: AiConfig::from_env(),
        }
    }
}

/// Get the database path from environment or use default
pub fn database_path() -> PathBuf {
    std::env::var("MACROMATE_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("macromate.db");
            path
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_AI_BASE_URL);
        assert_eq!(config.model, DEFAULT_AI_MODEL);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_default_database_file_name() {
        if std::env::var("MACROMATE_DATABASE_PATH").is_err() {
            assert!(database_path().ends_with("data/macromate.db"));
        }
    }
}
