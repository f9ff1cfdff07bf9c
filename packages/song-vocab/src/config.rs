use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::security::SecretString;
use crate::stores::DEFAULT_DATABASE_URL;
use crate::vocabulary::DEFAULT_MODEL;

const DATABASE_URL_VAR: &str = "VOCAB_DATABASE_URL";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: SecretString,
    pub google_cse_id: String,
    pub gemini_api_key: SecretString,
    pub gemini_model: String,
    pub database_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| non_blank(lookup(key));

        let google_api_key = get("GOOGLE_API_KEY").context("GOOGLE_API_KEY must be set")?;

        Ok(Self {
            google_cse_id: get("GOOGLE_CSE_ID").context("GOOGLE_CSE_ID must be set")?,
            // One Google key usually covers both APIs
            gemini_api_key: get("GEMINI_API_KEY")
                .unwrap_or_else(|| google_api_key.clone())
                .into(),
            google_api_key: google_api_key.into(),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            database_url: Self::resolve_database_url(None, &lookup),
        })
    }

    /// Database URL for commands that need no API credentials.
    pub fn database_url(flag: Option<String>) -> String {
        let _ = dotenv();
        Self::resolve_database_url(flag, |key| env::var(key).ok())
    }

    /// `flag`, then `VOCAB_DATABASE_URL`, then the default file. Blank values
    /// count as unset.
    pub fn resolve_database_url(
        flag: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> String {
        non_blank(flag)
            .or_else(|| non_blank(lookup(DATABASE_URL_VAR)))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }

    /// Apply a `--database` override.
    pub fn with_database_flag(mut self, flag: Option<String>) -> Self {
        if let Some(url) = non_blank(flag) {
            self.database_url = url;
        }
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_and_key_fallback() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "google-key"),
            ("GOOGLE_CSE_ID", "engine"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_api_key.expose(), "google-key");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.database_url, "sqlite://vocabulary.db?mode=rwc");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "google-key"),
            ("GOOGLE_CSE_ID", "engine"),
            ("GEMINI_API_KEY", "gemini-key"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("VOCAB_DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_api_key.expose(), "gemini-key");
        assert_eq!(config.gemini_model, "gemini-1.5-pro");
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_missing_search_credentials() {
        let err = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "k")])).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_CSE_ID"));

        let err = Config::from_lookup(lookup(&[("GOOGLE_CSE_ID", "e"), ("GOOGLE_API_KEY", " ")]))
            .unwrap_err();
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "super-secret"),
            ("GOOGLE_CSE_ID", "engine"),
        ]))
        .unwrap();

        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_blank_database_url_uses_default() {
        let vars = lookup(&[("VOCAB_DATABASE_URL", "  ")]);

        assert_eq!(
            Config::resolve_database_url(None, &vars),
            "sqlite://vocabulary.db?mode=rwc"
        );
        assert_eq!(
            Config::resolve_database_url(Some(String::new()), &vars),
            "sqlite://vocabulary.db?mode=rwc"
        );
        assert_eq!(
            Config::resolve_database_url(Some("sqlite::memory:".into()), &vars),
            "sqlite::memory:"
        );

        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "google-key"),
            ("GOOGLE_CSE_ID", "engine"),
            ("VOCAB_DATABASE_URL", ""),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite://vocabulary.db?mode=rwc");
    }

    #[test]
    fn test_database_flag_wins_unless_blank() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "google-key"),
            ("GOOGLE_CSE_ID", "engine"),
            ("VOCAB_DATABASE_URL", "sqlite://env.db"),
        ]))
        .unwrap();

        let kept = config.clone().with_database_flag(Some(" ".into()));
        assert_eq!(kept.database_url, "sqlite://env.db");

        let overridden = config.with_database_flag(Some("sqlite://flag.db".into()));
        assert_eq!(overridden.database_url, "sqlite://flag.db");
    }
}
