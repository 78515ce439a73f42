// src/config/search.rs
//! Search settings: answer API, extraction thresholds, report store.
//!
//! Lookup order for [`load_config_default`]:
//! 1) `$SCOUT_CONFIG_PATH`
//! 2) `config/search.toml`
//! 3) `config/search.json`
//! 4) built-in defaults

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SearchError;
use crate::extract::ExtractOptions;

pub const ENV_CONFIG_PATH: &str = "SCOUT_CONFIG_PATH";
pub const ENV_API_KEY: &str = "PERPLEXITY_API_KEY";

fn default_api_url() -> String {
    "https://api.perplexity.ai/chat/completions".to_string()
}
fn default_model() -> String {
    "sonar-pro".to_string()
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_api_key() -> String {
    "ENV".to_string()
}
fn default_store_path() -> PathBuf {
    PathBuf::from("data/reports.json")
}
fn default_store_cap() -> usize {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Number of reports retained, newest first.
    #[serde(default = "default_store_cap")]
    pub cap: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            cap: default_store_cap(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// "ENV" means: read from `PERPLEXITY_API_KEY` when the client is built.
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default)]
    pub extract: ExtractOptions,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            api_key: default_api_key(),
            extract: ExtractOptions::default(),
            store: StoreConfig::default(),
        }
    }
}

impl SearchConfig {
    /// The literal key, or the env var when the key is "ENV".
    pub fn resolve_api_key(&self) -> Result<String, SearchError> {
        let key = if self.api_key.trim().eq_ignore_ascii_case("env") {
            std::env::var(ENV_API_KEY).unwrap_or_default()
        } else {
            self.api_key.clone()
        };
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(SearchError::Config(format!(
                "answer API key not configured (set {ENV_API_KEY})"
            )));
        }
        Ok(key)
    }

    fn sanitize(mut self) -> Self {
        if !(0.0..=2.0).contains(&self.temperature) {
            self.temperature = default_temperature();
        }
        if self.store.cap == 0 {
            self.store.cap = default_store_cap();
        }
        self
    }
}

/// Load from an explicit path. TOML or JSON, chosen by extension then by content.
pub fn load_config_from(path: &Path) -> Result<SearchConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading search config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing search config {}", path.display()))
}

pub fn load_config_default() -> Result<SearchConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        }
        return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
    }
    let toml_p = PathBuf::from("config/search.toml");
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from("config/search.json");
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    Ok(SearchConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<SearchConfig> {
    let cfg = match hint_ext {
        "toml" => toml::from_str::<SearchConfig>(s)?,
        "json" => serde_json::from_str::<SearchConfig>(s)?,
        _ => match serde_json::from_str::<SearchConfig>(s) {
            Ok(c) => c,
            Err(_) => toml::from_str::<SearchConfig>(s)
                .map_err(|e| anyhow!("unsupported search config format: {e}"))?,
        },
    };
    Ok(cfg.sanitize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn toml_sections_and_defaults() {
        let s = r#"
model = "sonar"
temperature = 9.0

[extract]
min_line_len = 20

[store]
cap = 0
"#;
        let cfg = parse_config(s, "toml").unwrap();
        assert_eq!(cfg.model, "sonar");
        assert_eq!(cfg.temperature, 0.3);
        assert_eq!(cfg.extract.min_line_len, 20);
        assert_eq!(cfg.extract.min_description_len, 10);
        assert_eq!(cfg.store.cap, 30);
        assert_eq!(cfg.max_tokens, 2000);
    }

    #[test]
    fn json_without_hint_is_detected() {
        let cfg = parse_config(r#"{"max_tokens": 500}"#, "").unwrap();
        assert_eq!(cfg.max_tokens, 500);
        assert_eq!(cfg.api_key, "ENV");
    }

    #[serial_test::serial]
    #[test]
    fn api_key_resolves_from_env_or_fails() {
        let cfg = SearchConfig::default();

        env::remove_var(ENV_API_KEY);
        let err = cfg.resolve_api_key().unwrap_err();
        assert!(err.is_config());

        env::set_var(ENV_API_KEY, " pplx-123 ");
        assert_eq!(cfg.resolve_api_key().unwrap(), "pplx-123");
        env::remove_var(ENV_API_KEY);

        let literal = SearchConfig {
            api_key: "literal".into(),
            ..Default::default()
        };
        assert_eq!(literal.resolve_api_key().unwrap(), "literal");
    }
}
