use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::gemini::GeminiConfig;
use crate::state::{default_database_path, ensure_chequemate_home};

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_DB_PATH: &str = "CHEQUEMATE_DB_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSection {
    pub model: String,
    pub base_url: String,
    /// Prefer the GEMINI_API_KEY environment variable over storing it here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Defaults to `<home>/cheque_processing.db`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: None,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Environment wins over the file. Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        if let Some(key) = get(ENV_API_KEY) {
            self.gemini.api_key = Some(key);
        }
        if let Some(path) = get(ENV_DB_PATH) {
            self.database.path = Some(path);
        }
    }

    pub fn gemini_config(&self) -> Result<GeminiConfig> {
        let Some(api_key) = self.gemini.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            bail!(
                "no Gemini API key configured.\n\
Set {ENV_API_KEY} or add `api_key` under [gemini] in {}",
                config_path()?.display()
            );
        };
        Ok(GeminiConfig {
            api_key,
            model: self.gemini.model.clone(),
            base_url: self.gemini.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database.path {
            Some(p) => Ok(PathBuf::from(p)),
            None => default_database_path(),
        }
    }

    /// Copy safe to print: the API key is masked.
    pub fn redacted(&self) -> Config {
        let mut c = self.clone();
        if let Some(key) = &c.gemini.api_key {
            c.gemini.api_key = Some(mask_secret(key));
        }
        c
    }
}

fn mask_secret(s: &str) -> String {
    let tail: String = s.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    if s.chars().count() <= 8 {
        return "****".to_string();
    }
    format!("****{tail}")
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_chequemate_home()?.join("config.toml"))
}

/// Read the config file (or defaults) and apply environment overrides.
pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    let mut cfg = if p.exists() {
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        toml::from_str(&s).context("parse config.toml")?
    } else {
        Config::default()
    };
    cfg.apply_env(|k| std::env::var(k).ok());
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.gemini.model, "gemini-2.0-flash");
        assert_eq!(cfg.logging.level, "warn");
        assert!(cfg.gemini.api_key.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[gemini]\nmodel = \"gemini-1.5-pro\"\n").unwrap();
        assert_eq!(cfg.gemini.model, "gemini-1.5-pro");
        assert_eq!(cfg.gemini.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(cfg.logging.level, "warn");
        assert!(cfg.database.path.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut cfg: Config =
            toml::from_str("[gemini]\napi_key = \"from-file\"\n[database]\npath = \"/tmp/a.db\"\n").unwrap();
        cfg.apply_env(env(&[(ENV_API_KEY, "from-env"), (ENV_DB_PATH, "  ")]));
        assert_eq!(cfg.gemini.api_key.as_deref(), Some("from-env"));
        assert_eq!(cfg.database.path.as_deref(), Some("/tmp/a.db"));
        assert_eq!(cfg.database_path().unwrap(), PathBuf::from("/tmp/a.db"));
    }

    #[test]
    fn test_gemini_config_trims_base_url() {
        let mut cfg = Config::default();
        cfg.gemini.base_url = "http://localhost:8080/".to_string();
        cfg.apply_env(env(&[(ENV_API_KEY, "AIza-test-key")]));
        let g = cfg.gemini_config().unwrap();
        assert_eq!(g.base_url, "http://localhost:8080");
        assert_eq!(g.api_key, "AIza-test-key");
    }

    #[test]
    fn test_redacted_masks_key() {
        let mut cfg = Config::default();
        cfg.gemini.api_key = Some("AIzaSyExampleKey1234".to_string());
        assert_eq!(cfg.redacted().gemini.api_key.as_deref(), Some("****1234"));
        cfg.gemini.api_key = Some("short".to_string());
        assert_eq!(cfg.redacted().gemini.api_key.as_deref(), Some("****"));
    }

    #[test]
    fn test_serialized_default_round_trips() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!s.contains("api_key"));
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, Config::default());
    }
}
