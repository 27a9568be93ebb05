use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use motion_api::DEFAULT_BASE_URL;
use motion_core::{time::parse_timezone, Priority, TaskDuration};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::{ensure_motion_home, motion_home};

pub const API_KEY_ENV: &str = "MOTION_API_KEY";
pub const BASE_URL_ENV: &str = "MOTION_BASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSection,
    pub defaults: Defaults,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Fallbacks applied when a command or tool leaves a field unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub workspace_id: Option<String>,
    pub project_id: Option<String>,
    /// One of ASAP, HIGH, MEDIUM, LOW.
    pub priority: Option<String>,
    /// Minutes, or NONE / REMINDER.
    pub duration: Option<String>,
}

impl Defaults {
    pub fn priority(&self) -> Option<Priority> {
        self.priority.as_deref().and_then(Priority::from_name)
    }

    pub fn duration(&self) -> Option<TaskDuration> {
        self.duration.as_deref().and_then(TaskDuration::parse)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// IANA zone used for rendering dates and "today".
    pub timezone: String,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

impl Config {
    pub fn api_key(&self) -> Result<&str> {
        match self.api.api_key.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => Ok(k),
            _ => bail!(
                "missing Motion API key; set {API_KEY_ENV} or add api_key under [api] in {}",
                config_path_display()
            ),
        }
    }

    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.display.timezone).context("[display] timezone")
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
    }

    /// Rendered TOML with the API key masked.
    pub fn to_masked_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        shown.api.api_key = shown.api.api_key.as_deref().map(mask_secret);
        toml::to_string_pretty(&shown).context("serialize config")
    }
}

fn mask_secret(secret: &str) -> String {
    let n = secret.chars().count();
    if n <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(n - 4).collect();
    format!("****{tail}")
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_motion_home()?.join("config.toml"))
}

fn config_path_display() -> String {
    motion_home()
        .map(|p| p.join("config.toml").display().to_string())
        .unwrap_or_else(|_| "~/.motion/config.toml".to_string())
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

/// File config (if any) with environment overrides applied.
pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    let mut cfg = if p.exists() {
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        parse_config(&s)?
    } else {
        Config::default()
    };
    cfg.apply_env();
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<String> {
    let p = config_path()?;
    if p.exists() {
        return Ok(format!("Config already exists: {}", p.display()));
    }
    save_config(&Config::default())?;
    Ok(format!(
        "Wrote {}\nAdd your API key under [api], or export {API_KEY_ENV}.",
        p.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let cfg = parse_config(
            r#"
[api]
api_key = "abc123"

[defaults]
priority = "high"
duration = "45"
"#,
        )
        .unwrap();
        assert_eq!(cfg.api_key().unwrap(), "abc123");
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.defaults.priority(), Some(Priority::High));
        assert_eq!(cfg.defaults.duration(), Some(TaskDuration::Minutes(45)));
        assert_eq!(cfg.timezone().unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn missing_key_is_reported() {
        let cfg = parse_config("").unwrap();
        let err = cfg.api_key().unwrap_err().to_string();
        assert!(err.contains(API_KEY_ENV), "{err}");
    }

    #[test]
    fn invalid_defaults_are_ignored() {
        let cfg = parse_config("[defaults]\npriority = \"soon\"\nduration = \"0\"\n").unwrap();
        assert_eq!(cfg.defaults.priority(), None);
        assert_eq!(cfg.defaults.duration(), None);
    }

    #[test]
    fn masked_output_hides_key() {
        let mut cfg = Config::default();
        cfg.api.api_key = Some("sk-live-abcdef".to_string());
        let shown = cfg.to_masked_toml().unwrap();
        assert!(shown.contains("****cdef"));
        assert!(!shown.contains("sk-live"));
    }
}
