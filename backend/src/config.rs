use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    /// JSON asset catalogue; bundled defaults are used when unset
    pub assets_file: Option<PathBuf>,
    /// `*` allows any origin
    pub cors_origin: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8000,
            assets_file: None,
            cors_origin: "http://localhost:3000".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {}", raw))?,
            None => defaults.port,
        };

        let log_format = match get("LOG_FORMAT").map(|v| v.trim().to_lowercase()) {
            None => defaults.log_format,
            Some(v) if v == "text" => LogFormat::Text,
            Some(v) if v == "json" => LogFormat::Json,
            Some(other) => bail!("Invalid LOG_FORMAT: {} (expected text or json)", other),
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            assets_file: get("ASSETS_FILE").map(PathBuf::from),
            cors_origin: get("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.listen_addr(), "0.0.0.0:8000");
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert!(config.assets_file.is_none());
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9100"),
            ("BIND_ADDR", "127.0.0.1"),
            ("ASSETS_FILE", "/etc/margin/assets.json"),
            ("CORS_ORIGIN", "*"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr(), "127.0.0.1:9100");
        assert_eq!(config.assets_file, Some(PathBuf::from("/etc/margin/assets.json")));
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config_from(&[("PORT", ""), ("ASSETS_FILE", "  ")]).unwrap();
        assert_eq!(config.port, 8000);
        assert!(config.assets_file.is_none());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("PORT", "70000")]).is_err());
        assert!(config_from(&[("LOG_FORMAT", "xml")]).is_err());
    }
}
