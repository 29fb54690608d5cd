// File: src/config.rs
// Purpose: Configuration parsing from oriole.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub cookie: CookieConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Paths, domains and resource URL conventions of the admin application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Prefix of every admin route (default: "admin")
    #[serde(default = "default_admin_base_path")]
    pub admin_base_path: String,

    #[serde(default = "default_public_base_path")]
    pub public_base_path: String,

    /// Host the admin routes are bound to. Empty means any host.
    #[serde(default)]
    pub admin_domain: String,

    /// Host of the public site. Empty means the current request host.
    #[serde(default)]
    pub public_domain: String,

    #[serde(default = "default_resource_url_separator")]
    pub resource_url_separator: String,

    #[serde(default = "default_resource_url_copy_postfix")]
    pub resource_url_copy_postfix: String,

    #[serde(default = "default_resource_url_empty")]
    pub resource_url_empty: String,

    #[serde(default)]
    pub resource_404_id: Option<u64>,
}

/// Defaults applied to every cookie the framework sets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CookieConfig {
    #[serde(default = "default_cookie_prefix")]
    pub prefix: String,

    /// Lifetime in days. 0 makes session cookies.
    #[serde(default = "default_cookie_expires")]
    pub expires: u32,

    #[serde(default = "default_cookie_path")]
    pub path: String,

    #[serde(default)]
    pub domain: String,

    #[serde(default)]
    pub secure: bool,

    #[serde(default)]
    pub http_only: bool,

    #[serde(default = "default_same_site")]
    pub same_site: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

// Default values
fn default_admin_base_path() -> String {
    "admin".to_string()
}

fn default_public_base_path() -> String {
    "/".to_string()
}

fn default_resource_url_separator() -> String {
    "-".to_string()
}

fn default_resource_url_copy_postfix() -> String {
    "copy".to_string()
}

fn default_resource_url_empty() -> String {
    "empty".to_string()
}

fn default_cookie_prefix() -> String {
    "oriole_".to_string()
}

fn default_cookie_expires() -> u32 {
    365
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_same_site() -> String {
    "Lax".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

// Default implementations
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_base_path: default_admin_base_path(),
            public_base_path: default_public_base_path(),
            admin_domain: String::new(),
            public_domain: String::new(),
            resource_url_separator: default_resource_url_separator(),
            resource_url_copy_postfix: default_resource_url_copy_postfix(),
            resource_url_empty: default_resource_url_empty(),
            resource_404_id: None,
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            prefix: default_cookie_prefix(),
            expires: default_cookie_expires(),
            path: default_cookie_path(),
            domain: String::new(),
            secure: false,
            http_only: false,
            same_site: default_same_site(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for a listener.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./oriole.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("oriole.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app.admin_base_path, "admin");
        assert_eq!(config.app.public_base_path, "/");
        assert_eq!(config.app.resource_404_id, None);
        assert_eq!(config.cookie.prefix, "oriole_");
        assert_eq!(config.cookie.expires, 365);
        assert_eq!(config.cookie.same_site, "Lax");
        assert_eq!(config.server.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [app]
            admin_base_path = "backoffice"
            admin_domain = "admin.example.com"
            resource_404_id = 7

            [cookie]
            secure = true
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.app.admin_base_path, "backoffice");
        assert_eq!(config.app.admin_domain, "admin.example.com");
        assert_eq!(config.app.resource_404_id, Some(7));
        assert_eq!(config.app.resource_url_separator, "-");
        assert!(config.cookie.secure);
        assert_eq!(config.cookie.path, "/");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load("does/not/exist/oriole.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("oriole-bad-{}.toml", std::process::id()));
        fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));

        fs::remove_file(&path).unwrap();
    }
}
