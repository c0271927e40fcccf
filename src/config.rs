//! Application config loader (strict parsing).
//!
//! Every field has a default equal to the values the frontend registration
//! was written against, so an absent file or an empty document yields the
//! stock development setup.

use crate::constants::frontend;
use crate::error::{AppError, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub cors: CorsSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerSection::default(),
            cors: CorsSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AppError::InvalidConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.cors.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            AppError::InvalidConfig(format!(
                "server.listen `{}` must be a valid socket address",
                self.listen
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsSection {
    #[serde(default = "default_path_pattern")]
    pub path_pattern: String,

    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,

    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,

    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            path_pattern: default_path_pattern(),
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
            allow_credentials: default_allow_credentials(),
        }
    }
}

impl CorsSection {
    pub fn validate(&self) -> Result<()> {
        if self.allowed_origins.iter().all(|origin| origin.trim().is_empty()) {
            return Err(AppError::InvalidConfig(
                "cors.allowed_origins must not be empty".into(),
            ));
        }
        if self.allowed_methods.iter().all(|method| method.trim().is_empty()) {
            return Err(AppError::InvalidConfig(
                "cors.allowed_methods must not be empty".into(),
            ));
        }
        Ok(())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_string(),
        source,
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    // An empty document deserializes as YAML null.
    let cfg: AppConfig = if s.trim().is_empty() {
        AppConfig::default()
    } else {
        serde_yaml::from_str(s)?
    };
    cfg.validate()?;
    Ok(cfg)
}

fn default_version() -> u32 {
    1
}
fn default_listen() -> String {
    frontend::LISTEN.into()
}
fn default_path_pattern() -> String {
    frontend::PATH_PATTERN.into()
}
fn default_allowed_origins() -> Vec<String> {
    vec![frontend::ORIGIN.into()]
}
fn default_allowed_methods() -> Vec<String> {
    frontend::METHODS.iter().map(|m| m.to_string()).collect()
}
fn default_allowed_headers() -> Vec<String> {
    vec![frontend::ALLOWED_HEADERS.into()]
}
fn default_allow_credentials() -> bool {
    frontend::ALLOW_CREDENTIALS
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
