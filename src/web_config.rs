//! The startup registrar: installs the frontend's CORS rule exactly once.

use crate::config::CorsSection;
use crate::constants::frontend;
use crate::registry::{CorsMappings, CorsRegistry, RegistryError};
use std::sync::Arc;

/// Implemented by anything that contributes CORS mappings at startup.
pub trait CorsConfigurer {
    fn add_cors_mappings(&self, registry: &mut CorsRegistry);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    path_pattern: String,
    allowed_origins: Vec<String>,
    allowed_methods: Vec<String>,
    allowed_headers: Vec<String>,
    allow_credentials: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            path_pattern: frontend::PATH_PATTERN.into(),
            allowed_origins: vec![frontend::ORIGIN.into()],
            allowed_methods: frontend::METHODS.iter().map(|m| m.to_string()).collect(),
            allowed_headers: vec![frontend::ALLOWED_HEADERS.into()],
            allow_credentials: frontend::ALLOW_CREDENTIALS,
        }
    }
}

impl WebConfig {
    pub fn from_config(section: &CorsSection) -> Self {
        Self {
            path_pattern: section.path_pattern.clone(),
            allowed_origins: section.allowed_origins.clone(),
            allowed_methods: section.allowed_methods.clone(),
            allowed_headers: section.allowed_headers.clone(),
            allow_credentials: section.allow_credentials,
        }
    }
}

impl CorsConfigurer for WebConfig {
    fn add_cors_mappings(&self, registry: &mut CorsRegistry) {
        registry
            .add_mapping(self.path_pattern.as_str())
            .allowed_origins(&self.allowed_origins)
            .allowed_methods(&self.allowed_methods)
            .allowed_headers(&self.allowed_headers)
            .allow_credentials(self.allow_credentials);
    }
}

/// Runs `configurer` against a fresh registry and freezes the result.
pub fn register<C>(configurer: &C) -> Result<Arc<CorsMappings>, RegistryError>
where
    C: CorsConfigurer + ?Sized,
{
    let mut registry = CorsRegistry::new();
    configurer.add_cors_mappings(&mut registry);
    let mappings = registry.build()?;

    tracing::info!(
        mappings = mappings.len(),
        patterns = ?mappings.patterns().collect::<Vec<_>>(),
        "CORS mappings installed"
    );

    Ok(Arc::new(mappings))
}

#[cfg(test)]
#[path = "web_config_test.rs"]
mod web_config_test;
