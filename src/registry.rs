//! Path-pattern → policy registration, in the shape web frameworks expose it:
//! `registry.add_mapping("/**").allowed_origins([...])...`.

use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::context::RequestContext;
use crate::cors::Cors;
use crate::exposed_headers::ExposedHeaders;
use crate::options::{CorsOptions, ValidationError};
use crate::origin::{Origin, OriginMatcher, PatternError};
use crate::path_pattern::{PathPattern, PathPatternError, escape_literal};
use crate::result::CorsDecision;
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Path(#[from] PathPatternError),
    #[error("mapping `{mapping}` has an invalid origin pattern `{origin_pattern}`")]
    OriginPattern {
        mapping: String,
        origin_pattern: String,
        #[source]
        source: PatternError,
    },
    #[error("mapping `{mapping}` is invalid: {source}")]
    Invalid {
        mapping: String,
        #[source]
        source: ValidationError,
    },
}

/// Preflight cache lifetime every registration starts with.
pub const DEFAULT_MAX_AGE_SECS: u64 = 1800;

/// One `add_mapping` call. Setters mirror the builder style of framework
/// CORS registries and may be chained.
#[derive(Debug, Clone)]
pub struct CorsRegistration {
    path_pattern: String,
    origins: Option<Vec<String>>,
    origin_patterns: Vec<String>,
    options: CorsOptions,
}

impl CorsRegistration {
    fn new(path_pattern: String) -> Self {
        Self {
            path_pattern,
            origins: None,
            origin_patterns: Vec::new(),
            options: CorsOptions {
                max_age: Some(DEFAULT_MAX_AGE_SECS),
                ..CorsOptions::default()
            },
        }
    }

    pub fn path_pattern(&self) -> &str {
        &self.path_pattern
    }

    /// Exact origins. A `"*"` entry allows every origin.
    pub fn allowed_origins<I, S>(&mut self, origins: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = Some(
            origins
                .into_iter()
                .map(|origin| origin.into().trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        );
        self
    }

    /// Origin patterns where `*` matches any run of characters,
    /// e.g. `https://*.example.com` or `http://localhost:*`.
    pub fn allowed_origin_patterns<I, S>(&mut self, patterns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origin_patterns = patterns
            .into_iter()
            .map(|pattern| pattern.into().trim().to_string())
            .filter(|pattern| !pattern.is_empty())
            .collect();
        self
    }

    /// A `"*"` entry allows every method.
    pub fn allowed_methods<I, S>(&mut self, methods: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let methods = AllowedMethods::list(methods);
        self.options.methods = match &methods {
            AllowedMethods::List(values) if values.iter().any(|value| value == "*") => {
                AllowedMethods::any()
            }
            _ => methods,
        };
        self
    }

    pub fn allowed_headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.allowed_headers = AllowedHeaders::list(headers);
        self
    }

    pub fn exposed_headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.exposed_headers = ExposedHeaders::list(headers);
        self
    }

    pub fn allow_credentials(&mut self, enabled: bool) -> &mut Self {
        self.options.credentials = enabled;
        self
    }

    pub fn max_age(&mut self, seconds: u64) -> &mut Self {
        self.options.max_age = Some(seconds);
        self
    }

    fn resolve_origin(&self) -> Result<Origin, RegistryError> {
        let origins = self.origins.as_deref().unwrap_or_default();
        if origins.iter().any(|origin| origin == "*") {
            return Ok(Origin::Any);
        }
        if self.origins.is_none() && self.origin_patterns.is_empty() {
            return Ok(self.options.origin.clone());
        }

        let mut matchers: Vec<OriginMatcher> =
            origins.iter().map(OriginMatcher::exact).collect();
        for pattern in &self.origin_patterns {
            let matcher = OriginMatcher::pattern_str(&origin_pattern_regex(pattern)).map_err(
                |source| RegistryError::OriginPattern {
                    mapping: self.path_pattern.clone(),
                    origin_pattern: pattern.clone(),
                    source,
                },
            )?;
            matchers.push(matcher);
        }

        Ok(Origin::List(matchers))
    }

    fn build(&self) -> Result<CorsMapping, RegistryError> {
        let pattern = PathPattern::parse(&self.path_pattern)?;
        let options = CorsOptions {
            origin: self.resolve_origin()?,
            ..self.options.clone()
        };
        let cors = Cors::new(options).map_err(|source| RegistryError::Invalid {
            mapping: self.path_pattern.clone(),
            source,
        })?;

        Ok(CorsMapping { pattern, cors })
    }
}

fn origin_pattern_regex(pattern: &str) -> String {
    let mut expression = String::from("^");
    for (idx, literal) in pattern.split('*').enumerate() {
        if idx > 0 {
            expression.push_str(".*");
        }
        expression.push_str(&escape_literal(literal));
    }
    expression.push('$');
    expression
}

/// Collects mappings during startup. Re-registering a pattern replaces the
/// earlier registration but keeps its position.
#[derive(Debug, Default)]
pub struct CorsRegistry {
    registrations: IndexMap<String, CorsRegistration>,
}

impl CorsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mapping<S: Into<String>>(&mut self, path_pattern: S) -> &mut CorsRegistration {
        let path_pattern = path_pattern.into().trim().to_string();
        let registration = self
            .registrations
            .entry(path_pattern.clone())
            .or_insert_with(|| CorsRegistration::new(path_pattern.clone()));
        *registration = CorsRegistration::new(path_pattern);
        registration
    }

    pub fn registrations(&self) -> impl Iterator<Item = &CorsRegistration> {
        self.registrations.values()
    }

    pub fn build(self) -> Result<CorsMappings, RegistryError> {
        let mappings = self
            .registrations
            .values()
            .map(CorsRegistration::build)
            .collect::<Result<Vec<_>, _>>()?;

        for mapping in &mappings {
            tracing::debug!(
                pattern = %mapping.pattern,
                origin = ?mapping.cors.options().origin,
                methods = ?mapping.cors.options().methods,
                credentials = mapping.cors.options().credentials,
                "CORS mapping registered"
            );
        }

        Ok(CorsMappings { mappings })
    }
}

#[derive(Debug, Clone)]
pub struct CorsMapping {
    pattern: PathPattern,
    cors: Cors,
}

impl CorsMapping {
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn cors(&self) -> &Cors {
        &self.cors
    }
}

/// Frozen registry consulted on every request.
#[derive(Debug, Clone, Default)]
pub struct CorsMappings {
    mappings: Vec<CorsMapping>,
}

impl CorsMappings {
    /// First mapping, in registration order, whose pattern covers `path`.
    pub fn lookup(&self, path: &str) -> Option<&CorsMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.pattern.matches(path))
    }

    pub fn check(&self, path: &str, request: &RequestContext<'_>) -> CorsDecision {
        match self.lookup(path) {
            Some(mapping) => mapping.cors.check(request),
            None => CorsDecision::NotApplicable,
        }
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.mappings.iter().map(|mapping| mapping.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
