use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::exposed_headers::ExposedHeaders;
use crate::origin::Origin;
use thiserror::Error;

/// Settings for a single CORS policy.
#[derive(Clone, Debug)]
pub struct CorsOptions {
    pub origin: Origin,
    pub methods: AllowedMethods,
    pub allowed_headers: AllowedHeaders,
    pub exposed_headers: ExposedHeaders,
    pub credentials: bool,
    /// Seconds a browser may cache a preflight result.
    pub max_age: Option<u64>,
    pub options_success_status: u16,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            origin: Origin::Any,
            methods: AllowedMethods::default(),
            allowed_headers: AllowedHeaders::default(),
            exposed_headers: ExposedHeaders::default(),
            credentials: false,
            max_age: None,
            options_success_status: 204,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "credentials cannot be combined with a wildcard origin; list the allowed origins explicitly"
    )]
    CredentialsRequireSpecificOrigin,
    #[error("exposing every header (\"*\") is not honoured by browsers when credentials are enabled")]
    ExposeHeadersWildcardRequiresCredentialsDisabled,
    #[error("allowed method `{0}` is not a valid HTTP method token")]
    InvalidMethod(String),
    #[error("allowed header `{0}` is not a valid HTTP header name")]
    InvalidAllowedHeader(String),
    #[error("preflight success status {0} must be in the 2xx range")]
    InvalidSuccessStatus(u16),
}

impl CorsOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.credentials && self.origin.is_any() {
            return Err(ValidationError::CredentialsRequireSpecificOrigin);
        }

        if self.credentials && matches!(self.exposed_headers, ExposedHeaders::Any) {
            return Err(ValidationError::ExposeHeadersWildcardRequiresCredentialsDisabled);
        }

        if let Some(method) = self.methods.first_invalid() {
            return Err(ValidationError::InvalidMethod(method.to_string()));
        }

        if let Some(name) = self.allowed_headers.first_invalid() {
            return Err(ValidationError::InvalidAllowedHeader(name.to_string()));
        }

        if !(200..=299).contains(&self.options_success_status) {
            return Err(ValidationError::InvalidSuccessStatus(
                self.options_success_status,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
