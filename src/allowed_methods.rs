use crate::constants::method;
use crate::util::{equals_ignore_case, is_http_token};

/// Configuration for the `Access-Control-Allow-Methods` response header.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AllowedMethods {
    /// Emit the wildcard `*` and accept any requested method.
    Any,
    /// Emit the configured methods, comma-joined, in registration order.
    List(Vec<String>),
}

impl AllowedMethods {
    /// Builds an explicit list. Entries are trimmed, blanks are skipped and
    /// case-insensitive duplicates keep their first spelling.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for value in values {
            let trimmed = value.into().trim().to_string();
            if trimmed.is_empty()
                || deduped
                    .iter()
                    .any(|existing| equals_ignore_case(existing, &trimmed))
            {
                continue;
            }
            deduped.push(trimmed);
        }

        Self::List(deduped)
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn header_value(&self) -> Option<String> {
        match self {
            AllowedMethods::Any => Some("*".to_string()),
            AllowedMethods::List(values) if values.is_empty() => None,
            AllowedMethods::List(values) => Some(values.join(",")),
        }
    }

    pub fn allows_method(&self, requested: &str) -> bool {
        let requested = requested.trim();
        if requested.is_empty() {
            return false;
        }

        match self {
            AllowedMethods::Any => true,
            AllowedMethods::List(values) => values
                .iter()
                .any(|allowed| equals_ignore_case(allowed, requested)),
        }
    }

    /// First entry that is not a valid HTTP token, if any.
    pub(crate) fn first_invalid(&self) -> Option<&str> {
        match self {
            AllowedMethods::Any => None,
            AllowedMethods::List(values) => values
                .iter()
                .map(String::as_str)
                .find(|value| !is_http_token(value) || *value == "*"),
        }
    }
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self::list([
            method::GET,
            method::HEAD,
            method::PUT,
            method::PATCH,
            method::POST,
            method::DELETE,
        ])
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
