use crate::util::{equals_ignore_case, is_http_token, split_header_list};

/// Configuration for the `Access-Control-Allow-Headers` response value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedHeaders {
    List(Vec<String>),
    /// Wildcard: every requested header is allowed and preflights emit "*".
    Any,
}

impl Default for AllowedHeaders {
    fn default() -> Self {
        AllowedHeaders::List(Vec::new())
    }
}

impl AllowedHeaders {
    /// Builds an allow-list. A lone `"*"` entry becomes [`AllowedHeaders::Any`].
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

        if deduped.iter().any(|value| value == "*") {
            return Self::Any;
        }

        Self::List(deduped)
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::Any => Some("*".to_string()),
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(values.join(",")),
        }
    }

    /// Checks an `Access-Control-Request-Headers` line against the policy.
    pub fn allows_headers(&self, request_headers: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(allowed) => split_header_list(request_headers).all(|header| {
                allowed
                    .iter()
                    .any(|allowed_header| allowed_header.eq_ignore_ascii_case(header))
            }),
        }
    }

    pub(crate) fn first_invalid(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::List(values) => values
                .iter()
                .map(String::as_str)
                .find(|value| !is_http_token(value)),
        }
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
