use crate::util::equals_ignore_case;

/// Configuration mirror of the `Access-Control-Expose-Headers` response header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExposedHeaders {
    List(Vec<String>),
    Any,
}

impl Default for ExposedHeaders {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl ExposedHeaders {
    /// Builds an expose list, trimming whitespace and removing duplicates.
    /// A single `"*"` entry selects [`Self::Any`].
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

        if deduped.len() == 1 && deduped[0] == "*" {
            return Self::Any;
        }

        Self::List(deduped)
    }

    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(values.join(",")),
            Self::Any => Some("*".to_string()),
        }
    }
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;
