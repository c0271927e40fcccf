use regex_automata::meta::{BuildError, Regex};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathPatternError {
    #[error("path pattern `{0}` must start with '/'")]
    MissingLeadingSlash(String),
    #[error("path pattern `{0}` uses '**' inside a segment; '**' must stand alone")]
    InvalidDoubleWildcard(String),
    #[error("failed to compile path pattern `{pattern}`")]
    Build {
        pattern: String,
        #[source]
        source: Box<BuildError>,
    },
}

/// Ant-style request path matcher.
///
/// `**` spans any number of whole segments, `*` spans characters inside one
/// segment and `?` matches a single character. `/**` therefore covers every
/// path including `/`.
#[derive(Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathPattern").field(&self.source).finish()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, PathPatternError> {
        let pattern = pattern.trim();
        if !pattern.starts_with('/') {
            return Err(PathPatternError::MissingLeadingSlash(pattern.to_string()));
        }

        let expression = Self::translate(pattern)?;
        let regex = Regex::new(&expression).map_err(|err| PathPatternError::Build {
            pattern: pattern.to_string(),
            source: Box::new(err),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    fn translate(pattern: &str) -> Result<String, PathPatternError> {
        let segments: Vec<&str> = pattern
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let mut expression = String::from("^");
        if segments.is_empty() {
            expression.push('/');
        }

        for segment in segments {
            if segment == "**" {
                expression.push_str("(?:/[^/]*)*");
                continue;
            }
            if segment.contains("**") {
                return Err(PathPatternError::InvalidDoubleWildcard(pattern.to_string()));
            }

            expression.push('/');
            for ch in segment.chars() {
                match ch {
                    '*' => expression.push_str("[^/]*"),
                    '?' => expression.push_str("[^/]"),
                    other => {
                        let mut buf = [0u8; 4];
                        expression.push_str(&escape_literal(other.encode_utf8(&mut buf)));
                    }
                }
            }
        }

        if pattern.len() > 1 && pattern.ends_with('/') {
            expression.push('/');
        }
        expression.push('$');
        Ok(expression)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests a request path. Any query string is ignored.
    pub fn matches(&self, path: &str) -> bool {
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        let path = if path.is_empty() { "/" } else { path };
        self.regex.is_match(path.as_bytes())
    }
}

pub(crate) fn escape_literal(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for ch in literal.chars() {
        if matches!(
            ch,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
                | '#' | '&' | '-' | '~'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
#[path = "path_pattern_test.rs"]
mod path_pattern_test;
