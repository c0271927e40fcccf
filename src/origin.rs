use crate::context::RequestContext;
use crate::util::equals_ignore_case;
use regex_automata::meta::{BuildError, Regex};
use std::fmt;
use std::time::{Duration, Instant};

/// Which request origins a policy accepts.
#[derive(Clone, Debug, Default)]
pub enum Origin {
    #[default]
    Any,
    List(Vec<OriginMatcher>),
}

/// Outcome of resolving a request origin against an [`Origin`] policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
    /// Emit `Access-Control-Allow-Origin: *`.
    Any,
    /// Echo the request origin.
    Mirror,
    Disallow,
    /// Not a CORS request.
    Skip,
}

#[derive(Debug)]
pub enum PatternError {
    Build(Box<BuildError>),
    Timeout { elapsed: Duration, budget: Duration },
    TooLong { length: usize, max: usize },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Build(_) => write!(f, "failed to compile origin pattern"),
            PatternError::Timeout { .. } => {
                write!(f, "compiling origin pattern exceeded the configured budget")
            }
            PatternError::TooLong { length, max } => write!(
                f,
                "origin pattern length {} exceeds maximum allowed {}",
                length, max
            ),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Build(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

const PATTERN_COMPILE_BUDGET: Duration = Duration::from_millis(100);
const MAX_PATTERN_LENGTH: usize = 50_000;
pub(crate) const MAX_ORIGIN_LENGTH: usize = 4_096;

#[derive(Clone)]
pub enum OriginMatcher {
    Exact(String),
    Pattern(Regex),
}

impl fmt::Debug for OriginMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginMatcher::Exact(value) => f.debug_tuple("Exact").field(value).finish(),
            OriginMatcher::Pattern(_) => f.write_str("Pattern(..)"),
        }
    }
}

impl OriginMatcher {
    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    /// Compiles `pattern` case-insensitively. Anchors are the caller's job.
    pub fn pattern_str(pattern: &str) -> Result<Self, PatternError> {
        Self::compile_pattern(pattern, PATTERN_COMPILE_BUDGET).map(Self::Pattern)
    }

    fn compile_pattern(pattern: &str, budget: Duration) -> Result<Regex, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let started = Instant::now();
        let regex = Regex::new(&format!("(?i:{pattern})"))
            .map_err(|err| PatternError::Build(Box::new(err)))?;
        let elapsed = started.elapsed();
        if elapsed > budget {
            return Err(PatternError::Timeout { elapsed, budget });
        }

        Ok(regex)
    }

    #[cfg(test)]
    pub(crate) fn pattern_str_with_budget(
        pattern: &str,
        budget: Duration,
    ) -> Result<Self, PatternError> {
        Self::compile_pattern(pattern, budget).map(Self::Pattern)
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            OriginMatcher::Exact(value) => equals_ignore_case(value.trim(), candidate),
            OriginMatcher::Pattern(regex) => regex.is_match(candidate.as_bytes()),
        }
    }
}

impl From<String> for OriginMatcher {
    fn from(value: String) -> Self {
        OriginMatcher::Exact(value)
    }
}

impl From<&str> for OriginMatcher {
    fn from(value: &str) -> Self {
        OriginMatcher::Exact(value.to_owned())
    }
}

impl Origin {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OriginMatcher>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn resolve(&self, ctx: &RequestContext<'_>) -> OriginDecision {
        let request_origin = ctx.origin.map(str::trim).filter(|value| !value.is_empty());

        if let Some(origin) = request_origin
            && origin.len() > MAX_ORIGIN_LENGTH
        {
            return OriginDecision::Disallow;
        }

        match self {
            Origin::Any => match request_origin {
                Some(_) => OriginDecision::Any,
                None => OriginDecision::Skip,
            },
            Origin::List(matchers) => match request_origin {
                Some(origin) if matchers.iter().any(|matcher| matcher.matches(origin)) => {
                    OriginDecision::Mirror
                }
                Some(_) => OriginDecision::Disallow,
                None => OriginDecision::Skip,
            },
        }
    }

    pub(crate) fn is_any(&self) -> bool {
        matches!(self, Origin::Any)
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
