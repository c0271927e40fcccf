use crate::headers::Headers;

/// Why a preflight was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightRejectionReason {
    OriginNotAllowed,
    MethodNotAllowed { requested_method: String },
    HeadersNotAllowed { requested_headers: String },
}

#[derive(Debug, Clone)]
pub struct PreflightRejection {
    pub headers: Headers,
    pub reason: PreflightRejectionReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleRejectionReason {
    OriginNotAllowed,
}

#[derive(Debug, Clone)]
pub struct SimpleRejection {
    pub headers: Headers,
    pub reason: SimpleRejectionReason,
}

/// Overall decision returned by the policy engine.
#[derive(Debug, Clone)]
pub enum CorsDecision {
    PreflightAccepted { headers: Headers, status: u16 },
    PreflightRejected(PreflightRejection),
    SimpleAccepted { headers: Headers },
    SimpleRejected(SimpleRejection),
    /// A mapped path requested without an `Origin`. Only `Vary` is emitted.
    NotCorsRequest { headers: Headers },
    /// No mapping covers the path.
    NotApplicable,
}

