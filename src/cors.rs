use crate::constants::{header, method};
use crate::context::RequestContext;
use crate::header_builder::{HeaderBuilder, OriginOutcome};
use crate::headers::HeaderCollection;
use crate::options::{CorsOptions, ValidationError};
use crate::result::{
    CorsDecision, PreflightRejection, PreflightRejectionReason, SimpleRejection,
    SimpleRejectionReason,
};

/// Core CORS policy engine that evaluates requests using [`CorsOptions`].
#[derive(Debug, Clone)]
pub struct Cors {
    options: CorsOptions,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &CorsOptions {
        &self.options
    }

    pub fn check(&self, request: &RequestContext<'_>) -> CorsDecision {
        if Self::is_preflight(request) {
            self.process_preflight(request)
        } else {
            self.process_simple(request)
        }
    }

    /// An `OPTIONS` request carrying `Access-Control-Request-Method`.
    fn is_preflight(request: &RequestContext<'_>) -> bool {
        request.method.eq_ignore_ascii_case(method::OPTIONS)
            && request
                .access_control_request_method
                .is_some_and(|value| !value.trim().is_empty())
    }

    fn process_preflight(&self, request: &RequestContext<'_>) -> CorsDecision {
        let builder = HeaderBuilder::new(&self.options);
        let mut headers = match builder.build_origin_headers(request) {
            OriginOutcome::Skip => return Self::not_cors_request(&builder),
            OriginOutcome::Disallow(mut headers) => {
                headers.extend(builder.build_preflight_vary());
                return CorsDecision::PreflightRejected(PreflightRejection {
                    headers: headers.into_headers(),
                    reason: PreflightRejectionReason::OriginNotAllowed,
                });
            }
            OriginOutcome::Allow(headers) => headers,
        };
        headers.extend(builder.build_preflight_vary());

        let requested_method = request
            .access_control_request_method
            .unwrap_or_default()
            .trim();
        if !self.options.methods.allows_method(requested_method) {
            return Self::reject_preflight(
                headers,
                PreflightRejectionReason::MethodNotAllowed {
                    requested_method: requested_method.to_string(),
                },
            );
        }

        let requested_headers = request.access_control_request_headers.unwrap_or_default();
        if !self.options.allowed_headers.allows_headers(requested_headers) {
            return Self::reject_preflight(
                headers,
                PreflightRejectionReason::HeadersNotAllowed {
                    requested_headers: requested_headers.trim().to_string(),
                },
            );
        }

        headers.extend(builder.build_methods_header());
        headers.extend(builder.build_allowed_headers());
        headers.extend(builder.build_credentials_header());
        headers.extend(builder.build_max_age_header());

        CorsDecision::PreflightAccepted {
            headers: headers.into_headers(),
            status: self.options.options_success_status,
        }
    }

    fn process_simple(&self, request: &RequestContext<'_>) -> CorsDecision {
        let builder = HeaderBuilder::new(&self.options);
        let mut headers = match builder.build_origin_headers(request) {
            OriginOutcome::Skip => return Self::not_cors_request(&builder),
            OriginOutcome::Disallow(headers) => {
                return CorsDecision::SimpleRejected(SimpleRejection {
                    headers: headers.into_headers(),
                    reason: SimpleRejectionReason::OriginNotAllowed,
                });
            }
            OriginOutcome::Allow(headers) => headers,
        };

        headers.extend(builder.build_credentials_header());
        headers.extend(builder.build_exposed_headers());

        CorsDecision::SimpleAccepted {
            headers: headers.into_headers(),
        }
    }

    fn not_cors_request(builder: &HeaderBuilder<'_>) -> CorsDecision {
        CorsDecision::NotCorsRequest {
            headers: builder.build_non_cors_vary().into_headers(),
        }
    }

    /// Rejections keep only `Vary`; the origin grant must not leak.
    fn reject_preflight(
        headers: HeaderCollection,
        reason: PreflightRejectionReason,
    ) -> CorsDecision {
        let mut vary_only = HeaderCollection::new();
        for (name, value) in headers.into_headers() {
            if name.eq_ignore_ascii_case(header::VARY) {
                vary_only.push(name, value);
            }
        }

        CorsDecision::PreflightRejected(PreflightRejection {
            headers: vary_only.into_headers(),
            reason,
        })
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
