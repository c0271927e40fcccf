use crate::constants::header;
use crate::context::RequestContext;
use crate::headers::Headers;
use crate::registry::CorsMappings;
use crate::result::{CorsDecision, PreflightRejectionReason};
use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub type SharedMappings = Arc<CorsMappings>;

const REJECTION_BODY: &str = "Invalid CORS request";

/// Wraps every route of `router`, fallback included, with [`cors_middleware`].
pub fn install<S>(router: Router<S>, mappings: SharedMappings) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(axum::middleware::from_fn_with_state(
        mappings,
        cors_middleware,
    ))
}

pub async fn cors_middleware(
    State(mappings): State<SharedMappings>,
    request: Request,
    next: Next,
) -> Response {
    let owned_ctx = OwnedRequestContext::from_request(&request);
    let context = owned_ctx.as_request_context();
    let path = request.uri().path().to_owned();

    match mappings.check(&path, &context) {
        CorsDecision::PreflightAccepted { headers, status } => {
            tracing::debug!(%path, origin = ?context.origin, "CORS preflight accepted");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::NO_CONTENT);
            let mut response = status.into_response();
            apply_headers(response.headers_mut(), &headers);
            response
        }
        CorsDecision::PreflightRejected(rejection) => {
            tracing::warn!(
                %path,
                origin = ?context.origin,
                reason = %rejection_reason(&rejection.reason),
                "CORS preflight rejected"
            );
            let mut response = (StatusCode::FORBIDDEN, REJECTION_BODY).into_response();
            apply_headers(response.headers_mut(), &rejection.headers);
            response
        }
        CorsDecision::SimpleAccepted { headers } => {
            tracing::debug!(%path, origin = ?context.origin, method = %context.method, "CORS request accepted");
            let mut response = next.run(request).await;
            apply_headers(response.headers_mut(), &headers);
            response
        }
        CorsDecision::SimpleRejected(rejection) => {
            // The handler still runs; the browser withholds the response
            // because no Access-Control-Allow-Origin is present.
            tracing::warn!(%path, origin = ?context.origin, method = %context.method, "CORS origin not allowed");
            let mut response = next.run(request).await;
            apply_headers(response.headers_mut(), &rejection.headers);
            response
        }
        CorsDecision::NotCorsRequest { headers } => {
            let mut response = next.run(request).await;
            apply_headers(response.headers_mut(), &headers);
            response
        }
        CorsDecision::NotApplicable => next.run(request).await,
    }
}

fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers.iter() {
        let (Ok(header_name), Ok(header_value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) else {
            tracing::warn!(header = %name, "dropping CORS header that is not valid HTTP");
            continue;
        };

        if name.eq_ignore_ascii_case(header::VARY) {
            map.append(header_name, header_value);
        } else {
            map.insert(header_name, header_value);
        }
    }
}

fn rejection_reason(reason: &PreflightRejectionReason) -> String {
    match reason {
        PreflightRejectionReason::OriginNotAllowed => "origin not allowed".into(),
        PreflightRejectionReason::MethodNotAllowed { requested_method } => {
            format!("method '{requested_method}' not allowed")
        }
        PreflightRejectionReason::HeadersNotAllowed { requested_headers } => {
            format!("headers '{requested_headers}' not allowed")
        }
    }
}

struct OwnedRequestContext {
    method: String,
    origin: Option<String>,
    access_control_request_method: Option<String>,
    access_control_request_headers: Option<String>,
}

impl OwnedRequestContext {
    fn from_request(request: &Request) -> Self {
        let headers = request.headers();

        Self {
            method: request.method().as_str().to_string(),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
            access_control_request_headers: header_list(
                headers,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ),
        }
    }

    fn as_request_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: self.access_control_request_method.as_deref(),
            access_control_request_headers: self.access_control_request_headers.as_deref(),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

/// Joins repeated header lines with commas.
fn header_list(headers: &HeaderMap, name: &str) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}
