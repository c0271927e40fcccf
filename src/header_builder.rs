use crate::constants::header;
use crate::context::RequestContext;
use crate::headers::HeaderCollection;
use crate::options::CorsOptions;
use crate::origin::OriginDecision;

pub(crate) enum OriginOutcome {
    Skip,
    Disallow(HeaderCollection),
    Allow(HeaderCollection),
}

pub(crate) struct HeaderBuilder<'a> {
    options: &'a CorsOptions,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(options: &'a CorsOptions) -> Self {
        Self { options }
    }

    /// `Any` never meets credentials here; [`CorsOptions::validate`] rejects
    /// that combination before a policy is built.
    pub(crate) fn build_origin_headers(&self, request: &RequestContext<'_>) -> OriginOutcome {
        match self.options.origin.resolve(request) {
            OriginDecision::Any => {
                let mut headers = HeaderCollection::with_estimate(1);
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
                OriginOutcome::Allow(headers)
            }
            OriginDecision::Mirror => {
                let Some(origin) = request.origin.map(str::trim).filter(|o| !o.is_empty()) else {
                    return OriginOutcome::Skip;
                };
                let mut headers = HeaderCollection::with_estimate(2);
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                headers.add_vary(header::ORIGIN);
                OriginOutcome::Allow(headers)
            }
            OriginDecision::Disallow => {
                let mut headers = HeaderCollection::with_estimate(1);
                headers.add_vary(header::ORIGIN);
                OriginOutcome::Disallow(headers)
            }
            OriginDecision::Skip => OriginOutcome::Skip,
        }
    }

    /// `Vary` for a mapped path requested without an `Origin`.
    pub(crate) fn build_non_cors_vary(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.add_vary(header::ORIGIN);
        headers.extend(self.build_preflight_vary());
        headers
    }

    pub(crate) fn build_preflight_vary(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.add_vary(header::ACCESS_CONTROL_REQUEST_METHOD);
        headers.add_vary(header::ACCESS_CONTROL_REQUEST_HEADERS);
        headers
    }

    pub(crate) fn build_methods_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(value) = self.options.methods.header_value() {
            headers.push(header::ACCESS_CONTROL_ALLOW_METHODS, value);
        }
        headers
    }

    pub(crate) fn build_credentials_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if self.options.credentials {
            headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }
        headers
    }

    pub(crate) fn build_allowed_headers(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(value) = self.options.allowed_headers.header_value() {
            headers.push(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
        }
        headers
    }

    pub(crate) fn build_exposed_headers(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(value) = self.options.exposed_headers.header_value() {
            headers.push(header::ACCESS_CONTROL_EXPOSE_HEADERS, value);
        }
        headers
    }

    pub(crate) fn build_max_age_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(seconds) = self.options.max_age {
            headers.push(header::ACCESS_CONTROL_MAX_AGE, seconds.to_string());
        }
        headers
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
