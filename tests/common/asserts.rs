#![allow(dead_code)]

use task_manager_cors::{CorsDecision, Headers, PreflightRejection, SimpleRejection};

pub fn assert_simple_accepted(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::SimpleAccepted { headers } => headers,
        other => panic!("expected accepted simple request, got {:?}", other),
    }
}

pub fn assert_simple_rejected(decision: CorsDecision) -> SimpleRejection {
    match decision {
        CorsDecision::SimpleRejected(rejection) => rejection,
        other => panic!("expected rejected simple request, got {:?}", other),
    }
}

pub fn assert_preflight_accepted(decision: CorsDecision) -> (Headers, u16) {
    match decision {
        CorsDecision::PreflightAccepted { headers, status } => (headers, status),
        other => panic!("expected accepted preflight, got {:?}", other),
    }
}

pub fn assert_preflight_rejected(decision: CorsDecision) -> PreflightRejection {
    match decision {
        CorsDecision::PreflightRejected(rejection) => rejection,
        other => panic!("expected rejected preflight, got {:?}", other),
    }
}

pub fn assert_not_cors_request(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::NotCorsRequest { headers } => headers,
        other => panic!("expected non-CORS request, got {:?}", other),
    }
}
