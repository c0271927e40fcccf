mod common;

use common::builders::{frontend_mappings, preflight_request, simple_request};
use common::headers::header_value;
use proptest::prelude::*;
use task_manager_cors::CorsDecision;
use task_manager_cors::constants::{frontend, header};

fn path_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[A-Za-z0-9._-]{1,12}", 0..6)
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

fn method_strategy() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(frontend::METHODS.to_vec())
}

fn foreign_origin_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("http"), Just("https")],
        "[a-z]{1,12}",
        1u16..u16::MAX,
    )
        .prop_map(|(scheme, host, port)| format!("{scheme}://{host}.example:{port}"))
}

proptest! {
    #[test]
    fn frontend_origin_is_granted_on_any_path(path in path_strategy(), verb in method_strategy()) {
        let mappings = frontend_mappings();

        let decision = simple_request()
            .method(verb)
            .path(path.as_str())
            .origin(frontend::ORIGIN)
            .check(&mappings);

        let CorsDecision::SimpleAccepted { headers } = decision else {
            return Err(TestCaseError::fail(format!("expected accepted request on {path}")));
        };
        prop_assert_eq!(
            header_value(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(frontend::ORIGIN)
        );
        prop_assert_eq!(
            header_value(&headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some("true")
        );
    }

    #[test]
    fn foreign_origin_is_never_echoed(path in path_strategy(), origin in foreign_origin_strategy()) {
        let mappings = frontend_mappings();

        let simple = simple_request()
            .path(path.as_str())
            .origin(origin.as_str())
            .check(&mappings);
        let preflight = preflight_request()
            .path(path.as_str())
            .origin(origin.as_str())
            .check(&mappings);

        for decision in [simple, preflight] {
            let headers = match decision {
                CorsDecision::SimpleRejected(rejection) => rejection.headers,
                CorsDecision::PreflightRejected(rejection) => rejection.headers,
                other => return Err(TestCaseError::fail(format!("unexpected decision {other:?}"))),
            };
            prop_assert_eq!(header_value(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN), None);
        }
    }

    #[test]
    fn preflight_methods_header_is_stable(path in path_strategy(), verb in method_strategy()) {
        let mappings = frontend_mappings();

        let decision = preflight_request()
            .path(path.as_str())
            .origin(frontend::ORIGIN)
            .request_method(verb)
            .check(&mappings);

        let CorsDecision::PreflightAccepted { headers, .. } = decision else {
            return Err(TestCaseError::fail("expected accepted preflight"));
        };
        prop_assert_eq!(
            header_value(&headers, header::ACCESS_CONTROL_ALLOW_METHODS),
            Some("GET,POST,PUT,DELETE,OPTIONS")
        );
        prop_assert_eq!(header_value(&headers, header::ACCESS_CONTROL_ALLOW_HEADERS), Some("*"));
    }
}
