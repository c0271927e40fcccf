mod common;

use common::asserts::{assert_preflight_accepted, assert_simple_accepted};
use common::builders::{frontend_mappings, preflight_request, simple_request};
use common::headers::header_value;
use std::sync::Arc;
use std::thread;
use task_manager_cors::constants::{frontend, header, method};

#[test]
fn mappings_can_be_shared_across_threads() {
    let mappings = frontend_mappings();

    let mut handles = Vec::new();
    for i in 0..8 {
        let mappings = Arc::clone(&mappings);
        handles.push(thread::spawn(move || {
            let path = format!("/tasks/{i}");
            let (headers, _) = assert_preflight_accepted(
                preflight_request()
                    .path(path.as_str())
                    .origin(frontend::ORIGIN)
                    .request_method(method::PUT)
                    .check(&mappings),
            );
            assert_eq!(
                header_value(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
                Some(frontend::ORIGIN),
            );

            let simple_headers = assert_simple_accepted(
                simple_request()
                    .path(path.as_str())
                    .origin(frontend::ORIGIN)
                    .check(&mappings),
            );
            assert_eq!(
                header_value(&simple_headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
                Some("true"),
            );
        }));
    }

    for handle in handles {
        handle.join().expect("thread panic");
    }
}
