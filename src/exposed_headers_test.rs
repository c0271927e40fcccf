use super::*;

#[test]
fn list_should_select_any_for_single_wildcard() {
    assert_eq!(ExposedHeaders::list(["*"]), ExposedHeaders::Any);
}

#[test]
fn list_should_dedupe_case_insensitively_and_keep_order() {
    let headers = ExposedHeaders::list(["X-Total-Count", "Location", "x-total-count", " "]);

    assert_eq!(
        headers.header_value().as_deref(),
        Some("X-Total-Count,Location")
    );
}

#[test]
fn header_value_should_be_absent_by_default() {
    assert!(ExposedHeaders::default().header_value().is_none());
}
