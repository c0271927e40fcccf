use super::*;
use crate::constants::{header, method};
use crate::context::RequestContext;
use crate::result::CorsDecision;

struct NoMappings;

impl CorsConfigurer for NoMappings {
    fn add_cors_mappings(&self, _registry: &mut CorsRegistry) {}
}

#[test]
fn default_should_equal_registrar_built_from_default_config() {
    // Arrange
    let section = CorsSection::default();

    // Act
    let from_config = WebConfig::from_config(&section);

    // Assert
    assert_eq!(from_config, WebConfig::default());
}

#[test]
fn register_should_install_single_catch_all_mapping() {
    // Arrange
    let config = WebConfig::default();

    // Act
    let mappings = register(&config).expect("registration succeeded");

    // Assert
    assert_eq!(mappings.patterns().collect::<Vec<_>>(), vec!["/**"]);
}

#[test]
fn registered_preflight_should_carry_grants_and_max_age() {
    // Arrange
    let mappings = register(&WebConfig::default()).expect("registration succeeded");
    let request = RequestContext {
        method: method::OPTIONS,
        origin: Some(frontend::ORIGIN),
        access_control_request_method: Some(method::DELETE),
        access_control_request_headers: Some("Content-Type"),
    };

    // Act
    let decision = mappings.check("/api/tasks", &request);

    // Assert
    match decision {
        CorsDecision::PreflightAccepted { headers, status } => {
            assert_eq!(status, 204);
            assert_eq!(
                headers
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .map(String::as_str),
                Some(frontend::ORIGIN)
            );
            assert_eq!(
                headers
                    .get(header::ACCESS_CONTROL_ALLOW_METHODS)
                    .map(String::as_str),
                Some("GET,POST,PUT,DELETE,OPTIONS")
            );
            assert_eq!(
                headers
                    .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
                    .map(String::as_str),
                Some("*")
            );
            assert_eq!(
                headers
                    .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                    .map(String::as_str),
                Some("true")
            );
            assert_eq!(
                headers
                    .get(header::ACCESS_CONTROL_MAX_AGE)
                    .map(String::as_str),
                Some("1800")
            );
        }
        other => panic!("expected accepted preflight, got {other:?}"),
    }
}

#[test]
fn register_should_surface_invalid_configuration() {
    // Arrange
    let section = CorsSection {
        allowed_origins: vec!["*".into()],
        ..CorsSection::default()
    };

    // Act
    let result = register(&WebConfig::from_config(&section));

    // Assert
    assert!(matches!(result, Err(RegistryError::Invalid { .. })));
}

#[test]
fn register_should_accept_trait_objects() {
    // Arrange
    let configurer: Box<dyn CorsConfigurer> = Box::new(NoMappings);

    // Act
    let mappings = register(configurer.as_ref()).expect("registration succeeded");

    // Assert
    assert!(mappings.is_empty());
}
