mod allowed_headers;
mod allowed_methods;
pub mod config;
pub mod constants;
mod context;
mod cors;
pub mod error;
mod exposed_headers;
mod header_builder;
mod headers;
pub mod middleware;
mod options;
mod origin;
mod path_pattern;
mod registry;
mod result;
pub mod router;
pub mod tasks;
mod util;
pub mod web_config;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use context::RequestContext;
pub use cors::Cors;
pub use exposed_headers::ExposedHeaders;
pub use headers::Headers;
pub use options::{CorsOptions, ValidationError};
pub use origin::{Origin, OriginDecision, OriginMatcher, PatternError};
pub use path_pattern::{PathPattern, PathPatternError};
pub use registry::{
    CorsMapping, CorsMappings, CorsRegistration, CorsRegistry, DEFAULT_MAX_AGE_SECS, RegistryError,
};
pub use result::{
    CorsDecision, PreflightRejection, PreflightRejectionReason, SimpleRejection,
    SimpleRejectionReason,
};
pub use web_config::{CorsConfigurer, WebConfig, register};
