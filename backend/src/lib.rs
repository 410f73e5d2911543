//! Account registration, authentication and management service.
//!
//! The crate follows a hexagonal layout: [`domain`] holds types, policy and
//! ports; [`inbound`] and [`outbound`] adapt HTTP and infrastructure to them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::trace::Trace;
