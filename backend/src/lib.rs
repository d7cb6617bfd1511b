//! Exercise tracker library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the entities, ports
//! and the exercise log service; [`inbound`] and [`outbound`] adapt HTTP and
//! persistence to those ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
