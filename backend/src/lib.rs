//! Academy portal backend library.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities,
//! policies and ports; [`inbound`] adapts HTTP onto the driving ports and
//! [`outbound`] implements the driven ports over Postgres, memory, argon2
//! and the portal's own HTTP API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
