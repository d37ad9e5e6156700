//! Userhub backend library modules.
//!
//! A starter backend shaped as a hexagon: the [`domain`] holds the entity
//! model, the repository port, the get-users usecase, and its cached
//! loader; [`inbound`] adapts HTTP traffic onto the domain; [`outbound`]
//! adapts the domain onto PostgreSQL.

pub mod demo_seed;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
