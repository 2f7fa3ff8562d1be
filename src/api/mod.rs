//! HTTP API layer for Contact Desk.
//!
//! Provides the login and token-check endpoints and hosts the client bundle.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
