//! Authentication module for Contact Desk.
//!
//! - JWT: issues and verifies the administrator bearer token
//! - Middleware: gates protected routes on a valid token

mod jwt;
mod middleware;

pub use jwt::*;
pub use middleware::*;
