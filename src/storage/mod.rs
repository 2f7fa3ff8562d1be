//! Storage layer for Contact Desk.
//!
//! Only the one-time SQLite bootstrap of the `contacts` table lives here;
//! the authentication flow never touches the database.

mod schema;

pub use schema::{create_contacts_table, init_contacts_schema};
