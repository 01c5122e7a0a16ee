//! Database module: the `users` table and raw query execution.
//!
//! Layout:
//! - `models.rs`: the user row and the fixed seed records
//! - `schema.rs`: SQL DDL for the `users` table
//! - `sqlite.rs`: pool setup and query helpers

pub mod models;
pub mod schema;
pub mod sqlite;

pub use sqlite::{FieldMap, UsersStorage};
