//! In-memory record store for the campus registry.
//!
//! Holds course and student records in insertion order with
//! store-assigned identifiers, and exposes the CRUD and filtered
//! listing operations the REST API is built on.

pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod table;
