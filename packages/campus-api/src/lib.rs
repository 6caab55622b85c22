//! REST API server for the campus registry.
//!
//! Provides HTTP endpoints for course and student CRUD with
//! query-parameter filtering and request routing.

pub mod handlers;
pub mod router;
pub mod server;
