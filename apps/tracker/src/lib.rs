//! Single-owner job application tracker.
//!
//! The `tracker` binary serves the `/applications` API; the `dashboard`
//! binary is its client.

pub mod applications;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
