//! Request-level helpers shared by the route handlers

pub mod error;

pub use error::{domain_error_response, json_error_handler, status_for, validation_error_response};
