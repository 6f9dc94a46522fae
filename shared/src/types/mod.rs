//! Type definitions shared between the HTTP layer and its clients
//!
//! - `response` - The `{error, value}` envelope returned by every endpoint

pub mod response;

pub use response::ResultEnvelope;
