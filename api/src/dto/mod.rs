//! Request bodies accepted by the HTTP layer

pub mod pin;

pub use pin::{IssuePinRequest, ResendPinRequest, VerifyPinRequest};
