//! Domain entities backing one user's verification session.
//!
//! A session is the pin, the failed-attempt counter and the block of a single
//! user. They are persisted as separate rows but only ever mutated together
//! by the verification workflow.

pub mod attempt;
pub mod block;
pub mod pin;

// Re-export commonly used types
pub use attempt::{failures_exceed, AttemptRecord};
pub use block::BlockRecord;
pub use pin::{generate_pin, PinRecord};
