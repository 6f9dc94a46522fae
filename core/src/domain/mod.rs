//! Domain layer containing the per-user verification records and the clock
//! every time comparison is made against.

pub mod clock;
pub mod entities;

// Re-export commonly used domain types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entities::{generate_pin, AttemptRecord, BlockRecord, PinRecord};
