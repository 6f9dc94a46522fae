pub mod attempt;
pub mod block;
pub mod pin;

pub use attempt::{AttemptStore, InMemoryAttemptStore};
pub use block::{BlockStore, InMemoryBlockStore};
pub use pin::{InMemoryPinStore, PinStore};
