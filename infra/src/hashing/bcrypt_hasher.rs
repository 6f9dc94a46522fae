//! bcrypt implementation of PinHasher

use mp_core::errors::{DomainError, DomainResult};
use mp_core::services::verification::PinHasher;

/// Salted bcrypt hashing
#[derive(Debug, Clone, Copy)]
pub struct BcryptPinHasher {
    cost: u32,
}

impl BcryptPinHasher {
    /// Create a hasher with the given work factor
    ///
    /// Costs outside bcrypt's 4..=31 range are clamped into it.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPinHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PinHasher for BcryptPinHasher {
    fn hash(&self, pin: &str) -> DomainResult<String> {
        bcrypt::hash(pin, self.cost).map_err(|e| DomainError::infrastructure("Failed to hash pin", e))
    }

    fn compare(&self, hash: &str, pin: &str) -> DomainResult<bool> {
        bcrypt::verify(pin, hash)
            .map_err(|e| DomainError::infrastructure("Failed to compare pin hash", e))
    }
}
