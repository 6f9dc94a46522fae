//! One-way pin hashing

pub mod bcrypt_hasher;

pub use bcrypt_hasher::BcryptPinHasher;
