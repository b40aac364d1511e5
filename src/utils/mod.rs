//! Shared helpers

pub mod hashing;
pub mod paths;

pub use hashing::sha256_hex;
pub use paths::{lexical_join, JoinError};
