//! Domain layer - core types, traits and errors

pub mod chunking;
pub mod error;

pub use error::DomainError;
