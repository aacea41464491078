//! Infrastructure layer - Concrete engine implementations

pub mod chunkers;
pub mod classifier;
pub mod logging;
pub mod observability;
pub mod services;
pub mod tokenizer;
