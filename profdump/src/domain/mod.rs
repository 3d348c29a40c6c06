//! Domain model for profdump
//!
//! Core newtypes and structured errors shared between the decoder and the
//! report renderer:
//! - Compile-time safety via newtype pattern
//! - Self-documenting function signatures
//! - Structured error handling

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::{DescriptorId, ThreadId};

pub use errors::DecodeError;
