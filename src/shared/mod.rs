/// Shared kernel - error types and helpers used by every layer
pub mod error;
pub mod result;
pub mod paths;

pub use result::Result;
