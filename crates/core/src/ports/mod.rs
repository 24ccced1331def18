pub mod storage;

// Re-exports
pub use storage::*;
