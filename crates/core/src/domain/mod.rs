pub mod grade;
pub mod semester;
pub mod events;

// Re-exports for convenience
pub use grade::*;
pub use semester::*;
pub use events::*;
