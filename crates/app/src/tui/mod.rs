pub mod model;
pub mod view;
pub mod update;

// Re-exports for convenience
pub use model::*;
pub use view::*;
pub use update::*;