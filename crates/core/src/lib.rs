//! GradeCalc Core - Pure domain logic with no I/O
//!
//! This crate contains the semester/class model, the grading function, the
//! flat-file format and the `GradeStore`. Storage is reached only through the
//! `SnapshotStorage` port; filesystem access lives in the app crate's adapters.

pub mod domain;
pub mod format;
pub mod ports;
pub mod store;
pub mod app;
pub mod error;

// Re-exports for ergonomics
pub use domain::*;
pub use error::*;
pub use store::{GradeStore, LoadReport};
