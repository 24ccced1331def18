//! GradeCalc application library
//!
//! Adapters, configuration, the grade service and the TUI, exposed for the binary and tests.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod runner;
pub mod services;
pub mod tui;
