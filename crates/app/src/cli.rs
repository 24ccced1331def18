use clap::{Parser, Subcommand};
use gradecalc_core::format::HeaderStyle;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "gradecalc")]
#[command(about = "GradeCalc - track semesters, classes and letter grades from the terminal")]
pub struct CliArgs {
    /// Semester data file to load and save (overrides config)
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Semester header style: substring or tagged (overrides config)
    #[arg(long)]
    pub header_style: Option<HeaderStyle>,

    /// Run a single command and exit instead of starting the TUI
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum CliCommand {
    /// Print every semester name
    List,

    /// Print each class of a semester with its letter grade
    Grades {
        /// Semester name, matched exactly
        semester: String,
    },
}
