//! Logging setup and run reports for the command-line driver

mod output;

pub use output::{report_outcome, setup_output};
