//! Terminal output for the commands
//!
//! Summaries and tables are rendered to plain text first. In an
//! interactive terminal the same content is drawn with `cliclack`; in pipes
//! and CI logs it is printed as is.

mod mode;
mod progress;
mod report;

pub use mode::OutputMode;
pub use progress::Spinner;
pub use report::{environment_table, status, Report, Status};
