//! Front end: command-line arguments and the interactive menu.
//!
//! Both produce a [`Command`](crate::commands::Command); neither runs anything.

pub mod args;
pub mod menu;

pub use args::{Cli, CliCommand};
pub use menu::{prompt_command, MenuError};
