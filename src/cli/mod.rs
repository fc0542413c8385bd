//! Command-line interface handling

mod args;

pub use args::{get_help_message, parse_args, CliOptions, Command};
