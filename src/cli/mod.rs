//! CLI layer: argument parsing and command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Generator};

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{Cli, Commands};
pub use error::{CliError, CliResult};

pub fn print_completions<G: Generator>(generator: G) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(generator, &mut cmd, name, &mut io::stdout());
}
