use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ducky", author, version, about, long_about = None)]
pub struct Cli {
    /// Task file to read and rewrite
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// How task listings are printed
    #[arg(long, value_enum, default_value_t = OutputMode::Plain)]
    pub output: OutputMode,

    /// Run commands without writing the task file
    #[arg(long)]
    pub dry_run: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE")]
    pub config_override: Vec<String>,

    /// One command to run, e.g. `ducky todo buy milk`. Starts an interactive
    /// session when omitted.
    ///
    /// Example: ducky deadline return book /by 2024-03-05
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Plain,
    Table,
    Json,
}

impl Cli {
    /// The one-shot command line, if any words were given.
    pub fn command_line(&self) -> Option<String> {
        if self.command.is_empty() {
            None
        } else {
            Some(self.command.join(" "))
        }
    }
}
