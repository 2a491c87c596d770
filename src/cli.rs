//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// An AI portfolio assistant over client and transaction data.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Question to answer; reads questions line-by-line from stdin when omitted
    #[arg(value_name = "QUESTION", trailing_var_arg = true)]
    pub question: Vec<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// LLM provider to use (overrides config: "openai" or "mock")
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Run fully offline: mock model and fixture data only
    #[arg(long)]
    pub mock: bool,

    /// Print backend health and exit
    #[arg(long)]
    pub health: bool,

    /// Write logs to a file instead of stderr
    #[arg(long)]
    pub log_file: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The question assembled from positional arguments, if any.
    pub fn question_text(&self) -> Option<String> {
        if self.question.is_empty() {
            None
        } else {
            Some(self.question.join(" "))
        }
    }
}
