//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot solves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable solution
    #[default]
    Pretty,
    /// The `SolveResult` as JSON
    Json,
}

/// CLI arguments for math-solver
#[derive(Parser, Debug)]
#[command(name = "math-solver")]
#[command(author, version, about = "Step-by-step JEE Mains math solutions from Gemini")]
#[command(long_about = r#"
math-solver answers JEE Mains math questions with structured, step-by-step
solutions. Questions can be typed or read from an image.

Configuration files are loaded from (in priority order):
1. GEMINI_API_KEY, PORT, DEBUG and MATH_SOLVER_* environment variables
2. --config <path>         Explicit config file
3. ./math-solver.toml      Project-level config
4. ~/.config/math-solver/config.toml   Global config

Example:
  math-solver serve --port 8080
  math-solver solve "Find the derivative of f(x) = x^3 + 2x^2 - 5x + 1"
  math-solver solve --image question.png --output json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web application
    Serve {
        /// Address to bind (overrides `server.host`)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `server.port` and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Solve one question and print the result
    Solve {
        /// The question text (ignored when --image is given)
        question: Option<String>,

        /// Read the question from a PNG or JPEG image
        #[arg(short, long, value_name = "PATH")]
        image: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        output: OutputFormat,

        /// Suppress progress indicators
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show configuration sources and effective values
    ShowConfig,
}
