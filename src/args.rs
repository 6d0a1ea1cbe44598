use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tailwind class linter - reformats and validates utility-class strings
#[derive(Parser, Debug)]
#[command(name = "tailwind-linter-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint source files for class-list violations
    Check(CheckArgs),
    /// Serve bridge requests for one framework major version (internal)
    Worker(WorkerArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Input file patterns (glob patterns supported)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATTERN",
        required = true,
        num_args = 1..,
        help = "Input file patterns to lint"
    )]
    pub input: Vec<String>,

    /// Exclude patterns (glob patterns to exclude)
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATTERN",
        num_args = 0..,
        help = "Patterns to exclude from linting"
    )]
    pub exclude: Vec<String>,

    /// Options file path (YAML or JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        env = "TAILWIND_LINTER_CONFIG",
        help = "Path to lint options file (YAML or JSON format)"
    )]
    pub config: Option<PathBuf>,

    /// Apply fixes to the files in place
    #[arg(
        long = "fix",
        default_value_t = false,
        help = "Rewrite files with automatic fixes applied"
    )]
    pub fix: bool,

    /// Run only the named rules
    #[arg(
        short = 'r',
        long = "rule",
        value_name = "NAME",
        num_args = 0..,
        help = "Restrict the run to specific rules"
    )]
    pub rule: Vec<String>,

    /// Number of parallel threads to use
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "NUM",
        help = "Number of parallel threads to use (defaults to number of CPU cores)"
    )]
    pub jobs: Option<usize>,

    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        default_value_t = false,
        help = "Enable verbose output"
    )]
    pub verbose: bool,
}

/// Arguments for the worker command
#[derive(Parser, Debug, Clone)]
pub struct WorkerArgs {
    /// Framework major version this worker serves
    #[arg(
        long = "major",
        value_name = "VERSION",
        help = "Tailwind major version (3 or 4)"
    )]
    pub major: u32,
}

impl CheckArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.input.is_empty() {
            return Err("At least one input pattern must be provided".to_string());
        }

        if let Some(jobs) = self.jobs {
            if jobs == 0 {
                return Err("Number of jobs must be at least 1".to_string());
            }
        }

        if let Some(config) = &self.config {
            if !config.is_file() {
                return Err(format!("Options file not found: {}", config.display()));
            }
        }

        Ok(())
    }
}
