//! CLI command definitions and handlers.

pub mod configs;
pub mod init;
pub mod preview;
pub mod process;

use clap::{Parser, Subcommand};

/// Quadrant - Split screenshots into configured screen regions
#[derive(Parser)]
#[command(name = "quadrant")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Crop captures into the regions of a stored configuration
    Process(process::ProcessArgs),
    /// Render a region overlay onto a capture
    Preview(preview::PreviewArgs),
    /// Create and store a default 2x2 grid configuration
    Init(init::InitArgs),
    /// List stored configurations
    Configs(configs::ConfigsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The command finished without failures.
    Success,
    /// The batch run was marked failed.
    BatchFailed,
    /// Invocation or I/O error outside the batch itself.
    Error,
    /// The batch run was cancelled.
    Cancelled,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::BatchFailed => Self::from(1),
            ExitCode::Error => Self::from(2),
            ExitCode::Cancelled => Self::from(130),
        }
    }
}
