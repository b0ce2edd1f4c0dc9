//! langid command-line entry point

use anyhow::Result;
use clap::Parser;
use langid_cli::commands::Commands;

/// Identify the language of text with a byte n-gram Naive Bayes model
#[derive(Debug, Parser)]
#[command(name = "langid", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress progress and log output
    #[arg(short, long, global = true)]
    quiet: bool,
}

impl Cli {
    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    cli.command.execute(cli.quiet)
}
