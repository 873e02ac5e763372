use std::path::PathBuf;

use clap::Parser;

use notegate_core::VERSION;

/// Notegate - reveal a note only after the right password
#[derive(Parser)]
#[command(name = "notegate")]
#[command(author, version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Path to the note store
    #[arg(short, long, env = "NOTEGATE_STORE")]
    pub store: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, env = "NOTEGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}
