use std::path::PathBuf;

use clap::Parser;

/// Clipscribe audio transcription API
#[derive(Debug, Parser)]
#[command(name = "clipscribe", about = "Upload audio, transcribe it, and stream completions over the transcript")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "clipscribe.toml", env = "CLIPSCRIBE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "CLIPSCRIBE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info", env = "CLIPSCRIBE_LOG")]
    pub log_level: String,

    /// JSON file of `{ "title", "template" }` prompts loaded into an empty store
    #[arg(long)]
    pub seed_prompts: Option<PathBuf>,
}
