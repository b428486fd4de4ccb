use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vdk")]
#[command(about = "Voice Demo Kit: drive persona sessions with tool calls", long_about = None)]
pub struct Cli {
    /// Path to vdk.toml (defaults to ./vdk.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Reject out-of-order tool calls instead of only logging them
    #[arg(long, global = true)]
    pub enforce: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available personas
    Personas,

    /// Print a persona's tool declarations as JSON
    Tools {
        /// Persona name, e.g. grocery
        persona: String,
    },

    /// Print a persona's instructions
    Instructions {
        /// Persona name, e.g. wellness
        persona: String,
    },

    /// Interactive session: each line is `tool_name {json args}`
    Console {
        /// Persona name, e.g. improv
        persona: String,
    },

    /// Run one JSON function call per line and print each response as a JSON line
    Replay {
        /// Persona name, e.g. shopping
        persona: String,

        /// JSONL file of function calls
        file: PathBuf,
    },
}
