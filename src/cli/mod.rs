//! CLI module for Fortell.

pub mod commands;

use clap::{Parser, Subcommand};

/// Fortell - PDF to Podcast
///
/// Turn PDF documents into narrated audio podcasts.
/// The name "Fortell" comes from the Norwegian word for "tell" or "narrate."
#[derive(Parser, Debug)]
#[command(name = "fortell")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file
    Init,

    /// Generate a podcast from a PDF document
    Generate {
        /// Path to the input PDF
        pdf: String,

        /// Path for the output audio file
        #[arg(short, long, default_value = "podcast.mp3")]
        output: String,

        /// Complexity level (basic, intermediate, advanced)
        #[arg(long, default_value = "intermediate")]
        complexity: String,

        /// Target audience (general, technical, enthusiasts)
        #[arg(long, default_value = "general")]
        audience: String,

        /// Focus the script on passages relevant to this query
        #[arg(short, long)]
        query: Option<String>,

        /// Minimum script length in characters
        #[arg(long)]
        min_length: Option<usize>,

        /// TTS voice to use
        #[arg(long)]
        voice: Option<String>,

        /// Also write the generated script to this text file
        #[arg(long)]
        script_out: Option<String>,
    },
}
