//! Fortell CLI entry point.

use anyhow::Result;
use clap::Parser;
use fortell::cli::{commands, Cli, Commands};
use fortell::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("fortell={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Credential bootstrap: the core never reads the environment, so fill
    // in missing API keys from well-known variables here.
    if settings.llm.api_key.is_none() {
        settings.llm.api_key = std::env::var("GENAI_API_KEY").ok();
    }
    if settings.tts.api_key.is_none() {
        settings.tts.api_key = std::env::var("GOOGLE_TTS_API_KEY").ok();
    }

    std::fs::create_dir_all(settings.temp_dir())?;

    // Execute command
    match cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Generate {
            pdf,
            output,
            complexity,
            audience,
            query,
            min_length,
            voice,
            script_out,
        } => {
            commands::run_generate(
                &pdf,
                &output,
                &complexity,
                &audience,
                query,
                min_length,
                voice,
                script_out,
                settings,
            )
            .await?;
        }
    }

    Ok(())
}
