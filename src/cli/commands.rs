//! Command implementations for the Fortell CLI.

use crate::config::Settings;
use crate::error::Result;
use crate::generator::{GenerateOptions, PodcastGenerator};
use crate::prompt::{Audience, Complexity};
use console::style;
use std::path::PathBuf;

/// Write a default configuration file if none exists.
pub fn run_init(settings: &Settings) -> Result<()> {
    let path = Settings::default_config_path();
    if path.exists() {
        eprintln!("Config already exists at {}", path.display());
        return Ok(());
    }
    settings.save_to(&path)?;
    eprintln!("{} Wrote default config to {}", style("✓").green(), path.display());
    Ok(())
}

/// Run the full PDF-to-podcast pipeline.
#[allow(clippy::too_many_arguments)]
pub async fn run_generate(
    pdf: &str,
    output: &str,
    complexity: &str,
    audience: &str,
    query: Option<String>,
    min_length: Option<usize>,
    voice: Option<String>,
    script_out: Option<String>,
    settings: Settings,
) -> Result<()> {
    let complexity: Complexity = complexity.parse().unwrap_or_default();
    let audience: Audience = audience.parse().unwrap_or_default();

    eprintln!("  Building pipeline...");
    let generator = PodcastGenerator::new(settings).await?;

    let options = GenerateOptions {
        min_length,
        voice_id: voice,
        ..Default::default()
    };

    eprintln!("  Generating podcast from {}...", pdf);
    let result = generator
        .generate(pdf, output, complexity, audience, query.as_deref(), &options)
        .await?;

    if let Some(script_path) = script_out {
        let script_path = PathBuf::from(script_path);
        std::fs::write(&script_path, &result.script)?;
        eprintln!("  Script saved to {}", script_path.display());
    }

    eprintln!("{} Podcast generated", style("✓").green());
    eprintln!("  Script length: {} characters", result.script.chars().count());
    eprintln!("  Audio file: {}", result.audio.path.display());
    eprintln!("  Audio size: {} bytes", result.audio.size_bytes);

    Ok(())
}
