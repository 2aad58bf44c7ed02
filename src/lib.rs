//! Fortell - PDF to Podcast
//!
//! A library and CLI tool for turning PDF documents into narrated audio
//! podcasts.
//!
//! The name "Fortell" comes from the Norwegian word for "tell" or "narrate."
//!
//! # Overview
//!
//! Fortell allows you to:
//! - Extract text from a PDF document
//! - Select the passages most relevant to an optional query
//! - Generate a narration script with an LLM, expanded until it meets a
//!   minimum length
//! - Synthesize the script to an audio file with a TTS backend
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `document` - PDF text extraction boundary
//! - `chunking` - Boundary-aware text chunking
//! - `retrieval` - Query-relevance chunk selection
//! - `prompt` - Prompt builders and audience/complexity mappings
//! - `llm` - Generative text backends and the script writer
//! - `tts` - Speech synthesis backends
//! - `retry` - Retry policy for transient backend failures
//! - `generator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use fortell::config::Settings;
//! use fortell::generator::{GenerateOptions, PodcastGenerator};
//! use fortell::prompt::{Audience, Complexity};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let generator = PodcastGenerator::new(settings).await?;
//!
//!     let result = generator
//!         .generate(
//!             "paper.pdf",
//!             "podcast.mp3",
//!             Complexity::Intermediate,
//!             Audience::General,
//!             None,
//!             &GenerateOptions::default(),
//!         )
//!         .await?;
//!     println!("Script: {} characters", result.script.len());
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod llm;
pub mod prompt;
pub mod retrieval;
pub mod retry;
pub mod tts;

pub use error::{FortellError, Result};
