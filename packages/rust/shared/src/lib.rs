//! Shared types, error model, and configuration for TextRelay.
//!
//! This crate is the foundation depended on by all other TextRelay crates.
//! It provides:
//! - [`PipelineError`] — the unified error type
//! - Domain types ([`ProcessingState`], [`ChunkInfo`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, WebhookConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from, validate_endpoint,
};
pub use error::{PipelineError, Result};
pub use types::{ChunkInfo, ProcessingState};
