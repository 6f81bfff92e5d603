//! Narrator configuration.
//!
//! Settings live in `conf/config.toml` under `[tts]`, `[chunking]` and
//! `[logging]`. Missing tables or keys take their defaults, and a missing or
//! unparsable file yields the default configuration so narration can still
//! run.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, save_config, serialize_config};
pub use models::{AppConfig, LogLevel, MAX_TTS_SPEED, MIN_TTS_SPEED};
