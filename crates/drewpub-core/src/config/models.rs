use super::defaults;
use crate::chunks::ChunkLimits;
use crate::voices::VoiceAssignment;
use serde::{Deserialize, Serialize};

pub const MIN_TTS_SPEED: f32 = 0.5;
pub const MAX_TTS_SPEED: f32 = 2.0;

/// Flattened configuration; the TOML file groups these into tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub narrator_voice: Option<String>,
    #[serde(default)]
    pub male_voice: Option<String>,
    #[serde(default)]
    pub female_voice: Option<String>,
    #[serde(default = "crate::config::defaults::default_tts_speed")]
    pub tts_speed: f32,
    #[serde(default = "crate::config::defaults::default_language")]
    pub language: String,
    #[serde(default = "crate::config::defaults::default_max_chunk_bytes")]
    pub max_chunk_bytes: usize,
    #[serde(default = "crate::config::defaults::default_split_chunk_bytes")]
    pub split_chunk_bytes: usize,
    #[serde(default = "crate::config::defaults::default_context_window_chars")]
    pub context_window_chars: usize,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            narrator_voice: None,
            male_voice: None,
            female_voice: None,
            tts_speed: defaults::default_tts_speed(),
            language: defaults::default_language(),
            max_chunk_bytes: defaults::default_max_chunk_bytes(),
            split_chunk_bytes: defaults::default_split_chunk_bytes(),
            context_window_chars: defaults::default_context_window_chars(),
            log_level: defaults::default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn voice_assignment(&self) -> VoiceAssignment {
        VoiceAssignment {
            narrator: self.narrator_voice.clone(),
            male: self.male_voice.clone(),
            female: self.female_voice.clone(),
        }
    }

    pub fn chunk_limits(&self) -> ChunkLimits {
        ChunkLimits {
            max_bytes: self.max_chunk_bytes,
            split_bytes: self.split_chunk_bytes,
        }
    }

    /// Pulls out-of-range values back into range.
    pub(crate) fn clamped(mut self) -> Self {
        self.tts_speed = if self.tts_speed.is_finite() {
            self.tts_speed.clamp(MIN_TTS_SPEED, MAX_TTS_SPEED)
        } else {
            defaults::default_tts_speed()
        };
        self.max_chunk_bytes = self.max_chunk_bytes.max(1);
        self.split_chunk_bytes = self.split_chunk_bytes.clamp(1, self.max_chunk_bytes);
        self.context_window_chars = self.context_window_chars.max(1);
        if self.language.trim().is_empty() {
            self.language = defaults::default_language();
        }
        self
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        defaults::default_log_level()
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
