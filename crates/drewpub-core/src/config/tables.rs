use super::defaults;
use super::models::{AppConfig, LogLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    tts: TtsConfig,
    #[serde(default)]
    chunking: ChunkingConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            narrator_voice: tables.tts.narrator_voice,
            male_voice: tables.tts.male_voice,
            female_voice: tables.tts.female_voice,
            tts_speed: tables.tts.speed,
            language: tables.tts.language,
            max_chunk_bytes: tables.chunking.max_chunk_bytes,
            split_chunk_bytes: tables.chunking.split_chunk_bytes,
            context_window_chars: tables.chunking.context_window_chars,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            tts: TtsConfig {
                narrator_voice: config.narrator_voice.clone(),
                male_voice: config.male_voice.clone(),
                female_voice: config.female_voice.clone(),
                speed: config.tts_speed,
                language: config.language.clone(),
            },
            chunking: ChunkingConfig {
                max_chunk_bytes: config.max_chunk_bytes,
                split_chunk_bytes: config.split_chunk_bytes,
                context_window_chars: config.context_window_chars,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct TtsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    narrator_voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    male_voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    female_voice: Option<String>,
    #[serde(default = "defaults::default_tts_speed")]
    speed: f32,
    #[serde(default = "defaults::default_language")]
    language: String,
}

impl Default for TtsConfig {
    fn default() -> Self {
        TtsConfig {
            narrator_voice: None,
            male_voice: None,
            female_voice: None,
            speed: defaults::default_tts_speed(),
            language: defaults::default_language(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct ChunkingConfig {
    #[serde(default = "defaults::default_max_chunk_bytes")]
    max_chunk_bytes: usize,
    #[serde(default = "defaults::default_split_chunk_bytes")]
    split_chunk_bytes: usize,
    #[serde(default = "defaults::default_context_window_chars")]
    context_window_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        ChunkingConfig {
            max_chunk_bytes: defaults::default_max_chunk_bytes(),
            split_chunk_bytes: defaults::default_split_chunk_bytes(),
            context_window_chars: defaults::default_context_window_chars(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
