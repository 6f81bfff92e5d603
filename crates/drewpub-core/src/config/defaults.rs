use super::models::LogLevel;
use crate::chunks::{MAX_CHUNK_BYTES, SPLIT_CHUNK_BYTES};
use crate::segmenter::DEFAULT_CONTEXT_CHARS;
use crate::voices::DEFAULT_LANGUAGE;

pub(crate) fn default_tts_speed() -> f32 {
    1.0
}

pub(crate) fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

pub(crate) fn default_max_chunk_bytes() -> usize {
    MAX_CHUNK_BYTES
}

pub(crate) fn default_split_chunk_bytes() -> usize {
    SPLIT_CHUNK_BYTES
}

pub(crate) fn default_context_window_chars() -> usize {
    DEFAULT_CONTEXT_CHARS
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Info
}
