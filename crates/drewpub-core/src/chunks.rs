//! Sentence-level, byte-bounded chunks ready for speech synthesis.

use crate::segmenter::{Gender, Segment};
use crate::text_utils::{split_into_sentences, split_long_text};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

/// Sentences above this many UTF-8 bytes are split further.
pub const MAX_CHUNK_BYTES: usize = 4500;
/// Target size of the parts produced when a sentence is split.
pub const SPLIT_CHUNK_BYTES: usize = 4000;

/// Voice category a chunk is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum VoiceType {
    #[default]
    Narrator,
    Male,
    Female,
}

impl VoiceType {
    pub fn for_segment(segment: &Segment) -> Self {
        match segment {
            Segment::Narration { .. } => VoiceType::Narrator,
            Segment::Dialogue { gender, .. } => match gender {
                Gender::Female => VoiceType::Female,
                Gender::Male => VoiceType::Male,
                Gender::Unknown => VoiceType::Narrator,
            },
        }
    }
}

impl std::fmt::Display for VoiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VoiceType::Narrator => "narrator",
            VoiceType::Male => "male",
            VoiceType::Female => "female",
        };
        write!(f, "{}", label)
    }
}

/// One utterance worth of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Chunk {
    pub text: String,
    pub voice_type: VoiceType,
    pub speaker: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    pub max_bytes: usize,
    pub split_bytes: usize,
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            max_bytes: MAX_CHUNK_BYTES,
            split_bytes: SPLIT_CHUNK_BYTES,
        }
    }
}

pub fn build_tts_chunks(segments: &[Segment]) -> Vec<Chunk> {
    build_tts_chunks_with(segments, ChunkLimits::default())
}

/// Flattens segments into chunks, keeping segment, sentence and sub-split
/// order. Every chunk inherits the voice type and speaker of its segment.
pub fn build_tts_chunks_with(segments: &[Segment], limits: ChunkLimits) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for segment in segments {
        let voice_type = VoiceType::for_segment(segment);
        let speaker = segment.speaker().map(str::to_string);

        for sentence in split_into_sentences(segment.text()) {
            if sentence.len() > limits.max_bytes {
                let parts = split_long_text(&sentence, limits.split_bytes);
                debug!(
                    bytes = sentence.len(),
                    parts = parts.len(),
                    "Split oversized sentence"
                );
                chunks.extend(parts.into_iter().map(|text| Chunk {
                    text,
                    voice_type,
                    speaker: speaker.clone(),
                }));
            } else {
                chunks.push(Chunk {
                    text: sentence,
                    voice_type,
                    speaker: speaker.clone(),
                });
            }
        }
    }

    debug!(
        segments = segments.len(),
        chunks = chunks.len(),
        "Built TTS chunks"
    );
    chunks
}
