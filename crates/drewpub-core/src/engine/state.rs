use crate::backend::UtteranceId;
use crate::cancellation::CancellationToken;
use crate::chunks::Chunk;
use crate::voices::VoiceAssignment;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// What observers see on every state change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub is_paused: bool,
    pub current_index: usize,
    pub total_chunks: usize,
}

impl PlaybackSnapshot {
    pub fn state(&self) -> PlaybackState {
        match (self.is_playing, self.is_paused) {
            (false, _) => PlaybackState::Idle,
            (true, false) => PlaybackState::Playing,
            (true, true) => PlaybackState::Paused,
        }
    }
}

/// Mutable state of one playback session, owned by the engine.
#[derive(Debug)]
pub(crate) struct PlaybackSession {
    pub(crate) id: u64,
    pub(crate) chunks: Vec<Chunk>,
    pub(crate) voices: VoiceAssignment,
    pub(crate) current_index: usize,
    pub(crate) is_playing: bool,
    pub(crate) is_paused: bool,
    pub(crate) rate: f32,
    pub(crate) cancel: CancellationToken,
    pub(crate) in_flight: Option<UtteranceId>,
}

impl PlaybackSession {
    pub(crate) fn idle(rate: f32) -> Self {
        Self {
            id: 0,
            chunks: Vec::new(),
            voices: VoiceAssignment::default(),
            current_index: 0,
            is_playing: false,
            is_paused: false,
            rate,
            cancel: CancellationToken::new(),
            in_flight: None,
        }
    }

    pub(crate) fn begin(id: u64, chunks: Vec<Chunk>, voices: VoiceAssignment, rate: f32) -> Self {
        Self {
            id,
            chunks,
            voices,
            current_index: 0,
            is_playing: true,
            is_paused: false,
            rate,
            cancel: CancellationToken::new(),
            in_flight: None,
        }
    }

    pub(crate) fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            is_playing: self.is_playing,
            is_paused: self.is_paused,
            current_index: self.current_index,
            total_chunks: self.chunks.len(),
        }
    }

    pub(crate) fn last_index(&self) -> usize {
        self.chunks.len().saturating_sub(1)
    }
}
