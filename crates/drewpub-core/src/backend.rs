//! The speech-synthesis capability the playback engine drives.
//!
//! A backend speaks one utterance at a time and reports how it finished
//! through [`UtteranceEvent`]s delivered back to the engine, either by the
//! host calling `PlaybackEngine::handle_event` or through the channel handed
//! out by the threaded runtime.

use crate::voices::Voice;
use thiserror::Error;

/// Identifies one `speak` request. Never zero.
pub type UtteranceId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceEvent {
    Ended {
        id: UtteranceId,
    },
    Failed {
        id: UtteranceId,
        error: SynthesisError,
    },
}

impl UtteranceEvent {
    pub fn id(&self) -> UtteranceId {
        match self {
            UtteranceEvent::Ended { id } | UtteranceEvent::Failed { id, .. } => *id,
        }
    }
}

/// Failure reported by a speech backend, keyed by the platform error code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("System speech error: interrupted")]
    Interrupted,
    #[error("System speech error: canceled")]
    Canceled,
    #[error("System speech error: audio-busy")]
    AudioBusy,
    #[error("System speech error: audio-hardware")]
    AudioHardware,
    #[error("System speech error: network")]
    Network,
    #[error("System speech error: synthesis-unavailable")]
    SynthesisUnavailable,
    #[error("System speech error: synthesis-failed")]
    SynthesisFailed,
    #[error("System speech error: language-unavailable")]
    LanguageUnavailable,
    #[error("System speech error: voice-unavailable")]
    VoiceUnavailable,
    #[error("System speech error: text-too-long")]
    TextTooLong,
    #[error("System speech error: invalid-argument")]
    InvalidArgument,
    #[error("System speech error: not-allowed")]
    NotAllowed,
    #[error("System speech error: {0}")]
    Other(String),
}

impl SynthesisError {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "interrupted" => Self::Interrupted,
            "canceled" | "cancelled" => Self::Canceled,
            "audio-busy" => Self::AudioBusy,
            "audio-hardware" => Self::AudioHardware,
            "network" => Self::Network,
            "synthesis-unavailable" => Self::SynthesisUnavailable,
            "synthesis-failed" => Self::SynthesisFailed,
            "language-unavailable" => Self::LanguageUnavailable,
            "voice-unavailable" => Self::VoiceUnavailable,
            "text-too-long" => Self::TextTooLong,
            "invalid-argument" => Self::InvalidArgument,
            "not-allowed" => Self::NotAllowed,
            _ => Self::Other(code.to_string()),
        }
    }

    /// True for the errors a backend raises when an utterance is cut short
    /// on purpose (stop, skip, restart).
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Interrupted | Self::Canceled)
    }
}

/// Platform speech synthesis, one utterance speaking at a time.
///
/// `speak` returns once the request is accepted; the outcome arrives later
/// as an [`UtteranceEvent`] carrying the same id. `cancel` drops the current
/// utterance and anything queued behind it.
pub trait SpeechBackend {
    /// Voices known so far. May be empty until the platform finishes loading.
    fn voices(&self) -> Vec<Voice>;
    fn speak(&mut self, utterance: Utterance) -> Result<(), SynthesisError>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn cancel(&mut self);
    /// Whether an utterance is in progress, paused or not.
    fn is_speaking(&self) -> bool;
}

impl<B: SpeechBackend + ?Sized> SpeechBackend for Box<B> {
    fn voices(&self) -> Vec<Voice> {
        (**self).voices()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SynthesisError> {
        (**self).speak(utterance)
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn resume(&mut self) {
        (**self).resume()
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }

    fn is_speaking(&self) -> bool {
        (**self).is_speaking()
    }
}
