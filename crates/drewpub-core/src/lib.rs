//! Chapter narration for the DrewPub reader.
//!
//! [`segmenter`] splits chapter text into narration and attributed dialogue,
//! [`chunks`] turns segments into speakable chunks, and [`engine`] plays
//! them one at a time through a [`backend::SpeechBackend`]. [`runtime`] runs
//! the engine on its own thread and [`reader`] wraps either form with the
//! reader's play controls.

pub mod backend;
pub mod bindings;
pub mod cancellation;
pub mod chunks;
pub mod config;
pub mod engine;
pub mod error;
pub mod gazetteer;
pub mod reader;
pub mod runtime;
pub mod segmenter;
pub mod text_utils;
pub mod voices;

pub use backend::{SpeechBackend, SynthesisError, Utterance, UtteranceEvent, UtteranceId};
pub use chunks::{Chunk, ChunkLimits, VoiceType, build_tts_chunks, build_tts_chunks_with};
pub use engine::{PlaybackCallbacks, PlaybackEngine, PlaybackSnapshot, PlaybackState};
pub use error::NarrationError;
pub use reader::{ChapterNarrator, PlaybackControl, ToggleOutcome};
pub use runtime::{BackendEvents, NarratorHandle, spawn_narrator};
pub use segmenter::{Gender, Segment, parse_chapter_text, parse_chapter_text_with};
pub use voices::{Voice, VoiceAssignment};
