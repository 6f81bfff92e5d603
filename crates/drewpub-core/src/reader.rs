//! Reader-facing narration controls: the play button, speed cycling and
//! the labels shown next to the current chunk.

use crate::backend::SpeechBackend;
use crate::chunks::{Chunk, ChunkLimits, VoiceType, build_tts_chunks_with};
use crate::config::AppConfig;
use crate::engine::{PlaybackEngine, PlaybackSnapshot, PlaybackState};
use crate::error::NarrationError;
use crate::runtime::NarratorHandle;
use crate::segmenter::{DEFAULT_CONTEXT_CHARS, parse_chapter_text_with};
use crate::voices::VoiceAssignment;
use tracing::{debug, info};

pub const SPEED_OPTIONS: [f32; 5] = [0.75, 1.0, 1.25, 1.5, 2.0];

/// Playback surface shared by an in-thread engine and the narrator runtime.
pub trait PlaybackControl {
    fn start(
        &mut self,
        chunks: Vec<Chunk>,
        voices: VoiceAssignment,
        rate: f32,
    ) -> Result<(), NarrationError>;
    fn pause(&mut self) -> Result<(), NarrationError>;
    fn resume(&mut self) -> Result<(), NarrationError>;
    fn stop(&mut self) -> Result<(), NarrationError>;
    fn skip_forward(&mut self) -> Result<(), NarrationError>;
    fn skip_back(&mut self) -> Result<(), NarrationError>;
    fn set_rate(&mut self, rate: f32) -> Result<(), NarrationError>;
    fn snapshot(&self) -> Result<PlaybackSnapshot, NarrationError>;
}

impl<B: SpeechBackend> PlaybackControl for PlaybackEngine<B> {
    fn start(
        &mut self,
        chunks: Vec<Chunk>,
        voices: VoiceAssignment,
        rate: f32,
    ) -> Result<(), NarrationError> {
        PlaybackEngine::start(self, chunks, voices, rate);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), NarrationError> {
        PlaybackEngine::pause(self);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), NarrationError> {
        PlaybackEngine::resume(self);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), NarrationError> {
        PlaybackEngine::stop(self);
        Ok(())
    }

    fn skip_forward(&mut self) -> Result<(), NarrationError> {
        PlaybackEngine::skip_forward(self);
        Ok(())
    }

    fn skip_back(&mut self) -> Result<(), NarrationError> {
        PlaybackEngine::skip_back(self);
        Ok(())
    }

    fn set_rate(&mut self, rate: f32) -> Result<(), NarrationError> {
        PlaybackEngine::set_rate(self, rate);
        Ok(())
    }

    fn snapshot(&self) -> Result<PlaybackSnapshot, NarrationError> {
        Ok(PlaybackEngine::snapshot(self))
    }
}

impl PlaybackControl for NarratorHandle {
    fn start(
        &mut self,
        chunks: Vec<Chunk>,
        voices: VoiceAssignment,
        rate: f32,
    ) -> Result<(), NarrationError> {
        NarratorHandle::start(self, chunks, voices, rate)
    }

    fn pause(&mut self) -> Result<(), NarrationError> {
        NarratorHandle::pause(self)
    }

    fn resume(&mut self) -> Result<(), NarrationError> {
        NarratorHandle::resume(self)
    }

    fn stop(&mut self) -> Result<(), NarrationError> {
        NarratorHandle::stop(self)
    }

    fn skip_forward(&mut self) -> Result<(), NarrationError> {
        NarratorHandle::skip_forward(self)
    }

    fn skip_back(&mut self) -> Result<(), NarrationError> {
        NarratorHandle::skip_back(self)
    }

    fn set_rate(&mut self, rate: f32) -> Result<(), NarrationError> {
        NarratorHandle::set_rate(self, rate)
    }

    fn snapshot(&self) -> Result<PlaybackSnapshot, NarrationError> {
        NarratorHandle::snapshot(self)
    }
}

/// What a press of the play button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started { chunks: usize },
    Paused,
    Resumed,
}

#[derive(Debug)]
pub struct ChapterNarrator<P: PlaybackControl> {
    playback: P,
    voices: VoiceAssignment,
    speed: f32,
    context_chars: usize,
    limits: ChunkLimits,
}

impl<P: PlaybackControl> ChapterNarrator<P> {
    pub fn new(playback: P) -> Self {
        Self {
            playback,
            voices: VoiceAssignment::default(),
            speed: 1.0,
            context_chars: DEFAULT_CONTEXT_CHARS,
            limits: ChunkLimits::default(),
        }
    }

    pub fn from_config(playback: P, config: &AppConfig) -> Self {
        Self {
            playback,
            voices: config.voice_assignment(),
            speed: config.tts_speed,
            context_chars: config.context_window_chars,
            limits: config.chunk_limits(),
        }
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    pub fn voices(&self) -> &VoiceAssignment {
        &self.voices
    }

    /// Takes effect the next time playback starts.
    pub fn set_voices(&mut self, voices: VoiceAssignment) {
        self.voices = voices;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Resumes when paused, pauses when playing, otherwise narrates
    /// `chapter_text` from the top.
    pub fn toggle_play(&mut self, chapter_text: &str) -> Result<ToggleOutcome, NarrationError> {
        match self.playback.snapshot()?.state() {
            PlaybackState::Paused => {
                self.playback.resume()?;
                Ok(ToggleOutcome::Resumed)
            }
            PlaybackState::Playing => {
                self.playback.pause()?;
                Ok(ToggleOutcome::Paused)
            }
            PlaybackState::Idle => {
                if chapter_text.trim().is_empty() {
                    return Err(NarrationError::NoText);
                }
                let segments = parse_chapter_text_with(chapter_text, self.context_chars);
                let chunks = build_tts_chunks_with(&segments, self.limits);
                if chunks.is_empty() {
                    return Err(NarrationError::NoReadableText);
                }
                let count = chunks.len();
                info!(
                    segments = segments.len(),
                    chunks = count,
                    "Narrating chapter"
                );
                self.playback.start(chunks, self.voices.clone(), self.speed)?;
                Ok(ToggleOutcome::Started { chunks: count })
            }
        }
    }

    /// Steps to the next speed option, wrapping around, and applies it.
    pub fn cycle_speed(&mut self) -> Result<f32, NarrationError> {
        let next = next_speed(self.speed);
        debug!(from = self.speed, to = next, "Cycling narration speed");
        self.speed = next;
        self.playback.set_rate(next)?;
        Ok(next)
    }

    pub fn skip_forward(&mut self) -> Result<(), NarrationError> {
        self.playback.skip_forward()
    }

    pub fn skip_back(&mut self) -> Result<(), NarrationError> {
        self.playback.skip_back()
    }

    pub fn snapshot(&self) -> Result<PlaybackSnapshot, NarrationError> {
        self.playback.snapshot()
    }

    pub fn close(&mut self) -> Result<(), NarrationError> {
        self.playback.stop()
    }
}

fn next_speed(current: f32) -> f32 {
    SPEED_OPTIONS
        .iter()
        .position(|option| (option - current).abs() < 1e-3)
        .map_or(SPEED_OPTIONS[0], |idx| {
            SPEED_OPTIONS[(idx + 1) % SPEED_OPTIONS.len()]
        })
}

pub fn voice_label(chunk: &Chunk) -> String {
    match (chunk.voice_type, chunk.speaker.as_deref()) {
        (VoiceType::Narrator, _) => "Narrator".to_string(),
        (_, Some(speaker)) => speaker.to_string(),
        (VoiceType::Male, None) => "Male Character".to_string(),
        (VoiceType::Female, None) => "Female Character".to_string(),
    }
}

pub fn progress_percent(snapshot: &PlaybackSnapshot) -> u32 {
    if snapshot.total_chunks == 0 {
        return 0;
    }
    (snapshot.current_index as f64 / snapshot.total_chunks as f64 * 100.0).round() as u32
}
