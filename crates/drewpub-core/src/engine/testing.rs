//! Scripted backend and callback recorder shared by engine and controller tests.

use super::{PlaybackCallbacks, PlaybackEngine, PlaybackSnapshot};
use crate::backend::{SpeechBackend, SynthesisError, Utterance, UtteranceEvent, UtteranceId};
use crate::voices::Voice;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BackendCall {
    Speak(Utterance),
    Pause,
    Resume,
    Cancel,
}

#[derive(Debug)]
pub(crate) struct RecordingBackend {
    pub(crate) voices: Vec<Voice>,
    pub(crate) calls: Vec<BackendCall>,
    pub(crate) speaking: bool,
    pub(crate) resume_works: bool,
    pub(crate) reject_speak: Option<SynthesisError>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            voices: Vec::new(),
            calls: Vec::new(),
            speaking: false,
            resume_works: true,
            reject_speak: None,
        }
    }
}

impl RecordingBackend {
    pub(crate) fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            ..Self::default()
        }
    }

    pub(crate) fn utterances(&self) -> Vec<Utterance> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Speak(utterance) => Some(utterance.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_utterance_id(&self) -> Option<UtteranceId> {
        self.utterances().last().map(|utterance| utterance.id)
    }
}

impl SpeechBackend for RecordingBackend {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SynthesisError> {
        self.calls.push(BackendCall::Speak(utterance));
        if let Some(error) = self.reject_speak.clone() {
            return Err(error);
        }
        self.speaking = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(BackendCall::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(BackendCall::Resume);
        if !self.resume_works {
            self.speaking = false;
        }
    }

    fn cancel(&mut self) {
        self.calls.push(BackendCall::Cancel);
        self.speaking = false;
    }

    fn is_speaking(&self) -> bool {
        self.speaking
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Observed {
    Chunk(usize, String),
    State(PlaybackSnapshot),
    Complete,
    Error(String),
}

pub(crate) fn recorder() -> (PlaybackCallbacks, Arc<Mutex<Vec<Observed>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chunk_log = Arc::clone(&log);
    let state_log = Arc::clone(&log);
    let complete_log = Arc::clone(&log);
    let error_log = Arc::clone(&log);
    let callbacks = PlaybackCallbacks::new()
        .with_chunk_change(move |index, chunk| {
            chunk_log
                .lock()
                .unwrap()
                .push(Observed::Chunk(index, chunk.text.clone()));
        })
        .with_state_change(move |snapshot| {
            state_log.lock().unwrap().push(Observed::State(*snapshot));
        })
        .with_complete(move || {
            complete_log.lock().unwrap().push(Observed::Complete);
        })
        .with_error(move |error| {
            error_log
                .lock()
                .unwrap()
                .push(Observed::Error(error.to_string()));
        });
    (callbacks, log)
}

/// Reports the most recent utterance as finished, the way a platform would.
pub(crate) fn finish_current(engine: &mut PlaybackEngine<RecordingBackend>) {
    let id = engine
        .backend()
        .last_utterance_id()
        .expect("an utterance was spoken");
    engine.backend_mut().speaking = false;
    engine.handle_event(UtteranceEvent::Ended { id });
}
