//! Sequential, cancellable chunk player on top of a [`SpeechBackend`].
//!
//! States: `Idle` -> `Playing` <-> `Paused` -> `Idle` (on completion or
//! `stop`). All mutation happens through `&mut self`, so the engine lives on
//! one thread: the host's event thread, or the runtime thread from
//! [`crate::runtime`]. Backend outcomes come back through
//! [`PlaybackEngine::handle_event`]; an event only counts if it belongs to
//! the utterance currently in flight of a session that has not been
//! cancelled, so late events from superseded sessions are dropped.
//!
//! `set_rate` only affects the next utterance; one already speaking keeps
//! the rate it was submitted with.

mod callbacks;
mod state;
#[cfg(test)]
pub(crate) mod testing;

pub use callbacks::{
    ChunkChangeCallback, CompleteCallback, ErrorCallback, PlaybackCallbacks, StateChangeCallback,
};
pub use state::{PlaybackSnapshot, PlaybackState};

use crate::backend::{SpeechBackend, SynthesisError, Utterance, UtteranceEvent, UtteranceId};
use crate::chunks::Chunk;
use crate::voices::{DEFAULT_LANGUAGE, VoiceAssignment, resolve_voice};
use state::PlaybackSession;
use tracing::{debug, info, warn};

pub const DEFAULT_RATE: f32 = 1.0;

pub struct PlaybackEngine<B: SpeechBackend> {
    backend: B,
    session: PlaybackSession,
    callbacks: PlaybackCallbacks,
    language: String,
    next_utterance_id: UtteranceId,
    next_session_id: u64,
}

impl<B: SpeechBackend> PlaybackEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: PlaybackSession::idle(DEFAULT_RATE),
            callbacks: PlaybackCallbacks::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            next_utterance_id: 1,
            next_session_id: 1,
        }
    }

    /// Language prefix used when a chunk's voice cannot be resolved.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn set_callbacks(&mut self, callbacks: PlaybackCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn callbacks_mut(&mut self) -> &mut PlaybackCallbacks {
        &mut self.callbacks
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.session.snapshot()
    }

    pub fn state(&self) -> PlaybackState {
        self.snapshot().state()
    }

    pub fn rate(&self) -> f32 {
        self.session.rate
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.session.chunks
    }

    pub fn current_chunk(&self) -> Option<&Chunk> {
        self.session.chunks.get(self.session.current_index)
    }

    /// Replaces any running session and starts speaking from chunk 0. An
    /// empty chunk list completes right away.
    pub fn start(&mut self, chunks: Vec<Chunk>, voices: VoiceAssignment, rate: f32) {
        self.backend.cancel();
        self.session.cancel.cancel();

        let session_id = self.next_session_id;
        self.next_session_id = self.next_session_id.wrapping_add(1).max(1);
        let rate = sanitize_rate(rate).unwrap_or_else(|| {
            warn!(rate, "Invalid playback rate; using default");
            DEFAULT_RATE
        });
        self.session = PlaybackSession::begin(session_id, chunks, voices, rate);
        info!(
            session_id,
            chunks = self.session.chunks.len(),
            rate,
            "Starting TTS playback session"
        );

        self.notify_state();
        self.play_current();
    }

    pub fn pause(&mut self) {
        if !self.session.is_playing {
            return;
        }
        info!(session_id = self.session.id, "Pausing TTS playback");
        self.session.is_paused = true;
        self.backend.pause();
        self.notify_state();
    }

    pub fn resume(&mut self) {
        if !self.session.is_playing || !self.session.is_paused {
            return;
        }
        info!(session_id = self.session.id, "Resuming TTS playback");
        self.session.is_paused = false;
        self.backend.resume();
        if !self.backend.is_speaking() {
            debug!(
                index = self.session.current_index,
                "Backend did not resume; restarting current chunk"
            );
            self.backend.cancel();
            self.session.in_flight = None;
            self.play_current();
        }
        self.notify_state();
    }

    /// Ends the session from any state and rewinds to the first chunk.
    pub fn stop(&mut self) {
        self.session.cancel.cancel();
        self.session.is_playing = false;
        self.session.is_paused = false;
        self.session.current_index = 0;
        self.session.in_flight = None;
        self.backend.cancel();
        info!(session_id = self.session.id, "Stopped TTS playback");
        self.notify_state();
    }

    /// Moves to the next chunk. Does nothing on the last chunk.
    pub fn skip_forward(&mut self) {
        if !self.session.is_playing {
            return;
        }
        if self.session.current_index >= self.session.last_index() {
            debug!(
                index = self.session.current_index,
                "Already at last chunk; ignoring skip forward"
            );
            return;
        }
        self.backend.cancel();
        self.session.in_flight = None;
        self.session.current_index += 1;
        info!(index = self.session.current_index, "Skipping forward");
        self.play_current();
        self.notify_state();
    }

    /// Moves to the previous chunk; on the first chunk it restarts it.
    pub fn skip_back(&mut self) {
        if !self.session.is_playing {
            return;
        }
        self.backend.cancel();
        self.session.in_flight = None;
        self.session.current_index = self.session.current_index.saturating_sub(1);
        info!(index = self.session.current_index, "Skipping back");
        self.play_current();
        self.notify_state();
    }

    pub fn set_rate(&mut self, rate: f32) {
        match sanitize_rate(rate) {
            Some(rate) => {
                self.session.rate = rate;
                info!(rate, "Updated TTS rate for upcoming chunks");
            }
            None => warn!(rate, "Ignoring invalid playback rate"),
        }
    }

    /// Same as `stop`; safe to call any number of times.
    pub fn destroy(&mut self) {
        self.stop();
    }

    /// Applies a completion or error reported by the backend.
    pub fn handle_event(&mut self, event: UtteranceEvent) {
        let id = event.id();
        if self.session.in_flight != Some(id) || self.session.cancel.is_cancelled() {
            debug!(utterance_id = id, "Ignoring stale utterance event");
            return;
        }

        match event {
            UtteranceEvent::Ended { .. } => {
                self.session.in_flight = None;
                if self.session.is_paused {
                    debug!(utterance_id = id, "Utterance ended while paused");
                    return;
                }
                self.session.current_index += 1;
                self.play_current();
                if self.session.is_playing {
                    self.notify_state();
                }
            }
            UtteranceEvent::Failed { error, .. } => self.fail(id, error),
        }
    }

    fn play_current(&mut self) {
        if self.session.cancel.is_cancelled() {
            return;
        }
        let index = self.session.current_index;
        let Some(chunk) = self.session.chunks.get(index).cloned() else {
            self.finish();
            return;
        };

        self.callbacks.chunk_changed(index, &chunk);
        if self.session.is_paused {
            return;
        }

        let catalog = self.backend.voices();
        let voice = resolve_voice(
            &catalog,
            self.session.voices.for_voice_type(chunk.voice_type),
            &self.language,
        )
        .cloned();
        let id = self.allocate_utterance_id();
        self.session.in_flight = Some(id);
        debug!(
            session_id = self.session.id,
            utterance_id = id,
            index,
            total = self.session.chunks.len(),
            voice_type = %chunk.voice_type,
            voice = voice.as_ref().map(|v| v.id.as_str()).unwrap_or("default"),
            rate = self.session.rate,
            "Speaking chunk"
        );

        let utterance = Utterance {
            id,
            text: chunk.text,
            voice,
            rate: self.session.rate,
            pitch: 1.0,
            volume: 1.0,
        };
        if let Err(error) = self.backend.speak(utterance) {
            // Never accepted, so no event will follow for this id.
            self.session.in_flight = None;
            if error.is_cancellation() {
                warn!(
                    utterance_id = id,
                    index,
                    %error,
                    "Backend cancelled utterance before speaking; waiting for skip or stop"
                );
            }
            self.fail(id, error);
        }
    }

    fn fail(&mut self, id: UtteranceId, error: SynthesisError) {
        if error.is_cancellation() {
            debug!(utterance_id = id, %error, "Utterance cancelled");
            return;
        }
        if self.session.in_flight == Some(id) {
            self.session.in_flight = None;
        }
        warn!(
            utterance_id = id,
            index = self.session.current_index,
            %error,
            "TTS utterance failed"
        );
        self.callbacks.failed(&error);
    }

    fn finish(&mut self) {
        self.session.is_playing = false;
        self.session.is_paused = false;
        self.session.in_flight = None;
        info!(
            session_id = self.session.id,
            chunks = self.session.chunks.len(),
            "TTS playback complete"
        );
        self.notify_state();
        self.callbacks.completed();
    }

    fn notify_state(&mut self) {
        let snapshot = self.session.snapshot();
        self.callbacks.state_changed(&snapshot);
    }

    fn allocate_utterance_id(&mut self) -> UtteranceId {
        let id = self.next_utterance_id;
        self.next_utterance_id = self.next_utterance_id.wrapping_add(1).max(1);
        id
    }
}

impl<B: SpeechBackend> Drop for PlaybackEngine<B> {
    fn drop(&mut self) {
        self.session.cancel.cancel();
        if self.session.is_playing {
            self.backend.cancel();
        }
    }
}

fn sanitize_rate(rate: f32) -> Option<f32> {
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

#[cfg(test)]
mod tests {
    use super::testing::{BackendCall, Observed, RecordingBackend, finish_current, recorder};
    use super::*;
    use crate::chunks::VoiceType;
    use crate::voices::Voice;

    fn chunk(text: &str, voice_type: VoiceType) -> Chunk {
        Chunk {
            text: text.to_string(),
            voice_type,
            speaker: None,
        }
    }

    fn three_chunks() -> Vec<Chunk> {
        vec![
            chunk("One.", VoiceType::Narrator),
            chunk("Two.", VoiceType::Female),
            chunk("Three.", VoiceType::Male),
        ]
    }

    fn engine() -> PlaybackEngine<RecordingBackend> {
        PlaybackEngine::new(RecordingBackend::with_voices(vec![
            Voice::new("narr", "Narrator Voice", "en-US"),
            Voice::new("her", "Samantha", "en-US"),
            Voice::new("him", "Daniel", "en-GB"),
        ]))
    }

    fn assignment() -> VoiceAssignment {
        VoiceAssignment {
            narrator: Some("narr".to_string()),
            male: Some("him".to_string()),
            female: Some("her".to_string()),
        }
    }

    #[test]
    fn start_speaks_first_chunk_with_assigned_voice_and_rate() {
        let mut engine = engine();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);

        engine.start(three_chunks(), assignment(), 1.5);

        let spoken = engine.backend().utterances();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "One.");
        assert_eq!(spoken[0].voice.as_ref().map(|v| v.id.as_str()), Some("narr"));
        assert!((spoken[0].rate - 1.5).abs() < f32::EPSILON);
        assert_eq!(engine.state(), PlaybackState::Playing);

        let log = log.lock().unwrap();
        assert_eq!(
            log[0],
            Observed::State(PlaybackSnapshot {
                is_playing: true,
                is_paused: false,
                current_index: 0,
                total_chunks: 3,
            })
        );
        assert_eq!(log[1], Observed::Chunk(0, "One.".to_string()));
    }

    #[test]
    fn completions_advance_in_order_and_complete_once() {
        let mut engine = engine();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);
        engine.start(three_chunks(), assignment(), 1.0);

        finish_current(&mut engine);
        finish_current(&mut engine);
        finish_current(&mut engine);

        let voices: Vec<Option<String>> = engine
            .backend()
            .utterances()
            .iter()
            .map(|u| u.voice.as_ref().map(|v| v.id.clone()))
            .collect();
        assert_eq!(
            voices,
            vec![
                Some("narr".to_string()),
                Some("her".to_string()),
                Some("him".to_string())
            ]
        );
        assert_eq!(engine.state(), PlaybackState::Idle);

        let log = log.lock().unwrap();
        let completes = log.iter().filter(|o| **o == Observed::Complete).count();
        assert_eq!(completes, 1);
        assert_eq!(log.last(), Some(&Observed::Complete));
        let chunk_indices: Vec<usize> = log
            .iter()
            .filter_map(|o| match o {
                Observed::Chunk(idx, _) => Some(*idx),
                _ => None,
            })
            .collect();
        assert_eq!(chunk_indices, vec![0, 1, 2]);
    }

    #[test]
    fn empty_chunk_list_completes_immediately() {
        let mut engine = engine();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);

        engine.start(Vec::new(), VoiceAssignment::default(), 1.0);

        assert!(engine.backend().utterances().is_empty());
        assert_eq!(engine.state(), PlaybackState::Idle);
        let log = log.lock().unwrap();
        assert_eq!(log.iter().filter(|o| **o == Observed::Complete).count(), 1);
        assert!(!log.iter().any(|o| matches!(o, Observed::Chunk(..))));
    }

    #[test]
    fn superseded_session_events_are_ignored() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);
        let old_id = engine.backend().last_utterance_id().unwrap();

        engine.stop();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);
        engine.start(vec![chunk("Fresh.", VoiceType::Narrator)], assignment(), 1.0);
        log.lock().unwrap().clear();

        engine.handle_event(UtteranceEvent::Ended { id: old_id });
        engine.handle_event(UtteranceEvent::Failed {
            id: old_id,
            error: SynthesisError::Network,
        });

        assert!(log.lock().unwrap().is_empty());
        assert_eq!(engine.snapshot().current_index, 0);
        assert_eq!(engine.state(), PlaybackState::Playing);
    }

    #[test]
    fn restart_without_stop_also_drops_old_events() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);
        let old_id = engine.backend().last_utterance_id().unwrap();
        engine.start(three_chunks(), assignment(), 1.0);

        engine.handle_event(UtteranceEvent::Ended { id: old_id });

        assert_eq!(engine.snapshot().current_index, 0);
        assert_eq!(engine.backend().utterances().len(), 2);
    }

    #[test]
    fn events_after_stop_do_nothing() {
        let mut engine = engine();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);
        engine.start(three_chunks(), assignment(), 1.0);
        let id = engine.backend().last_utterance_id().unwrap();
        engine.stop();
        log.lock().unwrap().clear();

        engine.handle_event(UtteranceEvent::Ended { id });

        assert!(log.lock().unwrap().is_empty());
        assert_eq!(engine.backend().utterances().len(), 1);
    }

    #[test]
    fn end_while_paused_holds_position_and_resume_restarts_chunk() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);
        engine.pause();
        assert_eq!(engine.state(), PlaybackState::Paused);
        assert!(engine.backend().calls.contains(&BackendCall::Pause));

        finish_current(&mut engine);
        assert_eq!(engine.snapshot().current_index, 0);
        assert_eq!(engine.backend().utterances().len(), 1);

        engine.resume();
        let spoken = engine.backend().utterances();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[1].text, "One.");
        assert_eq!(engine.state(), PlaybackState::Playing);
    }

    #[test]
    fn resume_does_not_respeak_when_backend_resumes() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);
        engine.pause();
        engine.resume();

        assert_eq!(engine.backend().utterances().len(), 1);
        assert!(engine.backend().calls.contains(&BackendCall::Resume));
        assert_eq!(engine.state(), PlaybackState::Playing);
    }

    #[test]
    fn resume_restarts_chunk_when_backend_stalls() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);
        finish_current(&mut engine);
        engine.pause();
        engine.backend_mut().resume_works = false;

        engine.resume();

        let spoken = engine.backend().utterances();
        assert_eq!(spoken.len(), 3);
        assert_eq!(spoken[2].text, "Two.");
    }

    #[test]
    fn skip_forward_on_last_chunk_is_a_no_op() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);
        engine.skip_forward();
        engine.skip_forward();
        let calls_before = engine.backend().calls.len();

        engine.skip_forward();

        assert_eq!(engine.snapshot().current_index, 2);
        assert_eq!(engine.backend().calls.len(), calls_before);
        assert_eq!(engine.state(), PlaybackState::Playing);
    }

    #[test]
    fn skip_cancels_current_and_speaks_neighbour() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);
        let first_id = engine.backend().last_utterance_id().unwrap();

        engine.skip_forward();
        assert_eq!(engine.snapshot().current_index, 1);
        assert_eq!(engine.backend().utterances()[1].text, "Two.");

        // The cancelled utterance may still report an end; it must not advance.
        engine.handle_event(UtteranceEvent::Ended { id: first_id });
        assert_eq!(engine.snapshot().current_index, 1);

        engine.skip_back();
        assert_eq!(engine.snapshot().current_index, 0);
        engine.skip_back();
        assert_eq!(engine.snapshot().current_index, 0);
        let texts: Vec<String> = engine
            .backend()
            .utterances()
            .iter()
            .map(|u| u.text.clone())
            .collect();
        assert_eq!(texts, vec!["One.", "Two.", "One.", "One."]);
    }

    #[test]
    fn skip_while_paused_moves_cursor_without_speaking() {
        let mut engine = engine();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);
        engine.start(three_chunks(), assignment(), 1.0);
        engine.pause();

        engine.skip_forward();

        assert_eq!(engine.backend().utterances().len(), 1);
        assert_eq!(engine.state(), PlaybackState::Paused);
        assert!(
            log.lock()
                .unwrap()
                .contains(&Observed::Chunk(1, "Two.".to_string()))
        );

        engine.resume();
        assert_eq!(engine.backend().utterances()[1].text, "Two.");
    }

    #[test]
    fn operations_without_session_are_no_ops() {
        let mut engine = engine();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);

        engine.pause();
        engine.resume();
        engine.skip_forward();
        engine.skip_back();
        engine.handle_event(UtteranceEvent::Ended { id: 42 });

        assert!(engine.backend().calls.is_empty());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn cancellation_errors_are_swallowed() {
        let mut engine = engine();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);
        engine.start(three_chunks(), assignment(), 1.0);
        let id = engine.backend().last_utterance_id().unwrap();

        engine.handle_event(UtteranceEvent::Failed {
            id,
            error: SynthesisError::Interrupted,
        });

        assert!(!log.lock().unwrap().iter().any(|o| matches!(o, Observed::Error(_))));
    }

    #[test]
    fn other_errors_surface_and_halt_until_skip() {
        let mut engine = engine();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);
        engine.start(three_chunks(), assignment(), 1.0);
        let id = engine.backend().last_utterance_id().unwrap();

        engine.handle_event(UtteranceEvent::Failed {
            id,
            error: SynthesisError::from_code("synthesis-failed"),
        });

        assert!(
            log.lock()
                .unwrap()
                .contains(&Observed::Error("System speech error: synthesis-failed".to_string()))
        );
        assert_eq!(engine.snapshot().current_index, 0);
        assert_eq!(engine.backend().utterances().len(), 1);

        // A late end for the failed utterance does not advance either.
        engine.handle_event(UtteranceEvent::Ended { id });
        assert_eq!(engine.snapshot().current_index, 0);

        engine.skip_forward();
        assert_eq!(engine.backend().utterances()[1].text, "Two.");
    }

    #[test]
    fn rejected_speak_is_reported() {
        let mut engine = engine();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);
        engine.backend_mut().reject_speak = Some(SynthesisError::VoiceUnavailable);

        engine.start(three_chunks(), assignment(), 1.0);

        assert!(
            log.lock()
                .unwrap()
                .contains(&Observed::Error("System speech error: voice-unavailable".to_string()))
        );
        assert_eq!(engine.snapshot().current_index, 0);
    }

    #[test]
    fn cancelled_speak_leaves_nothing_in_flight() {
        let mut engine = engine();
        let (callbacks, log) = recorder();
        engine.set_callbacks(callbacks);
        engine.backend_mut().reject_speak = Some(SynthesisError::Interrupted);

        engine.start(three_chunks(), assignment(), 1.0);
        let id = engine.backend().last_utterance_id().unwrap();

        assert_eq!(engine.session.in_flight, None);
        assert!(!log.lock().unwrap().iter().any(|o| matches!(o, Observed::Error(_))));

        // A stray end for the rejected utterance must not advance.
        engine.handle_event(UtteranceEvent::Ended { id });
        assert_eq!(engine.snapshot().current_index, 0);
        assert_eq!(engine.backend().utterances().len(), 1);

        engine.backend_mut().reject_speak = None;
        engine.skip_forward();
        assert_eq!(engine.backend().utterances()[1].text, "Two.");
        assert!(engine.session.in_flight.is_some());
    }

    #[test]
    fn rate_change_applies_to_next_chunk_only() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);

        engine.set_rate(2.0);
        engine.set_rate(f32::NAN);
        assert!((engine.backend().utterances()[0].rate - 1.0).abs() < f32::EPSILON);

        finish_current(&mut engine);
        assert!((engine.backend().utterances()[1].rate - 2.0).abs() < f32::EPSILON);
        assert!((engine.rate() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_start_rate_falls_back_to_default() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), -3.0);
        assert!((engine.rate() - DEFAULT_RATE).abs() < f32::EPSILON);
    }

    #[test]
    fn pause_then_stop_resets_to_idle_at_zero() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);
        finish_current(&mut engine);
        engine.pause();

        engine.stop();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.state(), PlaybackState::Idle);
        assert_eq!(snapshot.current_index, 0);
        assert!(!snapshot.is_paused);
        assert_eq!(engine.backend().calls.last(), Some(&BackendCall::Cancel));
    }

    #[test]
    fn unassigned_voice_falls_back_to_language_then_any() {
        let mut engine = PlaybackEngine::new(RecordingBackend::with_voices(vec![
            Voice::new("fr", "Amélie", "fr-FR"),
            Voice::new("gb", "Daniel", "en-GB"),
        ]));
        engine.start(
            vec![chunk("Hi.", VoiceType::Female)],
            VoiceAssignment::default(),
            1.0,
        );
        assert_eq!(
            engine.backend().utterances()[0].voice.as_ref().map(|v| v.id.as_str()),
            Some("gb")
        );

        let mut german = PlaybackEngine::new(RecordingBackend::with_voices(vec![Voice::new(
            "fr", "Amélie", "fr-FR",
        )]))
        .with_language("de");
        german.start(
            vec![chunk("Hallo.", VoiceType::Narrator)],
            VoiceAssignment::default(),
            1.0,
        );
        assert_eq!(
            german.backend().utterances()[0].voice.as_ref().map(|v| v.id.as_str()),
            Some("fr")
        );
    }

    #[test]
    fn empty_catalog_leaves_voice_to_backend_and_later_catalog_is_used() {
        let mut engine = PlaybackEngine::new(RecordingBackend::default());
        engine.start(three_chunks(), assignment(), 1.0);
        assert!(engine.backend().utterances()[0].voice.is_none());

        engine
            .backend_mut()
            .voices
            .push(Voice::new("her", "Samantha", "en-US"));
        finish_current(&mut engine);
        assert_eq!(
            engine.backend().utterances()[1].voice.as_ref().map(|v| v.id.as_str()),
            Some("her")
        );
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);
        engine.destroy();
        engine.destroy();
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert_eq!(engine.snapshot().current_index, 0);
    }

    #[test]
    fn callbacks_are_optional() {
        let mut engine = engine();
        engine.start(three_chunks(), assignment(), 1.0);
        let id = engine.backend().last_utterance_id().unwrap();
        engine.handle_event(UtteranceEvent::Failed {
            id,
            error: SynthesisError::Network,
        });
        engine.skip_forward();
        finish_current(&mut engine);
        finish_current(&mut engine);
        assert_eq!(engine.state(), PlaybackState::Idle);
    }
}
