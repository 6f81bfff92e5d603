//! Dedicated narrator thread.
//!
//! The engine and its backend live on one thread. Host commands and backend
//! completion events travel over the same channel, so every engine mutation
//! is serialized without locks.

use crate::backend::{SpeechBackend, SynthesisError, UtteranceEvent, UtteranceId};
use crate::chunks::Chunk;
use crate::engine::{PlaybackCallbacks, PlaybackEngine, PlaybackSnapshot};
use crate::error::NarrationError;
use crate::voices::{DEFAULT_LANGUAGE, VoiceAssignment};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

enum NarratorCommand {
    Start {
        chunks: Vec<Chunk>,
        voices: VoiceAssignment,
        rate: f32,
    },
    Pause,
    Resume,
    Stop,
    SkipForward,
    SkipBack,
    SetRate(f32),
    Snapshot(Sender<PlaybackSnapshot>),
    Shutdown,
}

enum RuntimeMessage {
    Command(NarratorCommand),
    Event(UtteranceEvent),
}

/// Handed to the backend so it can report utterance outcomes from any thread.
#[derive(Clone)]
pub struct BackendEvents {
    tx: Sender<RuntimeMessage>,
}

impl BackendEvents {
    /// Returns `false` once the narrator thread is gone.
    pub fn send(&self, event: UtteranceEvent) -> bool {
        self.tx.send(RuntimeMessage::Event(event)).is_ok()
    }

    pub fn ended(&self, id: UtteranceId) -> bool {
        self.send(UtteranceEvent::Ended { id })
    }

    pub fn failed(&self, id: UtteranceId, error: SynthesisError) -> bool {
        self.send(UtteranceEvent::Failed { id, error })
    }
}

impl std::fmt::Debug for BackendEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendEvents").finish_non_exhaustive()
    }
}

/// Starts the narrator thread with the default language.
pub fn spawn_narrator<B, F>(
    backend_factory: F,
    callbacks: PlaybackCallbacks,
) -> Result<NarratorHandle, NarrationError>
where
    B: SpeechBackend + 'static,
    F: FnOnce(BackendEvents) -> B + Send + 'static,
{
    spawn_narrator_for_language(DEFAULT_LANGUAGE, backend_factory, callbacks)
}

/// Starts the narrator thread. The backend is built on that thread, so it
/// does not need to be `Send`.
pub fn spawn_narrator_for_language<B, F>(
    language: impl Into<String>,
    backend_factory: F,
    callbacks: PlaybackCallbacks,
) -> Result<NarratorHandle, NarrationError>
where
    B: SpeechBackend + 'static,
    F: FnOnce(BackendEvents) -> B + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let events = BackendEvents { tx: tx.clone() };
    let language = language.into();

    let thread = thread::Builder::new()
        .name("drewpub-narrator".to_string())
        .spawn(move || {
            let backend = backend_factory(events);
            let mut engine = PlaybackEngine::new(backend).with_language(language);
            engine.set_callbacks(callbacks);
            run(engine, rx);
        })?;

    info!("Narrator runtime started");
    Ok(NarratorHandle {
        tx,
        thread: Some(thread),
    })
}

fn run<B: SpeechBackend>(mut engine: PlaybackEngine<B>, rx: Receiver<RuntimeMessage>) {
    while let Ok(message) = rx.recv() {
        match message {
            RuntimeMessage::Event(event) => engine.handle_event(event),
            RuntimeMessage::Command(command) => match command {
                NarratorCommand::Start {
                    chunks,
                    voices,
                    rate,
                } => engine.start(chunks, voices, rate),
                NarratorCommand::Pause => engine.pause(),
                NarratorCommand::Resume => engine.resume(),
                NarratorCommand::Stop => engine.stop(),
                NarratorCommand::SkipForward => engine.skip_forward(),
                NarratorCommand::SkipBack => engine.skip_back(),
                NarratorCommand::SetRate(rate) => engine.set_rate(rate),
                NarratorCommand::Snapshot(reply) => {
                    let _ = reply.send(engine.snapshot());
                }
                NarratorCommand::Shutdown => {
                    engine.destroy();
                    break;
                }
            },
        }
    }
    debug!("Narrator runtime loop exited");
}

/// Owner-side handle for the narrator thread. Dropping it destroys the
/// engine and joins the thread.
#[derive(Debug)]
pub struct NarratorHandle {
    tx: Sender<RuntimeMessage>,
    thread: Option<JoinHandle<()>>,
}

impl NarratorHandle {
    pub fn start(
        &self,
        chunks: Vec<Chunk>,
        voices: VoiceAssignment,
        rate: f32,
    ) -> Result<(), NarrationError> {
        self.send(NarratorCommand::Start {
            chunks,
            voices,
            rate,
        })
    }

    pub fn pause(&self) -> Result<(), NarrationError> {
        self.send(NarratorCommand::Pause)
    }

    pub fn resume(&self) -> Result<(), NarrationError> {
        self.send(NarratorCommand::Resume)
    }

    pub fn stop(&self) -> Result<(), NarrationError> {
        self.send(NarratorCommand::Stop)
    }

    pub fn skip_forward(&self) -> Result<(), NarrationError> {
        self.send(NarratorCommand::SkipForward)
    }

    pub fn skip_back(&self) -> Result<(), NarrationError> {
        self.send(NarratorCommand::SkipBack)
    }

    pub fn set_rate(&self, rate: f32) -> Result<(), NarrationError> {
        self.send(NarratorCommand::SetRate(rate))
    }

    /// Round-trips through the narrator thread, so the answer reflects every
    /// command sent before it.
    pub fn snapshot(&self) -> Result<PlaybackSnapshot, NarrationError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send(NarratorCommand::Snapshot(reply_tx))?;
        reply_rx.recv().map_err(|_| NarrationError::RuntimeClosed)
    }

    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn send(&self, command: NarratorCommand) -> Result<(), NarrationError> {
        self.tx
            .send(RuntimeMessage::Command(command))
            .map_err(|_| NarrationError::RuntimeClosed)
    }

    fn shutdown_inner(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        if self.send(NarratorCommand::Shutdown).is_err() {
            debug!("Narrator runtime already stopped");
        }
        if thread.join().is_err() {
            warn!("Narrator runtime thread panicked");
        } else {
            info!("Narrator runtime shut down");
        }
    }
}

impl Drop for NarratorHandle {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}
