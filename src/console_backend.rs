//! Speech backend for terminals: prints each utterance and reports it
//! finished after roughly the time a voice would need to read it.

use drewpub_core::cancellation::CancellationToken;
use drewpub_core::{BackendEvents, SpeechBackend, SynthesisError, Utterance, Voice};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

const BASE_WPM: f32 = 170.0;
const TICK: Duration = Duration::from_millis(25);

struct ActiveUtterance {
    cancel: CancellationToken,
    paused: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

pub struct ConsoleBackend {
    events: BackendEvents,
    active: Option<ActiveUtterance>,
}

impl ConsoleBackend {
    pub fn new(events: BackendEvents) -> Self {
        Self {
            events,
            active: None,
        }
    }

    pub fn catalog() -> Vec<Voice> {
        vec![
            Voice::new("console-narrator", "Console Narrator", "en-US"),
            Voice::new("console-daniel", "Daniel", "en-GB"),
            Voice::new("console-samantha", "Samantha", "en-US"),
        ]
    }
}

fn speaking_time(text: &str, rate: f32) -> Duration {
    let words = text.split_whitespace().count().max(1) as f32;
    Duration::from_secs_f32(words * 60.0 / (BASE_WPM * rate.max(0.1)))
}

impl SpeechBackend for ConsoleBackend {
    fn voices(&self) -> Vec<Voice> {
        Self::catalog()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SynthesisError> {
        self.cancel();

        let voice = utterance
            .voice
            .as_ref()
            .map_or("default", |voice| voice.name.as_str());
        info!(
            utterance_id = utterance.id,
            voice,
            rate = utterance.rate,
            "{}",
            utterance.text
        );

        let active = ActiveUtterance {
            cancel: CancellationToken::new(),
            paused: Arc::new(AtomicBool::new(false)),
            finished: Arc::new(AtomicBool::new(false)),
        };
        let cancel = active.cancel.clone();
        let paused = Arc::clone(&active.paused);
        let finished = Arc::clone(&active.finished);
        let events = self.events.clone();
        let id = utterance.id;
        let total = speaking_time(&utterance.text, utterance.rate);

        thread::Builder::new()
            .name(format!("console-utterance-{id}"))
            .spawn(move || {
                let mut elapsed = Duration::ZERO;
                while elapsed < total {
                    if cancel.is_cancelled() {
                        debug!(utterance_id = id, "Console utterance interrupted");
                        events.failed(id, SynthesisError::Interrupted);
                        return;
                    }
                    thread::sleep(TICK);
                    if !paused.load(Ordering::Acquire) {
                        elapsed += TICK;
                    }
                }
                finished.store(true, Ordering::Release);
                events.ended(id);
            })
            .map_err(|err| {
                warn!(utterance_id = id, "Failed to start console utterance: {err}");
                SynthesisError::SynthesisUnavailable
            })?;

        self.active = Some(active);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(active) = &self.active {
            active.paused.store(true, Ordering::Release);
        }
    }

    fn resume(&mut self) {
        if let Some(active) = &self.active {
            active.paused.store(false, Ordering::Release);
        }
    }

    fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
        }
    }

    fn is_speaking(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.finished.load(Ordering::Acquire))
    }
}
