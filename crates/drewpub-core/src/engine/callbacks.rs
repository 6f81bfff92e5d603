use super::state::PlaybackSnapshot;
use crate::backend::SynthesisError;
use crate::chunks::Chunk;

pub type ChunkChangeCallback = Box<dyn FnMut(usize, &Chunk) + Send>;
pub type StateChangeCallback = Box<dyn FnMut(&PlaybackSnapshot) + Send>;
pub type CompleteCallback = Box<dyn FnMut() + Send>;
pub type ErrorCallback = Box<dyn FnMut(&SynthesisError) + Send>;

/// Observer slots. Any of them may be left unset.
#[derive(Default)]
pub struct PlaybackCallbacks {
    pub on_chunk_change: Option<ChunkChangeCallback>,
    pub on_state_change: Option<StateChangeCallback>,
    pub on_complete: Option<CompleteCallback>,
    pub on_error: Option<ErrorCallback>,
}

impl PlaybackCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_change(mut self, f: impl FnMut(usize, &Chunk) + Send + 'static) -> Self {
        self.on_chunk_change = Some(Box::new(f));
        self
    }

    pub fn with_state_change(mut self, f: impl FnMut(&PlaybackSnapshot) + Send + 'static) -> Self {
        self.on_state_change = Some(Box::new(f));
        self
    }

    pub fn with_complete(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn with_error(mut self, f: impl FnMut(&SynthesisError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub(crate) fn chunk_changed(&mut self, index: usize, chunk: &Chunk) {
        if let Some(callback) = self.on_chunk_change.as_mut() {
            callback(index, chunk);
        }
    }

    pub(crate) fn state_changed(&mut self, snapshot: &PlaybackSnapshot) {
        if let Some(callback) = self.on_state_change.as_mut() {
            callback(snapshot);
        }
    }

    pub(crate) fn completed(&mut self) {
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }

    pub(crate) fn failed(&mut self, error: &SynthesisError) {
        if let Some(callback) = self.on_error.as_mut() {
            callback(error);
        }
    }
}

impl std::fmt::Debug for PlaybackCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackCallbacks")
            .field("on_chunk_change", &self.on_chunk_change.is_some())
            .field("on_state_change", &self.on_state_change.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
