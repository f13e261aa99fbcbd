pub mod form;
pub mod request;
mod state;
pub mod track;

pub use state::{Phase, ResultState};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use flume::Sender;

use crate::{
    event::Event,
    http::GenerationBackend,
    notify::{NotificationId, NotificationRegistry},
};

use form::{DescribedLyricsForm, DescriptionForm, LyricsForm, Mode};
use request::GenerationRequest;
use track::GeneratedTrack;

pub const LOADING_MESSAGE: &str = "Generating your music... This takes about 60 seconds.";
pub const SUCCESS_MESSAGE: &str = "Your music is ready!";

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Completed(GeneratedTrack),
    Failed(String),
    /// A newer call started before this one resolved; its result was dropped.
    Superseded,
}

/// Form input for the three generation modes plus the state of the
/// latest generation.
pub struct GenerationStore {
    backend: Arc<dyn GenerationBackend>,
    notifications: NotificationRegistry,
    state: Mutex<StoreState>,
    events: Option<Sender<Event>>,
}

#[derive(Default)]
struct StoreState {
    mode: Mode,
    description: DescriptionForm,
    lyrics: LyricsForm,
    described_lyrics: DescribedLyricsForm,
    result: ResultState,
    // Only the call holding the latest token may write `result`.
    token: u64,
}

impl StoreState {
    fn request(&self) -> GenerationRequest {
        match self.mode {
            Mode::Description => GenerationRequest::from(&self.description),
            Mode::Lyrics => GenerationRequest::from(&self.lyrics),
            Mode::DescribedLyrics => GenerationRequest::from(&self.described_lyrics),
        }
    }
}

impl GenerationStore {
    pub fn new(backend: Arc<dyn GenerationBackend>, notifications: NotificationRegistry) -> Self {
        Self {
            backend,
            notifications,
            state: Mutex::new(StoreState::default()),
            events: None,
        }
    }

    pub fn with_events(mut self, events: Sender<Event>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn notifications(&self) -> &NotificationRegistry {
        &self.notifications
    }

    pub fn mode(&self) -> Mode {
        self.lock().mode
    }

    /// Switches the active form. Every form keeps its contents.
    pub fn set_mode(&self, mode: Mode) {
        self.lock().mode = mode;
    }

    pub fn description_form(&self) -> DescriptionForm {
        self.lock().description.clone()
    }

    pub fn lyrics_form(&self) -> LyricsForm {
        self.lock().lyrics.clone()
    }

    pub fn described_lyrics_form(&self) -> DescribedLyricsForm {
        self.lock().described_lyrics.clone()
    }

    pub fn update_description_form(&self, edit: impl FnOnce(&mut DescriptionForm)) {
        edit(&mut self.lock().description);
    }

    pub fn update_lyrics_form(&self, edit: impl FnOnce(&mut LyricsForm)) {
        edit(&mut self.lock().lyrics);
    }

    pub fn update_described_lyrics_form(&self, edit: impl FnOnce(&mut DescribedLyricsForm)) {
        edit(&mut self.lock().described_lyrics);
    }

    pub fn result(&self) -> ResultState {
        self.lock().result.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().result.phase()
    }

    /// The request the active form would send right now.
    pub fn pending_request(&self) -> GenerationRequest {
        self.lock().request()
    }

    pub fn reset_result(&self) {
        {
            let mut state = self.lock();
            state.result.generated_track = None;
            state.result.error = None;
        }
        self.emit(Event::ResultReset);
    }

    pub async fn generate_music(&self) -> GenerationOutcome {
        let (token, request) = {
            let mut state = self.lock();
            state.token += 1;
            state.result = ResultState {
                is_loading: true,
                error: None,
                generated_track: None,
            };
            (state.token, state.request())
        };

        let mode = request.mode();
        tracing::info!(token, %mode, "Generation started");
        self.emit(Event::GenerationStarted { token, mode });

        let in_flight = InFlight {
            store: self,
            token,
            loading_id: self.notifications.loading(LOADING_MESSAGE),
        };

        let result = self.backend.generate(&request).await;
        in_flight.settle(result)
    }

    fn emit(&self, event: Event) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns the loading notification of one call. Dropping it, whether after
/// `settle` or because the call's future was dropped, removes the
/// notification and releases `is_loading` if the call is still the latest.
struct InFlight<'a> {
    store: &'a GenerationStore,
    token: u64,
    loading_id: NotificationId,
}

impl InFlight<'_> {
    fn settle(
        self,
        result: Result<GeneratedTrack, crate::error::GenerationError>,
    ) -> GenerationOutcome {
        let store = self.store;
        let token = self.token;
        store.notifications.remove(self.loading_id);

        let outcome = {
            let mut state = store.lock();
            if state.token != token {
                GenerationOutcome::Superseded
            } else {
                state.result.is_loading = false;
                match result {
                    Ok(track) => {
                        state.result.error = None;
                        state.result.generated_track = Some(track.clone());
                        GenerationOutcome::Completed(track)
                    }
                    Err(err) => {
                        tracing::error!(token, error = %err, "Generation failed");
                        let message = err.user_message();
                        state.result.generated_track = None;
                        state.result.error = Some(message.clone());
                        GenerationOutcome::Failed(message)
                    }
                }
            }
        };

        match &outcome {
            GenerationOutcome::Completed(_) => {
                tracing::info!(token, "Generation finished");
                store.notifications.success(SUCCESS_MESSAGE);
            }
            GenerationOutcome::Failed(message) => {
                store.notifications.error(message.clone());
            }
            GenerationOutcome::Superseded => {
                tracing::debug!(token, "Discarding result of superseded generation");
            }
        }

        store.emit(Event::GenerationSettled {
            token,
            outcome: outcome.clone(),
        });
        outcome
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.store.notifications.remove(self.loading_id);
        let mut state = self.store.lock();
        if state.token == self.token {
            state.result.is_loading = false;
        }
    }
}
