use super::track::GeneratedTrack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub generated_track: Option<GeneratedTrack>,
}

impl ResultState {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.generated_track.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }
}
