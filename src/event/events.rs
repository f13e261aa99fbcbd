use crate::{
    notify::{Notification, NotificationId},
    store::{GenerationOutcome, form::Mode},
};

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum Event {
    // Notifications
    NotificationAdded(Notification),
    NotificationRemoved(NotificationId),

    // Generation
    GenerationStarted { token: u64, mode: Mode },
    GenerationSettled { token: u64, outcome: GenerationOutcome },
    ResultReset,
}
