mod notification;

pub use notification::{Notification, NotificationId, NotificationKind};

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use flume::Sender;
use tokio::runtime::Handle;

use crate::{event::Event, util::task::TaskManager};

/// Ordered set of transient notifications.
///
/// Handles are cheap to clone and share one registry. Timed entries own a
/// timer task that is aborted on manual removal, on `clear`, and when the
/// last handle is dropped.
#[derive(Clone)]
pub struct NotificationRegistry {
    inner: Arc<Inner>,
}

struct Inner {
    default_duration: Duration,
    state: Mutex<RegistryState>,
}

struct RegistryState {
    items: Vec<Notification>,
    next_id: u64,
    timers: TaskManager<NotificationId>,
    events: Option<Sender<Event>>,
}

impl NotificationRegistry {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                default_duration,
                state: Mutex::new(RegistryState {
                    items: Vec::new(),
                    next_id: 0,
                    timers: TaskManager::new(),
                    events: None,
                }),
            }),
        }
    }

    pub fn with_events(self, events: Sender<Event>) -> Self {
        self.lock().events = Some(events);
        self
    }

    pub fn default_duration(&self) -> Duration {
        self.inner.default_duration
    }

    pub fn add(&self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        self.add_with_duration(kind, message, self.inner.default_duration)
    }

    /// Appends a notification. A zero duration keeps it until `remove`.
    pub fn add_with_duration(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Duration,
    ) -> NotificationId {
        let mut state = self.lock();

        let id = NotificationId(state.next_id);
        state.next_id += 1;

        let notification = Notification {
            id,
            kind,
            message: message.into(),
        };
        state.items.push(notification.clone());

        if !duration.is_zero() {
            match Handle::try_current() {
                Ok(handle) => {
                    let registry = Arc::downgrade(&self.inner);
                    let timer = handle.spawn(expire_after(registry, id, duration));
                    state.timers.spawn(id, timer);
                }
                Err(_) => {
                    tracing::warn!(%id, "No async runtime; notification will not expire");
                }
            }
        }

        let events = state.events.clone();
        drop(state);

        tracing::debug!(%id, %kind, ?duration, "Notification added");
        if let Some(tx) = events {
            let _ = tx.send(Event::NotificationAdded(notification));
        }

        id
    }

    /// Removes a notification and cancels its timer. Unknown ids are ignored.
    pub fn remove(&self, id: NotificationId) -> bool {
        let mut state = self.lock();
        state.timers.abort(&id);
        self.take(state, id)
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationKind::Info, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationKind::Warning, message)
    }

    pub fn loading(&self, message: impl Into<String>) -> NotificationId {
        self.add_with_duration(NotificationKind::Loading, message, Duration::ZERO)
    }

    pub fn list(&self) -> Vec<Notification> {
        self.lock().items.clone()
    }

    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.lock().items.iter().find(|n| n.id == id).cloned()
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.lock().items.iter().any(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.timers.abort_all();
        let removed: Vec<NotificationId> = state.items.drain(..).map(|n| n.id).collect();
        let events = state.events.clone();
        drop(state);

        if let Some(tx) = events {
            for id in removed {
                let _ = tx.send(Event::NotificationRemoved(id));
            }
        }
    }

    #[cfg(test)]
    fn pending_timers(&self) -> usize {
        self.lock().timers.len()
    }

    fn expire(&self, id: NotificationId) {
        let mut state = self.lock();
        state.timers.detach(&id);
        if self.take(state, id) {
            tracing::debug!(%id, "Notification expired");
        }
    }

    fn take(&self, mut state: MutexGuard<'_, RegistryState>, id: NotificationId) -> bool {
        let Some(index) = state.items.iter().position(|n| n.id == id) else {
            return false;
        };
        state.items.remove(index);
        let events = state.events.clone();
        drop(state);

        if let Some(tx) = events {
            let _ = tx.send(Event::NotificationRemoved(id));
        }
        true
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

async fn expire_after(registry: Weak<Inner>, id: NotificationId, duration: Duration) {
    tokio::time::sleep(duration).await;
    if let Some(inner) = registry.upgrade() {
        NotificationRegistry { inner }.expire(id);
    }
}
