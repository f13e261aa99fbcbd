use std::{collections::HashMap, hash::Hash};
use tokio::task::JoinHandle;

/// Keyed set of background tasks. Replacing or removing a key aborts the
/// task behind it, and dropping the manager aborts everything left.
pub struct TaskManager<K> {
    tasks: HashMap<K, JoinHandle<()>>,
}

impl<K: Eq + Hash> Default for TaskManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> TaskManager<K> {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn(&mut self, key: K, task: JoinHandle<()>) {
        if let Some(handle) = self.tasks.insert(key, task) {
            handle.abort();
        }
    }

    pub fn abort(&mut self, key: &K) -> bool {
        match self.tasks.remove(key) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Forgets a task without aborting it. Used by a task that is
    /// finishing on its own and must not cancel itself.
    pub fn detach(&mut self, key: &K) {
        self.tasks.remove(key);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tasks.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}

impl<K> Drop for TaskManager<K> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
