use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use oobflash_core::{Notification, NotificationSource};

#[derive(Debug, Clone)]
struct Entry {
    id: u64,
    notification: Notification,
}

#[derive(Debug, Default)]
struct Queues {
    next_id: u64,
    by_client: HashMap<String, Vec<Entry>>,
}

/// In-memory pending notifications, one queue per client id.
#[derive(Debug, Clone, Default)]
pub struct FlashStore {
    queues: Arc<Mutex<Queues>>,
}

impl FlashStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn handle(&self, client_id: &str) -> Flashes {
        Flashes {
            client_id: client_id.to_string(),
            queues: Arc::clone(&self.queues),
        }
    }

    #[must_use]
    pub fn client_count(&self) -> usize {
        lock(&self.queues).by_client.len()
    }
}

/// Request-scoped view of one client's queue. Handlers push; renderers work on
/// a [`PendingBatch`] snapshot and acknowledge what they actually showed.
#[derive(Debug, Clone)]
pub struct Flashes {
    client_id: String,
    queues: Arc<Mutex<Queues>>,
}

impl Flashes {
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn push(&self, notification: Notification) {
        let mut queues = lock(&self.queues);
        let id = queues.next_id;
        queues.next_id += 1;
        queues
            .by_client
            .entry(self.client_id.clone())
            .or_default()
            .push(Entry { id, notification });
    }

    /// Copies the current queue without consuming it.
    #[must_use]
    pub fn snapshot(&self) -> PendingBatch {
        PendingBatch {
            entries: lock(&self.queues)
                .by_client
                .get(&self.client_id)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Removes the first `delivered` entries of `batch` from the queue.
    /// Entries already gone or pushed after the snapshot are left alone.
    pub fn acknowledge(&self, batch: &PendingBatch, delivered: usize) {
        let ids = batch
            .entries
            .iter()
            .take(delivered)
            .map(|entry| entry.id)
            .collect::<BTreeSet<_>>();
        if ids.is_empty() {
            return;
        }
        let mut queues = lock(&self.queues);
        if let Some(queue) = queues.by_client.get_mut(&self.client_id) {
            queue.retain(|entry| !ids.contains(&entry.id));
            if queue.is_empty() {
                queues.by_client.remove(&self.client_id);
            }
        }
    }

    pub fn take(&self) -> Vec<Notification> {
        lock(&self.queues)
            .by_client
            .remove(&self.client_id)
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.notification)
            .collect()
    }
}

impl NotificationSource for Flashes {
    fn peek(&self) -> Vec<Notification> {
        self.snapshot().peek()
    }

    fn has_any(&self) -> bool {
        lock(&self.queues)
            .by_client
            .get(&self.client_id)
            .is_some_and(|queue| !queue.is_empty())
    }

    fn drain(&mut self) -> Vec<Notification> {
        self.take()
    }
}

/// Point-in-time copy of one client's queue.
#[derive(Debug, Clone, Default)]
pub struct PendingBatch {
    entries: Vec<Entry>,
}

impl PendingBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NotificationSource for PendingBatch {
    fn peek(&self) -> Vec<Notification> {
        self.entries
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }

    fn has_any(&self) -> bool {
        !self.entries.is_empty()
    }

    fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
            .into_iter()
            .map(|entry| entry.notification)
            .collect()
    }
}

// Recovers poisoned locks.
fn lock(queues: &Mutex<Queues>) -> MutexGuard<'_, Queues> {
    queues.lock().unwrap_or_else(PoisonError::into_inner)
}
