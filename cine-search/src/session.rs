//! Single-slot, observable store for the current search session.
//!
//! Writes replace the whole session; nothing is merged. Observers hold a
//! [`tokio::sync::watch::Receiver`] and see every replacement.
//!
//! Searches are not cancelled when a newer one starts. Instead each search
//! takes a [`Generation`] ticket from [`SessionStore::begin`] and commits with
//! [`SessionStore::replace_if_current`], which discards the write when a newer
//! search has begun in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::types::SearchSession;

/// Ticket identifying one started search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Holder of the one live [`SearchSession`].
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<Option<SearchSession>>,
    generation: AtomicU64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create an empty store (no search has completed yet).
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx,
            generation: AtomicU64::new(0),
        }
    }

    /// Start a new search, invalidating every earlier ticket.
    pub fn begin(&self) -> Generation {
        Generation(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The most recently issued ticket.
    pub fn latest(&self) -> Generation {
        Generation(self.generation.load(Ordering::SeqCst))
    }

    /// Unconditionally replace the session (last writer wins).
    pub fn replace(&self, next: SearchSession) {
        self.tx.send_replace(Some(next));
    }

    /// Replace the session only if `ticket` is still the latest search.
    ///
    /// Returns `false` and leaves the store untouched for a stale ticket.
    pub fn replace_if_current(&self, ticket: Generation, next: SearchSession) -> bool {
        self.tx.send_if_modified(|slot| {
            if self.generation.load(Ordering::SeqCst) != ticket.0 {
                return false;
            }
            *slot = Some(next);
            true
        })
    }

    /// Edit the current session in place under the store's write lock.
    ///
    /// A concurrent commit lands either wholly before or wholly after `edit`,
    /// so the edit never writes back a session that has since been replaced.
    /// Returns `false` without calling `edit` when the store is empty.
    pub fn modify(&self, edit: impl FnOnce(&mut SearchSession)) -> bool {
        self.tx.send_if_modified(|slot| match slot.as_mut() {
            Some(session) => {
                edit(session);
                true
            }
            None => false,
        })
    }

    /// Snapshot of the current session, if any.
    pub fn current(&self) -> Option<SearchSession> {
        self.tx.borrow().clone()
    }

    /// Observe session replacements.
    pub fn subscribe(&self) -> watch::Receiver<Option<SearchSession>> {
        self.tx.subscribe()
    }
}
