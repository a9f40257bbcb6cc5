//! Client-local bookmark list of destinations
//!
//! The saved set is the only state kept independently of the backend. It
//! stores full destination copies so saved items render even when the live
//! collection has not loaded or no longer contains them. Every mutation is
//! written through to the store immediately and entries never expire.

use crate::error::{Result, ResultExt};
use crate::model::Destination;
use crate::storage::KeyValueStore;

/// Storage key of the saved set.
pub const SAVED_KEY: &str = "saved:destinations";

/// Saved destinations in insertion order.
#[derive(Debug)]
pub struct SavedSet<S> {
    store: S,
    items: Vec<Destination>,
}

impl<S: KeyValueStore> SavedSet<S> {
    /// Load the saved set from `store`.
    ///
    /// An unreadable or malformed entry starts an empty set rather than
    /// failing; it is overwritten by the next toggle.
    pub fn load(store: S) -> Self {
        let items = match store.get(SAVED_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "saved set is malformed, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "saved set could not be read, starting empty");
                Vec::new()
            }
        };

        Self { store, items }
    }

    /// Add `destination` if its id is absent, remove it otherwise.
    ///
    /// Returns whether the destination is saved afterwards. The new state is
    /// persisted before returning; on a storage failure the in-memory change
    /// is rolled back and the error returned.
    pub fn toggle(&mut self, destination: &Destination) -> Result<bool> {
        let position = self.items.iter().position(|d| d.id == destination.id);

        let removed = match position {
            Some(index) => Some((index, self.items.remove(index))),
            None => {
                self.items.push(destination.clone());
                None
            }
        };

        if let Err(err) = self.persist() {
            match removed {
                Some((index, item)) => self.items.insert(index, item),
                None => {
                    self.items.pop();
                }
            }
            return Err(err);
        }

        let saved = removed.is_none();
        tracing::debug!(id = %destination.id, saved, "toggled saved destination");
        Ok(saved)
    }

    /// Membership test by id.
    pub fn is_saved(&self, id: &str) -> bool {
        self.items.iter().any(|d| d.id == id)
    }

    /// Saved destinations, oldest first.
    pub fn items(&self) -> &[Destination] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let encoded = serde_json::to_string(&self.items)?;
        self.store.set(SAVED_KEY, &encoded).context("Persisting saved destinations")
    }
}
