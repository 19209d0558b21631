//! The bookmark collection shared by every player window.
//!
//! One [`BookmarkStore`] holds the bookmarks of every disc ever played, in
//! insertion order, and mirrors them into a single preference entry. It is
//! created by the application at startup and handed to players as a
//! [`SharedBookmarkStore`]; add, remove, rename and save all happen under
//! that one lock.
//!
//! Persistence failures never escape the mutating operations. They are
//! logged and the in-memory collection keeps going (empty after a failed
//! load, unchanged after a failed save). Saved records that cannot be
//! decoded, or that name no disc, are skipped on load.
//!
//! Each player keeps its own [`DiscView`] of the bookmarks for the disc it
//! is playing, so windows showing different discs never share a filter.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::error::TheatreError;
use crate::models::Bookmark;
use crate::storage::Preferences;

/// Thread-safe handle to the bookmark store.
pub type SharedBookmarkStore = Arc<Mutex<BookmarkStore>>;

#[derive(Debug)]
pub struct BookmarkStore {
    prefs: Preferences,
    key: String,
    bookmarks: Vec<Bookmark>,
    revision: watch::Sender<u64>,
}

impl BookmarkStore {
    /// Create an empty store persisting under `key`. Nothing is read yet.
    pub fn new(prefs: Preferences, key: impl Into<String>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            prefs,
            key: key.into(),
            bookmarks: Vec::new(),
            revision,
        }
    }

    /// Create a store and load whatever was persisted under `key`.
    pub fn open(prefs: Preferences, key: impl Into<String>) -> Self {
        let mut store = Self::new(prefs, key);
        store.load();
        store
    }

    /// Wrap the store for sharing between players.
    pub fn into_shared(self) -> SharedBookmarkStore {
        Arc::new(Mutex::new(self))
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// A missing entry yields an empty collection. An unreadable entry is
    /// logged and also yields an empty collection; unreadable records within
    /// a readable entry are logged and skipped.
    pub fn load(&mut self) {
        self.bookmarks = match self.read_persisted() {
            Ok(Some(bookmarks)) => {
                tracing::info!(count = bookmarks.len(), "Loaded bookmarks");
                bookmarks
            }
            Ok(None) => {
                tracing::debug!(key = %self.key, "No saved bookmarks");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to load bookmarks, starting empty");
                Vec::new()
            }
        };
        self.changed();
    }

    fn read_persisted(&self) -> Result<Option<Vec<Bookmark>>, TheatreError> {
        let Some(json) = self.prefs.get(&self.key)? else {
            return Ok(None);
        };
        let records: Vec<serde_json::Value> = serde_json::from_str(&json)?;
        let bookmarks: Vec<Bookmark> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Bookmark>(record) {
                Ok(bookmark) => Some(bookmark),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable bookmark record");
                    None
                }
            })
            .collect();
        Ok(Some(bookmarks))
    }

    /// Write the whole collection, replacing the previous entry.
    pub fn save(&self) -> Result<(), TheatreError> {
        let json = serde_json::to_string(&self.bookmarks)?;
        self.prefs.set(&self.key, &json)?;
        tracing::debug!(count = self.bookmarks.len(), "Saved bookmarks");
        Ok(())
    }

    fn save_logged(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(key = %self.key, error = %e, "Failed to save bookmarks");
        }
    }

    /// Append a bookmark (newest last) and persist.
    pub fn add(&mut self, bookmark: Bookmark) {
        tracing::info!(label = %bookmark.display_label(), "Adding bookmark");
        self.bookmarks.push(bookmark);
        self.changed();
        self.save_logged();
    }

    /// Remove the first bookmark equal to `bookmark` and persist.
    ///
    /// Returns `false` (and changes nothing) if no such bookmark exists.
    pub fn remove(&mut self, bookmark: &Bookmark) -> bool {
        let Some(index) = self.bookmarks.iter().position(|b| b == bookmark) else {
            tracing::debug!(label = %bookmark.display_label(), "Bookmark to remove not found");
            return false;
        };
        let removed = self.bookmarks.remove(index);
        tracing::info!(label = %removed.display_label(), "Removed bookmark");
        self.changed();
        self.save_logged();
        true
    }

    /// Set the display name of the first bookmark equal to `bookmark`.
    pub fn rename(&mut self, bookmark: &Bookmark, name: Option<String>) -> bool {
        let Some(existing) = self.bookmarks.iter_mut().find(|b| *b == bookmark) else {
            return false;
        };
        existing.set_name(name);
        self.changed();
        self.save_logged();
        true
    }

    /// Remove the bookmark at `index` in [`all`](Self::all) and persist.
    pub fn remove_at(&mut self, index: usize) -> Option<Bookmark> {
        if index >= self.bookmarks.len() {
            return None;
        }
        let removed = self.bookmarks.remove(index);
        tracing::info!(index, label = %removed.display_label(), "Removed bookmark");
        self.changed();
        self.save_logged();
        Some(removed)
    }

    /// Set the display name of the bookmark at `index` in [`all`](Self::all).
    pub fn rename_at(&mut self, index: usize, name: Option<String>) -> bool {
        let Some(existing) = self.bookmarks.get_mut(index) else {
            return false;
        };
        existing.set_name(name);
        self.changed();
        self.save_logged();
        true
    }

    /// Every bookmark of every disc, oldest first.
    pub fn all(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Bookmarks for one disc, in collection order.
    pub fn bookmarks_for_disc(&self, disc: &str) -> Vec<Bookmark> {
        self.bookmarks
            .iter()
            .filter(|b| b.disc_name() == disc)
            .cloned()
            .collect()
    }

    /// Distinct disc names in the order they first appear.
    pub fn disc_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for bookmark in &self.bookmarks {
            if !names.iter().any(|n| n == bookmark.disc_name()) {
                names.push(bookmark.disc_name().to_string());
            }
        }
        names
    }

    /// Subscribe to change notifications.
    ///
    /// The value is a revision counter bumped on every change to the
    /// collection.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn changed(&mut self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

/// Cached bookmarks of one disc, rebuilt when the disc or the store's
/// revision changes.
#[derive(Debug, Default)]
pub struct DiscView {
    disc: Option<String>,
    revision: Option<u64>,
    bookmarks: Vec<Bookmark>,
}

impl DiscView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookmarks of `disc` as of the store's current revision.
    pub fn refresh(&mut self, store: &BookmarkStore, disc: Option<&str>) -> &[Bookmark] {
        let revision = store.revision();
        if self.revision != Some(revision) || self.disc.as_deref() != disc {
            self.bookmarks = disc
                .map(|d| store.bookmarks_for_disc(d))
                .unwrap_or_default();
            self.disc = disc.map(str::to_string);
            self.revision = Some(revision);
        }
        &self.bookmarks
    }

    /// Disc the view was last built for.
    pub fn disc(&self) -> Option<&str> {
        self.disc.as_deref()
    }
}
