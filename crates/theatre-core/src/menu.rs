//! Menu model for the bookmark menu.
//!
//! The UI rebuilds a [`BookmarkMenu`] from the store whenever it opens the
//! menu or the store's revision moves on, then renders the items as it
//! likes. The store never sees the menu.

use crate::bookmarks::BookmarkStore;
use crate::engine::PlaybackEngine;
use crate::models::Bookmark;

/// One row of the bookmark menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    /// "Add Bookmark" command.
    AddCurrent,
    Separator,
    Bookmark(MenuEntry),
}

/// A selectable bookmark row.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    label: String,
    bookmark: Bookmark,
}

impl MenuEntry {
    pub fn new(bookmark: Bookmark) -> Self {
        Self {
            label: bookmark.display_label(),
            bookmark,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bookmark(&self) -> &Bookmark {
        &self.bookmark
    }

    /// Run the row's action: seek to the bookmark.
    pub fn activate<E: PlaybackEngine + ?Sized>(&self, engine: &E) {
        self.bookmark.activate(engine);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkMenu {
    items: Vec<MenuItem>,
    revision: u64,
}

impl BookmarkMenu {
    /// Build the menu for `bookmarks`, oldest first.
    ///
    /// With a `limit`, only the most recent `limit` bookmarks are listed.
    pub fn build(bookmarks: &[Bookmark], limit: Option<usize>) -> Self {
        let skip = limit
            .map(|max| bookmarks.len().saturating_sub(max))
            .unwrap_or(0);

        let mut items = vec![MenuItem::AddCurrent];
        if bookmarks.len() > skip {
            items.push(MenuItem::Separator);
        }
        items.extend(
            bookmarks[skip..]
                .iter()
                .cloned()
                .map(|b| MenuItem::Bookmark(MenuEntry::new(b))),
        );

        Self { items, revision: 0 }
    }

    /// Build the menu for `disc` from the store's current contents.
    pub fn from_store(store: &BookmarkStore, disc: Option<&str>, limit: Option<usize>) -> Self {
        let bookmarks = disc
            .map(|d| store.bookmarks_for_disc(d))
            .unwrap_or_default();
        let mut menu = Self::build(&bookmarks, limit);
        menu.revision = store.revision();
        menu
    }

    /// Whether the store has changed since this menu was built.
    pub fn is_stale(&self, store_revision: u64) -> bool {
        self.revision != store_revision
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Just the bookmark rows.
    pub fn entries(&self) -> impl Iterator<Item = &MenuEntry> {
        self.items.iter().filter_map(|item| match item {
            MenuItem::Bookmark(entry) => Some(entry),
            _ => None,
        })
    }
}
