use std::hash::{Hash, Hasher};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::PlaybackEngine;
use crate::error::TheatreError;
use crate::models::PlaybackPosition;

/// A saved playback position on a particular disc.
///
/// Disc and position are fixed once captured; only the display name can
/// change. Equality compares disc and position and ignores the name, so two
/// bookmarks at the same spot are the same saved place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(rename = "discName", deserialize_with = "non_empty")]
    disc_name: String,
    #[serde(flatten)]
    position: PlaybackPosition,
}

impl Bookmark {
    /// Snapshot the engine's current disc and position.
    pub fn capture<E: PlaybackEngine + ?Sized>(
        engine: &E,
        name: Option<String>,
    ) -> Result<Self, TheatreError> {
        let disc_name = engine
            .current_disc_name()
            .filter(|d| !d.is_empty())
            .ok_or(TheatreError::NoDisc)?;
        Ok(Self::new(name, disc_name, engine.current_position()))
    }

    pub(crate) fn new(name: Option<String>, disc_name: String, position: PlaybackPosition) -> Self {
        Self {
            name,
            disc_name,
            position,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn disc_name(&self) -> &str {
        &self.disc_name
    }

    pub fn position(&self) -> PlaybackPosition {
        self.position
    }

    pub fn title(&self) -> u16 {
        self.position.title
    }

    pub fn chapter(&self) -> u16 {
        self.position.chapter
    }

    pub fn frame(&self) -> u16 {
        self.position.frame
    }

    pub fn seconds(&self) -> u32 {
        self.position.seconds
    }

    /// Label for menus: the user's name if set, the summary otherwise.
    pub fn display_label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => self.summary(),
        }
    }

    /// `"<disc>: Title n, Chapter m, H:MM:SS"`.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.disc_name, self.position)
    }

    /// Ask the engine to jump back to this bookmark.
    pub fn activate<E: PlaybackEngine + ?Sized>(&self, engine: &E) {
        tracing::debug!(disc = %self.disc_name, position = %self.position, "Seeking to bookmark");
        engine.seek(self.position);
    }
}

fn non_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let disc = String::deserialize(deserializer)?;
    if disc.is_empty() {
        return Err(D::Error::custom("discName must not be empty"));
    }
    Ok(disc)
}

impl PartialEq for Bookmark {
    fn eq(&self, other: &Self) -> bool {
        self.disc_name == other.disc_name && self.position == other.position
    }
}

impl Eq for Bookmark {}

impl Hash for Bookmark {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.disc_name.hash(state);
        self.position.hash(state);
    }
}

impl std::fmt::Display for Bookmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_label())
    }
}
