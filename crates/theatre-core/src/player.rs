//! Per-window player controller.
//!
//! Forwards transport, remote-control and bookmark commands to the engine
//! and the shared store, and folds engine events into [`PlayerState`] for
//! the UI to display. Each player filters bookmarks by its own engine's
//! disc, so several windows can share one store while playing different
//! discs.

use std::sync::MutexGuard;

use tracing::{debug, info, warn};

use crate::bookmarks::{BookmarkStore, DiscView, SharedBookmarkStore};
use crate::config::AppConfig;
use crate::engine::{PlaybackEngine, RemoteButton};
use crate::error::TheatreError;
use crate::event::{
    AspectRatio, DvdEvent, DvdMenu, PlaybackState, ScanDirection, ScanRate, VideoFormat,
};
use crate::event_log::EventLog;
use crate::menu::BookmarkMenu;
use crate::models::{format_seconds, Bookmark};

/// What the player knows from the events it has seen so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub title: Option<u16>,
    pub chapter: Option<u16>,
    pub title_elapsed: u32,
    pub title_duration: u32,
    pub chapter_elapsed: u32,
    pub chapter_duration: u32,
    pub playback: PlaybackState,
    pub scan: Option<(ScanRate, ScanDirection)>,
    pub aspect: AspectRatio,
    pub video_format: Option<VideoFormat>,
    pub still: bool,
    pub menu: Option<DvdMenu>,
    pub angle: Option<u16>,
    pub audio_stream: Option<u16>,
    pub subpicture: Option<(u16, bool)>,
    pub region_mismatch: Option<u32>,
    pub last_error: Option<i32>,
}

pub struct Player<E> {
    engine: E,
    store: SharedBookmarkStore,
    view: DiscView,
    state: PlayerState,
    events: EventLog,
    menu_limit: Option<usize>,
}

impl<E: PlaybackEngine> Player<E> {
    pub fn new(engine: E, store: SharedBookmarkStore) -> Self {
        Self {
            engine,
            store,
            view: DiscView::new(),
            state: PlayerState::default(),
            events: EventLog::new(),
            menu_limit: None,
        }
    }

    /// Apply the menu limit and push the configured volume to the engine.
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.menu_limit = config.bookmarks.menu_limit;
        self.set_volume(config.player.volume);
        self
    }

    /// Cap the number of bookmarks shown in [`bookmark_menu`](Self::bookmark_menu).
    pub fn with_menu_limit(mut self, limit: Option<usize>) -> Self {
        self.menu_limit = limit;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    fn store(&self) -> MutexGuard<'_, BookmarkStore> {
        lock(&self.store)
    }

    // ── Transport ───────────────────────────────────────────────

    /// Start playback, or stop it if already playing.
    pub fn play(&self) {
        if self.is_playing() {
            self.engine.stop();
        } else {
            self.engine.play();
        }
    }

    /// Pause playback, or resume it if already paused.
    pub fn pause(&self) {
        if self.is_paused() {
            self.engine.resume();
        } else {
            self.engine.pause();
        }
    }

    pub fn stop(&self) {
        self.engine.stop();
    }

    pub fn scan(&self, rate: ScanRate, direction: ScanDirection) {
        debug!(?rate, ?direction, "Scan");
        self.engine.scan(rate, direction);
    }

    pub fn step_forward(&self) {
        self.engine.step(ScanDirection::Forward);
    }

    pub fn step_backward(&self) {
        self.engine.step(ScanDirection::Backward);
    }

    pub fn next_chapter(&self) {
        self.engine.next_chapter();
    }

    pub fn prev_chapter(&self) {
        self.engine.prev_chapter();
    }

    pub fn set_volume(&self, volume: f32) {
        self.engine.set_volume(volume.clamp(0.0, 1.0));
    }

    pub fn volume(&self) -> f32 {
        self.engine.volume()
    }

    // ── Remote control ──────────────────────────────────────────

    pub fn press(&self, button: RemoteButton) {
        self.engine.press(button);
    }

    /// Center button: Enter while a disc menu is up, play/pause otherwise.
    pub fn press_center(&self) {
        if self.state.menu.is_some() {
            self.engine.press(RemoteButton::Enter);
        } else {
            self.pause();
        }
    }

    // ── Events ──────────────────────────────────────────────────

    /// Fold an engine event into the player state.
    pub fn dispatch_event(&mut self, event: DvdEvent) {
        debug!(event = event.name(), "DVD event");

        match &event {
            DvdEvent::Title { number } => {
                self.state.title = Some(*number);
                self.state.chapter = None;
                self.state.chapter_elapsed = 0;
            }
            DvdEvent::Chapter { number } => {
                self.state.chapter = Some(*number);
                self.state.chapter_elapsed = 0;
            }
            DvdEvent::Angle { stream } => self.state.angle = Some(*stream),
            DvdEvent::AudioStream { stream } => self.state.audio_stream = Some(*stream),
            DvdEvent::SubpictureStream { stream, visible } => {
                self.state.subpicture = Some((*stream, *visible));
            }
            DvdEvent::DisplayMode { aspect } => self.state.aspect = *aspect,
            DvdEvent::Still { still } => self.state.still = *still,
            DvdEvent::Playback { state } => {
                self.state.playback = *state;
                if *state != PlaybackState::Scanning {
                    self.state.scan = None;
                }
            }
            DvdEvent::VideoStandard { format } => self.state.video_format = Some(*format),
            DvdEvent::ScanSpeed { rate, direction } => {
                self.state.scan = Some((*rate, *direction));
            }
            DvdEvent::MenuCalled { menu } => {
                self.state.menu = (*menu != DvdMenu::None).then_some(*menu);
            }
            DvdEvent::RegionMismatch { region } => {
                warn!(region, "Disc region does not match drive");
                self.state.region_mismatch = Some(*region);
            }
            DvdEvent::TitleTime { elapsed, duration } => {
                self.state.title_elapsed = *elapsed;
                self.state.title_duration = *duration;
            }
            DvdEvent::ChapterTime { elapsed, duration } => {
                self.state.chapter_elapsed = *elapsed;
                self.state.chapter_duration = *duration;
            }
            DvdEvent::Error { code } => {
                warn!(code, "Playback engine reported an error");
                self.state.last_error = Some(*code);
            }
            DvdEvent::DiscChanged { name } => {
                info!(disc = ?name, "Disc changed");
                self.state = PlayerState::default();
                let store = lock(&self.store);
                self.view.refresh(&store, name.as_deref());
            }
        }

        self.events.push(event);
    }

    /// Elapsed chapter time as `H:MM:SS`.
    pub fn time_label(&self) -> String {
        format_seconds(self.state.chapter_elapsed)
    }

    /// `"<title>-<chapter>"`, with `-` for anything not known yet.
    pub fn track_label(&self) -> String {
        let part = |n: Option<u16>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
        format!("{}-{}", part(self.state.title), part(self.state.chapter))
    }

    pub fn is_playing(&self) -> bool {
        self.state.playback.is_playing()
    }

    pub fn is_paused(&self) -> bool {
        self.state.playback == PlaybackState::Paused
    }

    // ── Bookmarks ───────────────────────────────────────────────

    pub fn current_disc_name(&self) -> Option<String> {
        self.engine.current_disc_name()
    }

    /// Bookmark the current position and store it.
    pub fn add_current_bookmark(&self, name: Option<String>) -> Result<Bookmark, TheatreError> {
        let bookmark = Bookmark::capture(&self.engine, name)?;
        self.store().add(bookmark.clone());
        Ok(bookmark)
    }

    pub fn add_bookmark(&self, bookmark: Bookmark) {
        self.store().add(bookmark);
    }

    pub fn remove_bookmark(&self, bookmark: &Bookmark) -> bool {
        self.store().remove(bookmark)
    }

    pub fn rename_bookmark(&self, bookmark: &Bookmark, name: Option<String>) -> bool {
        self.store().rename(bookmark, name)
    }

    /// Bookmarks for the disc this player's engine has in right now.
    pub fn bookmarks(&mut self) -> Vec<Bookmark> {
        let disc = self.engine.current_disc_name();
        let store = lock(&self.store);
        self.view.refresh(&store, disc.as_deref()).to_vec()
    }

    pub fn all_bookmarks(&self) -> Vec<Bookmark> {
        self.store().all().to_vec()
    }

    pub fn activate_bookmark(&self, bookmark: &Bookmark) {
        bookmark.activate(&self.engine);
    }

    /// Menu model for the current disc's bookmarks.
    pub fn bookmark_menu(&self) -> BookmarkMenu {
        let disc = self.current_disc_name();
        BookmarkMenu::from_store(&self.store(), disc.as_deref(), self.menu_limit)
    }
}

impl<E> std::fmt::Debug for Player<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("state", &self.state)
            .field("menu_limit", &self.menu_limit)
            .finish_non_exhaustive()
    }
}

fn lock(store: &SharedBookmarkStore) -> MutexGuard<'_, BookmarkStore> {
    store.lock().unwrap_or_else(|e| e.into_inner())
}
