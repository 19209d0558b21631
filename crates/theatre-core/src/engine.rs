//! The DVD playback engine seen from the player.
//!
//! Decoding, navigation and region handling all live behind this trait.
//! The player reads the current disc and position and forwards user
//! commands; whether a command succeeds is reported through the engine's
//! own event channel (see [`crate::event::DvdEvent::Error`]).

use serde::{Deserialize, Serialize};

use crate::event::{ScanDirection, ScanRate};
use crate::models::PlaybackPosition;

/// Buttons on the DVD remote control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteButton {
    Enter,
    Up,
    Down,
    Left,
    Right,
    Title,
    Menu,
    Audio,
    Angle,
    Subpicture,
}

/// Playback engine collaborator.
pub trait PlaybackEngine {
    /// Current title, chapter, frame and chapter time.
    fn current_position(&self) -> PlaybackPosition;

    /// Name of the inserted disc, or `None` if nothing is loaded.
    fn current_disc_name(&self) -> Option<String>;

    /// Jump to the given position. Fire-and-forget.
    fn seek(&self, position: PlaybackPosition);

    fn play(&self);
    fn pause(&self);
    fn resume(&self);
    fn stop(&self);

    /// Play at `rate` in `direction` until told otherwise.
    fn scan(&self, rate: ScanRate, direction: ScanDirection);

    /// Advance or go back a single frame.
    fn step(&self, direction: ScanDirection);

    fn next_chapter(&self);
    fn prev_chapter(&self);

    /// Forward a remote-control button press.
    fn press(&self, button: RemoteButton);

    /// Output volume, 0.0 to 1.0.
    fn set_volume(&self, volume: f32);
    fn volume(&self) -> f32;
}

impl<E: PlaybackEngine + ?Sized> PlaybackEngine for &E {
    fn current_position(&self) -> PlaybackPosition {
        (**self).current_position()
    }

    fn current_disc_name(&self) -> Option<String> {
        (**self).current_disc_name()
    }

    fn seek(&self, position: PlaybackPosition) {
        (**self).seek(position)
    }

    fn play(&self) {
        (**self).play()
    }

    fn pause(&self) {
        (**self).pause()
    }

    fn resume(&self) {
        (**self).resume()
    }

    fn stop(&self) {
        (**self).stop()
    }

    fn scan(&self, rate: ScanRate, direction: ScanDirection) {
        (**self).scan(rate, direction)
    }

    fn step(&self, direction: ScanDirection) {
        (**self).step(direction)
    }

    fn next_chapter(&self) {
        (**self).next_chapter()
    }

    fn prev_chapter(&self) {
        (**self).prev_chapter()
    }

    fn press(&self, button: RemoteButton) {
        (**self).press(button)
    }

    fn set_volume(&self, volume: f32) {
        (**self).set_volume(volume)
    }

    fn volume(&self) -> f32 {
        (**self).volume()
    }
}
