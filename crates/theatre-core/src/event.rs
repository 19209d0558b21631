//! Events pushed by the playback engine.
//!
//! Each variant carries only the values that mean something for that kind
//! of event.

use serde::{Deserialize, Serialize};

/// Something that happened during playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DvdEvent {
    /// A new title started.
    Title { number: u16 },
    /// A new chapter (part of title) started.
    Chapter { number: u16 },
    Angle { stream: u16 },
    AudioStream { stream: u16 },
    SubpictureStream { stream: u16, visible: bool },
    DisplayMode { aspect: AspectRatio },
    Still { still: bool },
    Playback { state: PlaybackState },
    VideoStandard { format: VideoFormat },
    ScanSpeed { rate: ScanRate, direction: ScanDirection },
    MenuCalled { menu: DvdMenu },
    /// The disc's region does not match the drive. `region` is the disc's region mask.
    RegionMismatch { region: u32 },
    /// Elapsed and total seconds in the current title.
    TitleTime { elapsed: u32, duration: u32 },
    /// Elapsed and total seconds in the current chapter.
    ChapterTime { elapsed: u32, duration: u32 },
    Error { code: i32 },
    /// A disc was inserted (`Some`) or ejected (`None`).
    DiscChanged { name: Option<String> },
}

impl DvdEvent {
    /// Human-readable event name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title { .. } => "Title",
            Self::Chapter { .. } => "Chapter",
            Self::Angle { .. } => "Angle",
            Self::AudioStream { .. } => "Audio Stream",
            Self::SubpictureStream { .. } => "Subpicture Stream",
            Self::DisplayMode { .. } => "Display Mode",
            Self::Still { .. } => "Still",
            Self::Playback { .. } => "Playback",
            Self::VideoStandard { .. } => "Video Standard",
            Self::ScanSpeed { .. } => "Scan Speed",
            Self::MenuCalled { .. } => "Menu Called",
            Self::RegionMismatch { .. } => "Region Mismatch",
            Self::TitleTime { .. } => "Title Time",
            Self::ChapterTime { .. } => "Chapter Time",
            Self::Error { .. } => "Error",
            Self::DiscChanged { .. } => "Disc Changed",
        }
    }
}

impl std::fmt::Display for DvdEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Engine playback state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Unknown,
    Playing,
    PlayingStill,
    PlayingSlow,
    Paused,
    Stopped,
    Scanning,
    Idle,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        matches!(
            self,
            Self::Playing | Self::PlayingStill | Self::PlayingSlow | Self::Scanning
        )
    }
}

/// Scan speed relative to normal playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanRate {
    OneEighth,
    OneFourth,
    OneHalf,
    Normal,
    X2,
    X4,
    X8,
    X16,
    X32,
}

impl ScanRate {
    /// Playback speed multiplier.
    pub fn multiplier(self) -> f32 {
        match self {
            Self::OneEighth => 0.125,
            Self::OneFourth => 0.25,
            Self::OneHalf => 0.5,
            Self::Normal => 1.0,
            Self::X2 => 2.0,
            Self::X4 => 4.0,
            Self::X8 => 8.0,
            Self::X16 => 16.0,
            Self::X32 => 32.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanDirection {
    #[default]
    Forward,
    Backward,
}

/// Display aspect ratio reported by the disc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    Unknown,
    FourByThree,
    SixteenByNine,
    LetterBox,
}

impl AspectRatio {
    /// Width and height proportions, if known.
    pub fn proportions(self) -> Option<(u32, u32)> {
        match self {
            Self::FourByThree => Some((4, 3)),
            Self::SixteenByNine | Self::LetterBox => Some((16, 9)),
            Self::Unknown => None,
        }
    }

    /// Height for a video of the given width, if the ratio is known.
    pub fn height_for_width(self, width: f32) -> Option<f32> {
        self.proportions().map(|(w, h)| width * h as f32 / w as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoFormat {
    Ntsc,
    Pal,
    Unknown,
}

/// Disc menus the engine can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DvdMenu {
    Title,
    Root,
    Subpicture,
    Audio,
    Angle,
    Chapter,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(DvdEvent::Title { number: 1 }.name(), "Title");
        assert_eq!(
            DvdEvent::ChapterTime {
                elapsed: 1,
                duration: 2
            }
            .to_string(),
            "Chapter Time"
        );
        assert_eq!(DvdEvent::DiscChanged { name: None }.name(), "Disc Changed");
    }

    #[test]
    fn test_aspect_ratio_height() {
        assert_eq!(AspectRatio::FourByThree.height_for_width(640.0), Some(480.0));
        assert_eq!(
            AspectRatio::SixteenByNine.height_for_width(1280.0),
            Some(720.0)
        );
        assert_eq!(AspectRatio::Unknown.height_for_width(640.0), None);
    }

    #[test]
    fn test_playing_states() {
        assert!(PlaybackState::Playing.is_playing());
        assert!(PlaybackState::Scanning.is_playing());
        assert!(!PlaybackState::Paused.is_playing());
        assert!(!PlaybackState::Stopped.is_playing());
        assert!(!PlaybackState::Unknown.is_playing());
    }

    #[test]
    fn test_scan_rate_multiplier() {
        assert_eq!(ScanRate::OneEighth.multiplier(), 0.125);
        assert_eq!(ScanRate::X32.multiplier(), 32.0);
    }
}
