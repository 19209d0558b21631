use serde::{Deserialize, Serialize};

/// A point on the disc: title, chapter, frame and seconds into the chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaybackPosition {
    pub title: u16,
    pub chapter: u16,
    pub frame: u16,
    pub seconds: u32,
}

impl PlaybackPosition {
    pub fn new(title: u16, chapter: u16, frame: u16, seconds: u32) -> Self {
        Self {
            title,
            chapter,
            frame,
            seconds,
        }
    }
}

impl std::fmt::Display for PlaybackPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Title {}, Chapter {}, {}",
            self.title,
            self.chapter,
            format_seconds(self.seconds)
        )
    }
}

/// Format a second count as `H:MM:SS`.
pub fn format_seconds(total: u32) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "0:00:00");
        assert_eq!(format_seconds(59), "0:00:59");
        assert_eq!(format_seconds(3723), "1:02:03");
        assert_eq!(format_seconds(36_000), "10:00:00");
    }

    #[test]
    fn test_display() {
        let pos = PlaybackPosition::new(2, 7, 12, 95);
        assert_eq!(pos.to_string(), "Title 2, Chapter 7, 0:01:35");
    }
}
