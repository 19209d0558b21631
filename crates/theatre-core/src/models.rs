mod bookmark;
mod position;

pub use bookmark::Bookmark;
pub use position::{format_seconds, PlaybackPosition};
