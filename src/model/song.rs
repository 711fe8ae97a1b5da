use serde::{Deserialize, Serialize};
use std::fmt;

/// A single song from the catalog with all its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Song identifier, equal to the song's 1-based row position in the
    /// catalog file. Stable for the lifetime of the process.
    pub id: u32,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Genre
    pub genre: String,

    /// File size in bytes
    pub size: u32,

    /// Duration in seconds
    pub duration_secs: u32,

    /// Release year
    pub year: u32,

    /// Free-text comments
    pub comments: String,
}

impl Song {
    /// Minutes part of the duration
    pub fn minutes(&self) -> u32 {
        self.duration_secs / 60
    }

    /// Seconds part of the duration
    pub fn seconds(&self) -> u32 {
        self.duration_secs % 60
    }
}

/// Clip a string to at most `width` characters so a long field cannot
/// push the rest of the row out of its column.
fn clip(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

impl fmt::Display for Song {
    /// One 80-column console row: id right-aligned, then artist, title and
    /// album left-aligned in fixed widths, then `mm:ss` and year.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>5} {:<20} {:<30} {:<10} {:02}:{:02} {:>4}",
            self.id,
            clip(&self.artist, 20),
            clip(&self.title, 30),
            clip(&self.album, 10),
            self.minutes(),
            self.seconds(),
            self.year
        )
    }
}
