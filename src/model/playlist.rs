use super::Song;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;

/// Errors from playlist mutation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    /// A deletion was requested on a playlist that holds no songs.
    /// Distinct from a successful deletion that matched nothing.
    #[error("the playlist is empty")]
    Empty,
}

/// An ordered, duplicate-permitting sequence of songs with a user-facing name
///
/// Insert positions in the public API are 1-based; position 1 means "before
/// the first song". The insertion order is the playlist's persisted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist name, original casing preserved
    name: String,

    /// Lowercase fold of `name`, used for all identity comparisons.
    /// Derived once at construction; `name` is immutable afterwards.
    name_lower: String,

    /// Songs in playlist order
    songs: Vec<Song>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name_lower = name.to_lowercase();
        Self {
            name,
            name_lower,
            songs: Vec::new(),
        }
    }

    /// Playlist name as the user entered it
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase form of the name, the playlist's identity key
    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }

    /// Number of songs in the playlist
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the playlist holds no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Songs in playlist order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Insert a song so it becomes the element at 1-based position `pos`
    ///
    /// Against the pre-insertion sequence of length n: `pos <= 1` inserts at
    /// the front, `pos > n` appends, anything between lands at `pos` with
    /// later songs shifted one place. Always succeeds and grows the playlist
    /// by one; the returned bool always reports success.
    pub fn insert(&mut self, song: Song, pos: i64) -> bool {
        if pos <= 1 {
            self.songs.insert(0, song);
        } else if pos > self.songs.len() as i64 {
            self.songs.push(song);
        } else {
            self.songs.insert(pos as usize - 1, song);
        }
        true
    }

    /// Delete every song whose id equals `song_id`
    ///
    /// Remaining songs keep their relative order. Returns how many songs were
    /// removed; `Ok(0)` means the playlist had songs but none matched.
    /// Deleting from a playlist that was already empty is reported as
    /// [`PlaylistError::Empty`] instead of a zero count.
    pub fn delete_song(&mut self, song_id: u32) -> Result<usize, PlaylistError> {
        if self.songs.is_empty() {
            return Err(PlaylistError::Empty);
        }

        let before = self.songs.len();
        self.songs.retain(|s| s.id != song_id);
        Ok(before - self.songs.len())
    }

    /// Write the playlist summary to a save stream
    ///
    /// The summary is the song ids in playlist order, each followed by a
    /// space, terminated by a line break. An empty playlist writes only the
    /// line break.
    pub fn write_summary<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for song in &self.songs {
            write!(w, "{} ", song.id)?;
        }
        writeln!(w)
    }
}

impl fmt::Display for Playlist {
    /// Human-readable listing: a name header then one row per song in
    /// playlist order, or a single message when there is nothing to show.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Your playlist is empty!");
        }

        writeln!(f, "Songs in playlist '{}':", self.name)?;
        for song in &self.songs {
            writeln!(f, "{}", song)?;
        }
        Ok(())
    }
}
