use super::{Playlist, PlaylistError, Song};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// The owning collection of all playlists in one session
///
/// Playlists are addressed by `pid`, their current 0-based position in
/// creation order. Deleting a playlist shifts every later playlist down one
/// position, so a `pid` is only meaningful until the next deletion; callers
/// look positions up fresh with [`find_by_name`](Self::find_by_name) each
/// cycle. Apart from [`delete`](Self::delete), the per-playlist operations
/// treat a valid `pid` as a caller-guaranteed precondition and index
/// directly.
#[derive(Debug, Default)]
pub struct PlaylistDirectory {
    /// All playlists in creation order
    playlists: Vec<Playlist>,
}

impl PlaylistDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self {
            playlists: Vec::new(),
        }
    }

    /// Number of playlists currently held
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    /// Check if the directory holds no playlists
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// Find the position of the playlist named `name`, case-insensitively
    ///
    /// Linear scan comparing the lowercase fold of `name` against each
    /// playlist's identity key; first match wins. Names are unique as long
    /// as callers check here before [`create`](Self::create).
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        let name_lower = name.to_lowercase();
        self.playlists
            .iter()
            .position(|p| p.name_lower() == name_lower)
    }

    /// Append a new empty playlist named `name`
    ///
    /// The caller must have already verified via
    /// [`find_by_name`](Self::find_by_name) that no held playlist shares the
    /// case-folded name; the directory does not re-check. The new playlist's
    /// position is `len() - 1` after the call.
    pub fn create(&mut self, name: impl Into<String>) {
        self.playlists.push(Playlist::new(name));
    }

    /// Delete the playlist at position `pid`
    ///
    /// Returns false without touching anything when `pid` is out of range.
    /// On success every playlist after `pid` moves down one position.
    pub fn delete(&mut self, pid: usize) -> bool {
        if pid >= self.playlists.len() {
            return false;
        }
        self.playlists.remove(pid);
        true
    }

    /// Insert `song` at 1-based `pos` in the playlist at `pid`
    pub fn insert_song(&mut self, pid: usize, song: Song, pos: i64) -> bool {
        self.playlists[pid].insert(song, pos)
    }

    /// Delete every song with id `song_id` from the playlist at `pid`
    pub fn delete_song(&mut self, pid: usize, song_id: u32) -> Result<usize, PlaylistError> {
        self.playlists[pid].delete_song(song_id)
    }

    /// Name of the playlist at `pid`
    pub fn name(&self, pid: usize) -> &str {
        self.playlists[pid].name()
    }

    /// Number of songs in the playlist at `pid`
    pub fn playlist_len(&self, pid: usize) -> usize {
        self.playlists[pid].len()
    }

    /// The playlist at `pid`, for display
    pub fn playlist(&self, pid: usize) -> &Playlist {
        &self.playlists[pid]
    }

    /// Save all playlists to the file at `path`, overwriting it
    ///
    /// Line 1 is the playlist count; then one line per playlist in stored
    /// order: the name, a tab, the song count, `: `, and the playlist's
    /// summary of space-separated song ids. The line break terminating each
    /// summary closes the record, so the file holds `1 + len()` lines. The
    /// file handle lives only for this call and is closed on every path out.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);

        writeln!(w, "{}", self.playlists.len())?;
        for playlist in &self.playlists {
            write!(w, "{}\t{}: ", playlist.name(), playlist.len())?;
            playlist.write_summary(&mut w)?;
        }

        w.flush()?;
        log::debug!("Saved {} playlists to {:?}", self.playlists.len(), path);
        Ok(())
    }
}

impl fmt::Display for PlaylistDirectory {
    /// Directory listing: a count header then `<name>: <count> songs` per
    /// playlist, or a single message when there are no playlists.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.playlists.is_empty() {
            return writeln!(f, "Sorry, you do not have any playlists.");
        }

        writeln!(f, "You have {} playlists.", self.playlists.len())?;
        writeln!(f)?;
        for playlist in &self.playlists {
            writeln!(f, "{}: {} songs", playlist.name(), playlist.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn song(id: u32) -> Song {
        Song {
            id,
            title: format!("Song {}", id),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            genre: "Pop".to_string(),
            size: 1000,
            duration_secs: 180,
            year: 2015,
            comments: "None".to_string(),
        }
    }

    #[test]
    fn create_appends_in_order() {
        let mut dir = PlaylistDirectory::new();
        dir.create("First");
        dir.create("Second");

        assert_eq!(dir.len(), 2);
        assert_eq!(dir.name(0), "First");
        assert_eq!(dir.name(1), "Second");
    }

    #[test]
    fn find_by_name_is_case_insensitive() {
        let mut dir = PlaylistDirectory::new();
        dir.create("Road Trip");

        assert_eq!(dir.find_by_name("road TRIP"), Some(0));
        assert_eq!(dir.find_by_name("Road Trip"), Some(0));
        assert_eq!(dir.find_by_name("never created"), None);
    }

    #[test]
    fn find_by_name_is_idempotent() {
        let mut dir = PlaylistDirectory::new();
        dir.create("Gym");

        for _ in 0..3 {
            assert_eq!(dir.find_by_name("gym"), Some(0));
            assert_eq!(dir.len(), 1);
        }
    }

    #[test]
    fn delete_validates_position() {
        let mut dir = PlaylistDirectory::new();
        assert!(!dir.delete(0));

        dir.create("Only");
        assert!(!dir.delete(1));
        assert!(dir.delete(0));
        assert_eq!(dir.len(), 0);
    }

    #[test]
    fn delete_shifts_later_playlists_down() {
        let mut dir = PlaylistDirectory::new();
        dir.create("A");
        dir.create("B");
        dir.create("C");

        assert!(dir.delete(1));
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.name(0), "A");
        assert_eq!(dir.name(1), "C");
        assert_eq!(dir.find_by_name("c"), Some(1));
    }

    #[test]
    fn song_operations_delegate_to_playlist() {
        let mut dir = PlaylistDirectory::new();
        dir.create("Gym");

        assert!(dir.insert_song(0, song(3), 1));
        assert!(dir.insert_song(0, song(1), 99));
        assert_eq!(dir.playlist_len(0), 2);

        assert_eq!(dir.delete_song(0, 3), Ok(1));
        assert_eq!(dir.delete_song(0, 3), Ok(0));
        assert_eq!(dir.delete_song(0, 1), Ok(1));
        assert_eq!(dir.delete_song(0, 1), Err(PlaylistError::Empty));
    }

    #[test]
    fn save_writes_count_then_one_line_per_playlist() {
        let mut dir = PlaylistDirectory::new();
        dir.create("Gym");
        for id in [3, 1, 3] {
            dir.insert_song(0, song(id), i64::MAX);
        }
        dir.create("Chill");

        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("playlists.txt");
        dir.save(&path).expect("save failed");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "2\nGym\t3: 3 1 3 \nChill\t0: \n");
    }

    #[test]
    fn save_fails_when_target_cannot_be_opened() {
        let mut dir = PlaylistDirectory::new();
        dir.create("Gym");

        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("no-such-dir").join("playlists.txt");
        assert!(dir.save(&path).is_err());
    }

    #[test]
    fn display_empty_directory_prints_message_only() {
        let dir = PlaylistDirectory::new();
        assert_eq!(dir.to_string(), "Sorry, you do not have any playlists.\n");
    }

    #[test]
    fn display_lists_each_playlist_with_song_count() {
        let mut dir = PlaylistDirectory::new();
        dir.create("Solo");
        dir.insert_song(0, song(1), 1);
        dir.insert_song(0, song(2), 2);

        let text = dir.to_string();
        assert!(text.starts_with("You have 1 playlists.\n"));
        assert!(text.contains("Solo: 2 songs\n"));
    }
}
