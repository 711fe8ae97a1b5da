//! Song catalog: the read-only, pre-loaded set of songs
//!
//! Loaded once from the tab-delimited catalog file and never mutated
//! afterwards, so it can be shared by reference for the whole session.
//! Songs are addressed by their positional id (1-based).

mod loader;

pub use loader::parse_catalog;

use crate::model::Song;
use anyhow::Result;
use std::path::Path;

/// All songs available to the session, in catalog-file order
#[derive(Debug)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// Load a catalog from the tab-delimited file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let songs = parse_catalog(path)?;
        Ok(Self { songs })
    }

    /// Build a catalog from songs that already carry their positional ids
    ///
    /// Song `id` fields are expected to equal 1-based positions, as the
    /// loader assigns them.
    pub fn from_songs(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Number of songs available
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the catalog holds no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Get a song by id, valid for `1 <= id <= len()`
    pub fn get(&self, id: u32) -> Option<&Song> {
        let idx = id.checked_sub(1)? as usize;
        self.songs.get(idx)
    }

    /// Songs with ids from `first` to `last` inclusive
    ///
    /// `first` below 1 and `last` beyond the catalog are clamped; an
    /// inverted range after clamping yields an empty slice.
    pub fn songs_in_range(&self, first: i64, last: i64) -> &[Song] {
        let first = first.max(1) as usize;
        let last = last.clamp(0, self.songs.len() as i64) as usize;
        if first > last {
            return &[];
        }
        &self.songs[first - 1..last]
    }

    /// Songs whose artist contains `key`, case-insensitively
    pub fn search_by_artist(&self, key: &str) -> Vec<&Song> {
        let key = key.to_lowercase();
        self.songs
            .iter()
            .filter(|s| s.artist.to_lowercase().contains(&key))
            .collect()
    }

    /// Songs whose title contains `key`, case-insensitively
    pub fn search_by_title(&self, key: &str) -> Vec<&Song> {
        let key = key.to_lowercase();
        self.songs
            .iter()
            .filter(|s| s.title.to_lowercase().contains(&key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: u32, title: &str, artist: &str) -> Song {
        Song {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            album: "Album".to_string(),
            genre: "Pop".to_string(),
            size: 1000,
            duration_secs: 180,
            year: 2012,
            comments: "None".to_string(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_songs(vec![
            song(1, "One More Time", "Daft Punk"),
            song(2, "Fix You", "Coldplay"),
            song(3, "Digital Love", "Daft Punk"),
        ])
    }

    #[test]
    fn get_is_one_based_and_range_checked() {
        let cat = catalog();
        assert_eq!(cat.get(1).unwrap().title, "One More Time");
        assert_eq!(cat.get(3).unwrap().title, "Digital Love");
        assert!(cat.get(0).is_none());
        assert!(cat.get(4).is_none());
    }

    #[test]
    fn range_listing_clamps_bounds() {
        let cat = catalog();
        let all: Vec<u32> = cat.songs_in_range(-3, 99).iter().map(|s| s.id).collect();
        assert_eq!(all, vec![1, 2, 3]);

        let middle: Vec<u32> = cat.songs_in_range(2, 2).iter().map(|s| s.id).collect();
        assert_eq!(middle, vec![2]);

        assert!(cat.songs_in_range(3, 1).is_empty());
    }

    #[test]
    fn artist_search_is_case_insensitive_substring() {
        let cat = catalog();
        let hits = cat.search_by_artist("daft");
        assert_eq!(hits.len(), 2);
        assert!(cat.search_by_artist("COLD").len() == 1);
        assert!(cat.search_by_artist("nobody").is_empty());
    }

    #[test]
    fn title_search_is_case_insensitive_substring() {
        let cat = catalog();
        assert_eq!(cat.search_by_title("LOVE").len(), 1);
        assert_eq!(cat.search_by_title("o").len(), 3);
        assert!(cat.search_by_title("zzz").is_empty());
    }
}
