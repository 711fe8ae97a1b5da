//! Jukebox - console music library and playlist organizer
//!
//! Loads a tab-delimited song catalog into memory and drives an
//! interactive menu for browsing the catalog and building named playlists
//! that can be saved to a flat text file.

pub mod catalog;
pub mod menu;
pub mod model;

pub use catalog::Catalog;
pub use menu::Menu;
pub use model::{Playlist, PlaylistDirectory, Song};
