//! Interactive command loop
//!
//! Two-level menu over the catalog and the playlist directory: a top-level
//! menu for managing playlists as a whole and a modification mode bound to
//! one playlist for editing its songs. The loop owns no state beyond the
//! currently edited playlist position; every command is parsed, validated
//! and dispatched to the core, and every failure turns into a message and a
//! fresh prompt.
//!
//! Input and both output streams are injected so sessions can be scripted
//! in tests.

use crate::catalog::Catalog;
use crate::model::{PlaylistDirectory, PlaylistError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Where the loop goes after handling one command
enum Mode {
    /// Top-level menu
    Main,
    /// Playlist modification mode, editing the playlist at this position.
    /// The position is chosen on entry and never revalidated mid-mode; only
    /// returning to the main menu can change it.
    Modify(usize),
    /// Leave the loop
    Quit,
}

/// One parsed input line: a lowercased command word and up to two keys
struct Command {
    cmd: String,
    key1: String,
    key2: String,
}

impl Command {
    /// True when the user typed only the command word
    fn is_bare(&self) -> bool {
        self.key1.is_empty() && self.key2.is_empty()
    }

    /// Playlist and file names may contain spaces, so rejoin the keys
    fn name_arg(&self) -> String {
        if self.key2.is_empty() {
            self.key1.clone()
        } else {
            format!("{} {}", self.key1, self.key2)
        }
    }
}

/// The interactive menu session
pub struct Menu<'a, R, W, E> {
    catalog: &'a Catalog,
    directory: &'a mut PlaylistDirectory,
    input: R,
    out: W,
    err: E,
}

impl<'a, R: BufRead, W: Write, E: Write> Menu<'a, R, W, E> {
    /// Create a session over the given catalog, directory and streams
    pub fn new(
        catalog: &'a Catalog,
        directory: &'a mut PlaylistDirectory,
        input: R,
        out: W,
        err: E,
    ) -> Self {
        Self {
            catalog,
            directory,
            input,
            out,
            err,
        }
    }

    /// Run the session until the user quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        let mut mode = Mode::Main;
        loop {
            mode = match mode {
                Mode::Main => self.main_menu()?,
                Mode::Modify(pid) => self.modify_menu(pid)?,
                Mode::Quit => return Ok(()),
            };
        }
    }

    /// Read one input line and split it into command word and keys
    ///
    /// The command word is lowercased so commands are case-insensitive; the
    /// second key keeps its remaining spaces. Returns None at end of input.
    fn read_command(&mut self) -> io::Result<Option<Command>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.trim_end_matches(['\r', '\n']);
        let mut parts = line.splitn(3, ' ');
        let cmd = parts.next().unwrap_or("").to_lowercase();
        let key1 = parts.next().unwrap_or("").to_string();
        let key2 = parts.next().unwrap_or("").to_string();
        Ok(Some(Command { cmd, key1, key2 }))
    }

    /// Parse a user-supplied integer argument, reporting failures
    fn parse_int(&mut self, text: &str) -> io::Result<Option<i64>> {
        match text.parse::<i64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(
                    self.err,
                    "Sorry, there was an error with your command. Please check that you are entering an integer and try again.\n"
                )?;
                Ok(None)
            }
        }
    }

    /// Check `sid` identifies a song in the catalog, reporting failures
    fn is_valid_song_id(&mut self, sid: i64) -> io::Result<bool> {
        if sid <= 0 || sid > self.catalog.len() as i64 {
            writeln!(self.err, "ERROR: Invalid Song ID. Please try again.\n")?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Show the top-level menu, read one command and dispatch it
    fn main_menu(&mut self) -> io::Result<Mode> {
        writeln!(self.out)?;
        writeln!(self.out, "******************************************************")?;
        writeln!(self.out, "USER MENU: ")?;
        writeln!(self.out, "******************************************************")?;
        writeln!(self.out, "[L/l]             List the names of all the playlists")?;
        writeln!(self.out, "[V/v] <playlist>  View a playlist")?;
        writeln!(self.out, "[C/c] <playlist>  Create a new playlist")?;
        writeln!(self.out, "[M/m] <playlist>  Modify a playlist")?;
        writeln!(self.out, "[D/d] <playlist>  Delete an existing playlist")?;
        writeln!(self.out, "[S/s] <filename>  Save all the playlists")?;
        writeln!(self.out, "[H/h]             Help")?;
        writeln!(self.out, "[Q/q]             Exit")?;
        writeln!(self.out)?;
        write!(self.out, "ENTER COMMAND: ")?;
        self.out.flush()?;

        let Some(command) = self.read_command()? else {
            return Ok(Mode::Quit);
        };

        if command.is_bare() {
            return self.handle_bare_main_command(&command);
        }
        self.handle_named_main_command(&command)
    }

    /// Commands that take no argument: list, help, quit
    fn handle_bare_main_command(&mut self, command: &Command) -> io::Result<Mode> {
        match command.cmd.as_str() {
            "l" => {
                write!(self.out, "{}", self.directory)?;
                writeln!(self.out)?;
                Ok(Mode::Main)
            }
            "h" => {
                self.print_help()?;
                Ok(Mode::Main)
            }
            "q" => {
                writeln!(self.out, "Exiting the program. Good bye!")?;
                Ok(Mode::Quit)
            }
            _ => {
                writeln!(self.err, "Invalid command.\nPlease try again.")?;
                Ok(Mode::Main)
            }
        }
    }

    /// Commands addressing a playlist or file by name
    fn handle_named_main_command(&mut self, command: &Command) -> io::Result<Mode> {
        let name = command.name_arg();
        let pid = self.directory.find_by_name(&name);

        match command.cmd.as_str() {
            "v" => {
                match pid {
                    Some(pid) => {
                        write!(self.out, "{}", self.directory.playlist(pid))?;
                        writeln!(self.out)?;
                    }
                    None => self.report_missing_playlist(&name)?,
                }
                Ok(Mode::Main)
            }
            "c" => match pid {
                Some(_) => {
                    writeln!(
                        self.err,
                        "Sorry, the playlist '{}' already exists.\nPlaylist names are not case sensitive. Please try again.\n",
                        name
                    )?;
                    Ok(Mode::Main)
                }
                None => {
                    self.directory.create(name);
                    log::debug!("Created playlist #{}", self.directory.len());
                    Ok(Mode::Modify(self.directory.len() - 1))
                }
            },
            "m" => match pid {
                Some(pid) => Ok(Mode::Modify(pid)),
                None => {
                    self.report_missing_playlist(&name)?;
                    Ok(Mode::Main)
                }
            },
            "d" => {
                match pid {
                    Some(pid) => {
                        if self.directory.delete(pid) {
                            writeln!(self.out, "Your playlist '{}' was deleted.\n", name)?;
                        } else {
                            writeln!(self.err, "There was an error deleting your playlist.")?;
                        }
                    }
                    None => self.report_missing_playlist(&name)?,
                }
                Ok(Mode::Main)
            }
            "s" => {
                let path = PathBuf::from(shellexpand::tilde(&name).as_ref());
                match self.directory.save(&path) {
                    Ok(()) => writeln!(
                        self.out,
                        "Success. Your playlists were saved to {}.\n",
                        name
                    )?,
                    Err(e) => {
                        log::warn!("Saving playlists to {:?} failed: {}", path, e);
                        writeln!(
                            self.err,
                            "ERROR: Could not save to file. Please check your file name and try again.\n"
                        )?;
                    }
                }
                Ok(Mode::Main)
            }
            _ => {
                writeln!(
                    self.err,
                    "Sorry, I did not understand that command.\nPlease try again."
                )?;
                Ok(Mode::Main)
            }
        }
    }

    fn report_missing_playlist(&mut self, name: &str) -> io::Result<()> {
        writeln!(
            self.err,
            "Sorry, the playlist '{}' doesn't exist.\nPlease try again.\n",
            name
        )
    }

    /// Show the modification-mode menu, read one command and dispatch it
    fn modify_menu(&mut self, pid: usize) -> io::Result<Mode> {
        writeln!(self.out)?;
        writeln!(self.out, "******************************************************")?;
        writeln!(self.out, "PLAYLIST MODIFICATION MODE: ")?;
        writeln!(self.out, "******************************************************")?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            ">> You are editing playlist '{}'.",
            self.directory.name(pid)
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "[L/l] <first> <last>   List songs from database from first to last")?;
        writeln!(self.out, "[A/a] <artist_key>     List all songs whose artist contains artist_key as a substring")?;
        writeln!(self.out, "[T/t] <title_key>      List all songs whose title contains title_key as a substring")?;
        writeln!(self.out, "Insert <songid> <pos>  Insert the songid into playlist at position <pos>")?;
        writeln!(self.out, "Delete <songid>        Delete songid from playlist")?;
        writeln!(self.out, "Show                   Display songs in the playlist")?;
        writeln!(self.out, "[B/b]                  Return to top level user menu")?;
        writeln!(self.out)?;
        write!(self.out, "ENTER COMMAND: ")?;
        self.out.flush()?;

        let Some(command) = self.read_command()? else {
            return Ok(Mode::Quit);
        };

        match command.cmd.as_str() {
            "l" => self.list_songs(&command)?,
            "a" => self.search_by_artist(&command.key1)?,
            "t" => self.search_by_title(&command.key1)?,
            "insert" => self.insert_song(pid, &command)?,
            "delete" => self.delete_song(pid, &command)?,
            "show" => {
                write!(self.out, "{}", self.directory.playlist(pid))?;
                writeln!(self.out)?;
            }
            "b" => return Ok(Mode::Main),
            _ => {
                writeln!(
                    self.err,
                    "Sorry, I did not understand that command.\nPlease try again.\n"
                )?;
            }
        }
        Ok(Mode::Modify(pid))
    }

    /// `l <first> <last>`: list a clamped id range of the catalog
    fn list_songs(&mut self, command: &Command) -> io::Result<()> {
        let Some(first) = self.parse_int(&command.key1)? else {
            return Ok(());
        };
        let Some(last) = self.parse_int(&command.key2)? else {
            return Ok(());
        };

        if first > last {
            writeln!(
                self.err,
                "ERROR: Out of Range.\nPlease check your input values for first and/or last and try again.\n"
            )?;
            return Ok(());
        }
        if first > self.catalog.len() as i64 {
            writeln!(
                self.err,
                "ERROR: Invalid Song ID.\nPlease check your input value for first and try again.\n"
            )?;
            return Ok(());
        }

        for song in self.catalog.songs_in_range(first, last) {
            writeln!(self.out, "{}", song)?;
        }
        Ok(())
    }

    /// `a <key>`: substring search over artists
    fn search_by_artist(&mut self, key: &str) -> io::Result<()> {
        let hits = self.catalog.search_by_artist(key);
        for song in &hits {
            writeln!(self.out, "{}", song)?;
        }
        if hits.is_empty() {
            writeln!(
                self.out,
                "There were no songs with '{}' as the artist.",
                key
            )?;
        }
        Ok(())
    }

    /// `t <key>`: substring search over titles
    fn search_by_title(&mut self, key: &str) -> io::Result<()> {
        let hits = self.catalog.search_by_title(key);
        for song in &hits {
            writeln!(self.out, "{}", song)?;
        }
        if hits.is_empty() {
            writeln!(self.out, "There were no songs with '{}' in the title.", key)?;
        }
        Ok(())
    }

    /// `insert <songid> <pos>`: copy a catalog song into the playlist
    fn insert_song(&mut self, pid: usize, command: &Command) -> io::Result<()> {
        let Some(sid) = self.parse_int(&command.key1)? else {
            return Ok(());
        };
        let Some(pos) = self.parse_int(&command.key2)? else {
            return Ok(());
        };
        if !self.is_valid_song_id(sid)? {
            return Ok(());
        }

        // Valid id, so the lookup cannot miss
        let Some(song) = self.catalog.get(sid as u32).cloned() else {
            return Ok(());
        };
        let title = song.title.clone();

        if !self.directory.insert_song(pid, song, pos) {
            writeln!(
                self.err,
                "There was an error inserting your song '{}' into the playlist.\nPlease try again.\n",
                title
            )?;
            return Ok(());
        }

        write!(
            self.out,
            "Success! Your song '{}' was inserted into playlist '{}'",
            title,
            self.directory.name(pid)
        )?;
        // The playlist already grew, so compare against the post-insert size
        if pos <= 1 {
            writeln!(self.out, " at the beginning of the list.\n")?;
        } else if pos > self.directory.playlist_len(pid) as i64 {
            writeln!(self.out, " at the end of the list.\n")?;
        } else {
            writeln!(self.out, " at position {}.\n", pos)?;
        }
        Ok(())
    }

    /// `delete <songid>`: remove every copy of a song from the playlist
    fn delete_song(&mut self, pid: usize, command: &Command) -> io::Result<()> {
        let Some(sid) = self.parse_int(&command.key1)? else {
            return Ok(());
        };
        if !self.is_valid_song_id(sid)? {
            return Ok(());
        }

        let title = self
            .catalog
            .get(sid as u32)
            .map(|s| s.title.clone())
            .unwrap_or_default();

        match self.directory.delete_song(pid, sid as u32) {
            Err(PlaylistError::Empty) => {
                writeln!(self.err, "Your playlist is empty. No deletions were made.\n")?;
            }
            Ok(0) => {
                writeln!(
                    self.err,
                    "Your playlist does not contain the song '{}'. No deletions were made.\n",
                    title
                )?;
            }
            Ok(_) => {
                writeln!(
                    self.out,
                    "Success! All instances of your song '{}' were deleted from playlist '{}'.\n",
                    title,
                    self.directory.name(pid)
                )?;
            }
        }
        Ok(())
    }

    /// `h`: the expanded command reference
    fn print_help(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=======================================================================")?;
        writeln!(self.out, "         HELP MENU")?;
        writeln!(self.out, "=======================================================================")?;
        writeln!(self.out)?;
        writeln!(self.out, "To enter a command, enter a single letter followed by the name of a")?;
        writeln!(self.out, "playlist or file name. Playlist and file names may contain spaces.")?;
        writeln!(self.out)?;
        writeln!(self.out, "MAIN USER MENU COMMANDS")?;
        writeln!(self.out)?;
        writeln!(self.out, "[L/l]             List each playlist and the number of songs in it.")?;
        writeln!(self.out, "[V/v] <playlist>  View the songs in the playlist named <playlist>.")?;
        writeln!(self.out, "                  Playlist names are NOT case sensitive.")?;
        writeln!(self.out, "[C/c] <playlist>  Create a new playlist named <playlist> and enter")?;
        writeln!(self.out, "                  playlist modification mode to edit it.")?;
        writeln!(self.out, "[M/m] <playlist>  Modify an existing playlist named <playlist>.")?;
        writeln!(self.out, "[D/d] <playlist>  Delete the playlist named <playlist>.")?;
        writeln!(self.out, "[S/s] <filename>  Save all your playlists to a file named <filename>.")?;
        writeln!(self.out, "[H/h]             Display this help menu.")?;
        writeln!(self.out, "[Q/q]             Exit the program.")?;
        writeln!(self.out)?;
        writeln!(self.out, "PLAYLIST MODIFICATION MODE COMMANDS")?;
        writeln!(self.out)?;
        writeln!(self.out, "[L/l] <first> <last>   List catalog songs from song ID <first> to <last>.")?;
        writeln!(self.out, "[A/a] <artist_key>     List songs whose artist contains <artist_key>.")?;
        writeln!(self.out, "[T/t] <title_key>      List songs whose title contains <title_key>.")?;
        writeln!(self.out, "Insert <songid> <pos>  Insert song <songid> at position <pos>.")?;
        writeln!(self.out, "Delete <songid>        Delete every copy of song <songid>. If your song")?;
        writeln!(self.out, "                       appears more than once, it is deleted everywhere.")?;
        writeln!(self.out, "Show                   Display all the songs in your playlist.")?;
        writeln!(self.out, "[B/b]                  Return to the main menu.")?;
        writeln!(self.out)?;
        Ok(())
    }
}
