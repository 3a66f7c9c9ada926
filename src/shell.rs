//! Interactive text menu over a `MusicManager`
//!
//! Generic over its input and output so it can be driven from stdin/stdout
//! or from in-memory buffers.

use crate::manager::MusicManager;
use crate::model::parse_minutes_seconds;
use anyhow::Result;
use std::io::{BufRead, Write};

const MENU: &str = "\n--- Music Manager ---
1. Create Song
2. Delete Song
3. Create Playlist
4. Delete Playlist
5. Add Song to Playlist
6. View Songs
7. View Playlists
8. Exit";

/// What the menu loop does after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Numbered menu reading choices from `R` and printing to `W`
pub struct Shell<'a, R, W> {
    manager: &'a mut MusicManager,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(manager: &'a mut MusicManager, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or input ends
    ///
    /// Library load/save failures abort the loop and are returned.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to Music Manager!")?;

        loop {
            writeln!(self.output, "{}", MENU)?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.create_song()?,
                "2" => self.delete_song()?,
                "3" => self.create_playlist()?,
                "4" => self.delete_playlist()?,
                "5" => self.add_song_to_playlist()?,
                "6" => {
                    self.print_songs()?;
                    Flow::Continue
                }
                "7" => {
                    self.print_playlists()?;
                    Flow::Continue
                }
                "8" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.output, "Thank you for using Music Manager. Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn create_song(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter song name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(artist) = self.prompt("Enter artist name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(duration) = self.prompt("Enter duration (MM:SS): ")? else {
            return Ok(Flow::Exit);
        };

        let duration = match parse_minutes_seconds(&duration) {
            Ok(duration) => duration,
            Err(e) => {
                log::debug!("Rejected song duration: {}", e);
                writeln!(self.output, "Invalid duration format. Use MM:SS.")?;
                return Ok(Flow::Continue);
            }
        };

        self.manager.create_song(name, artist, duration)?;
        writeln!(self.output, "Song created successfully.")?;
        Ok(Flow::Continue)
    }

    fn delete_song(&mut self) -> Result<Flow> {
        self.print_songs()?;
        let Some(answer) = self.prompt("Enter the number of the song to delete: ")? else {
            return Ok(Flow::Exit);
        };

        match parse_index(&answer, self.manager.songs().len()) {
            Some(index) => {
                let id = self.manager.songs()[index].id();
                self.manager.delete_song(id)?;
                writeln!(self.output, "Song deleted successfully.")?;
            }
            None => writeln!(self.output, "Invalid song number.")?,
        }
        Ok(Flow::Continue)
    }

    fn create_playlist(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter playlist name: ")? else {
            return Ok(Flow::Exit);
        };

        self.manager.create_playlist(name)?;
        writeln!(self.output, "Playlist created successfully.")?;
        Ok(Flow::Continue)
    }

    fn delete_playlist(&mut self) -> Result<Flow> {
        self.print_playlists()?;
        let Some(answer) = self.prompt("Enter the number of the playlist to delete: ")? else {
            return Ok(Flow::Exit);
        };

        match parse_index(&answer, self.manager.playlists().len()) {
            Some(index) => {
                let id = self.manager.playlists()[index].id();
                self.manager.delete_playlist(id)?;
                writeln!(self.output, "Playlist deleted successfully.")?;
            }
            None => writeln!(self.output, "Invalid playlist number.")?,
        }
        Ok(Flow::Continue)
    }

    fn add_song_to_playlist(&mut self) -> Result<Flow> {
        self.print_songs()?;
        let Some(song_answer) = self.prompt("Enter the number of the song to add: ")? else {
            return Ok(Flow::Exit);
        };
        self.print_playlists()?;
        let Some(playlist_answer) =
            self.prompt("Enter the number of the playlist to add to: ")?
        else {
            return Ok(Flow::Exit);
        };

        let song = parse_index(&song_answer, self.manager.songs().len());
        let playlist = parse_index(&playlist_answer, self.manager.playlists().len());

        let (Some(song), Some(playlist)) = (song, playlist) else {
            writeln!(self.output, "Invalid song or playlist number.")?;
            return Ok(Flow::Continue);
        };

        let song_id = self.manager.songs()[song].id();
        let playlist_id = self.manager.playlists()[playlist].id();

        if self.manager.add_song_to_playlist(song_id, playlist_id)? {
            writeln!(self.output, "Song added to playlist successfully.")?;
        } else {
            writeln!(self.output, "Failed to add song to playlist.")?;
        }
        Ok(Flow::Continue)
    }

    fn print_songs(&mut self) -> Result<()> {
        for (i, song) in self.manager.songs().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, song)?;
        }
        Ok(())
    }

    fn print_playlists(&mut self) -> Result<()> {
        for (i, playlist) in self.manager.playlists().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, playlist)?;
        }
        Ok(())
    }

    /// Print `message` and read one line, without its line ending
    ///
    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Convert a 1-based answer into an index below `len`
fn parse_index(answer: &str, len: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}
