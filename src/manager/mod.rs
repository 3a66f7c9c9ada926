//! Song and playlist ownership with whole-file persistence
//!
//! `MusicManager` keeps every song and playlist in memory, in insertion
//! order, and rewrites the library file after each effective mutation.

pub mod config;
mod store;

pub use config::{ManagerConfig, DEFAULT_DATA_FILE};
pub use store::{read_document, write_document, LibraryDocument};

use crate::error::Result;
use crate::model::{Playlist, PlaylistId, Song, SongId, SongRecord};
use chrono::TimeDelta;
use std::path::{Path, PathBuf};

/// Owner of all songs and playlists in a library file
#[derive(Debug)]
pub struct MusicManager {
    songs: Vec<Song>,
    playlists: Vec<Playlist>,
    path: PathBuf,
}

impl MusicManager {
    /// Open the library stored at `path`
    ///
    /// A missing file yields an empty library; it is only created on the
    /// first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut manager = Self {
            songs: Vec::new(),
            playlists: Vec::new(),
            path: path.into(),
        };
        manager.load_from_file()?;
        Ok(manager)
    }

    /// Open the library named by a configuration
    pub fn from_config(config: &ManagerConfig) -> Result<Self> {
        Self::open(config.data_path.clone())
    }

    /// Path of the backing library file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All songs, in creation order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// All playlists, in creation order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn song(&self, id: SongId) -> Option<&Song> {
        self.songs.iter().find(|s| s.id() == id)
    }

    pub fn playlist(&self, id: PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id() == id)
    }

    /// Create a song and add it to the library
    pub fn create_song(
        &mut self,
        name: impl Into<String>,
        artist: impl Into<String>,
        duration: TimeDelta,
    ) -> Result<Song> {
        let song = Song::new(name, artist, duration);
        log::info!("Created song {:?} by {:?} ({})", song.name, song.artist, song.id());

        self.songs.push(song.clone());
        self.save_to_file()?;
        Ok(song)
    }

    /// Delete a song and remove it from every playlist
    ///
    /// Each playlist loses its first entry for the song. Returns false
    /// without touching the file if the song is unknown. A duration overflow
    /// in one playlist aborts the cascade before the file is written.
    pub fn delete_song(&mut self, id: SongId) -> Result<bool> {
        let Some(index) = self.songs.iter().position(|s| s.id() == id) else {
            log::debug!("delete_song: no song {}", id);
            return Ok(false);
        };

        let song = self.songs.remove(index);
        let mut affected = 0;
        for playlist in &mut self.playlists {
            if playlist.remove_song(id)? {
                affected += 1;
            }
        }

        log::info!(
            "Deleted song {:?} ({}), removed from {} playlist(s)",
            song.name,
            id,
            affected
        );

        self.save_to_file()?;
        Ok(true)
    }

    /// Create an empty playlist
    pub fn create_playlist(&mut self, name: impl Into<String>) -> Result<Playlist> {
        let playlist = Playlist::new(name);
        log::info!("Created playlist {:?} ({})", playlist.name, playlist.id());

        self.playlists.push(playlist.clone());
        self.save_to_file()?;
        Ok(playlist)
    }

    /// Delete a playlist; its songs stay in the library
    pub fn delete_playlist(&mut self, id: PlaylistId) -> Result<bool> {
        let Some(index) = self.playlists.iter().position(|p| p.id() == id) else {
            log::debug!("delete_playlist: no playlist {}", id);
            return Ok(false);
        };

        let playlist = self.playlists.remove(index);
        log::info!("Deleted playlist {:?} ({})", playlist.name, id);

        self.save_to_file()?;
        Ok(true)
    }

    /// Append a library song to a library playlist
    ///
    /// Returns false, with no mutation and no write, unless both ids are
    /// known to this manager. Fails without mutating if the playlist's total
    /// duration would overflow.
    pub fn add_song_to_playlist(
        &mut self,
        song_id: SongId,
        playlist_id: PlaylistId,
    ) -> Result<bool> {
        let Some(song) = self.song(song_id).cloned() else {
            log::debug!("add_song_to_playlist: no song {}", song_id);
            return Ok(false);
        };
        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id() == playlist_id) else {
            log::debug!("add_song_to_playlist: no playlist {}", playlist_id);
            return Ok(false);
        };

        log::info!("Adding {:?} to playlist {:?}", song.name, playlist.name);
        playlist.add_song(song)?;

        self.save_to_file()?;
        Ok(true)
    }

    /// Write the whole library to the backing file
    pub fn save_to_file(&self) -> Result<()> {
        let document = LibraryDocument {
            songs: self.songs.iter().map(Song::to_record).collect(),
            playlists: self.playlists.iter().map(Playlist::to_record).collect(),
        };

        write_document(&self.path, &document)?;
        log::debug!(
            "Saved {} songs, {} playlists to {:?}",
            document.songs.len(),
            document.playlists.len(),
            self.path
        );
        Ok(())
    }

    /// Replace the in-memory library with the contents of the backing file
    ///
    /// Songs are rebuilt first, then playlists, whose entries are linked back
    /// to the rebuilt songs. On error the current state is left unchanged.
    pub fn load_from_file(&mut self) -> Result<()> {
        let Some(document) = read_document(&self.path)? else {
            log::debug!("No library file at {:?}, starting empty", self.path);
            self.songs.clear();
            self.playlists.clear();
            return Ok(());
        };

        let songs = document
            .songs
            .into_iter()
            .map(Song::from_record)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let playlists = document
            .playlists
            .into_iter()
            .map(|record| {
                let name = record.name.clone();
                Playlist::from_record_with(record, |entry| link_entry(&songs, &name, entry))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        log::debug!(
            "Loaded {} songs, {} playlists from {:?}",
            songs.len(),
            playlists.len(),
            self.path
        );

        self.songs = songs;
        self.playlists = playlists;
        Ok(())
    }
}

/// Resolve a stored playlist entry against the library's songs
///
/// Entries with a known id become the library song. Entries without an id
/// are matched on metadata. Anything left over is kept as a detached song.
fn link_entry(songs: &[Song], playlist: &str, entry: SongRecord) -> Result<Song> {
    let linked = match entry.id {
        Some(id) => songs.iter().find(|s| s.id() == id),
        None => songs.iter().find(|s| s.same_metadata(&entry)),
    };

    if let Some(song) = linked {
        return Ok(song.clone());
    }

    if let Some(id) = entry.id {
        log::warn!(
            "Playlist {:?} refers to song {} ({:?}) which is not in the library",
            playlist,
            id,
            entry.name
        );
    }
    Ok(Song::from_record(entry)?)
}
