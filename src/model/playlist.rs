use super::duration::format_duration;
use super::song::{Song, SongId, SongRecord};
use crate::error::{DurationOverflow, Error};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(Uuid);

impl PlaylistId {
    /// Generate a new random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlaylistId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Represents a playlist
///
/// Entries are kept in insertion order and may repeat. The total duration is
/// updated on every add/remove rather than recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    id: PlaylistId,

    /// Playlist name
    pub name: String,

    songs: Vec<Song>,

    duration: TimeDelta,
}

/// Serialized form of a playlist, as stored in the library file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlaylistId>,

    pub name: String,

    /// Full song records, in playlist order
    pub songs: Vec<SongRecord>,

    /// Informational only, recomputed on load
    pub duration: String,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(PlaylistId::new(), name)
    }

    fn with_id(id: PlaylistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            songs: Vec::new(),
            duration: TimeDelta::zero(),
        }
    }

    pub fn id(&self) -> PlaylistId {
        self.id
    }

    /// Songs in playlist order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Sum of all entry durations
    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// Number of entries in this playlist
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Whether any entry refers to the given song
    pub fn contains(&self, song_id: SongId) -> bool {
        self.songs.iter().any(|s| s.id() == song_id)
    }

    /// Append a song to the end of the playlist
    ///
    /// Fails, leaving the playlist untouched, if the total would overflow.
    pub fn add_song(&mut self, song: Song) -> Result<(), DurationOverflow> {
        self.duration = self
            .duration
            .checked_add(&song.duration)
            .ok_or(DurationOverflow)?;
        self.songs.push(song);
        Ok(())
    }

    /// Remove the first entry referring to `song_id`
    ///
    /// Returns false and leaves the playlist untouched if there is none.
    pub fn remove_song(&mut self, song_id: SongId) -> Result<bool, DurationOverflow> {
        let Some(index) = self.songs.iter().position(|s| s.id() == song_id) else {
            return Ok(false);
        };

        self.duration = self
            .duration
            .checked_sub(&self.songs[index].duration)
            .ok_or(DurationOverflow)?;
        self.songs.remove(index);
        Ok(true)
    }

    pub fn to_record(&self) -> PlaylistRecord {
        PlaylistRecord {
            id: Some(self.id),
            name: self.name.clone(),
            songs: self.songs.iter().map(Song::to_record).collect(),
            duration: format_duration(self.duration),
        }
    }

    /// Rebuild a playlist, creating a fresh song for every entry
    pub fn from_record(record: PlaylistRecord) -> Result<Self, Error> {
        Self::from_record_with(record, |entry| Ok(Song::from_record(entry)?))
    }

    /// Rebuild a playlist, turning each entry into a song with `resolve`
    ///
    /// Entries are added one by one, so the stored duration is ignored.
    pub fn from_record_with<E, F>(record: PlaylistRecord, mut resolve: F) -> Result<Self, E>
    where
        E: From<DurationOverflow>,
        F: FnMut(SongRecord) -> Result<Song, E>,
    {
        let mut playlist = Self::with_id(record.id.unwrap_or_default(), record.name);

        for entry in record.songs {
            playlist.add_song(resolve(entry)?)?;
        }

        Ok(playlist)
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} songs, {})",
            self.name,
            self.len(),
            format_duration(self.duration)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_duration;

    fn sample_song() -> Song {
        Song::new("Test Song", "Test Artist", TimeDelta::seconds(210))
    }

    #[test]
    fn test_playlist_creation() {
        let playlist = Playlist::new("Test Playlist");
        assert_eq!(playlist.name, "Test Playlist");
        assert!(playlist.is_empty());
        assert_eq!(playlist.duration(), TimeDelta::zero());
    }

    #[test]
    fn test_playlist_add_remove_song() {
        let mut playlist = Playlist::new("Test Playlist");
        let song = sample_song();

        playlist.add_song(song.clone()).unwrap();
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.duration(), song.duration);

        assert!(playlist.remove_song(song.id()).unwrap());
        assert!(playlist.is_empty());
        assert_eq!(playlist.duration(), TimeDelta::zero());
    }

    #[test]
    fn test_duplicate_song_counted_twice() {
        let mut playlist = Playlist::new("Repeat");
        let song = sample_song();

        playlist.add_song(song.clone()).unwrap();
        playlist.add_song(song.clone()).unwrap();
        assert_eq!(playlist.duration(), TimeDelta::seconds(420));

        playlist.remove_song(song.id()).unwrap();
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.duration(), TimeDelta::seconds(210));
    }

    #[test]
    fn test_remove_takes_first_occurrence() {
        let mut playlist = Playlist::new("Order");
        let a = sample_song();
        let b = Song::new("Other", "Other Artist", TimeDelta::seconds(60));

        playlist.add_song(a.clone()).unwrap();
        playlist.add_song(b.clone()).unwrap();
        playlist.add_song(a.clone()).unwrap();

        playlist.remove_song(a.id()).unwrap();
        let ids: Vec<_> = playlist.songs().iter().map(Song::id).collect();
        assert_eq!(ids, vec![b.id(), a.id()]);
    }

    #[test]
    fn test_remove_matches_identity_not_metadata() {
        let mut playlist = Playlist::new("Lookalikes");
        let original = sample_song();
        let lookalike = sample_song();

        playlist.add_song(original.clone()).unwrap();
        assert!(!playlist.remove_song(lookalike.id()).unwrap());
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.duration(), TimeDelta::seconds(210));
    }

    #[test]
    fn test_playlist_to_record() {
        let mut playlist = Playlist::new("Test Playlist");
        let song = sample_song();
        playlist.add_song(song.clone()).unwrap();

        let record = playlist.to_record();
        assert_eq!(record.id, Some(playlist.id()));
        assert_eq!(record.name, "Test Playlist");
        assert_eq!(record.songs, vec![song.to_record()]);
        assert_eq!(record.duration, "0:03:30");
    }

    #[test]
    fn test_playlist_from_record() {
        let record: PlaylistRecord = serde_json::from_str(
            r#"{
                "name": "Dict Playlist",
                "songs": [
                    {"name": "Dict Song", "artist": "Dict Artist", "duration": "0:04:15"}
                ],
                "duration": "0:04:15"
            }"#,
        )
        .unwrap();

        let playlist = Playlist::from_record(record).unwrap();
        assert_eq!(playlist.name, "Dict Playlist");
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.songs()[0].name, "Dict Song");
        assert_eq!(playlist.duration(), TimeDelta::seconds(255));
    }

    #[test]
    fn test_from_record_ignores_stored_duration() {
        let record = PlaylistRecord {
            id: None,
            name: "Stale".to_string(),
            songs: vec![sample_song().to_record(), sample_song().to_record()],
            duration: "9:99:99".to_string(),
        };

        let playlist = Playlist::from_record(record).unwrap();
        assert_eq!(playlist.duration(), TimeDelta::seconds(420));
    }

    #[test]
    fn test_from_record_propagates_bad_entry() {
        let mut entry = sample_song().to_record();
        entry.duration = "nope".to_string();
        let record = PlaylistRecord {
            id: None,
            name: "Broken".to_string(),
            songs: vec![entry],
            duration: "0:00:00".to_string(),
        };

        assert!(Playlist::from_record(record).is_err());
    }

    #[test]
    fn test_add_song_overflow_leaves_playlist_untouched() {
        let long = parse_duration("2000000000000:00:00").unwrap();
        let song = Song::new("Endless", "Drone Artist", long);
        let mut playlist = Playlist::new("Too Long");

        playlist.add_song(song.clone()).unwrap();
        assert_eq!(playlist.add_song(song), Err(DurationOverflow));
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.duration(), long);
    }

    #[test]
    fn test_from_record_overflow_is_error() {
        let entry = Song::new("Endless", "Drone Artist", TimeDelta::zero()).to_record();
        let entry = SongRecord {
            duration: "2000000000000:00:00".to_string(),
            ..entry
        };
        let record = PlaylistRecord {
            id: None,
            name: "Too Long".to_string(),
            songs: vec![entry.clone(), entry],
            duration: "0:00:00".to_string(),
        };

        let err = Playlist::from_record(record).unwrap_err();
        assert!(matches!(err, Error::Overflow(DurationOverflow)));
    }

    #[test]
    fn test_playlist_display() {
        let mut playlist = Playlist::new("Road Trip");
        playlist.add_song(sample_song()).unwrap();
        assert_eq!(playlist.to_string(), "Road Trip (1 songs, 0:03:30)");
    }
}
