use super::duration::{format_duration, parse_duration};
use crate::error::FormatError;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(Uuid);

impl SongId {
    /// Generate a new random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SongId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A single track in the library
///
/// Songs are immutable once created; two songs with identical metadata are
/// still distinct entities with distinct ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    id: SongId,

    /// Track title
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Track length, second resolution
    pub duration: TimeDelta,
}

/// Serialized form of a song, as stored in the library file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Missing in files written before ids were introduced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SongId>,

    pub name: String,

    pub artist: String,

    /// `H:MM:SS`
    pub duration: String,
}

impl Song {
    /// Create a new song with a fresh id
    pub fn new(name: impl Into<String>, artist: impl Into<String>, duration: TimeDelta) -> Self {
        Self {
            id: SongId::new(),
            name: name.into(),
            artist: artist.into(),
            duration,
        }
    }

    pub fn id(&self) -> SongId {
        self.id
    }

    pub fn to_record(&self) -> SongRecord {
        SongRecord {
            id: Some(self.id),
            name: self.name.clone(),
            artist: self.artist.clone(),
            duration: format_duration(self.duration),
        }
    }

    /// Rebuild a song from its stored record
    ///
    /// Records without an id are given a fresh one.
    pub fn from_record(record: SongRecord) -> Result<Self, FormatError> {
        let duration = parse_duration(&record.duration)?;

        Ok(Self {
            id: record.id.unwrap_or_default(),
            name: record.name,
            artist: record.artist,
            duration,
        })
    }

    /// Whether `other` records the same metadata as this song, ignoring identity
    pub fn same_metadata(&self, other: &SongRecord) -> bool {
        self.name == other.name
            && self.artist == other.artist
            && format_duration(self.duration) == other.duration
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({})",
            self.name,
            self.artist,
            format_duration(self.duration)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_song() -> Song {
        Song::new("Test Song", "Test Artist", TimeDelta::seconds(3 * 60 + 30))
    }

    #[test]
    fn test_song_creation() {
        let song = sample_song();
        assert_eq!(song.name, "Test Song");
        assert_eq!(song.artist, "Test Artist");
        assert_eq!(song.duration, TimeDelta::seconds(210));
    }

    #[test]
    fn test_songs_with_same_metadata_are_distinct() {
        let a = sample_song();
        let b = sample_song();
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_song_to_record() {
        let song = sample_song();
        let value = serde_json::to_value(song.to_record()).unwrap();

        assert_eq!(value["name"], "Test Song");
        assert_eq!(value["artist"], "Test Artist");
        assert_eq!(value["duration"], "0:03:30");
        assert_eq!(value["id"], song.id().to_string());
    }

    #[test]
    fn test_song_from_record() {
        let record: SongRecord = serde_json::from_str(
            r#"{"name": "Dict Song", "artist": "Dict Artist", "duration": "0:04:15"}"#,
        )
        .unwrap();
        assert!(record.id.is_none());

        let song = Song::from_record(record).unwrap();
        assert_eq!(song.name, "Dict Song");
        assert_eq!(song.artist, "Dict Artist");
        assert_eq!(song.duration, TimeDelta::seconds(4 * 60 + 15));
    }

    #[test]
    fn test_song_from_record_keeps_id() {
        let song = sample_song();
        let restored = Song::from_record(song.to_record()).unwrap();
        assert_eq!(restored, song);
    }

    #[test]
    fn test_song_from_record_bad_duration() {
        let record = SongRecord {
            id: None,
            name: "Broken".to_string(),
            artist: "Nobody".to_string(),
            duration: "3:30".to_string(),
        };
        let err = Song::from_record(record).unwrap_err();
        assert_eq!(err.input, "3:30");
    }

    #[test]
    fn test_song_display() {
        assert_eq!(sample_song().to_string(), "Test Song by Test Artist (0:03:30)");
    }
}
