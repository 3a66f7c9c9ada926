//! Songs, playlists and the textual duration format they share

pub mod duration;
mod playlist;
mod song;

pub use duration::{format_duration, parse_duration, parse_minutes_seconds};
pub use playlist::{Playlist, PlaylistId, PlaylistRecord};
pub use song::{Song, SongId, SongRecord};
