//! Music Manager - personal song and playlist library
//!
//! Keeps songs and playlists in memory and persists the whole collection
//! to a single JSON file after every change.

pub mod error;
pub mod manager;
pub mod model;
pub mod shell;

pub use error::{DurationOverflow, Error, FormatError, Result};
pub use manager::{ManagerConfig, MusicManager};
pub use shell::Shell;
