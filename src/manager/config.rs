//! Manager configuration

use std::path::PathBuf;

/// File name used when no library path is given
pub const DEFAULT_DATA_FILE: &str = "music_manager_data.json";

/// Configuration for a music manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// JSON file holding every song and playlist
    pub data_path: PathBuf,
}

impl ManagerConfig {
    /// Create a configuration backed by the given library file
    pub fn new(data_path: PathBuf) -> Self {
        Self { data_path }
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_DATA_FILE))
    }
}
