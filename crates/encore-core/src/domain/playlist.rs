use serde::{Deserialize, Serialize};

/// Song entry as it appears in a playlist export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub performer: String,
}

/// Playlist with its songs, rehydrated from the durable store.
///
/// Field order is the serialization order of the export artifact, so it is
/// part of the external contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub songs: Vec<Song>,
}
