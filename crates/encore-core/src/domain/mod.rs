//! Domain entities - the core business objects.

mod export;

mod playlist;

pub use export::ExportJob;
pub use playlist::{Playlist, Song};
