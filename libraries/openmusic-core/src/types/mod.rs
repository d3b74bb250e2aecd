mod activity;
mod album;
mod export_job;
mod ids;
mod playlist;
mod song;
mod user;

pub use activity::{ActivityAction, ActivityEntry, ActivityView};
pub use album::{Album, CreateAlbum};
pub use export_job::{ExportJob, EXPORT_QUEUE};
pub use ids::{AlbumId, PlaylistId, SongId, UserId};
pub use playlist::{Collaboration, CreatePlaylist, Playlist, PlaylistSongs, PlaylistSummary};
pub use song::{CreateSong, Song, SongSummary};
pub use user::{CreateUser, User};
