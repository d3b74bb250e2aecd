/// Album domain types
use crate::types::AlbumId;
use serde::{Deserialize, Serialize};

/// Album in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub year: i32,
}

/// Data for creating a new album
#[derive(Debug, Clone)]
pub struct CreateAlbum {
    pub name: String,
    pub year: i32,
}
