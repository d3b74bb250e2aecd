/// Playlist access resolution against the catalog store
use async_trait::async_trait;
use openmusic_core::{
    access::{AccessDecision, AccessResolver},
    error::Result,
    storage::CatalogStore,
    types::{PlaylistId, UserId},
};
use std::sync::Arc;

/// Resolves access from playlist ownership, falling back to collaborations
#[derive(Clone)]
pub struct StoreAccessResolver {
    store: Arc<dyn CatalogStore>,
}

impl StoreAccessResolver {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AccessResolver for StoreAccessResolver {
    async fn decide(&self, playlist_id: &PlaylistId, principal: &UserId) -> Result<AccessDecision> {
        let owner = self.store.playlist_owner(playlist_id).await?;

        // The collaboration relation is only consulted for an existing
        // playlist the principal does not own
        let has_grant = match &owner {
            Some(owner) if owner != principal => {
                self.store.is_collaborator(playlist_id, principal).await?
            }
            _ => false,
        };

        Ok(AccessDecision::evaluate(owner.as_ref(), principal, has_grant))
    }
}
