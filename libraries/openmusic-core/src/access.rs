//! Playlist authorization
//!
//! Two strengths of access exist and must not be collapsed: owner-only
//! (delete playlist, manage collaborators, export) and owner-or-collaborator
//! (read songs, add/remove songs, read activities).

use crate::error::{CatalogError, Result};
use crate::types::{PlaylistId, UserId};
use async_trait::async_trait;

/// Outcome of evaluating a principal against a playlist.
///
/// `NotFound` always wins over `Denied`: a collaboration lookup never turns a
/// missing playlist into a forbidden one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Owner,
    Collaborator,
    Denied,
    NotFound,
}

/// Successful owner-or-collaborator grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessGrant {
    pub is_owner: bool,
}

impl AccessDecision {
    /// Evaluate a decision from the playlist's owner (`None` if the playlist
    /// does not exist) and whether an active collaboration grant exists.
    pub fn evaluate(owner: Option<&UserId>, principal: &UserId, has_grant: bool) -> Self {
        match owner {
            None => Self::NotFound,
            Some(owner) if owner == principal => Self::Owner,
            Some(_) if has_grant => Self::Collaborator,
            Some(_) => Self::Denied,
        }
    }

    /// Owner-or-collaborator access
    pub fn into_grant(self, playlist_id: &PlaylistId) -> Result<AccessGrant> {
        match self {
            Self::Owner => Ok(AccessGrant { is_owner: true }),
            Self::Collaborator => Ok(AccessGrant { is_owner: false }),
            Self::Denied => Err(denied(playlist_id)),
            Self::NotFound => Err(CatalogError::not_found("Playlist", playlist_id.as_str())),
        }
    }

    /// Owner-only access; collaborators are forbidden
    pub fn into_owner(self, playlist_id: &PlaylistId) -> Result<()> {
        match self {
            Self::Owner => Ok(()),
            Self::Collaborator | Self::Denied => Err(denied(playlist_id)),
            Self::NotFound => Err(CatalogError::not_found("Playlist", playlist_id.as_str())),
        }
    }
}

fn denied(playlist_id: &PlaylistId) -> CatalogError {
    CatalogError::forbidden(format!("no access to playlist {playlist_id}"))
}

/// Require a principal on the request before any access check
pub fn authenticated(principal: Option<&UserId>) -> Result<&UserId> {
    principal.ok_or(CatalogError::Unauthenticated)
}

/// Decides whether a principal may read or mutate a playlist
#[async_trait]
pub trait AccessResolver: Send + Sync {
    /// Look up ownership and, only when needed, the collaboration relation
    async fn decide(&self, playlist_id: &PlaylistId, principal: &UserId) -> Result<AccessDecision>;

    /// Owner-or-collaborator check
    async fn resolve_access(
        &self,
        playlist_id: &PlaylistId,
        principal: &UserId,
    ) -> Result<AccessGrant> {
        self.decide(playlist_id, principal)
            .await?
            .into_grant(playlist_id)
    }

    /// Exact-owner check, regardless of collaboration grants
    async fn require_owner(&self, playlist_id: &PlaylistId, principal: &UserId) -> Result<()> {
        self.decide(playlist_id, principal)
            .await?
            .into_owner(playlist_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (PlaylistId, UserId, UserId) {
        (
            PlaylistId::new("playlist-1"),
            UserId::new("user-owner"),
            UserId::new("user-other"),
        )
    }

    #[test]
    fn owner_is_granted_with_owner_flag() {
        let (playlist, owner, _) = ids();
        let decision = AccessDecision::evaluate(Some(&owner), &owner, false);
        assert_eq!(decision, AccessDecision::Owner);
        assert_eq!(
            decision.into_grant(&playlist).unwrap(),
            AccessGrant { is_owner: true }
        );
        assert!(decision.into_owner(&playlist).is_ok());
    }

    #[test]
    fn collaborator_reads_but_is_not_owner() {
        let (playlist, owner, other) = ids();
        let decision = AccessDecision::evaluate(Some(&owner), &other, true);
        assert_eq!(decision, AccessDecision::Collaborator);
        assert_eq!(
            decision.into_grant(&playlist).unwrap(),
            AccessGrant { is_owner: false }
        );
        assert!(matches!(
            decision.into_owner(&playlist),
            Err(CatalogError::Forbidden(_))
        ));
    }

    #[test]
    fn stranger_is_forbidden() {
        let (playlist, owner, other) = ids();
        let decision = AccessDecision::evaluate(Some(&owner), &other, false);
        assert!(matches!(
            decision.into_grant(&playlist),
            Err(CatalogError::Forbidden(_))
        ));
    }

    #[test]
    fn missing_playlist_wins_over_grant() {
        let (playlist, _, other) = ids();
        let decision = AccessDecision::evaluate(None, &other, true);
        assert_eq!(decision, AccessDecision::NotFound);
        assert!(decision.into_grant(&playlist).unwrap_err().is_not_found());
        assert!(decision.into_owner(&playlist).unwrap_err().is_not_found());
    }

    #[test]
    fn missing_principal_is_unauthenticated() {
        assert!(matches!(
            authenticated(None),
            Err(CatalogError::Unauthenticated)
        ));
        let user = UserId::new("user-1");
        assert_eq!(authenticated(Some(&user)).unwrap(), &user);
    }
}
