//! Integration tests for playlists and collaborations slices
//!
//! Tests playlist operations including:
//! - Listing owned and shared playlists without duplicates
//! - Set semantics of song membership
//! - Cascading delete
//! - Collaboration uniqueness

mod test_helpers;

use openmusic_core::{CatalogError, CatalogStore};
use openmusic_storage::{collaborations, playlists};
use test_helpers::*;

#[tokio::test]
async fn test_list_includes_owned_and_shared_once() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    let carol = create_test_user(pool, "carol").await;

    create_test_playlist(pool, "Alice Mix", alice.clone()).await;
    let bob_list = create_test_playlist(pool, "Bob Mix", bob.clone()).await;
    create_test_playlist(pool, "Bob Private", bob.clone()).await;

    collaborations::add(pool, &bob_list, &alice).await.unwrap();
    collaborations::add(pool, &bob_list, &carol).await.unwrap();

    let listed = playlists::get_user_playlists(pool, &alice).await.unwrap();
    assert_eq!(listed.len(), 2);

    let shared = listed.iter().find(|p| p.id == bob_list).unwrap();
    assert_eq!(shared.name, "Bob Mix");
    assert_eq!(shared.username, "bob");
}

#[tokio::test]
async fn test_song_membership_is_a_set() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner").await;
    let playlist = create_test_playlist(pool, "Set", owner).await;
    let song = create_test_song(pool, "Imagine", "John Lennon").await;

    playlists::add_song(pool, &playlist, &song).await.unwrap();
    playlists::add_song(pool, &playlist, &song).await.unwrap();

    let snapshot = playlists::get_with_songs(pool, &playlist).await.unwrap();
    assert_eq!(snapshot.songs.len(), 1);
    assert_eq!(snapshot.songs[0].title, "Imagine");
    assert_eq!(snapshot.username, "owner");
}

#[tokio::test]
async fn test_songs_listed_in_insertion_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner").await;
    let playlist = create_test_playlist(pool, "Ordered", owner).await;
    let first = create_test_song(pool, "Zebra", "Z").await;
    let second = create_test_song(pool, "Aardvark", "A").await;

    playlists::add_song(pool, &playlist, &first).await.unwrap();
    playlists::add_song(pool, &playlist, &second).await.unwrap();

    let snapshot = playlists::get_with_songs(pool, &playlist).await.unwrap();
    let ids: Vec<_> = snapshot.songs.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_remove_missing_song_is_invariant_violation() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner").await;
    let playlist = create_test_playlist(pool, "Empty", owner).await;
    let song = create_test_song(pool, "Hey Jude", "The Beatles").await;

    let result = playlists::remove_song(pool, &playlist, &song).await;
    assert!(matches!(result, Err(CatalogError::InvariantViolation(_))));
}

#[tokio::test]
async fn test_snapshot_of_missing_playlist_is_not_found() {
    let test_db = TestDb::new().await;

    let result = test_db
        .catalog()
        .playlist_songs(&"playlist-missing".into())
        .await;

    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_cascades_to_members_and_grants() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let catalog = test_db.catalog();

    let owner = create_test_user(pool, "owner").await;
    let friend = create_test_user(pool, "friend").await;
    let playlist = create_test_playlist(pool, "Doomed", owner.clone()).await;
    let song = create_test_song(pool, "Yesterday", "The Beatles").await;

    catalog.add_song_to_playlist(&playlist, &song).await.unwrap();
    catalog.add_collaborator(&playlist, &friend).await.unwrap();

    catalog.delete_playlist(&playlist).await.unwrap();

    assert_eq!(catalog.playlist_owner(&playlist).await.unwrap(), None);
    assert!(!catalog.is_collaborator(&playlist, &friend).await.unwrap());

    let members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlist_songs")
        .fetch_one(pool)
        .await
        .unwrap();
    assert_eq!(members, 0);

    // Second delete finds nothing
    assert!(matches!(
        catalog.delete_playlist(&playlist).await,
        Err(CatalogError::InvariantViolation(_))
    ));
}

#[tokio::test]
async fn test_duplicate_collaboration_conflicts() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner").await;
    let friend = create_test_user(pool, "friend").await;
    let playlist = create_test_playlist(pool, "Shared", owner).await;

    let id = collaborations::add(pool, &playlist, &friend).await.unwrap();
    assert!(id.starts_with("collab-"));

    let duplicate = collaborations::add(pool, &playlist, &friend).await;
    assert!(matches!(duplicate, Err(CatalogError::Conflict(_))));

    collaborations::remove(pool, &playlist, &friend).await.unwrap();
    assert!(matches!(
        collaborations::remove(pool, &playlist, &friend).await,
        Err(CatalogError::InvariantViolation(_))
    ));
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let test_db = TestDb::new().await;
    let catalog = test_db.catalog();

    create_test_user(test_db.pool(), "taken").await;

    let result = catalog
        .create_user(openmusic_core::CreateUser {
            username: "taken".to_string(),
            fullname: "Someone Else".to_string(),
        })
        .await;

    assert!(matches!(result, Err(CatalogError::Conflict(_))));
}
