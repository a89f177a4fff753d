use crate::e2e::helpers;

use helpers::assertions::assert_projection;
use helpers::fixtures::page;
use helpers::TestContext;
use photo_gallery::domain::gallery::{GalleryControllerApi, GalleryServiceError, ToggleOutcome};
use pretty_assertions::assert_eq;

async fn loaded_gallery() -> TestContext {
    let ctx = TestContext::new().await.unwrap();
    ctx.catalog.push_page(page("p", 20));
    ctx.gallery.fetch_next_page().await;
    ctx
}

#[tokio::test]
async fn it_should_like_and_unlike_an_item() {
    let ctx = loaded_gallery().await;

    let outcome = ctx.gallery.toggle_like("p1").await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Liked);
    assert_eq!(ctx.liked("p1"), Some(true));
    assert!(ctx.stored_likes("alice").await.unwrap().contains("p1"));

    // Reloading reproduces the same flag
    ctx.gallery.load_likes_for_identity().await;
    assert_eq!(ctx.liked("p1"), Some(true));

    let outcome = ctx.gallery.toggle_like("p1").await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Unliked);
    assert_eq!(ctx.liked("p1"), Some(false));
    assert!(!ctx.stored_likes("alice").await.unwrap().contains("p1"));
    ctx.gallery.load_likes_for_identity().await;
    assert_eq!(ctx.liked("p1"), Some(false));
    assert_eq!(ctx.store.write_count(), 2);
}

#[tokio::test]
async fn it_should_roll_back_when_the_write_fails() {
    let ctx = loaded_gallery().await;
    ctx.store.fail_writes(true);

    let result = ctx.gallery.toggle_like("p1").await;

    assert!(matches!(result, Err(GalleryServiceError::Persistence(_))));
    assert_eq!(ctx.liked("p1"), Some(false));
    assert!(ctx.stored_likes("alice").await.unwrap().is_empty());
    assert_eq!(ctx.gallery.error(), None);
}

#[tokio::test]
async fn it_should_roll_back_an_unlike_when_the_write_fails() {
    let ctx = TestContext::new().await.unwrap();
    ctx.seed_likes("alice", &["p1"]).await.unwrap();
    ctx.catalog.push_page(page("p", 3));
    ctx.gallery.fetch_next_page().await;
    ctx.store.fail_writes(true);

    assert!(ctx.gallery.toggle_like("p1").await.is_err());

    assert_eq!(ctx.liked("p1"), Some(true));
    assert!(ctx.stored_likes("alice").await.unwrap().contains("p1"));
}

#[tokio::test]
async fn it_should_roll_back_when_the_like_set_cannot_be_read() {
    let ctx = loaded_gallery().await;
    ctx.store.fail_reads(true);

    assert!(ctx.gallery.toggle_like("p1").await.is_err());

    assert_eq!(ctx.liked("p1"), Some(false));
    assert_eq!(ctx.store.write_count(), 0);
}

#[tokio::test]
async fn it_should_ignore_toggles_without_identity() {
    let ctx = loaded_gallery().await;
    ctx.identity.set(None);

    let outcome = ctx.gallery.toggle_like("p1").await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Skipped);
    assert_eq!(ctx.liked("p1"), Some(false));
    assert_eq!(ctx.store.write_count(), 0);
}

#[tokio::test]
async fn it_should_persist_likes_for_items_not_displayed() {
    let ctx = loaded_gallery().await;

    let outcome = ctx.gallery.toggle_like("offscreen").await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Liked);
    assert!(ctx.stored_likes("alice").await.unwrap().contains("offscreen"));
    assert_eq!(ctx.liked("offscreen"), None);
}

#[tokio::test]
async fn it_should_keep_both_of_two_concurrent_toggles() {
    let ctx = loaded_gallery().await;

    let (first, second) = futures::join!(
        ctx.gallery.toggle_like("p1"),
        ctx.gallery.toggle_like("p2")
    );

    assert_eq!(first.unwrap(), ToggleOutcome::Liked);
    assert_eq!(second.unwrap(), ToggleOutcome::Liked);
    let likes = ctx.stored_likes("alice").await.unwrap();
    assert!(likes.contains("p1"));
    assert!(likes.contains("p2"));
    assert_projection(&ctx.gallery.items(), &likes);
}

#[tokio::test]
async fn it_should_stay_consistent_under_many_concurrent_toggles() {
    let ctx = loaded_gallery().await;
    let targets = ["p1", "p2", "p3", "p2", "p4", "p1", "p2"];

    let results =
        futures::future::join_all(targets.iter().map(|id| ctx.gallery.toggle_like(id))).await;

    assert!(results.iter().all(|result| result.is_ok()));
    let likes = ctx.stored_likes("alice").await.unwrap();
    // p1 twice, p2 three times, p3 and p4 once
    assert!(!likes.contains("p1"));
    assert!(likes.contains("p2"));
    assert!(likes.contains("p3"));
    assert!(likes.contains("p4"));
    assert_projection(&ctx.gallery.items(), &likes);
}

#[tokio::test]
async fn it_should_project_likes_of_the_current_identity() {
    let ctx = loaded_gallery().await;
    ctx.gallery.toggle_like("p1").await.unwrap();

    ctx.identity.set(Some("bob"));
    ctx.gallery.load_likes_for_identity().await;
    assert!(ctx.gallery.items().iter().all(|item| !item.liked));

    ctx.gallery.toggle_like("p2").await.unwrap();
    ctx.identity.set(Some("alice"));
    ctx.gallery.load_likes_for_identity().await;

    let likes = ctx.stored_likes("alice").await.unwrap();
    assert_projection(&ctx.gallery.items(), &likes);
    assert_eq!(ctx.liked("p1"), Some(true));
    assert_eq!(ctx.liked("p2"), Some(false));
}

#[tokio::test]
async fn it_should_clear_projection_when_signed_out() {
    let ctx = loaded_gallery().await;
    ctx.gallery.toggle_like("p1").await.unwrap();

    ctx.identity.set(None);
    ctx.gallery.load_likes_for_identity().await;

    assert!(ctx.gallery.items().iter().all(|item| !item.liked));
}

#[tokio::test]
async fn it_should_keep_items_when_likes_cannot_be_reloaded() {
    let ctx = loaded_gallery().await;
    ctx.gallery.toggle_like("p1").await.unwrap();
    let before = ctx.gallery.items();
    ctx.store.fail_reads(true);

    ctx.gallery.load_likes_for_identity().await;

    assert_eq!(ctx.gallery.items(), before);
    assert_eq!(ctx.gallery.error(), None);
}

#[tokio::test]
async fn it_should_not_roll_back_into_a_reset_gallery() {
    let ctx = loaded_gallery().await;
    ctx.store.fail_writes(true);
    let gate = ctx.store.hold_next_write();

    let gallery = ctx.gallery.clone();
    let toggle = tokio::spawn(async move { gallery.toggle_like("p1").await });
    helpers::wait_until(|| ctx.liked("p1") == Some(true)).await;

    // A fresh session reloads the same page while the write is pending
    ctx.gallery.reset();
    ctx.catalog.push_page(page("p", 20));
    ctx.gallery.fetch_next_page().await;
    assert_eq!(ctx.liked("p1"), Some(false));

    gate.notify_one();
    assert!(toggle.await.unwrap().is_err());

    assert_eq!(ctx.liked("p1"), Some(false));
    assert!(ctx.stored_likes("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn it_should_show_a_like_written_after_a_reset() {
    let ctx = loaded_gallery().await;
    let gate = ctx.store.hold_next_write();

    let gallery = ctx.gallery.clone();
    let toggle = tokio::spawn(async move { gallery.toggle_like("p1").await });
    helpers::wait_until(|| ctx.liked("p1") == Some(true)).await;

    // The reloaded page is projected before the write lands
    ctx.gallery.reset();
    ctx.catalog.push_page(page("p", 20));
    ctx.gallery.fetch_next_page().await;
    assert_eq!(ctx.liked("p1"), Some(false));

    gate.notify_one();
    assert_eq!(toggle.await.unwrap().unwrap(), ToggleOutcome::Liked);

    let likes = ctx.stored_likes("alice").await.unwrap();
    assert!(likes.contains("p1"));
    assert_eq!(ctx.liked("p1"), Some(true));
    assert_projection(&ctx.gallery.items(), &likes);
}

#[tokio::test]
async fn it_should_keep_a_like_when_likes_reload_during_the_write() {
    let ctx = loaded_gallery().await;
    let gate = ctx.store.hold_next_write();

    let gallery = ctx.gallery.clone();
    let toggle = tokio::spawn(async move { gallery.toggle_like("p1").await });
    helpers::wait_until(|| ctx.liked("p1") == Some(true)).await;

    ctx.gallery.load_likes_for_identity().await;
    assert_eq!(ctx.liked("p1"), Some(false));

    gate.notify_one();
    assert_eq!(toggle.await.unwrap().unwrap(), ToggleOutcome::Liked);

    let likes = ctx.stored_likes("alice").await.unwrap();
    assert_eq!(ctx.liked("p1"), Some(true));
    assert_projection(&ctx.gallery.items(), &likes);
}

#[tokio::test]
async fn it_should_not_show_a_like_to_the_next_identity() {
    let ctx = loaded_gallery().await;
    let gate = ctx.store.hold_next_write();

    let gallery = ctx.gallery.clone();
    let toggle = tokio::spawn(async move { gallery.toggle_like("p1").await });
    helpers::wait_until(|| ctx.liked("p1") == Some(true)).await;

    ctx.identity.set(Some("bob"));
    ctx.gallery.load_likes_for_identity().await;

    gate.notify_one();
    assert_eq!(toggle.await.unwrap().unwrap(), ToggleOutcome::Liked);

    assert!(ctx.stored_likes("alice").await.unwrap().contains("p1"));
    assert_eq!(ctx.liked("p1"), Some(false));
}
