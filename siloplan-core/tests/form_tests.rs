// Tests for the form state store

use siloplan_core::clipboard::{CopyOutcome, MemoryClipboard, copy_to_clipboard, entry_copy_block};
use siloplan_core::form::{
    FormField, FormSnapshot, FormState, copy_all_key, copy_link_key, copy_url_key,
};
use siloplan_core::verify::{Classification, SUCCESS_MESSAGE, TOO_FEW_POSTS_MESSAGE};
use siloplan_core::SiloError;
use std::io::Write;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

// ============================================================================
// Post Mutation Tests
// ============================================================================

#[test]
fn test_new_form_is_pending() {
    let form = FormState::new();
    assert_eq!(form.verification().classification, Classification::None);
    assert!(form.posts().is_empty());
}

#[test]
fn test_add_post_uses_url_as_title() {
    let mut form = FormState::new();
    let post = form.add_post("https://example.com/a").clone();
    assert_eq!(post.title, "https://example.com/a");
    assert_eq!(post.url, "https://example.com/a");
    assert!(!post.id.is_empty());
}

#[test]
fn test_add_blank_post() {
    let mut form = FormState::new();
    form.add_post("");
    assert_eq!(form.posts().len(), 1);
    assert_eq!(form.posts()[0].url, "");
}

#[test]
fn test_post_ids_are_unique() {
    let mut form = FormState::new();
    form.add_post("https://example.com/a");
    form.add_post("https://example.com/a");
    assert_ne!(form.posts()[0].id, form.posts()[1].id);
}

#[test]
fn test_bulk_add_trims_and_skips_blank_lines() {
    let mut form = FormState::new();
    let added = form.add_posts_from_bulk(
        "  https://example.com/a  \n\n   \nhttps://example.com/b\r\nhttps://example.com/c\n",
    );

    assert_eq!(added, 3);
    let urls: Vec<&str> = form.posts().iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://example.com/a", "https://example.com/b", "https://example.com/c"]
    );
}

#[test]
fn test_bulk_add_appends_after_existing_posts() {
    let mut form = FormState::new();
    form.add_post("https://example.com/first");
    form.add_posts_from_bulk("https://example.com/second");
    assert_eq!(form.posts()[0].url, "https://example.com/first");
    assert_eq!(form.posts()[1].url, "https://example.com/second");
}

#[test]
fn test_bulk_add_with_nothing() {
    let mut form = FormState::new();
    assert_eq!(form.add_posts_from_bulk("\n  \n"), 0);
    assert!(form.posts().is_empty());
}

#[test]
fn test_remove_post() {
    let mut form = FormState::new();
    form.add_posts_from_bulk("https://example.com/a\nhttps://example.com/b");
    let id = form.posts()[0].id.clone();

    assert!(form.remove_post(&id));
    assert_eq!(form.posts().len(), 1);
    assert!(!form.remove_post(&id));
}

#[test]
fn test_set_post_title_changes_anchor_text() {
    let mut form = FormState::new();
    form.add_posts_from_bulk("https://example.com/a\nhttps://example.com/b");
    let id = form.posts()[1].id.clone();

    assert!(form.set_post_title(&id, "Fresh-Ideas"));
    let plan = form.plan();
    assert_eq!(plan.entries[0].target_links[0].anchor_text, "Learn more about Fresh Ideas");
    // URL is untouched
    assert_eq!(plan.entries[0].target_links[0].url, "https://example.com/b");
}

#[test]
fn test_set_post_url() {
    let mut form = FormState::new();
    form.add_post("");
    let id = form.posts()[0].id.clone();
    assert!(form.set_post_url(&id, "https://example.com/filled"));
    assert_eq!(form.posts()[0].url, "https://example.com/filled");
    assert!(!form.set_post_url("missing", "x"));
}

#[test]
fn test_resolve_post_by_position_and_id() {
    let mut form = FormState::new();
    form.add_posts_from_bulk("https://example.com/a\nhttps://example.com/b");
    let second = form.posts()[1].id.clone();

    assert_eq!(form.resolve_post("2").unwrap(), second);
    assert_eq!(form.resolve_post(&second).unwrap(), second);
    assert!(matches!(form.resolve_post("0"), Err(SiloError::UnknownPost(_))));
    assert!(matches!(form.resolve_post("3"), Err(SiloError::UnknownPost(_))));
    assert!(matches!(form.resolve_post("nope"), Err(SiloError::UnknownPost(_))));
}

// ============================================================================
// Verification Recompute Tests
// ============================================================================

#[test]
fn test_verification_tracks_post_count() {
    let mut form = FormState::new();

    form.add_post("https://example.com/a");
    assert_eq!(form.verification().classification, Classification::Warning);
    assert_eq!(form.verification().message.as_deref(), Some(TOO_FEW_POSTS_MESSAGE));

    form.add_post("https://example.com/b");
    assert_eq!(form.verification().classification, Classification::Success);
    assert_eq!(form.verification().message.as_deref(), Some(SUCCESS_MESSAGE));

    let id = form.posts()[0].id.clone();
    form.remove_post(&id);
    assert_eq!(form.verification().classification, Classification::Warning);
}

#[test]
fn test_field_edit_recomputes_verification() {
    let mut form = FormState::new();
    form.set_field(FormField::TargetPage, "https://example.com/t");
    assert_eq!(form.field(FormField::TargetPage), "https://example.com/t");
    assert_eq!(form.verification().classification, Classification::Warning);
}

#[test]
fn test_form_field_names() {
    assert_eq!(FormField::from_str("STAT1"), Some(FormField::StatPage1));
    assert_eq!(FormField::from_str("perplexity"), Some(FormField::Perplexity));
    assert_eq!(FormField::from_str("twitter"), None);
}

// ============================================================================
// Copy Notice Tests
// ============================================================================

#[test]
fn test_copy_notice_expires_after_delay() {
    let mut form = FormState::new().with_copy_reset_delay(Duration::from_millis(500));
    let now = Instant::now();

    form.record_copy(copy_all_key("abc"), CopyOutcome::Copied, now);
    assert_eq!(form.copied_key(now), Some("all-abc"));
    assert_eq!(form.copied_key(now + Duration::from_millis(499)), Some("all-abc"));
    assert_eq!(form.copied_key(now + Duration::from_millis(500)), None);
}

#[test]
fn test_failed_copy_sets_no_notice() {
    let mut form = FormState::new();
    let mut clipboard = MemoryClipboard::refusing();
    let now = Instant::now();

    let outcome = copy_to_clipboard(&mut clipboard, "text");
    form.record_copy(copy_url_key("abc"), outcome, now);
    assert_eq!(form.copied_key(now), None);
}

#[test]
fn test_copy_entry_block_from_form() {
    let mut form = FormState::new();
    form.add_posts_from_bulk("https://example.com/a\nhttps://example.com/b");
    let plan = form.plan();
    let mut clipboard = MemoryClipboard::new();

    let outcome = copy_to_clipboard(&mut clipboard, &entry_copy_block(&plan.entries[0]));
    assert!(outcome.is_copied());
    assert_eq!(
        clipboard.last(),
        Some("From: https://example.com/a\n\nLink to: https://example.com/b\nAnchor Text: Learn more about b\n\n")
    );
}

#[test]
fn test_copy_keys() {
    assert_eq!(copy_url_key("x"), "url-x");
    assert_eq!(copy_link_key("x", 2), "link-x-2");
    assert_eq!(copy_all_key("target-page"), "all-target-page");
}

// ============================================================================
// Snapshot Loading Tests
// ============================================================================

#[test]
fn test_snapshot_from_partial_json() {
    let snapshot = FormSnapshot::from_json(
        r#"{
            "target_page_url": "https://example.com/t",
            "target_keyword": "widgets",
            "posts": [
                {"id": "p1", "title": "First-Post", "url": "https://example.com/1"},
                {"id": "p2", "title": "", "url": "https://example.com/2"}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(snapshot.home_page_url, "");
    assert_eq!(snapshot.posts.len(), 2);

    let form = FormState::from_snapshot(snapshot);
    assert_eq!(form.verification().classification, Classification::Success);
    assert_eq!(form.plan().entries.len(), 3);
}

#[test]
fn test_snapshot_load_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    write!(temp_file, r#"{{"reddit_url": "https://reddit.com/r/x"}}"#)?;

    let snapshot = FormSnapshot::load(temp_file.path())?;
    assert_eq!(snapshot.reddit_url, "https://reddit.com/r/x");
    Ok(())
}

#[test]
fn test_snapshot_invalid_json() {
    let result = FormSnapshot::from_json("{ not json");
    assert!(matches!(result, Err(SiloError::Json(_))));
}

#[test]
fn test_snapshot_post_without_id_or_title() {
    let snapshot =
        FormSnapshot::from_json(r#"{"posts": [{"url": "https://example.com/widget-care"}]}"#)
            .unwrap();

    let post = &snapshot.posts[0];
    assert!(!post.id.is_empty());
    assert_eq!(post.title, "https://example.com/widget-care");
    assert_eq!(post.url, "https://example.com/widget-care");
}

#[test]
fn test_from_snapshot_replaces_duplicate_ids() {
    let snapshot = FormSnapshot::from_json(
        r#"{"posts": [
            {"id": "p", "url": "https://example.com/a"},
            {"id": "p", "url": "https://example.com/b"},
            {"id": "", "url": "https://example.com/c"},
            {"id": "q", "url": "https://example.com/d"}
        ]}"#,
    )
    .unwrap();
    let mut form = FormState::from_snapshot(snapshot);

    let ids: Vec<&str> = form.posts().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids[0], "p");
    assert_eq!(ids[3], "q");
    assert!(!ids[1].is_empty() && ids[1] != "p" && ids[1] != "q");
    assert!(!ids[2].is_empty() && ids[2] != ids[1]);

    let first = form.resolve_post("1").unwrap();
    assert!(form.remove_post(&first));
    let urls: Vec<&str> = form.posts().iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://example.com/b", "https://example.com/c", "https://example.com/d"]
    );
}
