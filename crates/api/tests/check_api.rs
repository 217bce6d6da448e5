//! Integration tests for the existence check endpoint.

mod common;

use std::io::Write;

use axum::http::StatusCode;
use common::{body_json, get, sample_annotations, save_ok};
use sqlx::PgPool;

/// Write a fallback CSV fixture and return a config pointing at it.
fn config_with_fallback(csv: &str) -> (tempfile::NamedTempFile, clipmark_api::config::ServerConfig) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(csv.as_bytes()).unwrap();
    file.flush().unwrap();

    let mut config = common::test_config();
    config.fallback_csv_path = file.path().to_path_buf();
    (file, config)
}

// ---------------------------------------------------------------------------
// Test: missing or empty filename returns 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn check_without_filename_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/check").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "filename required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn check_with_empty_filename_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/check?filename=").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: unknown filename with no fallback file reports source "none"
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn check_unknown_filename_reports_none(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/check?filename=never-seen.mp4").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["annotated"], false);
    assert_eq!(json["source"], "none");
    assert!(json.get("doc").is_none());
}

// ---------------------------------------------------------------------------
// Test: a primary hit includes the stored document for UI hydration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn check_after_save_reports_primary_with_doc(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    save_ok(app, "clip_a.mp4", sample_annotations()).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/check?filename=clip_a.mp4").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["annotated"], true);
    assert_eq!(json["source"], "primary");
    assert_eq!(json["doc"]["filename"], "clip_a.mp4");
    assert_eq!(json["doc"]["annotations"], sample_annotations());
    assert!(json["doc"]["createdAt"].is_string());
    assert!(json["doc"]["updatedAt"].is_string());
}

// ---------------------------------------------------------------------------
// Test: fallback CSV answers when the primary store has no document
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn check_finds_filename_in_fallback_csv(pool: PgPool) {
    let (_file, config) = config_with_fallback("video_name,label\nlegacy_clip.mp4,walk\n");
    let app = common::build_test_app_with_config(pool, config);

    let response = get(app, "/api/check?filename=legacy_clip.mp4").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["annotated"], true);
    assert_eq!(json["source"], "fallback");
    // The flat format has no reconstructable annotation payload.
    assert!(json.get("doc").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn check_searches_all_alias_columns(pool: PgPool) {
    let (_file, config) =
        config_with_fallback("file,videoFilename\nold_a.mp4,\n,old_b.mp4\n");
    let app = common::build_test_app_with_config(pool.clone(), config.clone());
    let response = get(app, "/api/check?filename=old_a.mp4").await;
    let json = body_json(response).await;
    assert_eq!(json["annotated"], true);
    assert_eq!(json["source"], "fallback");

    let app = common::build_test_app_with_config(pool, config);
    let response = get(app, "/api/check?filename=old_b.mp4").await;
    let json = body_json(response).await;
    assert_eq!(json["annotated"], true);
}

// ---------------------------------------------------------------------------
// Test: fallback match is exact and case-sensitive
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn check_fallback_match_is_case_sensitive(pool: PgPool) {
    let (_file, config) = config_with_fallback("filename\nClip.MP4\n");
    let app = common::build_test_app_with_config(pool, config);

    let response = get(app, "/api/check?filename=clip.mp4").await;

    let json = body_json(response).await;
    assert_eq!(json["annotated"], false);
    assert_eq!(json["source"], "none");
}

// ---------------------------------------------------------------------------
// Test: fallback file present but filename absent reports "none"
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn check_fallback_miss_reports_none(pool: PgPool) {
    let (_file, config) = config_with_fallback("filename,label\nother.mp4,run\n");
    let app = common::build_test_app_with_config(pool, config);

    let response = get(app, "/api/check?filename=missing.mp4").await;

    let json = body_json(response).await;
    assert_eq!(json["annotated"], false);
    assert_eq!(json["source"], "none");
}

// ---------------------------------------------------------------------------
// Test: unparsable fallback data is a hard error, not "not found"
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn check_malformed_fallback_returns_500(pool: PgPool) {
    let (_file, config) = config_with_fallback("filename\n\"unterminated.mp4\n");
    let app = common::build_test_app_with_config(pool, config);

    let response = get(app, "/api/check?filename=unterminated.mp4").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "MALFORMED_FALLBACK");
}

// ---------------------------------------------------------------------------
// Test: the primary store wins over the fallback when both know the file
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn check_prefers_primary_over_fallback(pool: PgPool) {
    let (_file, config) = config_with_fallback("filename\nboth.mp4\n");

    let app = common::build_test_app_with_config(pool.clone(), config.clone());
    save_ok(app, "both.mp4", sample_annotations()).await;

    let app = common::build_test_app_with_config(pool, config);
    let response = get(app, "/api/check?filename=both.mp4").await;

    let json = body_json(response).await;
    assert_eq!(json["annotated"], true);
    assert_eq!(json["source"], "primary");
    assert_eq!(json["doc"]["filename"], "both.mp4");
}
