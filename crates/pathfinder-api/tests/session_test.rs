//! Integration tests for explorer sessions.

mod common;

use axum::http::StatusCode;
use common::TestProviders;
use pathfinder_test_support::StubKnowledgeBase;
use uuid::Uuid;

#[tokio::test]
async fn test_new_session_starts_on_search_screen() {
    let app = common::build_test_app();
    let session_id = common::create_session(&app).await;

    let (status, json) = common::get_json(app, &format!("/api/v1/sessions/{session_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["session_id"], session_id);
    assert_eq!(json["view"], "search");
    assert_eq!(json["loading"], false);
    assert!(json["location"].is_null());
}

#[tokio::test]
async fn test_search_resolves_location_and_opens_viewer() {
    // Arrange
    let app = common::build_test_app();
    let session_id = common::create_session(&app).await;

    // Act
    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/sessions/{session_id}/search"),
        &serde_json::json!({ "query": "Colosseum, Rome, Italy" }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "applied");
    let session = &json["session"];
    assert_eq!(session["view"], "viewer");
    assert_eq!(session["loading"], false);
    assert_eq!(session["location"]["name"], "Colosseum");
    assert_eq!(session["location"]["narration_text"], "Welcome to the arena.");
    assert!(session["tour"].is_null());
}

#[tokio::test]
async fn test_unknown_location_reports_friendly_error() {
    let app = common::build_test_app_with(TestProviders {
        knowledge: StubKnowledgeBase::new(),
        ..TestProviders::default()
    });
    let session_id = common::create_session(&app).await;

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/sessions/{session_id}/search"),
        &serde_json::json!({ "query": "Atlantis" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "applied");
    assert_eq!(json["session"]["view"], "search");
    assert_eq!(
        json["session"]["error"],
        "We couldn't find that location. Please try a different name."
    );
}

#[tokio::test]
async fn test_dismiss_error_clears_message() {
    let app = common::build_test_app_with(TestProviders {
        knowledge: StubKnowledgeBase::new(),
        ..TestProviders::default()
    });
    let session_id = common::create_session(&app).await;
    common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session_id}/search"),
        &serde_json::json!({ "query": "Atlantis" }),
    )
    .await;

    let status = common::delete(app.clone(), &format!("/api/v1/sessions/{session_id}/error")).await;
    let (_, json) = common::get_json(app, &format!("/api/v1/sessions/{session_id}")).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(json["error"].is_null());
}

#[tokio::test]
async fn test_blank_query_is_rejected() {
    let app = common::build_test_app();
    let session_id = common::create_session(&app).await;

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/sessions/{session_id}/search"),
        &serde_json::json!({ "query": "   " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_tour_query_starts_tour_at_first_stop() {
    let app = common::build_test_app();
    let session_id = common::create_session(&app).await;

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/sessions/{session_id}/search"),
        &serde_json::json!({ "query": "tour:stations-of-the-cross" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let tour = &json["session"]["tour"];
    assert_eq!(tour["tour_id"], "stations-of-the-cross");
    assert_eq!(tour["current_index"], 0);
    assert_eq!(tour["total_stops"], 14);
    assert!(tour["previous"].is_null());
    assert_eq!(tour["next"], 1);
}

#[tokio::test]
async fn test_select_stop_moves_through_tour() {
    // Arrange
    let app = common::build_test_app();
    let session_id = common::create_session(&app).await;
    common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session_id}/search"),
        &serde_json::json!({ "query": "tour:stations-of-the-cross" }),
    )
    .await;

    // Act
    let (status, json) = common::post_empty(
        app,
        &format!("/api/v1/sessions/{session_id}/tour/stops/13"),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "applied");
    let tour = &json["session"]["tour"];
    assert_eq!(tour["current_index"], 13);
    assert!(tour["next"].is_null());
    assert_eq!(tour["stops"][12]["status"], "completed");
    assert_eq!(tour["stops"][13]["status"], "current");
}

#[tokio::test]
async fn test_out_of_range_stop_is_no_op() {
    let app = common::build_test_app();
    let session_id = common::create_session(&app).await;
    common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session_id}/search"),
        &serde_json::json!({ "query": "tour:stations-of-the-cross" }),
    )
    .await;

    let (status, json) = common::post_empty(
        app,
        &format!("/api/v1/sessions/{session_id}/tour/stops/14"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "no_op");
    assert_eq!(json["session"]["tour"]["current_index"], 0);
}

#[tokio::test]
async fn test_select_stop_without_tour_is_rejected() {
    let app = common::build_test_app();
    let session_id = common::create_session(&app).await;

    let (status, json) = common::post_empty(
        app,
        &format!("/api/v1/sessions/{session_id}/tour/stops/0"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_reset_returns_to_search() {
    let app = common::build_test_app();
    let session_id = common::create_session(&app).await;
    common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session_id}/search"),
        &serde_json::json!({ "query": "tour:stations-of-the-cross" }),
    )
    .await;

    let (status, json) =
        common::post_empty(app, &format!("/api/v1/sessions/{session_id}/reset")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["view"], "search");
    assert!(json["location"].is_null());
    assert!(json["tour"].is_null());
}

#[tokio::test]
async fn test_unknown_session_returns_404() {
    let app = common::build_test_app();
    let session_id = Uuid::new_v4();

    let (status, json) = common::get_json(app, &format!("/api/v1/sessions/{session_id}")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session_not_found");
}

#[tokio::test]
async fn test_ended_session_is_gone() {
    // Arrange
    let app = common::build_test_app();
    let session_id = common::create_session(&app).await;
    let uri = format!("/api/v1/sessions/{session_id}");

    // Act
    let status = common::delete(app.clone(), &uri).await;

    // Assert
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, json) = common::get_json(app.clone(), &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session_not_found");
    assert_eq!(common::delete(app, &uri).await, StatusCode::NOT_FOUND);
}
