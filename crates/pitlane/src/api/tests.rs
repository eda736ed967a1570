use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use super::{router, AppState};
use crate::config::PaginationConfig;
use crate::storage::fixtures;

fn app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pitlane.db");
    fixtures::seeded_file(&path);
    let app = router(AppState::new(path, PaginationConfig::default()));
    (dir, app)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn ids(body: &Value, key: &str) -> Vec<i64> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row[key].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_index_lists_resources() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["car-parts"], "/car-parts");
    assert_eq!(body["work-orders"], "/work-orders");
}

#[tokio::test]
async fn test_list_envelope() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/teams").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert!(body["next"].is_null());
    assert!(body["previous"].is_null());
    assert_eq!(body["results"][0]["name"], "Scuderia Rossa");
}

#[tokio::test]
async fn test_pagination_links() {
    let (_dir, app) = app();

    let (_, first) = get(&app, "/teams?page_size=1").await;
    assert_eq!(first["count"], 2);
    assert_eq!(first["next"], "/teams?page_size=1&page=2");
    assert!(first["previous"].is_null());

    let (_, second) = get(&app, "/teams?page_size=1&page=2").await;
    assert!(second["next"].is_null());
    assert_eq!(second["previous"], "/teams?page_size=1");
    assert_eq!(second["results"][0]["name"], "Silver Arrows");
}

#[tokio::test]
async fn test_page_past_the_end_is_not_found() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/teams?page=3&page_size=1").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "invalid page: 3");
}

#[tokio::test]
async fn test_empty_first_page_is_valid() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/cars?team=999").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn test_malformed_parameters_are_bad_requests() {
    let (_dir, app) = app();

    for uri in [
        "/cars?team=abc",
        "/cars?ordering=chassis_number",
        "/car-parts?is_active=maybe",
        "/teams?page=0",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["detail"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_unknown_parameters_are_ignored() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/cars?colour=red&status=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_car_filters_search_and_ordering() {
    let (_dir, app) = app();

    let (_, body) = get(&app, "/cars?team=1&status=active").await;
    assert_eq!(ids(&body, "car_id"), vec![1]);
    assert_eq!(body["results"][0]["team_name"], "Scuderia Rossa");
    assert_eq!(body["results"][0]["team"], 1);

    let (_, body) = get(&app, "/cars?search=w15").await;
    assert_eq!(ids(&body, "car_id"), vec![3]);

    let (_, body) = get(&app, "/cars?ordering=-car_number").await;
    assert_eq!(ids(&body, "car_id"), vec![2, 3, 1]);
}

#[tokio::test]
async fn test_part_lifecycle_fields() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/parts").await;
    assert_eq!(status, StatusCode::OK);
    let parts = body["results"].as_array().unwrap();

    assert_eq!(parts[0]["lifecycle_percentage"], json!(85.0));
    assert_eq!(parts[0]["needs_replacement"], true);
    assert_eq!(parts[0]["current_mileage"], 850);

    assert_eq!(parts[1]["lifecycle_percentage"], json!(79.9));
    assert_eq!(parts[1]["needs_replacement"], false);

    assert!(parts[2]["lifecycle_percentage"].is_null());
    assert_eq!(parts[2]["needs_replacement"], false);
    assert_eq!(parts[2]["is_installed"], true);

    assert_eq!(parts[3]["lifecycle_percentage"], json!(0.0));
    assert_eq!(parts[3]["is_installed"], false);
    assert!(parts[3]["current_mileage"].is_null());

    assert_eq!(parts[4]["lifecycle_percentage"], json!(0.0));
    assert_eq!(parts[4]["is_installed"], true);
    assert!(parts[4]["current_mileage"].is_null());
}

#[tokio::test]
async fn test_part_detail() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/parts/2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["serial_number"], "PU-001");
    assert_eq!(body["lifecycle_percentage"], json!(79.9));
    assert_eq!(body["lifecycle_status"], "warning");
}

#[tokio::test]
async fn test_part_substring_filter() {
    let (_dir, app) = app();
    let (_, body) = get(&app, "/parts?manufacturer=XTR").await;

    assert_eq!(ids(&body, "part_id"), vec![1, 4]);
}

#[tokio::test]
async fn test_lifecycle_warnings_is_plain_array() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/parts/lifecycle-warnings").await;

    assert_eq!(status, StatusCode::OK);
    let warnings = body.as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["part_id"], 1);
    assert_eq!(warnings[0]["needs_replacement"], true);
}

#[tokio::test]
async fn test_car_parts_is_active_filter() {
    let (_dir, app) = app();

    let (_, active) = get(&app, "/car-parts?is_active=true").await;
    assert_eq!(ids(&active, "car_part_id"), vec![1, 2, 3, 5]);
    for row in active["results"].as_array().unwrap() {
        assert!(row["removed_at"].is_null());
        assert_eq!(row["is_active"], true);
    }

    let (_, removed) = get(&app, "/car-parts?is_active=false").await;
    assert_eq!(ids(&removed, "car_part_id"), vec![4]);
}

#[tokio::test]
async fn test_active_car_parts_endpoint() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/car-parts/active").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 4);
}

#[tokio::test]
async fn test_car_parts_by_car_newest_first() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/car-parts/by-car/2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body, "car_part_id"), vec![3, 4]);
    assert!(body["results"]
        .as_array()
        .unwrap()
        .iter()
        .all(|row| row["car"] == 2));
}

#[tokio::test]
async fn test_historical_installation_percentage() {
    let (_dir, app) = app();
    let (_, body) = get(&app, "/car-parts?part=4").await;

    let row = &body["results"][0];
    assert_eq!(row["lifecycle_percentage"], json!(95.0));
    assert_eq!(row["is_active"], false);
}

#[tokio::test]
async fn test_car_part_detail_nests_car_and_part() {
    let (_dir, app) = app();
    let (status, body) = get(&app, "/car-parts/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chassis_number"], "SF-24-01");
    assert_eq!(body["car_details"]["car_id"], 1);
    assert_eq!(body["car_details"]["team_name"], "Scuderia Rossa");
    assert_eq!(body["part_details"]["serial_number"], "GB-001");
    assert_eq!(body["part_details"]["needs_replacement"], true);
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let (_dir, app) = app();

    for uri in [
        "/teams/99",
        "/people/99",
        "/garages/99",
        "/garage-bays/99",
        "/cars/99",
        "/parts/99",
        "/car-parts/99",
        "/sessions/99",
        "/car-sessions/99",
        "/telemetry-sessions/99",
        "/work-orders/99",
        "/work-assignments/99",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["detail"].as_str().unwrap().ends_with("99 not found"));
    }
}

#[tokio::test]
async fn test_people_carry_full_name() {
    let (_dir, app) = app();
    let (_, body) = get(&app, "/people?team=1&ordering=last_name").await;

    assert_eq!(body["count"], 2);
    assert_eq!(body["results"][0]["full_name"], "Juan Fangio");
    assert_eq!(body["results"][1]["full_name"], "Ada Lovelace");
}

#[tokio::test]
async fn test_garage_detail_includes_bays() {
    let (_dir, app) = app();
    let (_, body) = get(&app, "/garages/1").await;

    let bays = body["bays"].as_array().unwrap();
    assert_eq!(bays.len(), 2);
    assert_eq!(bays[1]["is_active"], false);
}

#[tokio::test]
async fn test_garage_bays_active_flag() {
    let (_dir, app) = app();
    let (_, body) = get(&app, "/garage-bays?is_active=true").await;

    assert_eq!(ids(&body, "bay_id"), vec![1, 3]);
}

#[tokio::test]
async fn test_sessions_and_car_sessions() {
    let (_dir, app) = app();

    let (_, sessions) = get(&app, "/sessions?session_type=R").await;
    assert_eq!(ids(&sessions, "session_id"), vec![2]);
    assert_eq!(sessions["results"][0]["session_date"], "2024-09-01");

    let (_, car_sessions) = get(&app, "/car-sessions?car=3").await;
    assert_eq!(car_sessions["count"], 1);
    assert!(car_sessions["results"][0]["bay"].is_null());
    assert_eq!(car_sessions["results"][0]["race_name"], "British Grand Prix");
}

#[tokio::test]
async fn test_work_orders_with_assignments() {
    let (_dir, app) = app();

    let (_, open) = get(&app, "/work-orders?is_completed=false").await;
    assert_eq!(ids(&open, "work_order_id"), vec![1]);
    assert_eq!(open["results"][0]["assignments"].as_array().unwrap().len(), 2);

    let (_, lead) = get(&app, "/work-assignments?role=Lead").await;
    assert_eq!(lead["count"], 2);
    assert_eq!(lead["results"][0]["person_name"], "Juan Fangio");
}

#[tokio::test]
async fn test_telemetry_sessions() {
    let (_dir, app) = app();
    let (_, body) = get(&app, "/telemetry-sessions?car_session=2").await;

    assert_eq!(ids(&body, "telemetry_id"), vec![2]);
    assert!(body["results"][0]["end_time"].is_null());
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(AppState::new(
        dir.path().join("missing.db"),
        PaginationConfig::default(),
    ));
    let (status, body) = get(&app, "/teams").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "internal server error");
}
