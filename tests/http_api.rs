use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use mietradar::app::{AppSession, RemoteStatus, REMOTE_FAILURE_MESSAGE};
use mietradar::models::{ListingRow, Origin};
use mietradar::server::{router, AppState};
use mietradar::sources::{ApiListingSource, ListingSource, MemoryRowStore};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

fn row(id: i64, district: Option<&str>) -> ListingRow {
    ListingRow {
        id,
        address: format!("Teststraße {}", id),
        district: district.map(str::to_string),
        area: 40.0 + id as f64,
        cold_rent: 1000.0 + id as f64,
        warm_rent: Some(1200.0 + id as f64),
        created_at: Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap(),
    }
}

fn state(store: MemoryRowStore) -> Arc<AppState> {
    Arc::new(AppState::new(Arc::new(store)))
}

async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn spawn_backend(store: MemoryRowStore) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state(store));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn listings_endpoint_returns_rows_with_column_names() {
    let store = MemoryRowStore::new(vec![row(1, Some("Laim")), row(2, None)]);
    let (status, body) = get_json(state(store), "/api/wohnungen").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[0]["adresse"], "Teststraße 1");
    assert_eq!(rows[0]["stadtteil"], "Laim");
    assert_eq!(rows[0]["kaltmiete"], 1001.0);
    assert!(rows[1]["stadtteil"].is_null());
    assert!(rows[0].get("created_at").is_some());
}

#[tokio::test]
async fn listings_endpoint_caps_row_count() {
    let rows = (1..=60).map(|id| row(id, Some("Hadern"))).collect();
    let (status, body) = get_json(state(MemoryRowStore::new(rows)), "/api/wohnungen").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn listings_endpoint_hides_database_errors() {
    let store = MemoryRowStore::unavailable("password authentication failed");
    let (status, body) = get_json(state(store), "/api/wohnungen").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Fehler beim Laden der Wohnungen");
}

#[tokio::test]
async fn test_db_reports_clock_or_error() {
    let (status, body) = get_json(state(MemoryRowStore::default()), "/api/test-db").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body["time"].is_string());

    let (status, body) = get_json(state(MemoryRowStore::unavailable("timeout")), "/api/test-db").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "timeout");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = router(state(MemoryRowStore::default()))
        .oneshot(Request::builder().uri("/api/nothing").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn client_maps_backend_rows_into_listings() {
    let addr = spawn_backend(MemoryRowStore::new(vec![row(5, Some("Moosach")), row(6, None)])).await;
    let source = ApiListingSource::new(format!("http://{}", addr)).unwrap();

    let listings = source.fetch().await.unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].id, 100_005);
    assert_eq!(listings[0].district, "Moosach");
    assert_eq!(listings[0].price, 1005);
    assert_eq!(listings[0].additional_costs, 200);
    assert_eq!(listings[0].origin, Origin::Database);
    assert_eq!(listings[1].district, "München");
}

#[tokio::test]
async fn client_reports_server_errors() {
    let addr = spawn_backend(MemoryRowStore::unavailable("down")).await;
    let source = ApiListingSource::new(format!("http://{}", addr)).unwrap();

    let err = source.fetch().await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn session_degrades_when_backend_is_unreachable() {
    // grab a free port and release it again so nothing listens there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = ApiListingSource::new(format!("http://{}", addr)).unwrap();
    let mut app = AppSession::new(Vec::new());
    let status = app.load_remote(&source).await.clone();

    assert_eq!(status, RemoteStatus::Failed(REMOTE_FAILURE_MESSAGE.to_string()));
    assert!(app.remote_listings().is_empty());
}

#[tokio::test]
async fn session_merges_backend_listings_into_search() {
    let addr = spawn_backend(MemoryRowStore::new(vec![row(1, Some("Trudering-Riem"))])).await;
    let source = ApiListingSource::new(format!("http://{}", addr)).unwrap();

    let mut app = AppSession::new(Vec::new());
    assert_eq!(app.load_remote(&source).await, &RemoteStatus::Loaded(1));
    assert_eq!(app.merge_remote(), 1);

    app.criteria_mut().query = "trudering".to_string();
    let visible = app.visible_listings();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, 100_001);
}
