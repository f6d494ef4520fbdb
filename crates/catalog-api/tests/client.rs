use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use catalog_api::{Credentials, MarvelClient};
use catalog_core::{CatalogError, ControllerSettings, ListingView, Page, PageRequest, Phase, VisibilitySignal};
use catalog_domain::{Character, Comic, ItemKind, Listing};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use tokio::net::TcpListener;

const TOTAL_CHARACTERS: u32 = 30;

fn character(id: u32) -> Value {
    json!({
        "id": id,
        "name": format!("Character {}", id),
        "description": "",
        "thumbnail": {"path": format!("http://img.test/{}", id), "extension": "jpg"}
    })
}

fn authorized(params: &HashMap<String, String>) -> bool {
    let Some(ts) = params.get("ts") else {
        return false;
    };
    let expected = Credentials::new("public", "private").hash(ts);
    params.get("apikey").map(String::as_str) == Some("public")
        && params.get("hash") == Some(&expected)
}

async fn comic_characters(
    Path(comic_id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if !authorized(&params) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": "InvalidCredentials", "message": "bad hash"})),
        );
    }
    if comic_id != 82967 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"code": 404, "status": "We couldn't find that comic_issue"})),
        );
    }
    let offset: u32 = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: u32 = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);
    let end = (offset + limit).min(TOTAL_CHARACTERS);
    let results: Vec<Value> = (offset.min(end)..end).map(character).collect();
    (
        StatusCode::OK,
        Json(json!({
            "code": 200,
            "status": "Ok",
            "data": {
                "offset": offset,
                "limit": limit,
                "total": TOTAL_CHARACTERS,
                "count": results.len(),
                "results": results
            }
        })),
    )
}

async fn comic_detail(Path(comic_id): Path<u64>) -> impl IntoResponse {
    Json(json!({
        "code": 200,
        "status": "Ok",
        "data": {
            "offset": 0, "limit": 20, "total": 1, "count": 1,
            "results": [{
                "id": comic_id,
                "title": "Marvel Previews (2017)",
                "description": null,
                "thumbnail": {"path": "http://img.test/previews", "extension": "jpg"}
            }]
        }
    }))
}

async fn unavailable() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable")
}

async fn garbage() -> impl IntoResponse {
    (StatusCode::OK, "not json")
}

async fn spawn_api_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/v1/public/comics/:id/characters", get(comic_characters))
        .route("/v1/public/comics/:id", get(comic_detail))
        .route("/v1/public/events/:id/characters", get(unavailable))
        .route("/v1/public/characters", get(garbage));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}/v1/public", addr)
}

fn client(base_url: &str, private_key: &str) -> MarvelClient {
    MarvelClient::new(
        base_url,
        Credentials::new("public", private_key),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetch_page_signs_and_decodes() {
    let base_url = spawn_api_server().await;
    let client = client(&base_url, "private");

    let page: Page<Character> = client
        .fetch_page(Listing::ComicCharacters(82967), PageRequest::new(14, 14))
        .await
        .unwrap();

    assert_eq!(page.offset, 14);
    assert_eq!(page.total, TOTAL_CHARACTERS);
    assert_eq!(page.results.len(), 14);
    assert_eq!(page.results[0].id, 14);
    assert!(page.results[0].description.is_none());
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let base_url = spawn_api_server().await;
    let client = client(&base_url, "wrong");

    let err = client
        .fetch_page::<Character>(Listing::ComicCharacters(82967), PageRequest::new(0, 14))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Unauthorized(ref m) if m.contains("InvalidCredentials")));
}

#[tokio::test]
async fn test_unknown_comic_is_not_found() {
    let base_url = spawn_api_server().await;
    let client = client(&base_url, "private");

    let err = client
        .fetch_page::<Character>(Listing::ComicCharacters(1), PageRequest::new(0, 14))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_error_is_retryable_network_error() {
    let base_url = spawn_api_server().await;
    let client = client(&base_url, "private");

    let err = client
        .fetch_page::<Character>(Listing::EventCharacters(116), PageRequest::new(0, 14))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Network(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let base_url = spawn_api_server().await;
    let client = client(&base_url, "private");

    let err = client
        .fetch_page::<Character>(Listing::Characters, PageRequest::new(0, 14))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Serialization(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{}/v1/public", addr), "private");
    let err = client
        .fetch_page::<Character>(Listing::Characters, PageRequest::new(0, 14))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Network(_)));
}

#[tokio::test]
async fn test_limit_is_validated_before_sending() {
    let client = client("http://127.0.0.1:9", "private");
    let err = client
        .fetch_page::<Character>(Listing::Characters, PageRequest::new(0, 101))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[tokio::test]
async fn test_fetch_detail() {
    let base_url = spawn_api_server().await;
    let client = client(&base_url, "private");

    let comic: Comic = client.fetch_detail(82967).await.unwrap();
    assert_eq!(comic.id, 82967);
    assert_eq!(comic.title, "Marvel Previews (2017)");
}

#[tokio::test]
async fn test_fetch_header_for_sub_listing() {
    let base_url = spawn_api_server().await;
    let client = client(&base_url, "private");

    let header = client
        .fetch_header(Listing::ComicCharacters(82967))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(header.kind, ItemKind::Comic);
    assert_eq!(header.id, 82967);
    assert_eq!(header.title, "Marvel Previews (2017)");
    assert!(header.description.is_none());
    assert_eq!(
        header.banner.as_deref(),
        Some("http://img.test/previews/portrait_uncanny.jpg")
    );
}

#[tokio::test]
async fn test_top_level_listing_has_no_header() {
    // nothing listens here; a request would fail
    let client = client("http://127.0.0.1:9/v1/public", "private");
    let header = client.fetch_header(Listing::Characters).await.unwrap();
    assert!(header.is_none());
}

#[tokio::test]
async fn test_listing_view_scrolls_through_api() {
    let base_url = spawn_api_server().await;
    let client = client(&base_url, "private");
    let source = client
        .listing::<Character>(Listing::ComicCharacters(82967))
        .unwrap();

    let first_page = source.first_page(14).await.unwrap();
    let view = ListingView::mount(first_page, source, ControllerSettings::default()).unwrap();

    for _ in 0..4 {
        view.signal(VisibilitySignal::visible(1.0)).unwrap();
        view.settle().await.unwrap();
    }

    let snapshot = view.unmount().await;
    assert_eq!(snapshot.items.len(), TOTAL_CHARACTERS as usize);
    assert_eq!(snapshot.offset, TOTAL_CHARACTERS);
    let ids: Vec<u64> = snapshot.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, (0..TOTAL_CHARACTERS as u64).collect::<Vec<_>>());
    assert_eq!(snapshot.phase, Phase::TornDown);
}
