use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Catalog, Fixtures, MovieDetails, POSTER_FILE};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- popular ---

#[tokio::test]
async fn popular_lists_fixtures_in_order() {
    let resp = app().oneshot(get("/popular")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let catalog: Catalog = body_json(resp).await;
    let ids: Vec<i64> = catalog.results.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![42, 7]);
}

#[tokio::test]
async fn popular_serves_custom_fixtures() {
    let mut fixtures = Fixtures::default();
    fixtures.popular.retain(|m| m.id == 7);
    fixtures.details.clear();
    let router = app_with(fixtures);

    let resp = router.clone().oneshot(get("/popular")).await.unwrap();
    let catalog: Catalog = body_json(resp).await;
    let ids: Vec<i64> = catalog.results.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![7]);

    let resp = router.oneshot(get("/movie/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- details ---

#[tokio::test]
async fn movie_details_found() {
    let resp = app().oneshot(get("/movie/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let details: MovieDetails = body_json(resp).await;
    assert_eq!(details.title, "The Answer");
    assert_eq!(details.runtime, Some(125));
    assert_eq!(details.genres.map(|g| g.len()), Some(2));
}

#[tokio::test]
async fn movie_details_not_found() {
    let resp = app().oneshot(get("/movie/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn movie_details_bad_id_returns_400() {
    let resp = app().oneshot(get("/movie/forty-two")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- poster ---

#[tokio::test]
async fn poster_is_served_as_png() {
    let resp = app()
        .oneshot(get(&format!("/poster/{POSTER_FILE}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = body_bytes(resp).await;
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn unknown_poster_returns_404() {
    let resp = app().oneshot(get("/poster/missing.png")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- broken ---

#[tokio::test]
async fn broken_returns_ok_with_wrong_shape() {
    let resp = app().oneshot(get("/broken")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["results"].is_string());
}
