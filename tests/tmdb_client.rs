//! TMDB client integration tests.
//!
//! Starts an axum stub of the TMDB endpoints and exercises the client with
//! real HTTP.

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::get,
};
use movie_studio::catalog::{
    CatalogDataSource, CatalogError, ImageSize, MovieSource, OnFailure, Page, TimeWindow,
    TmdbClient, TmdbCredentials, sample_movies,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const API_KEY: &str = "test-key";
const TOKEN: &str = "test-token";

type Params = Query<HashMap<String, String>>;
type Reply = (StatusCode, Json<Value>);

fn authorized(params: &HashMap<String, String>, headers: &HeaderMap) -> bool {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    bearer || params.get("api_key").is_some_and(|k| k == API_KEY)
}

fn unauthorized() -> Reply {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "status_code": 7, "status_message": "Invalid API key" })),
    )
}

fn page(results: Value) -> Value {
    json!({ "page": 1, "total_pages": 1, "total_results": 2, "results": results })
}

async fn popular(Query(params): Params, headers: HeaderMap) -> Reply {
    if !authorized(&params, &headers) {
        return unauthorized();
    }
    let language = params.get("language").cloned().unwrap_or_default();
    (
        StatusCode::OK,
        Json(page(json!([
            {
                "id": 238,
                "title": "The Godfather",
                "release_date": "1972-03-14",
                "poster_path": "/godfather.jpg",
                "overview": language,
                "vote_average": 8.69,
                "genre_ids": [18, 80]
            },
            {
                "id": 999,
                "title": "Untitled",
                "release_date": "",
                "vote_average": null
            }
        ]))),
    )
}

async fn trending(Path(window): Path<String>, Query(params): Params, headers: HeaderMap) -> Reply {
    if !authorized(&params, &headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(page(json!([{ "id": 1, "title": format!("Trending {window}") }]))),
    )
}

async fn discover(Query(params): Params, headers: HeaderMap) -> Reply {
    if !authorized(&params, &headers) {
        return unauthorized();
    }
    let title = match (params.get("with_genres"), params.get("primary_release_date.gte")) {
        (Some(genre), _) => format!("Genre {genre}"),
        (None, Some(from)) => format!(
            "Released {}..{} sorted {}",
            from,
            params.get("primary_release_date.lte").cloned().unwrap_or_default(),
            params.get("sort_by").cloned().unwrap_or_default()
        ),
        (None, None) => "Unfiltered".to_string(),
    };
    (StatusCode::OK, Json(page(json!([{ "id": 2, "title": title }]))))
}

async fn search(Query(params): Params, headers: HeaderMap) -> Reply {
    if !authorized(&params, &headers) {
        return unauthorized();
    }
    let query = params.get("query").cloned().unwrap_or_default();
    (StatusCode::OK, Json(page(json!([{ "id": 3, "title": query }]))))
}

async fn genres(Query(params): Params, headers: HeaderMap) -> Reply {
    if !authorized(&params, &headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({ "genres": [
            { "id": 28, "name": "Action" },
            { "id": 35, "name": "Comedy" }
        ]})),
    )
}

async fn detail(Path(id): Path<i64>, Query(params): Params, headers: HeaderMap) -> Reply {
    if !authorized(&params, &headers) {
        return unauthorized();
    }
    if id != 550 || params.get("append_to_response").map(String::as_str) != Some("videos,credits")
    {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "status_code": 34, "status_message": "The resource you requested could not be found." })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": 550,
            "title": "Fight Club",
            "tagline": "Mischief. Mayhem. Soap.",
            "overview": "An insomniac office worker...",
            "release_date": "1999-10-15",
            "runtime": 139,
            "vote_average": 8.4,
            "budget": 63000000,
            "revenue": 100853753,
            "genres": [{ "id": 18, "name": "Drama" }],
            "production_companies": [{ "id": 508, "name": "Regency Enterprises", "logo_path": null }],
            "videos": { "results": [
                { "id": "v1", "key": "BdJKm16Co6M", "name": "Trailer", "site": "YouTube", "type": "Trailer" }
            ]},
            "credits": {
                "cast": [
                    { "id": 819, "name": "Edward Norton", "character": "The Narrator", "profile_path": null },
                    { "id": 287, "name": "Brad Pitt", "character": "Tyler Durden", "profile_path": null }
                ],
                "crew": [
                    { "id": 7467, "name": "David Fincher", "job": "Director", "department": "Directing", "profile_path": null }
                ]
            }
        })),
    )
}

async fn broken() -> Reply {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "status_message": "down for maintenance" })),
    )
}

fn stub_api() -> Router {
    Router::new()
        .route("/3/movie/popular", get(popular))
        .route("/3/trending/movie/{window}", get(trending))
        .route("/3/discover/movie", get(discover))
        .route("/3/search/movie", get(search))
        .route("/3/genre/movie/list", get(genres))
        .route("/3/movie/{id}", get(detail))
}

fn broken_api() -> Router {
    Router::new().fallback(broken)
}

/// Bind to port 0 and return the API base URL.
async fn start_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/3")
}

fn client(base: &str, credentials: TmdbCredentials) -> TmdbClient {
    TmdbClient::with_base_url(base, credentials, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn popular_with_api_key() {
    let base = start_server(stub_api()).await;
    let tmdb = client(&base, TmdbCredentials::ApiKey(API_KEY.into())).with_language("de-DE");

    let movies = tmdb.popular(1).await.unwrap();
    assert_eq!(movies.len(), 2);

    let godfather = &movies[0];
    assert_eq!(godfather.id, 238);
    assert_eq!(godfather.release_year(), Some(1972));
    assert_eq!(godfather.rating_label(), "8.7");
    assert_eq!(godfather.genre_ids, vec![18, 80]);
    assert_eq!(godfather.overview, "de-DE");

    let untitled = &movies[1];
    assert_eq!(untitled.release_date, None);
    assert_eq!(untitled.rating, 0.0);
    assert!(untitled.poster_path.is_none());
}

#[tokio::test]
async fn bearer_token_authenticates() {
    let base = start_server(stub_api()).await;
    let tmdb = client(&base, TmdbCredentials::AccessToken(TOKEN.into()));

    let genres = tmdb.genres().await.unwrap();
    let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Action", "Comedy"]);
}

#[tokio::test]
async fn bad_credentials_are_api_errors() {
    let base = start_server(stub_api()).await;
    let tmdb = client(&base, TmdbCredentials::ApiKey("wrong".into()));

    match tmdb.popular(1).await {
        Err(CatalogError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn detail_decodes_credits_and_videos() {
    let base = start_server(stub_api()).await;
    let tmdb = client(&base, TmdbCredentials::ApiKey(API_KEY.into()));

    let detail = tmdb.detail(550).await.unwrap();
    assert_eq!(detail.id(), 550);
    assert_eq!(detail.runtime_minutes, 139);
    assert_eq!(detail.tagline.as_deref(), Some("Mischief. Mayhem. Soap."));
    assert_eq!(detail.director().map(|d| d.name.as_str()), Some("David Fincher"));
    assert_eq!(detail.top_cast(1)[0].name, "Edward Norton");
    assert_eq!(detail.trailer().map(|v| v.key.as_str()), Some("BdJKm16Co6M"));
    assert_eq!(detail.production_companies[0].name, "Regency Enterprises");

    let err = tmdb.detail(1).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn query_parameters_reach_the_api() {
    let base = start_server(stub_api()).await;
    let tmdb = client(&base, TmdbCredentials::ApiKey(API_KEY.into()));

    let found = tmdb.search("blade runner", 1).await.unwrap();
    assert_eq!(found[0].title, "blade runner");

    let by_genre = tmdb.by_genre(28, 1).await.unwrap();
    assert_eq!(by_genre[0].title, "Genre 28");

    let from = chrono::NaiveDate::from_ymd_opt(2026, 8, 19).unwrap();
    let to = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let released = tmdb.released_between(from, to, 1).await.unwrap();
    assert_eq!(
        released[0].title,
        "Released 2026-08-19..2026-10-19 sorted release_date.desc"
    );

    let trending = tmdb.trending(TimeWindow::Day).await.unwrap();
    assert_eq!(trending[0].title, "Trending day");
}

#[tokio::test]
async fn data_source_falls_back_when_api_is_down() {
    let base = start_server(broken_api()).await;
    let tmdb = Arc::new(client(&base, TmdbCredentials::ApiKey(API_KEY.into())));

    let fallback = CatalogDataSource::new(tmdb.clone());
    assert_eq!(fallback.fetch_popular(Page::FIRST).await.unwrap(), sample_movies());
    assert_eq!(fallback.fetch_detail(42).await.unwrap().id(), 42);

    let strict = CatalogDataSource::new(tmdb).with_policy(OnFailure::Propagate);
    assert!(matches!(
        strict.fetch_trending(TimeWindow::Week).await,
        Err(CatalogError::Api { status: 503, .. })
    ));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let tmdb = client(
        &format!("http://{addr}/3"),
        TmdbCredentials::ApiKey(API_KEY.into()),
    );
    assert!(matches!(tmdb.popular(1).await, Err(CatalogError::Network(_))));
}

#[test]
fn image_urls() {
    let tmdb = TmdbClient::new(TmdbCredentials::ApiKey(API_KEY.into())).unwrap();
    assert_eq!(
        tmdb.image_url(Some("/poster.jpg"), ImageSize::PosterMedium).as_deref(),
        Some("https://image.tmdb.org/t/p/w342/poster.jpg")
    );
    assert!(tmdb.image_url(None, ImageSize::Original).is_none());
}
