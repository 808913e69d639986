use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use comicdex_core::{Catalog, Collection, Document, TermPolicy};
use comicdex_crawler::ComicSource;
use comicdex_server::{build_app, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn build_tiny_app(term_policy: TermPolicy) -> Router {
    let collection = Collection::from_documents(vec![
        Document::new(1, "https://xkcd.com/1/info.0.json", "Cat Dog", "").with_date("2006", "1", "1"),
        Document::new(2, "https://xkcd.com/2/info.0.json", "Petit Trees", "[[The dog runs.]] Alt: sketch")
            .with_date("2006", "1", "1"),
    ]);
    let state = AppState {
        catalog: Catalog::build(collection),
        source: ComicSource::new("https://xkcd.com").unwrap(),
        term_policy,
    };
    build_app(Arc::new(state))
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn lookup_returns_matches_in_id_order() {
    let (status, json) = call(build_tiny_app(TermPolicy::Verbatim), "/lookup?term=dog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 2);
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr[0]["id"], 1);
    assert_eq!(arr[0]["url"], "https://xkcd.com/1/");
    assert_eq!(arr[0]["title"], "Cat Dog");
    assert_eq!(arr[0]["published"], "2006-01-01");
    assert_eq!(arr[1]["id"], 2);
}

#[tokio::test]
async fn unknown_term_is_not_found() {
    let (status, json) = call(build_tiny_app(TermPolicy::Verbatim), "/lookup?term=fish").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not found");
}

#[tokio::test]
async fn term_policy_controls_case_folding() {
    let (status, _) = call(build_tiny_app(TermPolicy::Verbatim), "/lookup?term=Dog").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = call(build_tiny_app(TermPolicy::Verbatim), "/lookup?term=Dog&policy=normalized").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 2);

    let (status, _) = call(build_tiny_app(TermPolicy::Normalized), "/lookup?term=TREES").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn doc_endpoint_exposes_tokens() {
    let (status, json) = call(build_tiny_app(TermPolicy::Verbatim), "/doc/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["raw_title"], "Petit Trees");
    let tokens: Vec<&str> = json["transcript_tokens"].as_array().unwrap().iter().filter_map(|v| v.as_str()).collect();
    assert_eq!(tokens, vec!["the", "dog", "runs", "sketch"]);

    let (status, _) = call(build_tiny_app(TermPolicy::Verbatim), "/doc/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_is_ok() {
    let app = build_tiny_app(TermPolicy::Verbatim);
    let resp = app.oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
