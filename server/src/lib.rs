use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use comicdex_core::{Catalog, DocId, Document, TermPolicy};
use comicdex_crawler::ComicSource;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct LookupParams {
    pub term: String,
    /// Overrides the server's default term policy for this request.
    #[serde(default)]
    pub policy: Option<TermPolicy>,
}

#[derive(Serialize)]
pub struct LookupResponse {
    pub term: String,
    pub total_hits: usize,
    pub results: Vec<LookupHit>,
}

#[derive(Serialize)]
pub struct LookupHit {
    pub id: DocId,
    pub url: String,
    pub title: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub published: Option<String>,
}

/// Everything a request needs. The catalog is never mutated once the server starts.
pub struct AppState {
    pub catalog: Catalog,
    pub source: ComicSource,
    pub term_policy: TermPolicy,
}

type ApiError = (StatusCode, Json<Value>);

pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/lookup", get(lookup_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default.
fn cors_layer() -> CorsLayer {
    let origins: Vec<_> = std::env::var("CORS_ALLOW_ORIGIN")
        .map(|val| val.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub async fn lookup_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> Result<Json<LookupResponse>, ApiError> {
    let policy = params.policy.unwrap_or(state.term_policy);
    let Some(hits) = state.catalog.search(&params.term, policy) else {
        return Err((StatusCode::NOT_FOUND, Json(json!({ "term": params.term, "error": "not found" }))));
    };
    let results: Vec<LookupHit> = hits.into_iter().map(|doc| to_hit(&state.source, doc)).collect();
    Ok(Json(LookupResponse { term: params.term, total_hits: results.len(), results }))
}

pub async fn doc_handler(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<Document>, ApiError> {
    match state.catalog.collection().get(doc_id) {
        Some(doc) => Ok(Json(doc.clone())),
        None => Err((StatusCode::NOT_FOUND, Json(json!({ "doc_id": doc_id, "error": "not found" })))),
    }
}

fn to_hit(source: &ComicSource, doc: &Document) -> LookupHit {
    LookupHit {
        id: doc.id,
        url: source.permalink(doc.id).to_string(),
        title: doc.raw_title.clone(),
        year: doc.year.clone(),
        month: doc.month.clone(),
        day: doc.day.clone(),
        published: doc.published().map(|d| d.to_string()),
    }
}
