use axum::{
    extract::{ws::WebSocketUpgrade, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

use crate::state::app_state::{AppState, LoadedFile, Rejection};
use crate::utils::conf_helper::get_cached_config;
use canlog_reader::{handle_ws_fetch, AxisRange};

#[derive(Serialize)]
pub struct ReaderSummary {
    pub id: String,
    pub name: String,
    pub signals_count: usize,
    pub headers: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct FileReadRequest {
    pub mode: String, // "online" | "offline"
    pub path: String,
}

#[derive(Deserialize, Debug)]
pub struct BatchReadRequest {
    pub paths: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct FileReadResponse {
    pub id: String,
    pub name: String,
    pub path: String,
    pub source: String,
    pub headers: Option<Vec<String>>,
    pub desc: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: Option<String>,
    pub source_url: Option<String>,
}

impl From<LoadedFile> for FileReadResponse {
    fn from(loaded: LoadedFile) -> Self {
        Self {
            id: loaded.id,
            desc: Some(format!("{} pressure samples", loaded.samples)),
            name: loaded.name,
            source: loaded.path.clone(),
            path: loaded.path,
            headers: Some(vec![loaded.signal]),
            tags: Some(vec!["can".to_string(), "pressure".to_string()]),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            source_url: None,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchEntry {
    Loaded(FileReadResponse),
    Rejected(Rejection),
}

#[derive(Deserialize, Debug)]
pub struct RangeQuery {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

#[derive(Deserialize, Debug)]
pub struct OverlayQuery {
    #[serde(default)]
    pub signals: String,
}

#[derive(Serialize)]
pub struct OverlayResponse {
    pub signals: Vec<String>,
    pub range: AxisRange,
}

/// =======================
/// ROUTER
/// =======================

pub fn data_routes(state: AppState) -> Router {
    Router::new()
        .route("/read-file", post(read_file))
        .route("/read-files", post(read_files))
        .route("/fetch/{signal}", get(ws_fetch))
        .route("/signals/{signal}/range", get(signal_range))
        .route("/signals/{signal}/samples", get(signal_samples))
        .route("/overlay", get(overlay_range))
        .route("/readers", get(list_readers))
        .with_state(state)
}

/// =======================
/// HANDLERS
/// =======================

async fn read_file(
    State(state): State<AppState>,
    Json(request): Json<FileReadRequest>,
) -> Response {
    debug!("Reading file: mode={}, path={}", request.mode, request.path);

    if !get_cached_config().accepts(&request.path) {
        warn!("{} is not a listed file format, decoding anyway", request.path);
    }

    match state.load_capture(&request.path).await {
        Ok(loaded) => Json(FileReadResponse::from(loaded)).into_response(),
        Err(rejection) => {
            error!("Rejected {}: {}", rejection.path, rejection.reason);
            (StatusCode::UNPROCESSABLE_ENTITY, Json(rejection)).into_response()
        }
    }
}

async fn read_files(
    State(state): State<AppState>,
    Json(request): Json<BatchReadRequest>,
) -> Response {
    debug!("Reading {} files", request.paths.len());

    let entries: Vec<BatchEntry> = state
        .load_batch(&request.paths)
        .await
        .into_iter()
        .map(|report| match report {
            Ok(loaded) => BatchEntry::Loaded(loaded.into()),
            Err(rejection) => BatchEntry::Rejected(rejection),
        })
        .collect();

    Json(entries).into_response()
}

async fn ws_fetch(
    State(state): State<AppState>,
    Path(signal_name): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let Some(series) = state.series(&signal_name).await else {
        error!("Signal not found: {}", signal_name);
        return StatusCode::NOT_FOUND.into_response();
    };

    ws.on_upgrade(move |socket| handle_ws_fetch(socket, series, signal_name))
}

async fn signal_range(
    State(state): State<AppState>,
    Path(signal_name): Path<String>,
) -> Response {
    match state.series(&signal_name).await {
        Some(series) => Json(AxisRange::for_series(&series)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn signal_samples(
    State(state): State<AppState>,
    Path(signal_name): Path<String>,
    Query(range): Query<RangeQuery>,
) -> Response {
    let Some(series) = state.series(&signal_name).await else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let start = range.start.unwrap_or(f64::NEG_INFINITY);
    let end = range.end.unwrap_or(f64::INFINITY);
    Json(series.within(start, end)).into_response()
}

// Comma separated signal names; unknown names are skipped.
async fn overlay_range(
    State(state): State<AppState>,
    Query(query): Query<OverlayQuery>,
) -> impl IntoResponse {
    let mut selected = Vec::new();
    let mut names = Vec::new();

    for name in query.signals.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if let Some(series) = state.series(name).await {
            selected.push(series);
            names.push(name.to_string());
        }
    }

    Json(OverlayResponse {
        signals: names,
        range: AxisRange::overlay(selected.iter().map(|s| &**s)),
    })
}

async fn list_readers(State(state): State<AppState>) -> impl IntoResponse {
    let files = state.files.read().await;
    let signals = state.signals.read().await;

    let mut by_file: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (name, info) in signals.iter() {
        by_file.entry(info.file_id.as_str()).or_default().push(name.clone());
    }

    let out: Vec<ReaderSummary> = files
        .iter()
        .map(|file| {
            let mut headers = by_file.get(file.id.as_str()).cloned().unwrap_or_default();
            headers.sort();
            ReaderSummary {
                id: file.id.clone(),
                name: file.name.clone(),
                signals_count: headers.len(),
                headers,
            }
        })
        .collect();

    Json(out)
}
