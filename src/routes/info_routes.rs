use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};

use serde::Serialize;
use tokio::fs;
use tracing::{debug, error};

use crate::state::app_state::AppState;
use canlog_reader::core::constants::PLOT_Y_CEILING;

pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health_check))
        .route("/info", get(info_check))
        .route("/decode", get(decode_settings))
        .route("/stop", get(stop_process))
        .with_state(state)
}

async fn index_page() -> Response {
    fs::read_to_string("data/index.html")
        .await
        .map(Html)
        .map(IntoResponse::into_response)
        .unwrap_or_else(|e| {
            error!("Index.html read error: {}", e);
            StatusCode::NOT_FOUND.into_response()
        })
}

pub async fn info_check() -> Response {
    let config = crate::utils::conf_helper::get_cached_config();

    debug!("{} requested", config.name);
    Json(config).into_response()
}

#[derive(Serialize)]
pub struct HealthStatus {
    status: String,
    signals: usize,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_owned(),
        signals: state.signals.read().await.len(),
    })
}

#[derive(Serialize)]
pub struct DecodeSettings {
    target_id: String,
    byte_offset: usize,
    full_scale: f64,
    physical_factor: f64,
    header_rows: usize,
    dialects: Vec<&'static str>,
    max_files: usize,
    unit: &'static str,
    y_ceiling: f64,
}

/// Fixed decode constants, so the host can label axes.
async fn decode_settings(State(state): State<AppState>) -> Json<DecodeSettings> {
    let decode = &state.decode;
    Json(DecodeSettings {
        target_id: decode.normalized_target(),
        byte_offset: decode.byte_offset,
        full_scale: decode.full_scale,
        physical_factor: decode.physical_factor(),
        header_rows: decode.header_rows,
        dialects: decode.dialects.iter().map(|d| d.name()).collect(),
        max_files: decode.max_files,
        unit: "bar",
        y_ceiling: PLOT_Y_CEILING,
    })
}

async fn stop_process() -> impl IntoResponse {
    error!("Stop endpoint called, shutting down process");

    // give the log line time to flush
    tokio::spawn(async {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        std::process::exit(0);
    });

    StatusCode::OK
}
