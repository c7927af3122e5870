use axum::extract::ws::{Message, WebSocket};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::format::SampleSeries;

#[derive(Serialize)]
struct SignalPayload {
    timestamp: f64,
    value: f64,
    desc: String,
    seq: u64,
    end_flag: bool,
}

/// Streams a decoded series sample by sample, in row order, then an end marker.
pub async fn handle_ws_fetch(mut socket: WebSocket, series: Arc<SampleSeries>, signal_name: String) {
    info!("ws_fetch streaming started: {} ({} samples)", signal_name, series.len());

    let mut seq: u64 = 0;

    for sample in &series.samples {
        let payload = SignalPayload {
            timestamp: sample.elapsed_seconds,
            value: sample.value,
            desc: String::new(),
            seq,
            end_flag: false,
        };

        let json = match serde_json::to_string(&payload) {
            Ok(j) => j,
            Err(e) => {
                error!("json serialize error: {}", e);
                return;
            }
        };

        if let Err(e) = socket.send(Message::Text(json.into())).await {
            warn!("ws send failed: {}", e);
            return;
        }

        seq += 1;
    }

    let end_payload = SignalPayload {
        timestamp: 0.0,
        value: 0.0,
        desc: series.display_name().to_string(),
        seq,
        end_flag: true,
    };

    if let Ok(json) = serde_json::to_string(&end_payload) {
        let _ = socket.send(Message::Text(json.into())).await;
    }

    info!("ws_fetch finished: {}", signal_name);
}
