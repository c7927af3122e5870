use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use canlog_reader::{CanLogError, CaptureInput, DecodeConfig, FileResult, ResultCache, SampleSeries};

#[derive(Clone)]
pub struct SignalInfo {
    pub series: Arc<SampleSeries>,
    pub file_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadedFile {
    pub id: String,
    pub name: String,
    pub path: String,
    pub signal: String,
    pub samples: usize,
}

/// Why a capture was not turned into a signal.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub name: String,
    pub path: String,
    pub kind: &'static str,
    pub reason: String,
}

impl Rejection {
    fn new(name: &str, path: &str, err: &CanLogError) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: err.kind(),
            reason: err.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    // Maps unique signal name -> decoded series
    pub signals: Arc<RwLock<HashMap<String, SignalInfo>>>,
    pub files: Arc<RwLock<Vec<LoadedFile>>>,
    pub cache: Arc<Mutex<ResultCache>>,
    pub decode: Arc<DecodeConfig>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(DecodeConfig::default())
    }

    pub fn with_config(decode: DecodeConfig) -> Self {
        Self {
            signals: Arc::new(RwLock::new(HashMap::new())),
            files: Arc::new(RwLock::new(Vec::new())),
            cache: Arc::new(Mutex::new(ResultCache::new())),
            decode: Arc::new(decode),
        }
    }

    /// Reads, decodes and registers one capture file.
    pub async fn load_capture(&self, path: &str) -> Result<LoadedFile, Rejection> {
        let name = file_name(path);

        let contents = tokio::fs::read(path).await.map_err(|e| {
            let err = CanLogError::from(e);
            warn!("Failed to read {}: {}", path, err);
            Rejection::new(&name, path, &err)
        })?;

        let result = {
            let mut cache = self.cache.lock().await;
            cache.get_or_process(CaptureInput::new(&name, &contents), &self.decode)
        };

        let series = match &*result {
            FileResult::Samples(series) => Arc::new(series.clone()),
            FileResult::Empty { reason, .. } => return Err(Rejection::new(&name, path, reason)),
        };

        Ok(self.register(series, path).await)
    }

    /// Loads up to `max_files` captures; one failure never blocks the rest.
    pub async fn load_batch(&self, paths: &[String]) -> Vec<Result<LoadedFile, Rejection>> {
        if paths.len() > self.decode.max_files {
            warn!(
                "{} files requested, only the first {} are loaded",
                paths.len(),
                self.decode.max_files
            );
        }

        let mut reports = Vec::new();
        for path in paths.iter().take(self.decode.max_files) {
            reports.push(self.load_capture(path).await);
        }
        reports
    }

    async fn register(&self, series: Arc<SampleSeries>, path: &str) -> LoadedFile {
        let file_id = uuid::Uuid::new_v4().to_string();

        let signal = {
            let mut signals = self.signals.write().await;
            let name = unique_name(&*signals, &signal_base_name(&series.file_name));
            signals.insert(
                name.clone(),
                SignalInfo {
                    series: series.clone(),
                    file_id: file_id.clone(),
                },
            );
            name
        };

        info!("Register signal: {} ({} samples)", signal, series.len());

        let loaded = LoadedFile {
            id: file_id,
            name: series.file_name.clone(),
            path: path.to_string(),
            signal,
            samples: series.len(),
        };
        self.files.write().await.push(loaded.clone());
        loaded
    }

    pub async fn series(&self, signal: &str) -> Option<Arc<SampleSeries>> {
        self.signals.read().await.get(signal).map(|info| info.series.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

fn signal_base_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".gz").unwrap_or(file_name);
    let stem = stem.strip_suffix(".csv").unwrap_or(stem);
    format!("{}_pressure", stem)
}

// Appends _1, _2, ... until the name is free.
fn unique_name<V>(taken: &HashMap<String, V>, base: &str) -> String {
    if !taken.contains_key(base) {
        return base.to_string();
    }
    (1..)
        .map(|i| format!("{}_{}", base, i))
        .find(|candidate| !taken.contains_key(candidate))
        .unwrap_or_else(|| base.to_string())
}
