// Per-file decode pipeline, batch driver and result cache

use crate::core::assembler::assemble;
use crate::core::config::DecodeConfig;
use crate::core::constants::RESULT_CACHE_CAPACITY;
use crate::core::decoder::decode_pressure;
use crate::core::error::{CanLogError, Result};
use crate::core::filter::filter_by_id;
use crate::core::format::{FileResult, SampleSeries};
use crate::core::reader::CaptureReader;
use crate::core::timestamp::normalize_times;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct CaptureInput<'a> {
    pub name: &'a str,
    pub contents: &'a [u8],
}

impl<'a> CaptureInput<'a> {
    pub fn new(name: &'a str, contents: &'a [u8]) -> Self {
        Self { name, contents }
    }
}

/// Runs one capture end to end. Failures come back as `FileResult::Empty`.
pub fn process_capture(input: CaptureInput<'_>, config: &DecodeConfig) -> FileResult {
    match decode_series(input, config) {
        Ok(series) => {
            info!("{}: {} pressure samples", input.name, series.len());
            FileResult::Samples(series)
        }
        Err(reason) => {
            warn!("{}: {}", input.name, reason);
            FileResult::Empty {
                file_name: input.name.to_string(),
                reason,
            }
        }
    }
}

fn decode_series(input: CaptureInput<'_>, config: &DecodeConfig) -> Result<SampleSeries> {
    let table = CaptureReader::from_config(config).read(input.contents)?;
    info!(
        "{}: loaded {} rows using {} delimiter",
        input.name,
        table.len(),
        table.dialect.name()
    );

    let filtered = filter_by_id(&table, &config.target_id);
    if filtered.is_empty() {
        return Err(CanLogError::NoMatchingMessages {
            target: config.normalized_target(),
        });
    }

    let times: Vec<&str> = filtered.rows.iter().map(|row| row.time()).collect();
    let elapsed = normalize_times(&times);
    if elapsed.iter().all(Option::is_none) {
        return Err(CanLogError::TimeConversionFailure);
    }

    let values = filtered
        .rows
        .iter()
        .map(|row| decode_pressure(row.data(), config));

    match assemble(elapsed.into_iter().zip(values), input.name) {
        FileResult::Samples(series) => Ok(series),
        FileResult::Empty { reason, .. } => Err(reason),
    }
}

/// Processes at most `config.max_files` captures, each independently.
pub fn process_batch(inputs: &[CaptureInput<'_>], config: &DecodeConfig) -> Vec<FileResult> {
    if inputs.len() > config.max_files {
        warn!(
            "{} files supplied, only the first {} are processed",
            inputs.len(),
            config.max_files
        );
    }

    inputs
        .iter()
        .take(config.max_files)
        .map(|input| process_capture(*input, config))
        .collect()
}

type CacheKey = (String, String);

/// Memoizes results by file name and content digest, evicting the oldest
/// entry once `capacity` is reached.
#[derive(Debug)]
pub struct ResultCache {
    entries: HashMap<CacheKey, Arc<FileResult>>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::with_capacity(RESULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get_or_process(&mut self, input: CaptureInput<'_>, config: &DecodeConfig) -> Arc<FileResult> {
        let key = (input.name.to_string(), content_digest(input.contents));
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }

        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            debug!("Evicting cached result for {}", oldest.0);
            self.entries.remove(&oldest);
        }

        let result = Arc::new(process_capture(input, config));
        self.order.push_back(key.clone());
        self.entries.insert(key, result.clone());
        result
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

pub fn content_digest(contents: &[u8]) -> String {
    blake3::hash(contents).to_hex().to_string()
}
