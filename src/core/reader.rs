// Dialect-tolerant CSV reader for CAN capture exports

use crate::core::compression::decompress;
use crate::core::config::DecodeConfig;
use crate::core::constants::*;
use crate::core::error::{CanLogError, Result};
use crate::core::format::{RawRow, RowTable};
use csv::ReaderBuilder;
use tracing::debug;

/// Why a single dialect did not fit the file.
type Mismatch = String;

#[derive(Debug, Clone)]
pub struct CaptureReader {
    header_rows: usize,
    dialects: Vec<Dialect>,
}

impl CaptureReader {
    pub fn from_config(config: &DecodeConfig) -> Self {
        Self {
            header_rows: config.header_rows,
            dialects: config.dialects.clone(),
        }
    }

    pub fn with_dialects(mut self, dialects: Vec<Dialect>) -> Self {
        self.dialects = dialects;
        self
    }

    /// Parses raw capture bytes with the first dialect that fits.
    ///
    /// Short rows (footers, error frames) are kept with empty trailing
    /// columns; a dialect fits when no row is too wide and at least one row
    /// reaches Data (hex).
    pub fn read(&self, raw: &[u8]) -> Result<RowTable> {
        let raw = decompress(raw)?;

        let text = std::str::from_utf8(&raw).map_err(|e| CanLogError::UnparseableFile {
            attempts: vec![format!("input is not valid UTF-8: {}", e)],
        })?;
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        let body = skip_lines(text, self.header_rows);

        let mut attempts = Vec::with_capacity(self.dialects.len());

        for &dialect in &self.dialects {
            let parsed = match dialect.delimiter() {
                Some(delimiter) => self.parse_delimited(body, delimiter),
                None => self.parse_whitespace(body),
            };

            match parsed {
                Ok(rows) if rows.is_empty() => {
                    attempts.push(format!("{}: no data rows", dialect.name()));
                }
                Ok(rows) => {
                    debug!("Parsed {} rows with {} delimiter", rows.len(), dialect.name());
                    return Ok(RowTable { dialect, rows });
                }
                Err(reason) => {
                    debug!("{} delimiter rejected: {}", dialect.name(), reason);
                    attempts.push(format!("{}: {}", dialect.name(), reason));
                }
            }
        }

        Err(CanLogError::UnparseableFile { attempts })
    }

    fn parse_delimited(&self, body: &str, delimiter: u8) -> std::result::Result<Vec<RawRow>, Mismatch> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(body.as_bytes());

        let mut rows = Vec::new();
        let mut complete = 0;

        for record in reader.records() {
            let record = record.map_err(|e| e.to_string())?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let line = self.header_rows
                + record.position().map(|p| p.line() as usize).unwrap_or(0);
            let fields: Vec<&str> = record.iter().collect();
            if fields.len() > DATA_COLUMN {
                complete += 1;
            }
            rows.push(build_row(&fields, line)?);
        }

        require_payload_column(rows, complete)
    }

    // The payload bytes share the delimiter with the columns, so DLC decides
    // how many tokens belong to Data (hex).
    fn parse_whitespace(&self, body: &str) -> std::result::Result<Vec<RawRow>, Mismatch> {
        let mut rows = Vec::new();
        let mut complete = 0;

        for (idx, line) in body.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            let line_no = self.header_rows + idx + 1;
            let dlc = tokens
                .get(DLC_COLUMN)
                .and_then(|token| token.parse::<usize>().ok())
                .filter(|dlc| *dlc <= MAX_DLC);

            // Without a usable DLC the payload cannot be located; keep the
            // leading columns only.
            let Some(dlc) = dlc.filter(|_| tokens.len() > DATA_COLUMN) else {
                let leading = &tokens[..tokens.len().min(DATA_COLUMN)];
                rows.push(build_row(leading, line_no)?);
                continue;
            };

            let data_end = (DATA_COLUMN + dlc).min(tokens.len());
            let data = tokens[DATA_COLUMN..data_end].join(" ");
            let ascii = tokens[data_end..].join(" ");

            let mut fields: Vec<&str> = tokens[..DATA_COLUMN].to_vec();
            fields.push(&data);
            fields.push(&ascii);
            complete += 1;
            rows.push(build_row(&fields, line_no)?);
        }

        require_payload_column(rows, complete)
    }
}

impl Default for CaptureReader {
    fn default() -> Self {
        Self {
            header_rows: HEADER_ROWS_TO_SKIP,
            dialects: Dialect::TRIAL_ORDER.to_vec(),
        }
    }
}

/// Drops the first `n` physical lines.
fn skip_lines(text: &str, n: usize) -> &str {
    if n == 0 {
        return text;
    }
    match text.match_indices('\n').nth(n - 1) {
        Some((idx, _)) => &text[idx + 1..],
        None => "",
    }
}

fn build_row(fields: &[&str], line: usize) -> std::result::Result<RawRow, Mismatch> {
    if fields.len() > COLUMN_COUNT {
        return Err(format!(
            "line {} has {} fields, expected at most {}",
            line,
            fields.len(),
            COLUMN_COUNT
        ));
    }

    let row: [String; COLUMN_COUNT] =
        std::array::from_fn(|idx| fields.get(idx).map(|f| f.to_string()).unwrap_or_default());
    Ok(RawRow::new(row))
}

fn require_payload_column(
    rows: Vec<RawRow>,
    complete: usize,
) -> std::result::Result<Vec<RawRow>, Mismatch> {
    if !rows.is_empty() && complete == 0 {
        return Err(format!("no row reaches column {}", COLUMNS[DATA_COLUMN]));
    }
    Ok(rows)
}
