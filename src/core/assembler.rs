// Result assembly: drop incomplete rows, keep source order

use crate::core::error::CanLogError;
use crate::core::format::{DecodedSample, FileResult, SampleSeries};

/// Builds the per-file result from `(elapsed_seconds, value)` pairs.
pub fn assemble<I>(rows: I, file_name: &str) -> FileResult
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    let samples: Vec<DecodedSample> = rows
        .into_iter()
        .filter_map(|(elapsed, value)| {
            Some(DecodedSample {
                elapsed_seconds: elapsed?,
                value: value?,
            })
        })
        .collect();

    if samples.is_empty() {
        return FileResult::Empty {
            file_name: file_name.to_string(),
            reason: CanLogError::EmptyAfterConversion,
        };
    }

    FileResult::Samples(SampleSeries {
        file_name: file_name.to_string(),
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_missing_and_keeps_order() {
        let rows = vec![
            (Some(3.0), Some(10.0)),
            (None, Some(11.0)),
            (Some(1.0), None),
            (Some(0.0), Some(12.0)),
            (Some(2.0), Some(13.0)),
        ];
        let result = assemble(rows.clone(), "run.csv");
        let series = result.samples().expect("samples");

        assert!(series.len() <= rows.len());
        let pairs: Vec<(f64, f64)> = series
            .samples
            .iter()
            .map(|s| (s.elapsed_seconds, s.value))
            .collect();
        assert_eq!(pairs, vec![(3.0, 10.0), (0.0, 12.0), (2.0, 13.0)]);
        assert_eq!(series.file_name, "run.csv");
    }

    #[test]
    fn test_all_missing_is_empty() {
        let result = assemble(vec![(None, Some(1.0)), (Some(0.0), None)], "bad.csv");
        assert_eq!(result.file_name(), "bad.csv");
        assert!(matches!(
            result.reason(),
            Some(CanLogError::EmptyAfterConversion)
        ));
        assert_eq!(
            result.reason().map(|e| e.to_string()).as_deref(),
            Some("no valid samples after conversion")
        );
    }
}
