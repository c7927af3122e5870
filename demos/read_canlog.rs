// Decode up to three CAN captures from the command line and report each one

use canlog_reader::{process_batch, AxisRange, CaptureInput, DecodeConfig, FileResult, Result};
use tracing::{debug, info, warn, Level};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        warn!("usage: read_canlog <capture.csv> [capture.csv ...]");
        return Ok(());
    }

    let config = DecodeConfig::default();

    let mut loaded = Vec::with_capacity(paths.len());
    for path in &paths {
        let name = std::path::Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        loaded.push((name, std::fs::read(path)?));
    }

    let inputs: Vec<CaptureInput<'_>> = loaded
        .iter()
        .map(|(name, contents)| CaptureInput::new(name, contents))
        .collect();

    let results = process_batch(&inputs, &config);

    for (idx, result) in results.iter().enumerate() {
        match result {
            FileResult::Samples(series) => {
                let range = AxisRange::for_series(series);
                info!("Graph {}: {}", idx + 1, series.display_name());
                info!("  Samples: {}", series.len());
                info!(
                    "  X range: {:.3}..{:.3} s (step {:.3})",
                    range.x_min, range.x_max, range.x_step
                );
                if let Some(first) = series.samples.first() {
                    debug!("  First: t={} p={:.2} bar", first.elapsed_seconds, first.value);
                }
            }
            FileResult::Empty { file_name, reason } => {
                warn!("File {} ({}): {}", idx + 1, file_name, reason);
            }
        }
    }

    let overlay = AxisRange::overlay(results.iter().filter_map(FileResult::samples));
    info!(
        "Overlay X range: {:.3}..{:.3} s, Y range: {}..{} bar",
        overlay.x_min, overlay.x_max, overlay.y_min, overlay.y_max
    );

    Ok(())
}
