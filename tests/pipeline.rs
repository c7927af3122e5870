use canlog_reader::core::constants::PLOT_Y_CEILING;
use canlog_reader::{
    process_batch, process_capture, AxisRange, CanLogError, CaptureInput, DecodeConfig, Dialect,
    FileResult,
};

const HEADER: &str = "PCAN-View trace\n\
                      Start time: 2024-05-02 10:14:03\n\
                      Connection: PCAN-USB 500 kbit/s\n\
                      ----------------------------------------\n\
                      Bus,No,Time,State,ID (hex),DLC,Data (hex),ASCII\n";

fn capture(rows: &[&str]) -> Vec<u8> {
    let mut text = HEADER.to_string();
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text.into_bytes()
}

fn pairs(result: &FileResult) -> Vec<(f64, f64)> {
    result
        .samples()
        .expect("expected samples")
        .samples
        .iter()
        .map(|s| (s.elapsed_seconds, s.value))
        .collect()
}

#[test]
fn single_matching_row_decodes_to_full_scale() {
    let raw = capture(&["1,17,01:02.250,Rx, 295 ,3,10 FF 20,..."]);
    let result = process_capture(CaptureInput::new("trace.csv", &raw), &DecodeConfig::default());

    assert_eq!(pairs(&result), vec![(0.0, 200.0)]);
    assert_eq!(result.file_name(), "trace.csv");
}

#[test]
fn mixed_identifiers_keep_row_order() {
    let raw = capture(&[
        "1,1,05:10.500,Rx,295,8,00 80 00 00 00 00 00 00,........",
        "1,2,05:10.250,Rx,1A0,8,00 FF 00 00 00 00 00 00,........",
        "1,3,05:10.000,Rx,295,8,00 00 00 00 00 00 00 00,........",
        "1,4,05:11.000,Rx,295,8,00 FF 00 00 00 00 00 00,........",
    ]);
    let result = process_capture(CaptureInput::new("run.csv", &raw), &DecodeConfig::default());
    let got = pairs(&result);

    let elapsed: Vec<f64> = got.iter().map(|p| p.0).collect();
    assert_eq!(elapsed, vec![0.5, 0.0, 1.0]);
    assert!((got[0].1 - 128.0 * 200.0 / 255.0).abs() < 1e-12);
    assert_eq!(got[1].1, 0.0);
    assert_eq!(got[2].1, 200.0);
}

#[test]
fn malformed_rows_are_dropped_not_fatal() {
    let raw = capture(&[
        "1,1,00:01.000,Rx,295,2,00 40,..",
        "1,2,garbage,Rx,295,2,00 40,..",
        "1,3,00:02.000,Rx,295,1,00,.",
        "1,4,00:03.000,Rx,295,2,00 G1,..",
        "1,5,00:04.000,Rx,295,2,00 FF,..",
    ]);
    let result = process_capture(CaptureInput::new("noisy.csv", &raw), &DecodeConfig::default());
    let got = pairs(&result);

    assert_eq!(got.len(), 2);
    assert_eq!(got[0].0, 0.0);
    assert_eq!(got[1], (3.0, 200.0));
}

#[test]
fn trailing_footer_does_not_reject_capture() {
    let raw = capture(&[
        "1,1,00:01.000,Rx,295,3,10 FF 20,...",
        "1,2,00:02.000,Rx,295,3,10 00 20,...",
        "End of trace",
    ]);
    let result = process_capture(CaptureInput::new("footer.csv", &raw), &DecodeConfig::default());
    assert_eq!(pairs(&result), vec![(0.0, 200.0), (1.0, 0.0)]);
}

#[test]
fn error_frame_rows_are_skipped() {
    let raw = capture(&[
        "1,1,00:01.000,Rx,295,3,10 FF 20,...",
        "1,2,00:01.500,Error,,0",
        "1,3,00:02.000,Rx,295,3,10 00 20,...",
    ]);
    let result = process_capture(CaptureInput::new("errors.csv", &raw), &DecodeConfig::default());
    assert_eq!(pairs(&result), vec![(0.0, 200.0), (1.0, 0.0)]);
}

#[test]
fn no_matching_identifier_is_reported() {
    let raw = capture(&["1,1,00:01.000,Rx,296,2,00 40,..", "1,2,00:02.000,Rx,2950,2,00 40,.."]);
    let result = process_capture(CaptureInput::new("other.csv", &raw), &DecodeConfig::default());

    let reason = result.reason().expect("expected rejection");
    assert!(matches!(reason, CanLogError::NoMatchingMessages { .. }));
    assert!(reason.to_string().starts_with("no matching identifier"));
}

#[test]
fn hour_bearing_timestamps_are_unsupported() {
    let raw = capture(&["1,1,10:14:03.000,Rx,295,2,00 40,.."]);
    let result = process_capture(CaptureInput::new("hours.csv", &raw), &DecodeConfig::default());

    assert!(matches!(result.reason(), Some(CanLogError::TimeConversionFailure)));
    assert_eq!(result.reason().unwrap().to_string(), "time conversion failed");
}

#[test]
fn whitespace_capture_is_read() {
    let raw = capture(&[
        "1    1  00:00.100  Rx  295  3  10 FF 20  . . .",
        "1    2  00:00.600  Rx  295  3  10 00 20  . . .",
    ]);
    let result = process_capture(CaptureInput::new("ws.txt", &raw), &DecodeConfig::default());
    assert_eq!(pairs(&result), vec![(0.0, 200.0), (0.5, 0.0)]);
}

#[test]
fn batch_continues_after_unparseable_file() {
    let good = capture(&["1,1,00:01.000,Rx,295,2,00 FF,.."]);
    let bad = capture(&["this is not a capture"]);
    let none = capture(&["1,1,00:01.000,Rx,100,2,00 FF,.."]);

    let inputs = [
        CaptureInput::new("bad.csv", &bad),
        CaptureInput::new("good.csv", &good),
        CaptureInput::new("none.csv", &none),
    ];
    let results = process_batch(&inputs, &DecodeConfig::default());

    assert_eq!(results.len(), 3);
    assert!(matches!(
        results[0].reason(),
        Some(CanLogError::UnparseableFile { .. })
    ));
    assert_eq!(pairs(&results[1]), vec![(0.0, 200.0)]);
    assert!(matches!(
        results[2].reason(),
        Some(CanLogError::NoMatchingMessages { .. })
    ));
}

#[test]
fn reader_prefers_comma_over_other_dialects() {
    let raw = capture(&["1,1,00:01.000,Rx,295,2,00 FF,.."]);
    let table = canlog_reader::CaptureReader::default().read(&raw).unwrap();
    assert_eq!(table.dialect, Dialect::Comma);
}

#[test]
fn overlay_range_spans_all_series() {
    let a = capture(&["1,1,00:01.000,Rx,295,2,00 FF,..", "1,2,00:03.000,Rx,295,2,00 FF,.."]);
    let b = capture(&["1,1,00:05.000,Rx,295,2,00 FF,..", "1,2,00:15.000,Rx,295,2,00 FF,.."]);
    let results = process_batch(
        &[CaptureInput::new("a.csv", &a), CaptureInput::new("b.csv", &b)],
        &DecodeConfig::default(),
    );

    let range = AxisRange::overlay(results.iter().filter_map(FileResult::samples));
    assert_eq!((range.x_min, range.x_max), (0.0, 10.0));
    assert_eq!(range.x_step, 0.1);
    assert_eq!(range.y_max, PLOT_Y_CEILING);
}
