// Bus-relative timestamp normalization

use chrono::NaiveTime;

/// Parses a `mm:ss[.ffffff]` capture time as a time of day with zero hours.
///
/// Three-field `hh:mm:ss` strings are not accepted.
pub fn parse_capture_time(raw: &str) -> Option<NaiveTime> {
    let (minutes, rest) = raw.trim().split_once(':')?;

    let (seconds, fraction) = match rest.split_once('.') {
        Some((secs, frac)) => (secs, Some(frac)),
        None => (rest, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(minutes) || !all_digits(seconds) {
        return None;
    }
    if let Some(frac) = fraction {
        if !frac.is_empty() && !all_digits(frac) {
            return None;
        }
    }

    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    let nanos = fraction.map(fraction_to_nanos).unwrap_or(0);

    // rejects minutes or seconds >= 60
    NaiveTime::from_hms_nano_opt(0, minutes, seconds, nanos)
}

// Digits past nanosecond precision are dropped.
fn fraction_to_nanos(frac: &str) -> u32 {
    let digits: String = frac.chars().take(9).collect();
    if digits.is_empty() {
        return 0;
    }
    let scale = 10u32.pow(9 - digits.len() as u32);
    digits.parse::<u32>().map(|v| v * scale).unwrap_or(0)
}

/// Elapsed seconds from the earliest parsable time, row order preserved.
pub fn normalize_times<S: AsRef<str>>(times: &[S]) -> Vec<Option<f64>> {
    let parsed: Vec<Option<NaiveTime>> = times
        .iter()
        .map(|t| parse_capture_time(t.as_ref()))
        .collect();

    let Some(origin) = parsed.iter().flatten().min().copied() else {
        return vec![None; times.len()];
    };

    parsed
        .into_iter()
        .map(|t| {
            t.and_then(|t| (t - origin).num_nanoseconds())
                .map(|nanos| nanos as f64 / 1e9)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_keeps_row_order() {
        let elapsed = normalize_times(&["05:10.500", "05:10.000", "05:11.000"]);
        assert_eq!(elapsed, vec![Some(0.5), Some(0.0), Some(1.0)]);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(
            parse_capture_time(" 01:02.250 "),
            NaiveTime::from_hms_milli_opt(0, 1, 2, 250)
        );
        assert_eq!(
            parse_capture_time("1:2"),
            NaiveTime::from_hms_opt(0, 1, 2)
        );
        assert_eq!(
            parse_capture_time("00:03.123456"),
            NaiveTime::from_hms_micro_opt(0, 0, 3, 123_456)
        );
        assert_eq!(
            parse_capture_time("00:03."),
            NaiveTime::from_hms_opt(0, 0, 3)
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse_capture_time(""), None);
        assert_eq!(parse_capture_time("nan"), None);
        assert_eq!(parse_capture_time("12.5"), None);
        assert_eq!(parse_capture_time("01:02:03.000"), None);
        assert_eq!(parse_capture_time("61:00.000"), None);
        assert_eq!(parse_capture_time("01:75.000"), None);
        assert_eq!(parse_capture_time("-1:02.000"), None);
        assert_eq!(parse_capture_time("01:02.5x"), None);
    }

    #[test]
    fn test_bad_rows_stay_missing() {
        let elapsed = normalize_times(&["00:02.000", "bogus", "00:01.000"]);
        assert_eq!(elapsed, vec![Some(1.0), None, Some(0.0)]);
    }

    #[test]
    fn test_all_bad_rows() {
        let elapsed = normalize_times(&["a", "b:c"]);
        assert_eq!(elapsed, vec![None, None]);
        assert!(normalize_times::<&str>(&[]).is_empty());
    }
}
