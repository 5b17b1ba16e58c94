/// Format seconds as `MM:SS`.
///
/// Minutes are not folded into hours, so an hour reads `60:00`.
/// Negative and non-finite input is clamped to zero.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{:02}:{:02}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(3599.0), "59:59");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn test_fractions_are_floored() {
        assert_eq!(format_time(59.999), "00:59");
        assert_eq!(format_time(90.5), "01:30");
    }

    #[test]
    fn test_large_values_keep_counting_minutes() {
        assert_eq!(format_time(6000.0 * 60.0 + 7.0), "6000:07");
    }

    #[test]
    fn test_out_of_range_input_clamps_to_zero() {
        assert_eq!(format_time(-5.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
        assert_eq!(format_time(f64::NEG_INFINITY), "00:00");
    }
}
