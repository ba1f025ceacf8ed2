/// Format seconds as `MM:SS` for the overlay clock.
///
/// Minutes are not wrapped into hours (`4500s` renders as `75:00`).
/// Negative and non-finite inputs render as `00:00`.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(42.9), "00:42");
        assert_eq!(format_timestamp(61.0), "01:01");
        assert_eq!(format_timestamp(4500.0), "75:00");
    }

    #[test]
    fn test_format_timestamp_rejects_garbage() {
        assert_eq!(format_timestamp(-3.0), "00:00");
        assert_eq!(format_timestamp(f64::NAN), "00:00");
        assert_eq!(format_timestamp(f64::INFINITY), "00:00");
    }
}
