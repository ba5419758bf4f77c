//! Human-readable formatting helpers for screen rendering.

/// Compact byte count (e.g., "245M", "1.2G").
///
/// Gigabytes keep one rounded decimal; smaller units truncate to whole
/// multiples, which is plenty for a dashboard cell.
pub fn fmt_bytes_short(bytes: u64) -> String {
    const K: u64 = 1_000;
    const M: u64 = 1_000_000;
    const G: u64 = 1_000_000_000;

    if bytes >= G {
        let tenths = bytes.saturating_add(G / 20) / (G / 10);
        format!("{}.{}G", tenths / 10, tenths % 10)
    } else if bytes >= M {
        format!("{}M", bytes / M)
    } else if bytes >= K {
        format!("{}K", bytes / K)
    } else {
        format!("{bytes}B")
    }
}

/// Usage percentage, 0 when the total is unknown.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn pct(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}

/// Split a gauge of `width` cells into `(filled, empty)` rune strings.
/// The caller styles the two halves independently.
pub fn fmt_pct_bar(pct: f64, width: u16) -> (String, String) {
    let cells = usize::from(width);
    let portion = (pct.clamp(0.0, 100.0) / 100.0 * f64::from(width)).round();
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    let filled = (portion as usize).min(cells);
    ("█".repeat(filled), "░".repeat(cells - filled))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bytes_pick_the_right_unit() {
        assert_eq!(fmt_bytes_short(512), "512B");
        assert_eq!(fmt_bytes_short(2_048), "2K");
        assert_eq!(fmt_bytes_short(5_000_000), "5M");
        assert_eq!(fmt_bytes_short(1_200_000_000), "1.2G");
    }

    #[test]
    fn gigabytes_round_to_one_decimal() {
        assert_eq!(fmt_bytes_short(1_950_000_000), "2.0G");
        assert_eq!(fmt_bytes_short(1_940_000_000), "1.9G");
    }

    #[test]
    fn pct_handles_zero_total() {
        assert!((pct(0, 0)).abs() < f64::EPSILON);
        assert!((pct(25, 100) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pct_bar_spans_the_requested_width() {
        let (filled, empty) = fmt_pct_bar(50.0, 10);
        assert_eq!(filled.chars().count(), 5);
        assert_eq!(empty.chars().count(), 5);

        let (filled, empty) = fmt_pct_bar(150.0, 8);
        assert_eq!(filled.chars().count(), 8);
        assert!(empty.is_empty());

        let (filled, empty) = fmt_pct_bar(-5.0, 8);
        assert!(filled.is_empty());
        assert_eq!(empty.chars().count(), 8);
    }
}
