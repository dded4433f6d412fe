//! Sentiment-to-probability conversion.
//!
//! A linear rescaling of compound sentiment onto P(YES). There is no
//! calibration against resolved markets.

/// Map sentiment in [-1, 1] to an implied YES probability in [0, 1].
pub fn est_yes_prob(sentiment: f64) -> f64 {
    ((sentiment + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Edge for each side given the estimate and the market's YES price.
///
/// Returns `(edge_yes, edge_no)`. The two are negatives of each other, so at
/// most one can exceed a positive threshold.
pub fn side_edges(est_yes: f64, market_yes: f64) -> (f64, f64) {
    let edge_yes = est_yes - market_yes;
    let edge_no = (1.0 - est_yes) - (1.0 - market_yes);
    (edge_yes, edge_no)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(est_yes_prob(-1.0), 0.0);
        assert_eq!(est_yes_prob(0.0), 0.5);
        assert_eq!(est_yes_prob(1.0), 1.0);
    }

    #[test]
    fn test_bounded_and_monotone() {
        let mut prev = est_yes_prob(-1.0);
        for step in 0..=200 {
            let s = -1.0 + step as f64 * 0.01;
            let p = est_yes_prob(s);
            assert!((0.0..=1.0).contains(&p), "p={} out of range for s={}", p, s);
            assert!(p >= prev, "not monotone at s={}", s);
            prev = p;
        }
    }

    #[test]
    fn test_out_of_range_input_clamped() {
        assert_eq!(est_yes_prob(-3.0), 0.0);
        assert_eq!(est_yes_prob(2.5), 1.0);
    }

    #[test]
    fn test_side_edges() {
        let (yes, no) = side_edges(0.5, 0.3);
        assert!((yes - 0.2).abs() < 1e-9);
        assert!((no + 0.2).abs() < 1e-9);

        let (yes, no) = side_edges(0.5, 0.7);
        assert!((yes + 0.2).abs() < 1e-9);
        assert!((no - 0.2).abs() < 1e-9);
    }
}
