//! Popularity and success score calculation
//!
//! Pure functions, no I/O. The Metrics Aggregator persists these scores onto
//! business rows; the Query Service recomputes them on the fly when it
//! annotates ranking results.

use chrono::NaiveDate;

const POPULARITY_CHECKIN_WEIGHT: f64 = 0.5;
const POPULARITY_REVIEW_WEIGHT: f64 = 0.5;

const SUCCESS_CHECKIN_WEIGHT: f64 = 0.4;
const SUCCESS_RATING_WEIGHT: f64 = 0.2;

/// Weighted blend of check-in count and review count, unnormalized.
///
/// Raw counts are blended directly, so businesses with larger absolute
/// volumes dominate regardless of context.
pub fn popularity_score(num_checkins: f64, review_count: f64) -> f64 {
    POPULARITY_CHECKIN_WEIGHT * num_checkins + POPULARITY_REVIEW_WEIGHT * review_count
}

/// Weighted blend of a saturating check-in-engagement indicator and the
/// normalized average review rating.
///
/// The check-in term saturates: `num_checkins / max(num_checkins, 1)` is 1.0
/// for any business with at least one check-in and 0.0 otherwise. That
/// saturation is part of the observable contract and must not be replaced
/// with a true ratio.
///
/// `last_review_date` is reserved for a recency term that is not applied;
/// callers pass it so the signature is stable if recency is ever added.
///
/// Result is always within `[0.0, 0.6]`. A business with no reviews has no
/// average rating; callers supply 0.0 in that case.
pub fn success_score(
    last_review_date: Option<NaiveDate>,
    avg_rating: f64,
    num_checkins: f64,
) -> f64 {
    let _ = last_review_date; // recency term reserved, unused

    let normalized_rating = avg_rating / 5.0;
    // max(n, 1) guards the denominator; never divides by zero
    let checkin_ratio = num_checkins / num_checkins.max(1.0);

    SUCCESS_CHECKIN_WEIGHT * checkin_ratio + SUCCESS_RATING_WEIGHT * normalized_rating
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popularity_score_exact_blend() {
        assert_eq!(popularity_score(10.0, 20.0), 15.0);
        assert_eq!(popularity_score(0.0, 0.0), 0.0);
        assert_eq!(popularity_score(7.0, 0.0), 3.5);
        assert_eq!(popularity_score(0.0, 1.0), 0.5);
    }

    #[test]
    fn test_checkin_term_saturates_at_one_checkin() {
        // Rating 0 isolates the check-in term
        assert_eq!(success_score(None, 0.0, 1.0), 0.4);
        assert_eq!(success_score(None, 0.0, 50.0), 0.4);
        assert_eq!(success_score(None, 0.0, 100_000.0), 0.4);
    }

    #[test]
    fn test_checkin_term_zero_without_checkins() {
        assert_eq!(success_score(None, 0.0, 0.0), 0.0);
        // Rating still contributes when check-ins are zero
        assert_eq!(success_score(None, 5.0, 0.0), 0.2);
    }

    #[test]
    fn test_success_score_bounds() {
        for checkins in [0i64, 1, 2, 10, 1_000, 5_000_000] {
            for rating_tenths in 0..=50 {
                let rating = rating_tenths as f64 / 10.0;
                let score = success_score(None, rating, checkins as f64);
                // 0.4 + 0.2 lands one ulp above 0.6 in f64, hence the slack
                assert!(
                    score >= 0.0 && score <= 0.6 + 1e-9,
                    "score {} out of range for checkins={} rating={}",
                    score,
                    checkins,
                    rating
                );
            }
        }
    }

    #[test]
    fn test_last_review_date_does_not_affect_score() {
        let old = NaiveDate::from_ymd_opt(2005, 1, 1);
        let recent = NaiveDate::from_ymd_opt(2024, 12, 31);
        assert_eq!(
            success_score(old, 4.0, 12.0),
            success_score(recent, 4.0, 12.0)
        );
        assert_eq!(success_score(None, 4.0, 12.0), success_score(old, 4.0, 12.0));
    }

    #[test]
    fn test_success_score_maximum() {
        // Five-star average with check-ins hits the ceiling
        let score = success_score(None, 5.0, 3.0);
        assert!((score - 0.6).abs() < 1e-9);
    }
}
