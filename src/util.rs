// All rounding goes through here: half away from zero, which for the
// non-negative values the engine produces is the same as half up.
pub fn round_to_int(val: f64) -> i32 {
    val.round() as i32
}

// `weight * min(count, cap)`. Counts are already validated non-negative.
pub fn capped_linear(count: i64, weight: i32, cap: i64) -> i32 {
    let capped = count.min(cap);
    i32::try_from(capped).unwrap_or(i32::MAX).saturating_mul(weight)
}

// `asymptote * (1 - base^n)`. Grows with diminishing returns and stays below the
// asymptote for every finite n while base^n is representable.
pub fn saturating_value(asymptote: f64, base: f64, n: i64) -> f64 {
    let exponent = i32::try_from(n).unwrap_or(i32::MAX);
    asymptote * (1.0 - base.powi(exponent))
}

pub fn saturating_score(asymptote: i32, base: f64, n: i64) -> i32 {
    round_to_int(saturating_value(f64::from(asymptote), base, n))
}

pub fn sum_scores(scores: impl IntoIterator<Item = i32>) -> i32 {
    let mut sum: i32 = 0;
    for s in scores { sum = sum.saturating_add(s) }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to_int(6.5), 7);
        assert_eq!(round_to_int(6.49), 6);
        assert_eq!(round_to_int(0.5), 1);
    }

    #[test]
    fn capped_linear_stops_at_cap() {
        assert_eq!(capped_linear(7, 10, 50), 70);
        assert_eq!(capped_linear(50, 10, 50), 500);
        assert_eq!(capped_linear(i64::MAX, 10, 50), 500);
    }

    #[test]
    fn saturating_value_stays_below_asymptote() {
        let mut prev = saturating_value(1000.0, 0.98, 0);
        assert_eq!(prev, 0.0);
        for n in 1..500 {
            let v = saturating_value(1000.0, 0.98, n);
            assert!(v > prev);
            assert!(v < 1000.0);
            prev = v;
        }
    }

    #[test]
    fn saturating_score_known_points() {
        assert_eq!(saturating_score(1000, 0.98, 1), 20);
        assert_eq!(saturating_score(100, 0.9, 1), 10);
        assert_eq!(saturating_score(1000, 0.98, 0), 0);
    }
}
