//! Per-night and per-player ratio formulas.
//!
//! Every ratio is `None` when its denominator is not positive. Callers must
//! leave such players out of rate-based rankings instead of ranking them last.

use crate::domain::{Cents, Eligibility};

pub fn to_major_units(cents: Cents) -> f64 {
    cents as f64 / 100.0
}

pub fn roi(profit: Cents, buy_in: Cents) -> Option<f64> {
    if buy_in <= 0 {
        return None;
    }
    Some(profit as f64 / buy_in as f64)
}

/// ROI scaled by the square root of the buy-in in major units
pub fn night_score(profit: Cents, buy_in: Cents) -> Option<f64> {
    roi(profit, buy_in).map(|r| r * to_major_units(buy_in).sqrt())
}

pub fn table_share(profit: Cents, night_pot: Cents) -> Option<f64> {
    if night_pot <= 0 {
        return None;
    }
    Some(profit as f64 / night_pot as f64)
}

pub fn pot_weighted_score(night_score: Option<f64>, night_pot: Cents) -> Option<f64> {
    night_score.map(|score| score * to_major_units(night_pot))
}

/// Both thresholds must hold
pub fn meets_eligibility(nights_played: u32, total_buy_in: Cents, eligibility: &Eligibility) -> bool {
    nights_played >= eligibility.min_nights_played
        && total_buy_in >= eligibility.min_total_buy_in_cents
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_reference_night() {
        // buy in $20, cash out $35
        let profit = 3500 - 2000;

        assert_eq!(profit, 1500);
        assert!((roi(profit, 2000).unwrap() - 0.75).abs() < EPS);
        assert!((night_score(profit, 2000).unwrap() - 0.75 * 20f64.sqrt()).abs() < EPS);
        assert!((night_score(profit, 2000).unwrap() - 3.354).abs() < 1e-3);
    }

    #[rstest]
    #[case(0)]
    #[case(-100)]
    fn test_ratios_undefined_without_buy_in(#[case] buy_in: Cents) {
        assert_eq!(roi(500, buy_in), None);
        assert_eq!(night_score(500, buy_in), None);
        assert_eq!(roi(0, buy_in), None);
    }

    #[test]
    fn test_zero_profit_with_buy_in_is_zero_not_none() {
        assert_eq!(roi(0, 1000), Some(0.0));
        assert_eq!(night_score(0, 1000), Some(0.0));
    }

    #[test]
    fn test_table_share() {
        assert_eq!(table_share(1500, 0), None);
        assert!((table_share(1500, 6000).unwrap() - 0.25).abs() < EPS);
        assert!((table_share(-3000, 6000).unwrap() + 0.5).abs() < EPS);
    }

    #[test]
    fn test_pot_weighted_score_uses_major_units() {
        assert_eq!(pot_weighted_score(None, 6000), None);
        assert!((pot_weighted_score(Some(2.0), 6000).unwrap() - 120.0).abs() < EPS);
    }

    #[rstest]
    #[case(3, 5000, true)]
    #[case(2, 5000, false)]
    #[case(3, 4999, false)]
    #[case(1, 0, false)]
    fn test_eligibility_requires_both_thresholds(
        #[case] nights: u32,
        #[case] buy_in: Cents,
        #[case] expected: bool,
    ) {
        let eligibility = Eligibility {
            min_nights_played: 3,
            min_total_buy_in_cents: 5000,
        };
        assert_eq!(meets_eligibility(nights, buy_in, &eligibility), expected);
    }
}
