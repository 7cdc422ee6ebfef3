//! Payout engine
//!
//! Pure functions over a spot price and the two weight sheets. No state,
//! no side effects; every derived value is recomputed in full on each
//! call.

use crate::constants::GRAMS_PER_TROY_OUNCE;
use crate::models::{BreakdownRow, Tier, WeightSheet, KARATS};

/// Full estimate over both sheets
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Sum of all line totals across both tiers, in CAD
    pub grand_total: f64,
    /// Sum of all parsed weights across both tiers, in grams
    pub total_weight: f64,
    /// Non-empty lines, in grade order, luxury tier first
    pub breakdown: Vec<BreakdownRow>,
}

/// Spot price per gram of pure gold
pub fn per_gram_spot(spot_price_cad: f64) -> f64 {
    spot_price_cad / GRAMS_PER_TROY_OUNCE
}

/// Per-gram payout rate for a grade and tier
pub fn payout_rate(spot_price_cad: f64, karat_value: u32, tier: Tier) -> f64 {
    per_gram_spot(spot_price_cad) * (karat_value as f64 / 24.0) * tier.payout_percentage()
}

/// Parse a free-text weight entry. Empty, unparseable, non-finite, and
/// negative inputs all come back as zero; this function never errors.
/// Negative entries are clamped rather than passed through: a payout line
/// can contribute nothing, but it can never subtract.
pub fn parse_grams(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(grams) if grams.is_finite() && grams > 0.0 => grams,
        _ => 0.0,
    }
}

fn sheet_for<'a>(tier: Tier, luxury: &'a WeightSheet, standard: &'a WeightSheet) -> &'a WeightSheet {
    match tier {
        Tier::Luxury => luxury,
        Tier::Standard => standard,
    }
}

/// Aggregate both sheets into a grand total, cumulative weight, and the
/// per-line breakdown submitted with a lead. Zero-weight lines are
/// counted in the totals (contributing zero) but omitted from the
/// breakdown.
pub fn estimate(spot_price_cad: f64, luxury: &WeightSheet, standard: &WeightSheet) -> Estimate {
    let mut grand_total = 0.0;
    let mut total_weight = 0.0;
    let mut breakdown = Vec::new();

    for tier in Tier::ALL {
        let sheet = sheet_for(tier, luxury, standard);
        for karat in &KARATS {
            let grams = sheet
                .get(&karat.value)
                .map(|raw| parse_grams(raw))
                .unwrap_or(0.0);
            let rate = payout_rate(spot_price_cad, karat.value, tier);
            let line_total = grams * rate;

            grand_total += line_total;
            total_weight += grams;

            if grams > 0.0 {
                breakdown.push(BreakdownRow {
                    karat: karat.value,
                    tier,
                    grams,
                    rate_per_gram: rate,
                    line_total,
                });
            }
        }
    }

    Estimate { grand_total, total_weight, breakdown }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LUXURY_PAYOUT_PERCENTAGE, STANDARD_PAYOUT_PERCENTAGE};

    const EPS: f64 = 1e-9;

    fn sheet(entries: &[(u32, &str)]) -> WeightSheet {
        entries.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_pure_gold_luxury_rate_is_exact() {
        // 24k purity factor is 1, so the rate is spot/oz-gram * percentage
        let spot = 4000.0;
        let expected = (spot / GRAMS_PER_TROY_OUNCE) * LUXURY_PAYOUT_PERCENTAGE;
        assert_eq!(payout_rate(spot, 24, Tier::Luxury), expected);
    }

    #[test]
    fn test_tier_ratio_constant_across_grades() {
        let spot = 3777.42;
        let expected_ratio = STANDARD_PAYOUT_PERCENTAGE / LUXURY_PAYOUT_PERCENTAGE;
        for karat in &KARATS {
            let ratio = payout_rate(spot, karat.value, Tier::Standard)
                / payout_rate(spot, karat.value, Tier::Luxury);
            assert!((ratio - expected_ratio).abs() < EPS, "ratio drifted at {}k", karat.value);
        }
    }

    #[test]
    fn test_parse_grams_defensive_cases() {
        assert_eq!(parse_grams(""), 0.0);
        assert_eq!(parse_grams("   "), 0.0);
        assert_eq!(parse_grams("abc"), 0.0);
        assert_eq!(parse_grams("12,5"), 0.0);
        assert_eq!(parse_grams("NaN"), 0.0);
        assert_eq!(parse_grams("inf"), 0.0);
        assert_eq!(parse_grams("1e400"), 0.0);
        // Negative entries are clamped, not passed through
        assert_eq!(parse_grams("-3.2"), 0.0);
        // Normal cases
        assert_eq!(parse_grams("10"), 10.0);
        assert_eq!(parse_grams(" 2.5 "), 2.5);
        assert_eq!(parse_grams("0"), 0.0);
    }

    #[test]
    fn test_grand_total_linear_in_each_entry() {
        let spot = 4000.0;
        let standard = sheet(&[(14, "3")]);

        let base = estimate(spot, &sheet(&[(18, "5")]), &standard);
        let doubled = estimate(spot, &sheet(&[(18, "10")]), &standard);

        let line_18k = payout_rate(spot, 18, Tier::Luxury) * 5.0;
        assert!((doubled.grand_total - base.grand_total - line_18k).abs() < EPS);
        // The untouched standard line is unchanged
        let standard_line = payout_rate(spot, 14, Tier::Standard) * 3.0;
        assert!((base.grand_total - line_18k - standard_line).abs() < EPS);
    }

    #[test]
    fn test_invalid_entries_contribute_exactly_zero() {
        let spot = 4000.0;
        let with_noise = estimate(
            spot,
            &sheet(&[(9, "oops"), (18, "5"), (22, "")]),
            &sheet(&[(10, "-4")]),
        );
        let clean = estimate(spot, &sheet(&[(18, "5")]), &WeightSheet::new());

        assert_eq!(with_noise.grand_total, clean.grand_total);
        assert_eq!(with_noise.total_weight, clean.total_weight);
        assert!(with_noise.grand_total.is_finite());
        assert_eq!(with_noise.breakdown.len(), 1);
    }

    #[test]
    fn test_end_to_end_scenario_from_the_storefront() {
        // 2500 CAD/oz, 10 g at 24k luxury, nothing else
        let spot = 2500.0;
        let result = estimate(spot, &sheet(&[(24, "10")]), &WeightSheet::new());

        let rate = payout_rate(spot, 24, Tier::Luxury);
        let expected_rate = (spot / GRAMS_PER_TROY_OUNCE) * LUXURY_PAYOUT_PERCENTAGE;
        assert_eq!(rate, expected_rate);
        assert!((rate - 76.36).abs() < 0.01);
        assert!((result.grand_total - rate * 10.0).abs() < EPS);
        assert_eq!(result.total_weight, 10.0);

        assert_eq!(result.breakdown.len(), 1);
        let row = &result.breakdown[0];
        assert_eq!(row.karat, 24);
        assert_eq!(row.tier, Tier::Luxury);
        assert_eq!(row.grams, 10.0);
        assert!((row.line_total - result.grand_total).abs() < EPS);
    }

    #[test]
    fn test_empty_sheets_are_a_zero_estimate() {
        let result = estimate(4000.0, &WeightSheet::new(), &WeightSheet::new());
        assert_eq!(result.grand_total, 0.0);
        assert_eq!(result.total_weight, 0.0);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn test_breakdown_sums_match_totals() {
        let result = estimate(
            3900.0,
            &sheet(&[(9, "1.2"), (18, "3")]),
            &sheet(&[(10, "0.8"), (24, "2")]),
        );

        let sum_totals: f64 = result.breakdown.iter().map(|r| r.line_total).sum();
        let sum_grams: f64 = result.breakdown.iter().map(|r| r.grams).sum();
        assert!((sum_totals - result.grand_total).abs() < EPS);
        assert!((sum_grams - result.total_weight).abs() < EPS);
        assert_eq!(result.breakdown.len(), 4);
    }
}
