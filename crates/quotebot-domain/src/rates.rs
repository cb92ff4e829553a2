//! Rate lookup tables
//!
//! Two step functions keyed on the indemnity limit and one flat-fee table
//! keyed on the profession. All three are total: every input maps to a rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::LazyLock;

/// One bracket of a step function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateTier {
    /// Inclusive upper bound of the bracket
    pub upper_bound: u64,
    /// Rate applied to amounts in the bracket
    pub rate: Decimal,
}

/// Step function over an amount
///
/// Tiers are kept in ascending bound order and evaluated in that order; the
/// first tier whose inclusive upper bound covers the amount wins, so an
/// amount exactly on a bound selects the lower tier. Amounts above the last
/// bound get `catch_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRateTable {
    tiers: Vec<RateTier>,
    catch_all: Decimal,
}

impl StepRateTable {
    /// Build a table from `(upper_bound, rate)` pairs
    ///
    /// # Panics
    /// Panics if the bounds are not strictly ascending
    pub fn new(tiers: &[(u64, Decimal)], catch_all: Decimal) -> Self {
        assert!(
            tiers.windows(2).all(|pair| pair[0].0 < pair[1].0),
            "Tier bounds must be strictly ascending"
        );

        Self {
            tiers: tiers
                .iter()
                .map(|&(upper_bound, rate)| RateTier { upper_bound, rate })
                .collect(),
            catch_all,
        }
    }

    /// Rate for an amount
    pub fn lookup(&self, amount: u64) -> Decimal {
        self.tiers
            .iter()
            .find(|tier| amount <= tier.upper_bound)
            .map(|tier| tier.rate)
            .unwrap_or(self.catch_all)
    }

    /// Bounded tiers, ascending
    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }

    /// Rate for amounts above the highest bound
    pub fn catch_all(&self) -> Decimal {
        self.catch_all
    }

    /// Base premium rate on the indemnity limit, as a fraction of the limit
    pub fn base_indemnity() -> Self {
        Self::new(
            &[
                (1_000_000, dec!(0.0105)),
                (2_000_000, dec!(0.0075)),
                (5_000_000, dec!(0.0045)),
                (10_000_000, dec!(0.0035)),
                (20_000_000, dec!(0.00225)),
                (50_000_000, dec!(0.00125)),
            ],
            dec!(0.00125),
        )
    }

    /// Multiplier on the running total, keyed on the indemnity limit
    pub fn limit_scale() -> Self {
        Self::new(
            &[
                (1_000_000, dec!(1.00)),
                (2_500_000, dec!(1.50)),
                (5_000_000, dec!(1.90)),
                (10_000_000, dec!(2.30)),
                (20_000_000, dec!(2.75)),
                (40_000_000, dec!(3.25)),
                (60_000_000, dec!(3.65)),
                (80_000_000, dec!(4.00)),
            ],
            dec!(4.50),
        )
    }
}

/// Flat fee per profession
///
/// Matching is exact: no case folding, no trimming, no fuzzy matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionFees {
    fees: HashMap<String, u32>,
    default_fee: u32,
}

impl ProfessionFees {
    /// Fee used when the profession is unknown or absent
    pub const DEFAULT_FEE: u32 = 1;

    /// The standard schedule of eleven professions
    pub fn standard() -> Self {
        let fees = [
            ("Opticians", 100),
            ("Chemists", 100),
            ("Accountants", 100),
            ("Auditor", 100),
            ("Attorneys", 100),
            ("Architects", 135),
            ("Civil Engineers", 135),
            ("Quantity Surveyors", 135),
            ("Dentists", 175),
            ("Doctors", 175),
            ("Surgeons", 175),
        ]
        .into_iter()
        .map(|(name, fee)| (name.to_string(), fee))
        .collect();

        Self {
            fees,
            default_fee: Self::DEFAULT_FEE,
        }
    }

    /// Fee for a profession name
    pub fn fee(&self, profession: &str) -> u32 {
        self.fees.get(profession).copied().unwrap_or(self.default_fee)
    }

    /// Fee for an optionally extracted profession
    pub fn fee_for(&self, profession: Option<&str>) -> u32 {
        profession.map_or(self.default_fee, |name| self.fee(name))
    }

    /// Known professions with their fees, sorted by fee then name
    pub fn entries(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<_> = self
            .fees
            .iter()
            .map(|(name, fee)| (name.as_str(), *fee))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        entries
    }

    /// Fee for anything not in the schedule
    pub fn default_fee(&self) -> u32 {
        self.default_fee
    }
}

static BASE_INDEMNITY: LazyLock<StepRateTable> = LazyLock::new(StepRateTable::base_indemnity);
static LIMIT_SCALE: LazyLock<StepRateTable> = LazyLock::new(StepRateTable::limit_scale);
static PROFESSION_FEES: LazyLock<ProfessionFees> = LazyLock::new(ProfessionFees::standard);

/// Shared base indemnity table
pub fn base_indemnity_table() -> &'static StepRateTable {
    &BASE_INDEMNITY
}

/// Shared limit scale table
pub fn limit_scale_table() -> &'static StepRateTable {
    &LIMIT_SCALE
}

/// Shared profession fee schedule
pub fn profession_fees() -> &'static ProfessionFees {
    &PROFESSION_FEES
}

/// Base rate for an indemnity limit (fraction of the limit)
///
/// # Examples
///
/// ```
/// use quotebot_domain::base_indemnity_rate;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(base_indemnity_rate(1_500_000), dec!(0.0075));
/// ```
pub fn base_indemnity_rate(amount: u64) -> Decimal {
    BASE_INDEMNITY.lookup(amount)
}

/// Scale factor for an indemnity limit
pub fn limit_scale_factor(amount: u64) -> Decimal {
    LIMIT_SCALE.lookup(amount)
}

/// Flat fee for a profession name; 1 when unrecognized
pub fn profession_fee(profession: &str) -> u32 {
    PROFESSION_FEES.fee(profession)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_rate_boundaries_select_lower_tier() {
        let cases = [
            (1_000_000, dec!(0.0105), dec!(0.0075)),
            (2_000_000, dec!(0.0075), dec!(0.0045)),
            (5_000_000, dec!(0.0045), dec!(0.0035)),
            (10_000_000, dec!(0.0035), dec!(0.00225)),
            (20_000_000, dec!(0.00225), dec!(0.00125)),
            (50_000_000, dec!(0.00125), dec!(0.00125)),
        ];

        for (bound, at_bound, above_bound) in cases {
            assert_eq!(base_indemnity_rate(bound), at_bound, "at {}", bound);
            assert_eq!(base_indemnity_rate(bound + 1), above_bound, "above {}", bound);
        }
    }

    #[test]
    fn test_base_rate_small_and_huge_amounts() {
        assert_eq!(base_indemnity_rate(0), dec!(0.0105));
        assert_eq!(base_indemnity_rate(u64::MAX), dec!(0.00125));
    }

    #[test]
    fn test_base_rate_example_limit() {
        assert_eq!(base_indemnity_rate(1_500_000), dec!(0.0075));
    }

    #[test]
    fn test_limit_scale_boundaries() {
        assert_eq!(limit_scale_factor(1_000_000), dec!(1.00));
        assert_eq!(limit_scale_factor(1_000_001), dec!(1.50));
        assert_eq!(limit_scale_factor(2_500_000), dec!(1.50));
        assert_eq!(limit_scale_factor(2_500_001), dec!(1.90));
        assert_eq!(limit_scale_factor(40_000_000), dec!(3.25));
        assert_eq!(limit_scale_factor(80_000_000), dec!(4.00));
        assert_eq!(limit_scale_factor(80_000_001), dec!(4.50));
    }

    #[test]
    fn test_limit_scale_has_eight_bounded_tiers() {
        let table = StepRateTable::limit_scale();
        assert_eq!(table.tiers().len(), 8);
        assert_eq!(table.catch_all(), dec!(4.50));
    }

    #[test]
    fn test_profession_fees() {
        assert_eq!(profession_fee("Architects"), 135);
        assert_eq!(profession_fee("Doctors"), 175);
        assert_eq!(profession_fee("Auditor"), 100);
        assert_eq!(profession_fee("Unknown Trade"), 1);
    }

    #[test]
    fn test_profession_match_is_exact() {
        assert_eq!(profession_fee("ARCHITECTS"), 1);
        assert_eq!(profession_fee("architects"), 1);
        assert_eq!(profession_fee(" Architects"), 1);
        assert_eq!(profession_fee(""), 1);
    }

    #[test]
    fn test_absent_profession_uses_default() {
        assert_eq!(profession_fees().fee_for(None), ProfessionFees::DEFAULT_FEE);
        assert_eq!(profession_fees().fee_for(Some("Surgeons")), 175);
    }

    #[test]
    fn test_profession_entries_are_sorted() {
        let fees = ProfessionFees::standard();
        let entries = fees.entries();
        assert_eq!(entries.len(), 11);
        assert_eq!(entries[0], ("Accountants", 100));
        assert_eq!(entries[10], ("Surgeons", 175));
    }

    #[test]
    #[should_panic]
    fn test_unsorted_bounds_rejected() {
        StepRateTable::new(&[(10, dec!(1)), (5, dec!(2))], dec!(3));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: base rate never increases as the limit grows
        #[test]
        fn test_base_rate_non_increasing(a in 0u64..100_000_000, b in 0u64..100_000_000) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(base_indemnity_rate(low) >= base_indemnity_rate(high));
        }

        /// Property: scale factor never decreases as the limit grows
        #[test]
        fn test_scale_factor_non_decreasing(a in 0u64..100_000_000, b in 0u64..100_000_000) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(limit_scale_factor(low) <= limit_scale_factor(high));
        }

        /// Property: every amount maps to one of the table's rates
        #[test]
        fn test_lookup_is_total(amount in any::<u64>()) {
            let table = StepRateTable::limit_scale();
            let rate = table.lookup(amount);
            prop_assert!(
                rate == table.catch_all() || table.tiers().iter().any(|t| t.rate == rate)
            );
        }
    }
}
