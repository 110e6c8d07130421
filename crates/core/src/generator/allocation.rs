//! Splitting an amount into parts using the Largest Remainder Method.
//!
//! Each part is first rounded toward zero, then the leftover units go to the
//! parts with the largest fractional remainders, so the parts always sum to
//! the rounded total.

use finmart_shared::types::round_amount;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Splits amounts without losing or inventing cents.
pub struct CentAllocator;

impl CentAllocator {
    /// Splits `total` into `count` equal parts.
    ///
    /// Leftover units go to the first parts.
    ///
    /// ```
    /// use finmart_core::generator::CentAllocator;
    /// use rust_decimal_macros::dec;
    ///
    /// let parts = CentAllocator::allocate_equal(dec!(100), 3, 2);
    /// assert_eq!(parts, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
    /// ```
    #[must_use]
    pub fn allocate_equal(total: Decimal, count: usize, decimal_places: u32) -> Vec<Decimal> {
        Self::allocate_by_weights(total, &vec![Decimal::ONE; count], decimal_places)
    }

    /// Splits `total` in proportion to non-negative `weights`.
    ///
    /// Falls back to an equal split when every weight is zero. Ties in the
    /// fractional remainder go to the earlier part.
    #[must_use]
    pub fn allocate_by_weights(total: Decimal, weights: &[Decimal], decimal_places: u32) -> Vec<Decimal> {
        if weights.is_empty() {
            return vec![];
        }

        let weight_sum: Decimal = weights.iter().copied().sum();
        if weight_sum <= Decimal::ZERO {
            return Self::allocate_equal(total, weights.len(), decimal_places);
        }

        let unit = Decimal::new(1, decimal_places);
        let total_rounded = round_amount(total, decimal_places);
        let magnitude = total_rounded.abs();

        let exact: Vec<Decimal> = weights.iter().map(|w| magnitude * *w / weight_sum).collect();
        let mut parts: Vec<Decimal> = exact
            .iter()
            .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero))
            .collect();

        let allocated: Decimal = parts.iter().copied().sum();
        let units = ((magnitude - allocated) / unit).to_usize().unwrap_or(0);

        if units > 0 {
            let mut remainders: Vec<(usize, Decimal)> = exact
                .iter()
                .zip(&parts)
                .enumerate()
                .map(|(i, (e, p))| (i, *e - *p))
                .collect();
            remainders.sort_by(|a, b| b.1.cmp(&a.1));

            for (idx, _) in remainders.iter().take(units) {
                parts[*idx] += unit;
            }
        }

        if total_rounded.is_sign_negative() {
            for part in &mut parts {
                *part = -*part;
            }
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty() {
        assert!(CentAllocator::allocate_equal(dec!(100), 0, 2).is_empty());
        assert!(CentAllocator::allocate_by_weights(dec!(100), &[], 2).is_empty());
    }

    #[test]
    fn test_single_part_takes_total() {
        assert_eq!(CentAllocator::allocate_equal(dec!(12.345), 1, 2), vec![dec!(12.35)]);
    }

    #[test]
    fn test_equal_thirds() {
        let parts = CentAllocator::allocate_equal(dec!(100), 3, 2);
        assert_eq!(parts, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
    }

    #[test]
    fn test_weights_exact() {
        let parts = CentAllocator::allocate_by_weights(dec!(100), &[dec!(5), dec!(3), dec!(2)], 2);
        assert_eq!(parts, vec![dec!(50), dec!(30), dec!(20)]);
    }

    #[test]
    fn test_largest_remainder_wins() {
        // exact: 14.2857.., 28.5714.., 57.1428.. -> 14.28 / 28.57 / 57.14, one cent left
        let parts = CentAllocator::allocate_by_weights(dec!(100), &[dec!(1), dec!(2), dec!(4)], 2);
        assert_eq!(parts, vec![dec!(14.29), dec!(28.57), dec!(57.14)]);
    }

    #[test]
    fn test_zero_weights_split_equally() {
        let parts = CentAllocator::allocate_by_weights(dec!(1), &[Decimal::ZERO, Decimal::ZERO], 2);
        assert_eq!(parts, vec![dec!(0.50), dec!(0.50)]);
    }

    #[test]
    fn test_negative_total() {
        let parts = CentAllocator::allocate_equal(dec!(-100), 3, 2);
        assert_eq!(parts, vec![dec!(-33.34), dec!(-33.33), dec!(-33.33)]);
    }

    #[rstest]
    #[case(dec!(100), 7)]
    #[case(dec!(0.01), 3)]
    #[case(dec!(999.99), 7)]
    #[case(dec!(0), 4)]
    fn test_equal_sum_invariant(#[case] total: Decimal, #[case] count: usize) {
        let parts = CentAllocator::allocate_equal(total, count, 2);
        assert_eq!(parts.len(), count);
        assert_eq!(parts.iter().copied().sum::<Decimal>(), total);
    }

    proptest! {
        #[test]
        fn prop_weights_sum_to_total(
            cents in -10_000_000i64..10_000_000i64,
            weights in prop::collection::vec(0u32..1000, 1..15),
        ) {
            let total = Decimal::new(cents, 2);
            let weights: Vec<Decimal> = weights.into_iter().map(Decimal::from).collect();
            let parts = CentAllocator::allocate_by_weights(total, &weights, 2);

            prop_assert_eq!(parts.len(), weights.len());
            prop_assert_eq!(parts.iter().copied().sum::<Decimal>(), total);
            prop_assert!(parts.iter().all(|p| p.normalize().scale() <= 2));
        }
    }
}
