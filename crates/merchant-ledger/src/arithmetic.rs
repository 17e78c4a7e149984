//! Pure arithmetic over ledgers.
//!
//! Every function here is total over its typed inputs: ledgers that reach
//! these functions are already known to be ledgers, so there is nothing to
//! validate. Missing currencies count as zero. Amount arithmetic saturates at
//! the bounds of [`Decimal`] rather than overflowing.

use std::collections::BTreeSet;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;

use crate::ledger::{Currency, Ledger};

/// Add any number of ledgers together, currency by currency.
///
/// - No operands: an empty ledger.
/// - One operand: that ledger, shared rather than copied.
/// - Two or more: every currency of every operand, amounts summed with
///   absent entries counting as zero.
///
/// ```
/// use merchant_ledger::{Ledger, sum};
/// use rust_decimal::Decimal;
///
/// let one = Ledger::from([("GOLD", Decimal::new(5, 0))]);
/// let two = Ledger::from([("MAGIC_POWER", Decimal::new(2, 0))]);
///
/// let total = sum([&one, &two]);
/// assert_eq!(total.amount_of("GOLD"), Decimal::new(5, 0));
/// assert_eq!(total.amount_of("MAGIC_POWER"), Decimal::new(2, 0));
/// ```
pub fn sum<'a, I>(ledgers: I) -> Ledger
where
    I: IntoIterator<Item = &'a Ledger>,
{
    let mut iter = ledgers.into_iter();
    let Some(first) = iter.next() else {
        return Ledger::new();
    };

    let mut rest = iter.peekable();
    if rest.peek().is_none() {
        return first.clone();
    }

    let mut merged = first.as_map().clone();
    for ledger in rest {
        for (currency, amount) in ledger.iter() {
            let slot = merged.entry(currency.to_owned()).or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(amount);
        }
    }

    Ledger::from(merged)
}

/// Multiply every amount in `ledger` by `factor`.
///
/// Useful for turning a per-unit effect into the effect of `n` units. The
/// factor may be fractional or negative; the set of currencies is preserved.
pub fn scale(ledger: &Ledger, factor: Decimal) -> Ledger {
    ledger
        .iter()
        .map(|(currency, amount)| (currency, amount.saturating_mul(factor)))
        .collect()
}

/// Return `true` if no amount in the ledger is negative.
///
/// An empty ledger is in the black.
pub fn in_the_black(ledger: &Ledger) -> bool {
    ledger.iter().all(|(_, amount)| amount >= Decimal::ZERO)
}

/// Return `true` if every amount in the ledger is negative.
///
/// An empty ledger is (vacuously) in the red as well.
pub fn in_the_red(ledger: &Ledger) -> bool {
    ledger.iter().all(|(_, amount)| amount < Decimal::ZERO)
}

/// Return every currency mentioned by any of the ledgers, each exactly once.
///
/// The result is sorted; callers should rely only on its uniqueness.
pub fn currencies<'a, I>(ledgers: I) -> Vec<Currency>
where
    I: IntoIterator<Item = &'a Ledger>,
{
    let unique: BTreeSet<&str> = ledgers
        .into_iter()
        .flat_map(|ledger| ledger.iter().map(|(currency, _)| currency))
        .collect();

    unique.into_iter().map(str::to_owned).collect()
}

/// Return the combined amount of `currency` across all ledgers.
///
/// Zero when no ledgers are given or none of them mentions the currency.
pub fn total_of<'a, I>(currency: &str, ledgers: I) -> Decimal
where
    I: IntoIterator<Item = &'a Ledger>,
{
    ledgers
        .into_iter()
        .filter_map(|ledger| ledger.get(currency))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

impl Add<&Ledger> for &Ledger {
    type Output = Ledger;

    fn add(self, rhs: &Ledger) -> Ledger {
        sum([self, rhs])
    }
}

impl<'a> Sum<&'a Ledger> for Ledger {
    fn sum<I: Iterator<Item = &'a Ledger>>(iter: I) -> Self {
        sum(iter)
    }
}

impl Sum<Ledger> for Ledger {
    fn sum<I: Iterator<Item = Ledger>>(iter: I) -> Self {
        let owned: Vec<Ledger> = iter.collect();
        sum(&owned)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn gold(amount: Decimal) -> Ledger {
        Ledger::from([("GOLD", amount)])
    }

    // --- sum ---

    #[test]
    fn sum_of_nothing_is_empty() {
        let none: [&Ledger; 0] = [];
        assert!(sum(none).is_empty());
        assert!(sum(&Vec::<Ledger>::new()).is_empty());
    }

    #[test]
    fn sum_of_one_is_the_same_ledger() {
        let dummy = gold(dec!(5));
        let total = sum([&dummy]);
        assert_eq!(total, dummy);
        assert!(total.ptr_eq(&dummy));
    }

    #[test]
    fn sum_adds_shared_currencies() {
        let total = sum([&gold(dec!(5)), &gold(dec!(2))]);
        assert_eq!(total.get("GOLD"), Some(dec!(7)));
    }

    #[test]
    fn sum_keeps_uneven_currencies() {
        let one = gold(dec!(5));
        let two = Ledger::from([("MAGIC_POWER", dec!(2))]);
        let total = sum([&one, &two]);
        assert_eq!(total.get("GOLD"), Some(dec!(5)));
        assert_eq!(total.get("MAGIC_POWER"), Some(dec!(2)));
        assert_eq!(total.len(), 2);
    }

    #[test]
    fn sum_of_many_ledgers() {
        let wallet = gold(Decimal::ZERO);
        let expenses = gold(dec!(-5));
        let profits = Ledger::from([("GOLD", dec!(10)), ("SILVER", dec!(3))]);
        let total = sum([&wallet, &expenses, &profits]);
        assert_eq!(total, Ledger::from([("GOLD", dec!(5)), ("SILVER", dec!(3))]));
    }

    #[test]
    fn sum_does_not_touch_operands() {
        let one = gold(dec!(5));
        let two = gold(dec!(2));
        let _ = sum([&one, &two]);
        assert_eq!(one, gold(dec!(5)));
        assert_eq!(two, gold(dec!(2)));
    }

    #[test]
    fn sum_saturates_instead_of_overflowing() {
        let total = sum([&gold(Decimal::MAX), &gold(Decimal::MAX)]);
        assert_eq!(total.get("GOLD"), Some(Decimal::MAX));
    }

    #[test]
    fn add_operator_matches_sum() {
        let one = gold(dec!(5));
        let two = Ledger::from([("GOLD", dec!(1)), ("SILVER", dec!(1))]);
        assert_eq!(&one + &two, sum([&one, &two]));
    }

    #[test]
    fn iterator_sum_matches_sum() {
        let ledgers = vec![gold(dec!(1)), gold(dec!(2)), gold(dec!(3))];
        let by_ref: Ledger = ledgers.iter().sum();
        let by_value: Ledger = ledgers.clone().into_iter().sum();
        assert_eq!(by_ref, gold(dec!(6)));
        assert_eq!(by_value, gold(dec!(6)));
    }

    // --- scale ---

    #[test]
    fn scale_multiplies_a_single_currency() {
        assert_eq!(scale(&gold(dec!(5)), dec!(5)).get("GOLD"), Some(dec!(25)));
    }

    #[test]
    fn scale_multiplies_every_currency() {
        let ledger = Ledger::from([("GOLD", dec!(5)), ("SILVER", dec!(2))]);
        let scaled = scale(&ledger, dec!(5));
        assert_eq!(scaled.get("GOLD"), Some(dec!(25)));
        assert_eq!(scaled.get("SILVER"), Some(dec!(10)));
    }

    #[test]
    fn scale_accepts_fractional_and_negative_factors() {
        let ledger = Ledger::from([("GOLD", dec!(4)), ("SILVER", dec!(-2))]);
        assert_eq!(
            scale(&ledger, dec!(-0.5)),
            Ledger::from([("GOLD", dec!(-2)), ("SILVER", dec!(1))]),
        );
    }

    #[test]
    fn scale_by_zero_keeps_currencies() {
        let scaled = scale(&Ledger::from([("GOLD", dec!(4)), ("SILVER", dec!(2))]), Decimal::ZERO);
        assert_eq!(scaled.len(), 2);
        assert_eq!(scaled.get("GOLD"), Some(Decimal::ZERO));
    }

    // --- in_the_black / in_the_red ---

    #[test]
    fn in_the_black_when_all_positive() {
        assert!(in_the_black(&Ledger::from([("GOLD", dec!(5)), ("SILVER", dec!(4))])));
    }

    #[test]
    fn in_the_black_allows_zero() {
        assert!(in_the_black(&gold(Decimal::ZERO)));
    }

    #[test]
    fn not_in_the_black_with_a_single_negative() {
        assert!(!in_the_black(&Ledger::from([("GOLD", dec!(5)), ("SILVER", dec!(-5))])));
    }

    #[test]
    fn not_in_the_black_when_all_negative() {
        assert!(!in_the_black(&Ledger::from([("GOLD", dec!(-5)), ("SILVER", dec!(-5))])));
    }

    #[test]
    fn in_the_red_when_all_negative() {
        assert!(in_the_red(&Ledger::from([("GOLD", dec!(-5)), ("SILVER", dec!(-5))])));
    }

    #[test]
    fn not_in_the_red_with_any_positive() {
        assert!(!in_the_red(&Ledger::from([("GOLD", dec!(-5)), ("SILVER", dec!(5))])));
    }

    #[test]
    fn not_in_the_red_when_all_positive() {
        assert!(!in_the_red(&Ledger::from([("GOLD", dec!(5)), ("SILVER", dec!(5))])));
    }

    #[test]
    fn zero_is_not_in_the_red() {
        assert!(!in_the_red(&gold(Decimal::ZERO)));
    }

    #[test]
    fn empty_ledger_is_both_black_and_red() {
        let empty = Ledger::new();
        assert!(in_the_black(&empty));
        assert!(in_the_red(&empty));
    }

    // --- currencies ---

    #[test]
    fn currencies_of_nothing_is_empty() {
        let none: [&Ledger; 0] = [];
        assert!(currencies(none).is_empty());
    }

    #[test]
    fn currencies_of_one_ledger() {
        let ledger = Ledger::from([("GOLD", dec!(5))]);
        assert_eq!(currencies([&ledger]), vec!["GOLD".to_owned()]);
    }

    #[test]
    fn currencies_are_unique() {
        let one = gold(dec!(5));
        let two = Ledger::from([("SILVER", dec!(10)), ("GOLD", dec!(10))]);
        assert_eq!(
            currencies([&one, &two]),
            vec!["GOLD".to_owned(), "SILVER".to_owned()],
        );
    }

    // --- total_of ---

    #[test]
    fn total_of_nothing_is_zero() {
        let none: [&Ledger; 0] = [];
        assert_eq!(total_of("GOLD", none), Decimal::ZERO);
    }

    #[test]
    fn total_of_missing_currency_is_zero() {
        let one = gold(dec!(5));
        let two = Ledger::from([("SILVER", dec!(5))]);
        assert_eq!(total_of("MAGIC_POWER", [&one, &two]), Decimal::ZERO);
    }

    #[test]
    fn total_of_adds_up_a_row() {
        let one = gold(dec!(5));
        let two = Ledger::from([("SILVER", dec!(5)), ("GOLD", dec!(2))]);
        assert_eq!(total_of("GOLD", [&one, &two]), dec!(7));
    }
}
