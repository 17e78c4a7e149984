//! Currency ledgers and ledger arithmetic for resource economies.
//!
//! A [`Ledger`] maps currency names to signed amounts. It models a wallet, a
//! price, a per-tick income or anything else that can be expressed as "so much
//! of each currency". Absent currencies count as zero, so ledgers stay sparse.
//!
//! # Architecture
//!
//! - [`ledger`] -- The [`Ledger`] value type: immutable, cheap to clone,
//!   structurally compared.
//! - [`arithmetic`] -- Pure functions over ledgers: [`sum`], [`scale`],
//!   [`in_the_black`], [`in_the_red`], [`currencies`] and [`total_of`].
//!
//! # Immutability
//!
//! No operation mutates its operands. Every function returns a new ledger,
//! and a ledger that passes through an operation unchanged is returned as the
//! same shared value (see [`Ledger::ptr_eq`]).
//!
//! # Usage
//!
//! ```
//! use merchant_ledger::{Ledger, in_the_black, sum};
//! use rust_decimal::Decimal;
//!
//! let wallet = Ledger::from([("GOLD", Decimal::ZERO)]);
//! let expenses = Ledger::from([("GOLD", Decimal::new(-5, 0))]);
//! let profits = Ledger::from([("GOLD", Decimal::new(10, 0)), ("SILVER", Decimal::new(3, 0))]);
//!
//! let total = sum([&wallet, &expenses, &profits]);
//! assert_eq!(total.amount_of("GOLD"), Decimal::new(5, 0));
//! assert_eq!(total.amount_of("SILVER"), Decimal::new(3, 0));
//! assert!(in_the_black(&total));
//! ```

pub mod arithmetic;
pub mod ledger;

// Re-export primary types at crate root.
pub use arithmetic::{currencies, in_the_black, in_the_red, scale, sum, total_of};
pub use ledger::{Currency, Ledger};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Invalid-argument errors raised by ledger and item operations.
///
/// Every variant describes an argument that does not have the shape the
/// operation requires. None of them is retryable, and an operation that
/// returns one of them has not produced a partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Untyped input was expected to be a ledger but is not.
    #[error("expected a ledger: {reason}")]
    NotALedger {
        /// What was wrong with the input.
        reason: String,
    },

    /// An item definition carries a cost attribute that is not a price table.
    #[error("the item of type \"{item_type}\" has a cost attribute that is not a price table")]
    CostNotInvocable {
        /// The offending item's type.
        item_type: String,
    },

    /// An item's cost produced a value that is not a ledger.
    #[error("the cost of item \"{item_type}\" is not a ledger: {reason}")]
    CostNotALedger {
        /// The offending item's type.
        item_type: String,
        /// What was wrong with the cost value.
        reason: String,
    },

    /// An item definition carries an effect attribute that is not a ledger.
    #[error("the effect of item \"{item_type}\" is not a ledger: {reason}")]
    EffectNotALedger {
        /// The offending item's type.
        item_type: String,
        /// What was wrong with the effect value.
        reason: String,
    },
}
