//! Items, their economics, and a market to trade them in.
//!
//! This crate sits on top of `merchant-ledger`. An [`Item`] says what it costs
//! to acquire and what each owned unit produces per tick, both as functions of
//! a caller-supplied state. The free functions in [`economy`] turn items into
//! ledger deltas; [`Market`] packages the usual purchase flow; [`Catalog`]
//! loads fixed-price items from YAML.
//!
//! # Modules
//!
//! - [`catalog`] -- YAML item catalogs ([`Catalog`], [`ItemDefinition`])
//! - [`economy`] -- Cost, purchase, counting, and production of items
//! - [`error`] -- Error types for markets and catalogs
//! - [`item`] -- Item descriptors ([`Item`])
//! - [`market`] -- A catalog with the purchase flow built in ([`Market`])
//!
//! # Example
//!
//! ```
//! use merchant_items::{Item, buy, effects};
//! use merchant_ledger::{Ledger, in_the_black};
//! use rust_decimal::Decimal;
//!
//! let doggo: Item<()> = Item::new("Doggo")
//!     .with_fixed_cost(Ledger::from([("cuddles", Decimal::NEGATIVE_ONE)]))
//!     .with_fixed_effect(Ledger::from([("cuddles", Decimal::ONE_HUNDRED)]));
//!
//! let wallet = Ledger::from([("cuddles", Decimal::ONE)]);
//! let charged = buy(Some(&doggo), &wallet, &()).unwrap_or_default();
//! assert!(in_the_black(&charged));
//!
//! let owned = merchant_items::add(&doggo, &charged);
//! let produced = effects([&doggo], &owned, &());
//! assert_eq!(produced.get("cuddles"), Some(Decimal::ONE_HUNDRED));
//! ```

pub mod catalog;
pub mod economy;
pub mod error;
pub mod item;
pub mod market;

// Re-export primary types at crate root for convenience.
pub use catalog::{Catalog, ItemDefinition};
pub use economy::{add, add_amount, all_costs, all_costs_by_key, buy, cost, effects};
pub use error::{CatalogError, MarketError};
pub use item::Item;
pub use market::{Market, Purchase};
