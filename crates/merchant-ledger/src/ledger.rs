//! The ledger value type: an immutable map from currency to amount.
//!
//! The [`Ledger`] struct is the single currency of exchange between every
//! part of the workspace. Wallets, prices, per-unit item effects and per-tick
//! production are all ledgers.
//!
//! # Design
//!
//! - **Immutable**: there is no `&mut self` method. Operations build new ledgers.
//! - **Shared**: the map lives behind an [`Arc`], so `clone` is O(1) and an
//!   unchanged ledger can be handed back as the same value.
//! - **Sparse**: an absent currency reads as zero through [`Ledger::amount_of`].
//! - **Precision**: amounts are [`Decimal`] -- no floating point.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::LedgerError;

/// A currency name. Item types share this namespace when counted in a wallet.
pub type Currency = String;

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// An immutable mapping from currency name to signed amount.
///
/// Two ledgers are equal when they hold the same currencies with equal
/// amounts. Currencies iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Arc<BTreeMap<Currency, Decimal>>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_map(entries: BTreeMap<Currency, Decimal>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<Currency, Decimal> {
        &self.entries
    }

    /// Return the amount recorded for `currency`, if any.
    pub fn get(&self, currency: &str) -> Option<Decimal> {
        self.entries.get(currency).copied()
    }

    /// Return the amount of `currency`, reading an absent currency as zero.
    pub fn amount_of(&self, currency: &str) -> Decimal {
        self.get(currency).unwrap_or(Decimal::ZERO)
    }

    /// Return whether `currency` has an entry (even a zero one).
    pub fn contains(&self, currency: &str) -> bool {
        self.entries.contains_key(currency)
    }

    /// Return the number of currencies with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the ledger has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(currency, amount)` pairs in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.entries.iter().map(|(currency, amount)| (currency.as_str(), *amount))
    }

    /// Return whether both ledgers share the same underlying map.
    ///
    /// Operations that hand a ledger back unchanged, such as a single-operand
    /// [`sum`](crate::sum), return a shared value, which this makes observable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Keep only the negative entries.
    ///
    /// Applied to a wallet after a cost has been charged, this is what the
    /// holder is short of.
    pub fn deficits(&self) -> Self {
        self.iter()
            .filter(|(_, amount)| *amount < Decimal::ZERO)
            .collect()
    }
}

impl<K: Into<Currency>> FromIterator<(K, Decimal)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        Self::from_map(
            iter.into_iter()
                .map(|(currency, amount)| (currency.into(), amount))
                .collect(),
        )
    }
}

impl<K: Into<Currency>, const N: usize> From<[(K, Decimal); N]> for Ledger {
    fn from(entries: [(K, Decimal); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<BTreeMap<Currency, Decimal>> for Ledger {
    fn from(entries: BTreeMap<Currency, Decimal>) -> Self {
        Self::from_map(entries)
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (currency, amount)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{currency}: {amount}")?;
        }
        f.write_str("}")
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

/// Serializes as a plain map of numbers: whole amounts as integers, the rest
/// as floats.
impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (currency, amount) in self.iter() {
            map.serialize_entry(currency, &Amount(amount))?;
        }
        map.end()
    }
}

struct Amount(Decimal);

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let whole = Some(self.0)
            .filter(|amount| amount.fract().is_zero())
            .and_then(|amount| amount.to_i64());
        if let Some(whole) = whole {
            return serializer.serialize_i64(whole);
        }
        // Every Decimal converts to f64.
        serializer.serialize_f64(self.0.to_f64().unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<Currency, Decimal>::deserialize(deserializer).map(Self::from_map)
    }
}

// ---------------------------------------------------------------------------
// Untyped input
// ---------------------------------------------------------------------------

/// Recognize a ledger in untyped JSON data.
///
/// The value must be an object whose values are all numbers (or strings
/// holding a decimal number). Anything else is rejected with
/// [`LedgerError::NotALedger`].
impl TryFrom<&serde_json::Value> for Ledger {
    type Error = LedgerError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(fields) = value else {
            return Err(LedgerError::NotALedger {
                reason: format!("expected an object of amounts, got {}", json_kind(value)),
            });
        };

        let mut entries = BTreeMap::new();
        for (currency, amount) in fields {
            let amount = decimal_from_json(amount).ok_or_else(|| LedgerError::NotALedger {
                reason: format!(
                    "amount for {currency} must be a number, got {}",
                    json_kind(amount)
                ),
            })?;
            entries.insert(currency.clone(), amount);
        }

        Ok(Self::from_map(entries))
    }
}

fn decimal_from_json(value: &serde_json::Value) -> Option<Decimal> {
    let text = match value {
        serde_json::Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                return Some(Decimal::from(i));
            }
            if let Some(u) = number.as_u64() {
                return Some(Decimal::from(u));
            }
            number.to_string()
        }
        serde_json::Value::String(s) => s.trim().to_owned(),
        _ => return None,
    };

    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(&text).ok())
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
