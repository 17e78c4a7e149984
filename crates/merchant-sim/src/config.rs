//! Configuration loading and typed config structures for the simulation.
//!
//! The configuration lives in `merchant-config.yaml` in the working
//! directory. Every section is optional; the defaults describe the cuddle
//! economy: one doggo costs one cuddle and cuddles back a hundred per tick.

use std::path::Path;

use serde::Deserialize;

use merchant_items::Catalog;
use merchant_ledger::Ledger;
use rust_decimal::Decimal;

/// Environment variable overriding `sim.tick_interval_ms`.
pub const TICK_INTERVAL_ENV: &str = "MERCHANT_TICK_INTERVAL_MS";

/// Environment variable overriding `sim.ticks`.
pub const TICKS_ENV: &str = "MERCHANT_TICKS";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `merchant-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimConfig {
    /// Tick timing and run length.
    #[serde(default)]
    pub sim: TickConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// The wallet the simulation starts with.
    #[serde(default = "default_wallet")]
    pub wallet: Ledger,

    /// The items on sale.
    #[serde(default = "default_catalog")]
    pub catalog: Catalog,

    /// Purchases to attempt, by tick.
    #[serde(default = "default_purchases")]
    pub purchases: Vec<ScheduledPurchase>,
}

impl SimConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for tick timing:
    /// - `MERCHANT_TICK_INTERVAL_MS` overrides `sim.tick_interval_ms`
    /// - `MERCHANT_TICKS` overrides `sim.ticks`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.sim.apply_env_overrides();
        Ok(config)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        let mut config = Self {
            sim: TickConfig::default(),
            logging: LoggingConfig::default(),
            wallet: default_wallet(),
            catalog: default_catalog(),
            purchases: default_purchases(),
        };
        config.sim.apply_env_overrides();
        config
    }
}

/// Tick timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TickConfig {
    /// Milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Number of ticks to run before stopping.
    #[serde(default = "default_ticks")]
    pub ticks: u64,
}

impl TickConfig {
    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`. Values that do not parse are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup(TICK_INTERVAL_ENV).and_then(|v| v.trim().parse().ok()) {
            self.tick_interval_ms = val;
        }
        if let Some(val) = lookup(TICKS_ENV).and_then(|v| v.trim().parse().ok()) {
            self.ticks = val;
        }
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            ticks: default_ticks(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// A purchase the simulation attempts at a given tick.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduledPurchase {
    /// The tick (starting at 0) to buy at, before production is folded in.
    pub tick: u64,

    /// The item type to buy.
    pub item: String,

    /// How many units to buy.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_tick_interval_ms() -> u64 {
    200
}

const fn default_ticks() -> u64 {
    25
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_quantity() -> u32 {
    1
}

fn default_wallet() -> Ledger {
    Ledger::from([("cuddles", Decimal::ONE)])
}

fn default_catalog() -> Catalog {
    Catalog {
        items: vec![merchant_items::ItemDefinition {
            item_type: "Doggo".to_owned(),
            cost: Some(ledger_value("cuddles", -1)),
            effect: Some(ledger_value("cuddles", 100)),
        }],
    }
}

fn default_purchases() -> Vec<ScheduledPurchase> {
    vec![
        ScheduledPurchase {
            tick: 0,
            item: "Doggo".to_owned(),
            quantity: 1,
        },
        ScheduledPurchase {
            tick: 3,
            item: "Doggo".to_owned(),
            quantity: 2,
        },
    ]
}

fn ledger_value(currency: &str, amount: i64) -> serde_yml::Value {
    let mut mapping = serde_yml::Mapping::new();
    mapping.insert(serde_yml::Value::from(currency), serde_yml::Value::from(amount));
    serde_yml::Value::Mapping(mapping)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_config_is_the_cuddle_economy() {
        let mut config = SimConfig::default();
        config.sim = TickConfig::default();
        assert_eq!(config.sim.tick_interval_ms, 200);
        assert_eq!(config.sim.ticks, 25);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.wallet.get("cuddles"), Some(dec!(1)));
        assert_eq!(config.catalog.items.len(), 1);
        assert_eq!(config.purchases.len(), 2);
        assert!(config.catalog.market::<()>().is_ok_and(|m| m.get("Doggo").is_some()));
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
sim:
  tick_interval_ms: 50
  ticks: 10

logging:
  level: debug

wallet:
  GOLD: 100

catalog:
  items:
    - type: Mine
      cost: { GOLD: -50 }
      effect: { GOLD: 5 }

purchases:
  - tick: 0
    item: Mine
  - tick: 4
    item: Mine
    quantity: 3
";
        let config = SimConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.wallet, Ledger::from([("GOLD", dec!(100))]));
        assert_eq!(config.catalog.items.first().map(|d| d.item_type.as_str()), Some("Mine"));
        assert_eq!(
            config.purchases,
            vec![
                ScheduledPurchase {
                    tick: 0,
                    item: "Mine".to_owned(),
                    quantity: 1,
                },
                ScheduledPurchase {
                    tick: 4,
                    item: "Mine".to_owned(),
                    quantity: 3,
                },
            ],
        );
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = SimConfig::parse("logging:\n  level: warn\n");
        let config = config.ok().unwrap_or_default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.wallet, default_wallet());
        assert_eq!(config.catalog, default_catalog());
    }

    #[test]
    fn overrides_replace_tick_settings() {
        let mut sim = TickConfig::default();
        sim.apply_overrides(|key| match key {
            TICK_INTERVAL_ENV => Some("10".to_owned()),
            TICKS_ENV => Some(" 3 ".to_owned()),
            _ => None,
        });
        assert_eq!(sim.tick_interval_ms, 10);
        assert_eq!(sim.ticks, 3);
    }

    #[test]
    fn unparseable_overrides_are_ignored() {
        let mut sim = TickConfig::default();
        sim.apply_overrides(|_| Some("soon".to_owned()));
        assert_eq!(sim, TickConfig::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = SimConfig::parse("sim: [not, a, mapping");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SimConfig::from_file(Path::new("/nonexistent/merchant-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
