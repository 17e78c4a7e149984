//! The synchronous simulation state and its per-tick step.
//!
//! Each tick runs in two phases:
//!
//! 1. **Purchases** -- every purchase scheduled for this tick is attempted in
//!    configuration order. Declined purchases leave the wallet as it was.
//! 2. **Production** -- the market's production for the resulting wallet is
//!    folded in.
//!
//! The timing loop lives in `main`; nothing here is async.

use merchant_items::{Market, Purchase};
use merchant_ledger::{Ledger, sum};
use tracing::{debug, info, warn};

use crate::config::{ScheduledPurchase, SimConfig};
use crate::error::SimError;

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// The tick that was just run.
    pub tick: u64,
    /// Purchases that went through.
    pub completed: u32,
    /// Purchases the wallet could not afford.
    pub declined: u32,
    /// What the wallet produced this tick.
    pub production: Ledger,
}

/// A running merchant economy.
#[derive(Debug, Clone)]
pub struct Simulation {
    market: Market<()>,
    wallet: Ledger,
    purchases: Vec<ScheduledPurchase>,
    tick: u64,
}

impl Simulation {
    /// Build a simulation from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Catalog`] if the configured catalog is invalid.
    pub fn from_config(config: &SimConfig) -> Result<Self, SimError> {
        let market = config.catalog.market()?;
        Ok(Self::new(market, config.wallet.clone(), config.purchases.clone()))
    }

    /// Build a simulation from a market, a starting wallet and a schedule.
    pub const fn new(market: Market<()>, wallet: Ledger, purchases: Vec<ScheduledPurchase>) -> Self {
        Self {
            market,
            wallet,
            purchases,
            tick: 0,
        }
    }

    /// The current wallet.
    pub const fn wallet(&self) -> &Ledger {
        &self.wallet
    }

    /// The next tick to be run.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Run one tick.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Market`] if a scheduled purchase names an item
    /// that is not on sale. The simulation is then left as it was before
    /// the call.
    pub fn step(&mut self) -> Result<TickReport, SimError> {
        let tick = self.tick;
        let mut wallet = self.wallet.clone();
        let mut completed: u32 = 0;
        let mut declined: u32 = 0;

        for scheduled in self.purchases.iter().filter(|p| p.tick == tick) {
            let outcome = self
                .market
                .purchase(&scheduled.item, &wallet, &(), scheduled.quantity)
                .map_err(|source| SimError::Market { tick, source })?;

            match outcome {
                Purchase::Completed { .. } if scheduled.quantity == 0 => {
                    debug!(tick, item = scheduled.item, "Skipping purchase of zero units");
                }
                Purchase::Completed { wallet: charged } => {
                    info!(tick, item = scheduled.item, quantity = scheduled.quantity, "Purchase completed");
                    wallet = charged;
                    completed = completed.saturating_add(1);
                }
                Purchase::Declined { shortfall } => {
                    warn!(
                        tick,
                        item = scheduled.item,
                        quantity = scheduled.quantity,
                        shortfall = %shortfall,
                        "Purchase declined"
                    );
                    declined = declined.saturating_add(1);
                }
            }
        }

        let production = self.market.production(&wallet, &());
        self.wallet = sum([&wallet, &production]);
        debug!(tick, production = %production, wallet = %self.wallet, "Tick complete");

        self.tick = self.tick.saturating_add(1);
        Ok(TickReport {
            tick,
            completed,
            declined,
            production,
        })
    }
}
