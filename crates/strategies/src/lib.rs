//! # Calculation Strategies
//!
//! The two pluggable calculations of the sales report live here: how much revenue a
//! single line item brings in, and how large a bonus a seller earns for their rank.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It depends only on `core-types`
//!   and `configuration`.
//! - **Pipeline Agnostic:** The analytics engine only sees the `RevenueStrategy` and
//!   `BonusStrategy` traits, so either calculation can be swapped without touching the
//!   aggregation loop.
//! - **Closures Welcome:** Both traits are implemented for plain `Fn` closures with the
//!   matching signature, which keeps ad-hoc policies (and test doubles) one line long.
//!
//! ## Public API
//!
//! - `RevenueStrategy` / `BonusStrategy`: the traits the engine calls.
//! - `SimpleRevenue` / `BonusByProfit`: the default implementations.
//! - `create_revenue_strategy` / `create_bonus_strategy`: factories driven by `Config`.

// Declare all the modules that constitute this crate.
pub mod bonus_by_profit;
pub mod error;
pub mod factory;
pub mod simple_revenue;

// Re-export the key components to create a clean, public-facing API.
pub use bonus_by_profit::BonusByProfit;
pub use error::StrategyError;
pub use factory::{create_bonus_strategy, create_revenue_strategy};
pub use simple_revenue::SimpleRevenue;

use core_types::{LineItem, Product, SellerStats};
use rust_decimal::Decimal;

/// Prices a single line item.
///
/// The `Send + Sync` bounds allow one strategy instance to serve several reports.
pub trait RevenueStrategy: Send + Sync {
    /// Returns the revenue earned from `item`, given the catalog entry it refers to.
    fn calculate(&self, item: &LineItem, product: &Product) -> Result<Decimal, StrategyError>;
}

/// Prices a seller's rank.
pub trait BonusStrategy: Send + Sync {
    /// Returns the bonus for the seller at 0-based `index` among `total` sellers
    /// sorted by profit descending.
    fn calculate(
        &self,
        index: usize,
        total: usize,
        seller: &SellerStats,
    ) -> Result<Decimal, StrategyError>;
}

impl<F> RevenueStrategy for F
where
    F: Fn(&LineItem, &Product) -> Result<Decimal, StrategyError> + Send + Sync,
{
    fn calculate(&self, item: &LineItem, product: &Product) -> Result<Decimal, StrategyError> {
        self(item, product)
    }
}

impl<F> BonusStrategy for F
where
    F: Fn(usize, usize, &SellerStats) -> Result<Decimal, StrategyError> + Send + Sync,
{
    fn calculate(
        &self,
        index: usize,
        total: usize,
        seller: &SellerStats,
    ) -> Result<Decimal, StrategyError> {
        self(index, total, seller)
    }
}
