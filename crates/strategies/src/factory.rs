use crate::bonus_by_profit::BonusByProfit;
use crate::error::StrategyError;
use crate::simple_revenue::SimpleRevenue;
use crate::{BonusStrategy, RevenueStrategy};
use configuration::Config;

/// Creates the revenue strategy used for line-item pricing.
pub fn create_revenue_strategy(_config: &Config) -> Result<Box<dyn RevenueStrategy>, StrategyError> {
    Ok(Box::new(SimpleRevenue))
}

/// Creates the bonus strategy, parameterized by `[strategies.bonus_by_profit]`.
pub fn create_bonus_strategy(config: &Config) -> Result<Box<dyn BonusStrategy>, StrategyError> {
    let params = config.strategies.bonus_by_profit.clone();
    tracing::debug!(?params, "Building BonusByProfit strategy.");
    Ok(Box::new(BonusByProfit::new(params)?))
}
