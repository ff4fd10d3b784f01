use crate::error::AnalyticsError;
use configuration::{Config, DEFAULT_TOP_PRODUCTS_LIMIT};
use std::fmt;
use strategies::{create_bonus_strategy, create_revenue_strategy, BonusStrategy, RevenueStrategy};

/// The injected calculations and knobs for one analysis run.
///
/// Both strategies are optional at the type level so that an incomplete set can be
/// represented and rejected by the engine with `AnalyticsError::InvalidOptions`.
pub struct AnalysisOptions {
    pub calculate_revenue: Option<Box<dyn RevenueStrategy>>,
    pub calculate_bonus: Option<Box<dyn BonusStrategy>>,
    /// Maximum number of entries in each seller's `top_products`.
    pub top_products_limit: usize,
}

impl AnalysisOptions {
    /// A complete option set with the default top-products limit.
    pub fn new(
        calculate_revenue: impl RevenueStrategy + 'static,
        calculate_bonus: impl BonusStrategy + 'static,
    ) -> Self {
        Self {
            calculate_revenue: Some(Box::new(calculate_revenue)),
            calculate_bonus: Some(Box::new(calculate_bonus)),
            top_products_limit: DEFAULT_TOP_PRODUCTS_LIMIT,
        }
    }

    /// Builds both strategies through the strategy factory and applies `[analysis]` settings.
    pub fn from_config(config: &Config) -> Result<Self, AnalyticsError> {
        Ok(Self {
            calculate_revenue: Some(create_revenue_strategy(config)?),
            calculate_bonus: Some(create_bonus_strategy(config)?),
            top_products_limit: config.analysis.top_products_limit,
        })
    }

    pub fn with_revenue_strategy(mut self, strategy: impl RevenueStrategy + 'static) -> Self {
        self.calculate_revenue = Some(Box::new(strategy));
        self
    }

    pub fn with_bonus_strategy(mut self, strategy: impl BonusStrategy + 'static) -> Self {
        self.calculate_bonus = Some(Box::new(strategy));
        self
    }

    pub fn with_top_products_limit(mut self, limit: usize) -> Self {
        self.top_products_limit = limit;
        self
    }
}

impl Default for AnalysisOptions {
    /// An empty option set. It must be completed before it passes validation.
    fn default() -> Self {
        Self {
            calculate_revenue: None,
            calculate_bonus: None,
            top_products_limit: DEFAULT_TOP_PRODUCTS_LIMIT,
        }
    }
}

impl fmt::Debug for AnalysisOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisOptions")
            .field("calculate_revenue", &self.calculate_revenue.is_some())
            .field("calculate_bonus", &self.calculate_bonus.is_some())
            .field("top_products_limit", &self.top_products_limit)
            .finish()
    }
}
