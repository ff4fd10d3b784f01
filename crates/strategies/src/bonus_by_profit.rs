use crate::error::StrategyError;
use crate::BonusStrategy;
use configuration::BonusByProfitParams;
use core_types::SellerStats;
use rust_decimal::Decimal;

/// The rank-based bonus policy.
///
/// Branches are checked in order and the first match wins:
///
/// 1. rank 0 earns `first_place_rate` of profit;
/// 2. ranks 1 and 2 earn `podium_rate`;
/// 3. the last rank earns nothing;
/// 4. everyone else earns `base_rate`.
///
/// Because the podium branches come first, a sole seller still earns the first-place
/// rate and the last of two or three sellers still earns the podium rate.
#[derive(Debug, Clone, Default)]
pub struct BonusByProfit {
    params: BonusByProfitParams,
}

impl BonusByProfit {
    /// Creates a new `BonusByProfit` policy, rejecting rates outside `[0, 1]`.
    pub fn new(params: BonusByProfitParams) -> Result<Self, StrategyError> {
        params
            .validate()
            .map_err(|e| StrategyError::InvalidParameters(e.to_string()))?;
        Ok(Self { params })
    }
}

impl BonusStrategy for BonusByProfit {
    fn calculate(
        &self,
        index: usize,
        total: usize,
        seller: &SellerStats,
    ) -> Result<Decimal, StrategyError> {
        let rate = if index == 0 {
            self.params.first_place_rate
        } else if index == 1 || index == 2 {
            self.params.podium_rate
        } else if index + 1 == total {
            return Ok(Decimal::ZERO);
        } else {
            self.params.base_rate
        };

        seller.profit.checked_mul(rate).ok_or_else(|| {
            StrategyError::Calculation(format!(
                "bonus for seller '{}' overflows",
                seller.seller_id
            ))
        })
    }
}
