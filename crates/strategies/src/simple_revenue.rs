use crate::error::StrategyError;
use crate::RevenueStrategy;
use core_types::{LineItem, Product};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Revenue as the discounted sale price: `sale_price × quantity × (1 − discount / 100)`.
///
/// The catalog entry is not consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRevenue;

impl RevenueStrategy for SimpleRevenue {
    fn calculate(&self, item: &LineItem, _product: &Product) -> Result<Decimal, StrategyError> {
        let overflow = || {
            StrategyError::Calculation(format!("revenue for SKU '{}' overflows", item.sku))
        };

        let discount_coefficient = item
            .discount
            .checked_div(dec!(100))
            .and_then(|fraction| Decimal::ONE.checked_sub(fraction))
            .ok_or_else(overflow)?;

        item.sale_price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|gross| gross.checked_mul(discount_coefficient))
            .ok_or_else(overflow)
    }
}
