use crate::error::AnalyticsError;
use crate::report::{round_money, SellerReport, TopProduct};
use core_types::{Product, Seller, SellerStats};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Running totals for one seller while purchase records are folded in.
#[derive(Debug, Clone)]
pub(crate) struct SellerAccumulator {
    pub stats: SellerStats,
    pub bonus: Decimal,
    pub top_products: Vec<TopProduct>,
    // Cumulative quantity per SKU, in first-sold order.
    products_sold: Vec<TopProduct>,
    product_slots: HashMap<String, usize>,
}

impl SellerAccumulator {
    fn new(seller: &Seller) -> Self {
        Self {
            stats: SellerStats::new(seller.id.clone(), seller.full_name()),
            bonus: Decimal::ZERO,
            top_products: Vec::new(),
            products_sold: Vec::new(),
            product_slots: HashMap::new(),
        }
    }

    /// Counts one purchase record towards this seller.
    pub fn record_sale(&mut self, total_amount: Decimal) -> Result<(), AnalyticsError> {
        self.stats.revenue = self
            .stats
            .revenue
            .checked_add(total_amount)
            .ok_or_else(|| self.overflow("revenue"))?;
        self.stats.sales_count += 1;
        Ok(())
    }

    /// Adds one resolved line item's profit and quantity.
    ///
    /// Nothing is changed when either running total would overflow.
    pub fn record_item(
        &mut self,
        sku: &str,
        quantity: u64,
        profit: Decimal,
    ) -> Result<(), AnalyticsError> {
        let total_profit = self
            .stats
            .profit
            .checked_add(profit)
            .ok_or_else(|| self.overflow("profit"))?;

        match self.product_slots.get(sku) {
            Some(&slot) => {
                let sold = &mut self.products_sold[slot].quantity;
                *sold = sold.checked_add(quantity).ok_or_else(|| {
                    AnalyticsError::Calculation(format!(
                        "quantity sold of SKU '{sku}' by seller '{}' overflows",
                        self.stats.seller_id
                    ))
                })?;
            }
            None => {
                self.product_slots.insert(sku.to_string(), self.products_sold.len());
                self.products_sold.push(TopProduct {
                    sku: sku.to_string(),
                    quantity,
                });
            }
        }

        self.stats.profit = total_profit;
        Ok(())
    }

    fn overflow(&self, metric: &str) -> AnalyticsError {
        AnalyticsError::Calculation(format!(
            "{metric} of seller '{}' overflows",
            self.stats.seller_id
        ))
    }

    /// Fills `top_products` with the `limit` best sellers by quantity.
    ///
    /// The sort is stable, so equal quantities keep first-sold order.
    pub fn rank_products(&mut self, limit: usize) {
        let mut ranked = self.products_sold.clone();
        ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        ranked.truncate(limit);
        self.top_products = ranked;
    }

    pub fn into_report(self) -> SellerReport {
        SellerReport {
            seller_id: self.stats.seller_id,
            name: self.stats.name,
            revenue: round_money(self.stats.revenue),
            profit: round_money(self.stats.profit),
            sales_count: self.stats.sales_count,
            top_products: self.top_products,
            bonus: round_money(self.bonus),
        }
    }
}

/// Arena of seller accumulators addressed by seller id.
///
/// Slots are allocated in seller-list order. A repeated id resets its existing slot
/// instead of allocating a new one, so every id appears exactly once.
#[derive(Debug)]
pub(crate) struct SellerIndex {
    accumulators: Vec<SellerAccumulator>,
    slots: HashMap<String, usize>,
}

impl SellerIndex {
    pub fn build(sellers: &[Seller]) -> Self {
        let mut index = Self {
            accumulators: Vec::with_capacity(sellers.len()),
            slots: HashMap::with_capacity(sellers.len()),
        };

        for seller in sellers {
            let accumulator = SellerAccumulator::new(seller);
            match index.slots.get(&seller.id) {
                Some(&slot) => index.accumulators[slot] = accumulator,
                None => {
                    index.slots.insert(seller.id.clone(), index.accumulators.len());
                    index.accumulators.push(accumulator);
                }
            }
        }

        index
    }

    pub fn get_mut(&mut self, seller_id: &str) -> Option<&mut SellerAccumulator> {
        let slot = *self.slots.get(seller_id)?;
        self.accumulators.get_mut(slot)
    }

    pub fn len(&self) -> usize {
        self.accumulators.len()
    }

    /// Releases the accumulators in slot order.
    pub fn into_accumulators(self) -> Vec<SellerAccumulator> {
        self.accumulators
    }
}

/// Catalog lookup by SKU. Later duplicates overwrite earlier ones.
#[derive(Debug)]
pub(crate) struct ProductIndex<'a> {
    products: HashMap<&'a str, &'a Product>,
}

impl<'a> ProductIndex<'a> {
    pub fn build(products: &'a [Product]) -> Self {
        let products = products
            .iter()
            .map(|product| (product.sku.as_str(), product))
            .collect();
        Self { products }
    }

    pub fn get(&self, sku: &str) -> Option<&'a Product> {
        self.products.get(sku).copied()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }
}
