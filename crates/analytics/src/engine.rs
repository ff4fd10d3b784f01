use crate::error::AnalyticsError;
use crate::index::{ProductIndex, SellerIndex};
use crate::options::AnalysisOptions;
use crate::report::SellerReport;
use core_types::{PurchaseRecord, SalesData};
use rust_decimal::Decimal;
use strategies::{BonusStrategy, RevenueStrategy};

/// A stateless calculator for deriving per-seller performance from sales data.
#[derive(Debug, Default)]
pub struct SalesAnalyticsEngine {}

impl SalesAnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for building the seller report.
    ///
    /// # Arguments
    ///
    /// * `data` - The sellers, product catalog and purchase records to analyze.
    /// * `options` - The revenue and bonus strategies plus the top-products limit.
    ///
    /// # Returns
    ///
    /// One `SellerReport` per seller, ordered by profit descending, or an
    /// `AnalyticsError` if the input or options are unusable. Purchase records for
    /// unknown sellers and line items for unknown SKUs are skipped, not reported.
    #[tracing::instrument(
        name = "analyze_sales_data",
        skip_all,
        fields(
            sellers = data.sellers.len(),
            products = data.products.len(),
            purchase_records = data.purchase_records.len(),
        )
    )]
    pub fn analyze(
        &self,
        data: &SalesData,
        options: &AnalysisOptions,
    ) -> Result<Vec<SellerReport>, AnalyticsError> {
        self.validate_input(data)?;
        let (revenue_strategy, bonus_strategy) = self.validate_options(options)?;

        let mut sellers = SellerIndex::build(&data.sellers);
        let products = ProductIndex::build(&data.products);
        tracing::debug!(
            sellers = sellers.len(),
            products = products.len(),
            "Built seller and product indices."
        );

        self.aggregate(&data.purchase_records, &mut sellers, &products, revenue_strategy)?;

        let reports = self.rank(sellers, bonus_strategy, options.top_products_limit)?;
        tracing::info!(sellers = reports.len(), "Seller report complete.");

        Ok(reports)
    }

    /// Rejects missing or empty input collections.
    fn validate_input(&self, data: &SalesData) -> Result<(), AnalyticsError> {
        for (name, is_empty) in [
            ("sellers", data.sellers.is_empty()),
            ("products", data.products.is_empty()),
            ("purchase_records", data.purchase_records.is_empty()),
        ] {
            if is_empty {
                return Err(AnalyticsError::InvalidInput(format!(
                    "`{name}` must be a non-empty list"
                )));
            }
        }
        Ok(())
    }

    /// Ensures both strategies are present and hands them out as trait objects.
    fn validate_options<'a>(
        &self,
        options: &'a AnalysisOptions,
    ) -> Result<(&'a dyn RevenueStrategy, &'a dyn BonusStrategy), AnalyticsError> {
        let revenue = options.calculate_revenue.as_deref().ok_or_else(|| {
            AnalyticsError::InvalidOptions("`calculate_revenue` strategy is missing".to_string())
        })?;
        let bonus = options.calculate_bonus.as_deref().ok_or_else(|| {
            AnalyticsError::InvalidOptions("`calculate_bonus` strategy is missing".to_string())
        })?;
        if options.top_products_limit == 0 {
            return Err(AnalyticsError::InvalidOptions(
                "`top_products_limit` must be greater than 0".to_string(),
            ));
        }
        Ok((revenue, bonus))
    }

    /// Folds every purchase record into the accumulator of the seller it belongs to.
    ///
    /// Revenue and sales count are taken from the record as a whole. Profit and
    /// quantities are taken per line item and only for SKUs found in the catalog.
    /// Arithmetic overflow aborts the run with `AnalyticsError::Calculation`.
    fn aggregate(
        &self,
        records: &[PurchaseRecord],
        sellers: &mut SellerIndex,
        products: &ProductIndex<'_>,
        revenue_strategy: &dyn RevenueStrategy,
    ) -> Result<(), AnalyticsError> {
        let mut skipped_records = 0usize;
        let mut skipped_items = 0usize;

        for record in records {
            let Some(seller) = sellers.get_mut(&record.seller_id) else {
                tracing::debug!(seller_id = %record.seller_id, "Skipping record for unknown seller.");
                skipped_records += 1;
                continue;
            };

            seller.record_sale(record.total_amount)?;

            for item in &record.items {
                let Some(product) = products.get(&item.sku) else {
                    tracing::debug!(sku = %item.sku, "Skipping line item for unknown product.");
                    skipped_items += 1;
                    continue;
                };

                let cost = product
                    .purchase_price
                    .checked_mul(Decimal::from(item.quantity))
                    .ok_or_else(|| {
                        AnalyticsError::Calculation(format!("cost of SKU '{}' overflows", item.sku))
                    })?;
                let revenue = revenue_strategy.calculate(item, product)?;
                let profit = revenue.checked_sub(cost).ok_or_else(|| {
                    AnalyticsError::Calculation(format!("profit of SKU '{}' overflows", item.sku))
                })?;
                seller.record_item(&item.sku, item.quantity, profit)?;
            }
        }

        if skipped_records > 0 || skipped_items > 0 {
            tracing::debug!(skipped_records, skipped_items, "Aggregation skipped unresolved entries.");
        }
        Ok(())
    }

    /// Orders sellers by profit, assigns bonuses and projects the final report rows.
    fn rank(
        &self,
        sellers: SellerIndex,
        bonus_strategy: &dyn BonusStrategy,
        top_products_limit: usize,
    ) -> Result<Vec<SellerReport>, AnalyticsError> {
        let mut ranked = sellers.into_accumulators();
        // Stable: equal profits keep seller-list order.
        ranked.sort_by(|a, b| b.stats.profit.cmp(&a.stats.profit));

        let total = ranked.len();
        ranked
            .into_iter()
            .enumerate()
            .map(|(index, mut seller)| -> Result<SellerReport, AnalyticsError> {
                seller.bonus = bonus_strategy.calculate(index, total, &seller.stats)?;
                seller.rank_products(top_products_limit);
                Ok(seller.into_report())
            })
            .collect()
    }
}

/// Convenience wrapper around `SalesAnalyticsEngine::analyze`.
pub fn analyze_sales_data(
    data: &SalesData,
    options: &AnalysisOptions,
) -> Result<Vec<SellerReport>, AnalyticsError> {
    SalesAnalyticsEngine::new().analyze(data, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TopProduct;
    use core_types::{LineItem, Product, Seller, SellerStats};
    use rust_decimal_macros::dec;
    use strategies::{BonusByProfit, SimpleRevenue, StrategyError};

    fn seller(id: &str) -> Seller {
        Seller {
            id: id.into(),
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
        }
    }

    fn product(sku: &str, purchase_price: Decimal) -> Product {
        Product {
            sku: sku.into(),
            purchase_price,
        }
    }

    fn item(sku: &str, quantity: u64, sale_price: Decimal, discount: Decimal) -> LineItem {
        LineItem {
            sku: sku.into(),
            quantity,
            sale_price,
            discount,
        }
    }

    fn record(seller_id: &str, total_amount: Decimal, items: Vec<LineItem>) -> PurchaseRecord {
        PurchaseRecord {
            seller_id: seller_id.into(),
            total_amount,
            items,
        }
    }

    fn default_options() -> AnalysisOptions {
        AnalysisOptions::new(SimpleRevenue, BonusByProfit::default())
    }

    #[test]
    fn computes_revenue_profit_and_counts() {
        let data = SalesData {
            sellers: vec![seller("1")],
            products: vec![product("A", dec!(30)), product("B", dec!(5))],
            purchase_records: vec![
                record("1", dec!(90), vec![item("A", 2, dec!(50), dec!(10))]),
                record("1", dec!(40), vec![item("B", 4, dec!(10), dec!(0))]),
            ],
        };

        let reports = analyze_sales_data(&data, &default_options()).unwrap();
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.seller_id, "1");
        assert_eq!(report.name, "First1 Last1");
        assert_eq!(report.revenue, dec!(130));
        // (90 - 60) + (40 - 20)
        assert_eq!(report.profit, dec!(50));
        assert_eq!(report.sales_count, 2);
        // Sole seller takes the first-place rate.
        assert_eq!(report.bonus, dec!(7.5));
        assert_eq!(
            report.top_products,
            vec![
                TopProduct { sku: "B".into(), quantity: 4 },
                TopProduct { sku: "A".into(), quantity: 2 },
            ]
        );
    }

    #[test]
    fn unknown_seller_record_contributes_nothing() {
        let data = SalesData {
            sellers: vec![seller("1")],
            products: vec![product("A", dec!(1))],
            purchase_records: vec![
                record("ghost", dec!(1000), vec![item("A", 100, dec!(10), dec!(0))]),
                record("1", dec!(10), vec![item("A", 1, dec!(10), dec!(0))]),
            ],
        };

        let reports = analyze_sales_data(&data, &default_options()).unwrap();
        assert_eq!(reports[0].revenue, dec!(10));
        assert_eq!(reports[0].profit, dec!(9));
        assert_eq!(reports[0].sales_count, 1);
    }

    #[test]
    fn unknown_sku_still_counts_record_revenue() {
        let data = SalesData {
            sellers: vec![seller("1")],
            products: vec![product("A", dec!(2))],
            purchase_records: vec![record(
                "1",
                dec!(75),
                vec![item("missing", 5, dec!(10), dec!(0)), item("A", 3, dec!(5), dec!(0))],
            )],
        };

        let reports = analyze_sales_data(&data, &default_options()).unwrap();
        let report = &reports[0];
        assert_eq!(report.revenue, dec!(75));
        assert_eq!(report.sales_count, 1);
        assert_eq!(report.profit, dec!(9));
        assert_eq!(report.top_products.len(), 1);
        assert_eq!(report.top_products[0].sku, "A");
    }

    #[test]
    fn seller_without_sales_is_still_reported() {
        let data = SalesData {
            sellers: vec![seller("1"), seller("2")],
            products: vec![product("A", dec!(1))],
            purchase_records: vec![record("1", dec!(5), vec![item("A", 1, dec!(5), dec!(0))])],
        };

        let reports = analyze_sales_data(&data, &default_options()).unwrap();
        assert_eq!(reports.len(), 2);
        let idle = &reports[1];
        assert_eq!(idle.seller_id, "2");
        assert_eq!(idle.revenue, Decimal::ZERO);
        assert_eq!(idle.sales_count, 0);
        assert!(idle.top_products.is_empty());
        // Second of two sellers: podium rate on zero profit.
        assert_eq!(idle.bonus, Decimal::ZERO);
    }

    #[test]
    fn ranks_by_profit_and_assigns_bonuses() {
        // One record per seller; revenue equals profit since cost is zero.
        let profits = [("1", dec!(100)), ("2", dec!(90)), ("3", dec!(90)), ("4", dec!(10))];
        let data = SalesData {
            sellers: vec![seller("4"), seller("3"), seller("1"), seller("2")],
            products: vec![product("A", dec!(0))],
            purchase_records: profits
                .iter()
                .map(|(id, profit)| record(id, *profit, vec![item("A", 1, *profit, dec!(0))]))
                .collect(),
        };

        let reports = analyze_sales_data(&data, &default_options()).unwrap();
        let order: Vec<&str> = reports.iter().map(|r| r.seller_id.as_str()).collect();
        // Sellers 3 and 2 tie on profit and keep seller-list order.
        assert_eq!(order, vec!["1", "3", "2", "4"]);
        let bonuses: Vec<Decimal> = reports.iter().map(|r| r.bonus).collect();
        assert_eq!(bonuses, vec![dec!(15), dec!(9), dec!(9), dec!(0)]);
    }

    #[test]
    fn top_products_are_capped() {
        let products: Vec<Product> = (0..15).map(|i| product(&format!("P{i}"), dec!(1))).collect();
        let items: Vec<LineItem> = (0..15u64)
            .map(|i| item(&format!("P{i}"), i + 1, dec!(2), dec!(0)))
            .collect();
        let data = SalesData {
            sellers: vec![seller("1")],
            products,
            purchase_records: vec![record("1", dec!(1), items)],
        };

        let reports = analyze_sales_data(&data, &default_options()).unwrap();
        let top = &reports[0].top_products;
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], TopProduct { sku: "P14".into(), quantity: 15 });
        assert_eq!(top[9], TopProduct { sku: "P5".into(), quantity: 6 });

        let narrow = default_options().with_top_products_limit(3);
        let reports = analyze_sales_data(&data, &narrow).unwrap();
        assert_eq!(reports[0].top_products.len(), 3);
    }

    #[test]
    fn custom_strategies_are_used() {
        let options = AnalysisOptions::new(
            |item: &LineItem, _product: &Product| -> Result<Decimal, StrategyError> {
                Ok(item.sale_price * Decimal::from(item.quantity) * dec!(2))
            },
            |_index: usize, _total: usize, seller: &SellerStats| -> Result<Decimal, StrategyError> {
                Ok(Decimal::from(seller.sales_count))
            },
        );
        let data = SalesData {
            sellers: vec![seller("1")],
            products: vec![product("A", dec!(1))],
            purchase_records: vec![
                record("1", dec!(3), vec![item("A", 1, dec!(3), dec!(50))]),
                record("1", dec!(3), vec![item("A", 1, dec!(3), dec!(50))]),
            ],
        };

        let reports = analyze_sales_data(&data, &options).unwrap();
        assert_eq!(reports[0].profit, dec!(10));
        assert_eq!(reports[0].bonus, dec!(2));
    }

    #[test]
    fn empty_collections_are_invalid_input() {
        let full = SalesData {
            sellers: vec![seller("1")],
            products: vec![product("A", dec!(1))],
            purchase_records: vec![record("1", dec!(1), vec![])],
        };

        for (name, data) in [
            ("sellers", SalesData { sellers: vec![], ..full.clone() }),
            ("products", SalesData { products: vec![], ..full.clone() }),
            ("purchase_records", SalesData { purchase_records: vec![], ..full.clone() }),
        ] {
            match analyze_sales_data(&data, &default_options()) {
                Err(AnalyticsError::InvalidInput(message)) => assert!(message.contains(name)),
                other => panic!("expected InvalidInput for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn input_is_checked_before_options() {
        let err = analyze_sales_data(&SalesData::default(), &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput(_)));
    }

    #[test]
    fn missing_strategies_are_invalid_options() {
        let data = SalesData {
            sellers: vec![seller("1")],
            products: vec![product("A", dec!(1))],
            purchase_records: vec![record("1", dec!(1), vec![])],
        };

        let no_bonus = AnalysisOptions::default().with_revenue_strategy(SimpleRevenue);
        let err = analyze_sales_data(&data, &no_bonus).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidOptions(ref m) if m.contains("calculate_bonus")));

        let no_revenue = AnalysisOptions::default().with_bonus_strategy(BonusByProfit::default());
        let err = analyze_sales_data(&data, &no_revenue).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidOptions(ref m) if m.contains("calculate_revenue")));

        let zero_limit = default_options().with_top_products_limit(0);
        let err = analyze_sales_data(&data, &zero_limit).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidOptions(_)));
    }

    #[test]
    fn from_config_uses_configured_rates_and_limit() {
        let mut config = configuration::Config::default();
        config.strategies.bonus_by_profit.first_place_rate = dec!(0.5);
        config.analysis.top_products_limit = 1;

        let options = AnalysisOptions::from_config(&config).unwrap();
        let data = SalesData {
            sellers: vec![seller("1")],
            products: vec![product("A", dec!(0)), product("B", dec!(0))],
            purchase_records: vec![record(
                "1",
                dec!(20),
                vec![item("A", 1, dec!(10), dec!(0)), item("B", 1, dec!(10), dec!(0))],
            )],
        };

        let reports = analyze_sales_data(&data, &options).unwrap();
        assert_eq!(reports[0].bonus, dec!(10));
        assert_eq!(reports[0].top_products.len(), 1);
    }

    #[test]
    fn overflowing_cost_is_a_calculation_error() {
        let data = SalesData {
            sellers: vec![seller("1")],
            products: vec![product("A", dec!(10000000000))],
            purchase_records: vec![record("1", dec!(1), vec![item("A", u64::MAX, dec!(1), dec!(0))])],
        };

        let err = analyze_sales_data(&data, &default_options()).unwrap_err();
        assert!(matches!(err, AnalyticsError::Calculation(ref m) if m.contains("'A'")));
    }

    #[test]
    fn overflowing_revenue_total_is_a_calculation_error() {
        let data = SalesData {
            sellers: vec![seller("1")],
            products: vec![product("A", dec!(1))],
            purchase_records: vec![
                record("1", Decimal::MAX, vec![]),
                record("1", Decimal::MAX, vec![]),
            ],
        };

        let err = analyze_sales_data(&data, &default_options()).unwrap_err();
        assert!(matches!(err, AnalyticsError::Calculation(ref m) if m.contains("revenue")));
    }

    #[test]
    fn strategy_failure_is_propagated() {
        let options = AnalysisOptions::new(
            |item: &LineItem, _product: &Product| -> Result<Decimal, StrategyError> {
                Err(StrategyError::Calculation(format!("cannot price {}", item.sku)))
            },
            BonusByProfit::default(),
        );
        let data = SalesData {
            sellers: vec![seller("1")],
            products: vec![product("A", dec!(1))],
            purchase_records: vec![record("1", dec!(1), vec![item("A", 1, dec!(1), dec!(0))])],
        };

        let err = analyze_sales_data(&data, &options).unwrap_err();
        assert!(matches!(err, AnalyticsError::Strategy(StrategyError::Calculation(_))));
    }
}
