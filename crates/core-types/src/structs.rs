use crate::error::CoreError;
use crate::serde_helpers::string_or_integer;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A member of the sales team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    #[serde(deserialize_with = "string_or_integer")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Seller {
    /// The display name used in reports: first and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A catalog entry. `purchase_price` is the cost basis for one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub purchase_price: Decimal,
}

/// One product position inside a purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u64,
    pub sale_price: Decimal,
    /// Discount in percent (10 means 10% off).
    pub discount: Decimal,
}

/// A single receipt attributed to a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(deserialize_with = "string_or_integer")]
    pub seller_id: String,
    pub total_amount: Decimal,
    pub items: Vec<LineItem>,
}

/// The three raw collections the analytics pipeline consumes.
///
/// A collection missing from the source document deserializes as empty; emptiness is
/// rejected later by validation rather than at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesData {
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub purchase_records: Vec<PurchaseRecord>,
}

impl SalesData {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CoreError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// A read-only snapshot of a seller's running totals.
///
/// This is what bonus strategies see when they are asked to price a rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerStats {
    pub seller_id: String,
    pub name: String,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub sales_count: usize,
}

impl SellerStats {
    pub fn new(seller_id: String, name: String) -> Self {
        Self {
            seller_id,
            name,
            revenue: Decimal::ZERO,
            profit: Decimal::ZERO,
            sales_count: 0,
        }
    }
}
