pub mod error;
pub mod serde_helpers;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use structs::{LineItem, Product, PurchaseRecord, SalesData, Seller, SellerStats};
