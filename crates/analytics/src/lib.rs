//! # Sales Analytics Engine
//!
//! This crate turns raw sales data into a per-seller performance report: revenue,
//! profit, number of sales, best-selling products and a rank-based bonus.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files or
//!   terminals. It depends only on `core-types`, `strategies` and `configuration`.
//! - **Stateless Calculation:** The `SalesAnalyticsEngine` is a stateless calculator. It
//!   takes `SalesData` and `AnalysisOptions` as input and produces a `Vec<SellerReport>`
//!   as output. Every call builds and drops its own working state.
//!
//! ## Pipeline
//!
//! 1. Validate the input collections and the options.
//! 2. Index sellers (into accumulators) and products (by SKU).
//! 3. Fold purchase records into the seller accumulators.
//! 4. Rank by profit, assign bonuses, pick top products and round the output.
//!
//! ## Public API
//!
//! - `SalesAnalyticsEngine` / `analyze_sales_data`: the entry points.
//! - `AnalysisOptions`: the injected revenue and bonus strategies.
//! - `SellerReport` / `TopProduct`: the output rows.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
mod index;
pub mod options;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{analyze_sales_data, SalesAnalyticsEngine};
pub use error::AnalyticsError;
pub use options::AnalysisOptions;
pub use report::{SellerReport, TopProduct};
