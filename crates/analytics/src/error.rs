use strategies::StrategyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid input data: {0}")]
    InvalidInput(String),

    #[error("Invalid analysis options: {0}")]
    InvalidOptions(String),

    #[error("Error in calculation: {0}")]
    Calculation(String),

    #[error("Calculation strategy failed: {0}")]
    Strategy(#[from] StrategyError),
}
