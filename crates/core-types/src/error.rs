use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to parse sales data: {0}")]
    Parse(#[from] serde_json::Error),
}
