use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("unknown BI-RADS category: {0}")]
    UnknownBiradsCategory(String),

    #[error("unknown TI-RADS category: {0}")]
    UnknownTiradsCategory(u32),
}
