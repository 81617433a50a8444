use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentToOwnError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Input failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Cannot reach down payment of {down_payment}: monthly equity contribution is {monthly_contribution}")]
    DownPaymentUnreachable {
        down_payment: Decimal,
        monthly_contribution: Decimal,
    },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RentToOwnError {
    fn from(e: serde_json::Error) -> Self {
        RentToOwnError::SerializationError(e.to_string())
    }
}
