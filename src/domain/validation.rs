use std::fmt;

use super::Product;

/// Input rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingName,
    InvalidPrice { product: Product, price: f64 },
    NegativeQuantity { product: Product, quantity: i64 },
    /// Prices and quantities are each valid but their product is not a finite amount.
    SubtotalOutOfRange { subtotal: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingName => write!(f, "client name is required"),
            ValidationError::InvalidPrice { product, price } => {
                write!(f, "invalid {} price: {} (must be a non-negative number)", product, price)
            }
            ValidationError::NegativeQuantity { product, quantity } => {
                write!(f, "{} quantity cannot be negative (got {})", product, quantity)
            }
            ValidationError::SubtotalOutOfRange { subtotal } => {
                write!(f, "visit subtotal is out of range: {}", subtotal)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
