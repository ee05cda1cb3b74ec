use super::ValidationError;

/// The two billable unit types carried by every client and every visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    /// A shrink-wrapped pack of small bottles
    Fardo,
    /// A large refillable water jug
    Botellon,
}

impl Product {
    pub const ALL: [Product; 2] = [Product::Fardo, Product::Botellon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Fardo => "fardo",
            Product::Botellon => "botellon",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-unit prices a client pays, one per product.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UnitPrices {
    pub fardo: f64,
    pub botellon: f64,
}

impl UnitPrices {
    pub fn new(fardo: f64, botellon: f64) -> Self {
        Self { fardo, botellon }
    }

    pub fn price_of(&self, product: Product) -> f64 {
        match product {
            Product::Fardo => self.fardo,
            Product::Botellon => self.botellon,
        }
    }

    /// Prices must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for product in Product::ALL {
            let price = self.price_of(product);
            if !price.is_finite() || price < 0.0 {
                return Err(ValidationError::InvalidPrice { product, price });
            }
        }
        Ok(())
    }

    /// Amount owed for the given quantities at these prices.
    /// subtotal = fardos * fardo + botellones * botellon
    /// Not checked here: very large inputs overflow to infinity.
    pub fn subtotal(&self, quantities: &Quantities) -> f64 {
        quantities.fardos as f64 * self.fardo + quantities.botellones as f64 * self.botellon
    }
}

/// Units delivered in a single visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quantities {
    pub fardos: i64,
    pub botellones: i64,
}

impl Quantities {
    pub fn new(fardos: i64, botellones: i64) -> Self {
        Self { fardos, botellones }
    }

    pub fn of(&self, product: Product) -> i64 {
        match product {
            Product::Fardo => self.fardos,
            Product::Botellon => self.botellones,
        }
    }

    /// Quantities may be zero but never negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for product in Product::ALL {
            let quantity = self.of(product);
            if quantity < 0 {
                return Err(ValidationError::NegativeQuantity { product, quantity });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal() {
        let prices = UnitPrices::new(10.0, 5.0);
        assert_eq!(prices.subtotal(&Quantities::new(3, 2)), 40.0);
        assert_eq!(prices.subtotal(&Quantities::new(0, 0)), 0.0);
        assert_eq!(prices.subtotal(&Quantities::new(0, 7)), 35.0);
    }

    #[test]
    fn test_subtotal_fractional_prices() {
        let prices = UnitPrices::new(2.5, 0.75);
        let subtotal = prices.subtotal(&Quantities::new(4, 3));
        assert!((subtotal - 12.25).abs() < 1e-9);
    }

    #[test]
    fn test_zero_prices_yield_zero() {
        let prices = UnitPrices::default();
        assert_eq!(prices.subtotal(&Quantities::new(12, 4)), 0.0);
    }

    #[test]
    fn test_price_validation() {
        assert!(UnitPrices::new(0.0, 0.0).validate().is_ok());
        assert!(UnitPrices::new(10.0, 3.5).validate().is_ok());
        assert_eq!(
            UnitPrices::new(-1.0, 3.5).validate(),
            Err(ValidationError::InvalidPrice {
                product: Product::Fardo,
                price: -1.0
            })
        );
        assert!(UnitPrices::new(1.0, f64::NAN).validate().is_err());
        assert!(UnitPrices::new(f64::INFINITY, 1.0).validate().is_err());
    }

    #[test]
    fn test_negative_quantities_rejected() {
        assert!(Quantities::new(0, 0).validate().is_ok());
        assert_eq!(
            Quantities::new(1, -2).validate(),
            Err(ValidationError::NegativeQuantity {
                product: Product::Botellon,
                quantity: -2
            })
        );
    }

    #[test]
    fn test_product_display() {
        assert_eq!(Product::Fardo.to_string(), "fardo");
        assert_eq!(Product::Botellon.to_string(), "botellon");
    }

    #[test]
    fn test_subtotal_can_overflow() {
        let prices = UnitPrices::new(1e308, 0.0);
        assert!(prices.validate().is_ok());
        assert!(prices.subtotal(&Quantities::new(10, 0)).is_infinite());
    }
}
