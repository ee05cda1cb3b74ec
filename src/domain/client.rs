use serde::Serialize;

use super::{UnitPrices, ValidationError};

pub type ClientId = i64;

/// A registered customer on the route, with fixed per-unit prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub id: ClientId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "precioFardo")]
    pub price_fardo: f64,
    #[serde(rename = "precioBotellon")]
    pub price_botellon: f64,
}

/// Registration input. The identifier is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub prices: UnitPrices,
}

impl NewClient {
    pub fn new(name: impl Into<String>, prices: UnitPrices) -> Self {
        Self {
            name: name.into(),
            phone: None,
            address: None,
            prices,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Check the registration and return it with surrounding whitespace removed
    /// and blank optional fields dropped.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        self.prices.validate()?;

        Ok(Self {
            name,
            phone: non_blank(self.phone),
            address: non_blank(self.address),
            prices: self.prices,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_fields() {
        let client = NewClient::new("  Juan  ", UnitPrices::new(10.0, 5.0))
            .with_phone(" 555-1234 ")
            .with_address("   ")
            .normalized()
            .unwrap();

        assert_eq!(client.name, "Juan");
        assert_eq!(client.phone.as_deref(), Some("555-1234"));
        assert_eq!(client.address, None);
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = NewClient::new("   ", UnitPrices::default()).normalized();
        assert_eq!(result, Err(ValidationError::MissingName));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = NewClient::new("Ana", UnitPrices::new(3.0, -0.5)).normalized();
        assert!(matches!(result, Err(ValidationError::InvalidPrice { .. })));
    }

    #[test]
    fn test_client_wire_names() {
        let client = Client {
            id: 7,
            name: "Juan".into(),
            phone: None,
            address: Some("Calle 1".into()),
            price_fardo: 10.0,
            price_botellon: 5.0,
        };
        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["nombre"], "Juan");
        assert!(json["telefono"].is_null());
        assert_eq!(json["direccion"], "Calle 1");
        assert_eq!(json["precioFardo"], 10.0);
        assert_eq!(json["precioBotellon"], 5.0);
    }
}
