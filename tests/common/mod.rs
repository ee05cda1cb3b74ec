// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use reparto::application::DeliveryService;
use reparto::domain::{Client, NewClient, UnitPrices};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(DeliveryService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = DeliveryService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to build a UTC instant on a given date and hour
pub fn at(date_str: &str, hour: u32) -> DateTime<Utc> {
    parse_date(date_str).and_hms_opt(hour, 0, 0).unwrap().and_utc()
}

/// Test fixture: clients used across the ledger tests
pub struct StandardClients;

impl StandardClients {
    /// Juan pays 10 per fardo and 5 per botellon
    pub async fn juan(service: &DeliveryService) -> Result<Client> {
        Ok(service
            .register_client(
                NewClient::new("Juan", UnitPrices::new(10.0, 5.0))
                    .with_phone("555-0101")
                    .with_address("Av. Central 12"),
            )
            .await?)
    }

    /// Maria pays 12.5 per fardo and 4 per botellon
    pub async fn maria(service: &DeliveryService) -> Result<Client> {
        Ok(service
            .register_client(NewClient::new("Maria", UnitPrices::new(12.5, 4.0)))
            .await?)
    }
}
