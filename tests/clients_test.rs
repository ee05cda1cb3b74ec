mod common;

use anyhow::Result;
use common::{test_service, StandardClients};
use reparto::application::AppError;
use reparto::domain::{NewClient, UnitPrices, ValidationError};

#[tokio::test]
async fn test_register_and_list_clients() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let juan = StandardClients::juan(&service).await?;
    let maria = StandardClients::maria(&service).await?;
    assert_ne!(juan.id, maria.id);

    let clients = service.list_clients().await?;
    assert_eq!(clients.len(), 2);

    let stored = clients.iter().find(|c| c.id == juan.id).unwrap();
    assert_eq!(stored.name, "Juan");
    assert_eq!(stored.phone.as_deref(), Some("555-0101"));
    assert_eq!(stored.address.as_deref(), Some("Av. Central 12"));
    assert_eq!(stored.price_fardo, 10.0);
    assert_eq!(stored.price_botellon, 5.0);
    assert_eq!(stored, &juan);

    Ok(())
}

#[tokio::test]
async fn test_empty_registry() -> Result<()> {
    let (service, _temp) = test_service().await?;
    assert!(service.list_clients().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_prices_default_to_zero() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let client = service
        .register_client(NewClient::new("Sin precio", UnitPrices::default()))
        .await?;

    let stored = service.get_client(client.id).await?;
    assert_eq!(stored.price_fardo, 0.0);
    assert_eq!(stored.price_botellon, 0.0);
    assert_eq!(stored.phone, None);
    assert_eq!(stored.address, None);

    Ok(())
}

#[tokio::test]
async fn test_register_rejects_blank_name() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service
        .register_client(NewClient::new("  ", UnitPrices::new(1.0, 1.0)))
        .await;
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::MissingName))
    ));
    assert!(service.list_clients().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_register_rejects_negative_price() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service
        .register_client(NewClient::new("Pedro", UnitPrices::new(-3.0, 1.0)))
        .await;
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::InvalidPrice { .. }))
    ));

    Ok(())
}

#[tokio::test]
async fn test_delete_client() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let juan = StandardClients::juan(&service).await?;
    let maria = StandardClients::maria(&service).await?;

    service.delete_client(juan.id).await?;

    let clients = service.list_clients().await?;
    assert_eq!(clients.len(), 1);
    assert!(clients.iter().all(|c| c.id != juan.id));
    assert_eq!(clients[0].id, maria.id);

    assert!(matches!(
        service.get_client(juan.id).await,
        Err(AppError::ClientNotFound(id)) if id == juan.id
    ));

    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_client_is_noop() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let juan = StandardClients::juan(&service).await?;
    let before = service.list_clients().await?;

    service.delete_client(9999).await?;
    // Deleting twice is also fine
    service.delete_client(juan.id).await?;
    service.delete_client(juan.id).await?;

    let after = service.list_clients().await?;
    assert_eq!(before.len(), 1);
    assert!(after.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_identifiers_are_not_reused() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let first = StandardClients::juan(&service).await?;
    service.delete_client(first.id).await?;
    let second = StandardClients::juan(&service).await?;

    assert!(second.id > first.id);

    Ok(())
}

#[tokio::test]
async fn test_store_available() -> Result<()> {
    let (service, _temp) = test_service().await?;
    assert!(service.store_available().await);

    service.close().await;
    assert!(!service.store_available().await);

    Ok(())
}
