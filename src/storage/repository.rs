use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use crate::domain::{
    format_date, parse_date, Client, ClientId, NewClient, UnitPrices, ValidationError, Visit,
    VisitDraft, VisitId,
};

use super::{MIGRATION_001_CLIENTES, MIGRATION_002_VISITAS, MIGRATION_003_VISITAS_FECHA};

/// SQLite admits one writer at a time. With a single pooled connection the
/// read-then-insert in [`Repository::record_visit`] never races another writer
/// into SQLITE_BUSY.
const MAX_CONNECTIONS: u32 = 1;

/// What happened to a visit handed to [`Repository::record_visit`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Recorded(Visit),
    /// No client with the draft's id; nothing was stored.
    ClientMissing,
    /// The client's prices could not price the draft; nothing was stored.
    Rejected(ValidationError),
}

/// Repository for persisting and querying clients and visits.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Create both tables if they are missing. Safe to run on every startup.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_CLIENTES)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        sqlx::query(MIGRATION_002_VISITAS)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 002")?;

        sqlx::query(MIGRATION_003_VISITAS_FECHA)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 003")?;

        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Round-trip a trivial query to check the store answers.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }

    /// Close every pooled connection. Pending queries finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ========================
    // Client operations
    // ========================

    /// Insert a client and return it with its assigned identifier.
    pub async fn save_client(&self, client: &NewClient) -> Result<Client> {
        let result = sqlx::query(
            r#"
            INSERT INTO clientes (nombre, telefono, direccion, precioFardo, precioBotellon)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&client.name)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(client.prices.fardo)
        .bind(client.prices.botellon)
        .execute(&self.pool)
        .await
        .context("Failed to save client")?;

        Ok(Client {
            id: result.last_insert_rowid(),
            name: client.name.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            price_fardo: client.prices.fardo,
            price_botellon: client.prices.botellon,
        })
    }

    /// Get a client by ID.
    pub async fn get_client(&self, id: ClientId) -> Result<Option<Client>> {
        let row = sqlx::query(
            r#"
            SELECT id, nombre, telefono, direccion, precioFardo, precioBotellon
            FROM clientes
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch client")?;

        row.as_ref().map(Self::row_to_client).transpose()
    }

    /// List all clients, oldest first.
    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        let rows = sqlx::query(
            r#"
            SELECT id, nombre, telefono, direccion, precioFardo, precioBotellon
            FROM clientes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list clients")?;

        rows.iter().map(Self::row_to_client).collect()
    }

    /// Delete a client. Returns whether a row was removed. Visits are left untouched.
    pub async fn delete_client(&self, id: ClientId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete client")?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_client(row: &sqlx::sqlite::SqliteRow) -> Result<Client> {
        let prices = Self::row_to_prices(row)?;
        Ok(Client {
            id: row.try_get("id").context("Invalid client ID")?,
            name: row.try_get("nombre").context("Invalid client name")?,
            phone: row.try_get("telefono").context("Invalid client phone")?,
            address: row.try_get("direccion").context("Invalid client address")?,
            price_fardo: prices.fardo,
            price_botellon: prices.botellon,
        })
    }

    fn row_to_prices(row: &sqlx::sqlite::SqliteRow) -> Result<UnitPrices> {
        // Columns default to 0 but rows written by other tools may still hold NULL
        let fardo: Option<f64> = row.try_get("precioFardo").context("Invalid precioFardo")?;
        let botellon: Option<f64> = row
            .try_get("precioBotellon")
            .context("Invalid precioBotellon")?;
        Ok(UnitPrices::new(
            fardo.unwrap_or_default(),
            botellon.unwrap_or_default(),
        ))
    }

    // ========================
    // Visit operations
    // ========================

    /// Price and store a visit in one transaction.
    ///
    /// The client's prices are read and the visit inserted under the same
    /// transaction, so a concurrent client deletion cannot slip in between.
    /// The transaction is rolled back unless the visit is [`RecordOutcome::Recorded`].
    pub async fn record_visit(&self, draft: &VisitDraft, date: NaiveDate) -> Result<RecordOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin visit transaction")?;

        let row = sqlx::query("SELECT precioFardo, precioBotellon FROM clientes WHERE id = ?")
            .bind(draft.client_id)
            .fetch_optional(&mut *tx)
            .await
            .context("Failed to fetch client prices")?;

        let prices = match row {
            Some(row) => Self::row_to_prices(&row)?,
            None => {
                tx.rollback()
                    .await
                    .context("Failed to roll back visit transaction")?;
                return Ok(RecordOutcome::ClientMissing);
            }
        };

        let mut visit = match Visit::priced(draft, &prices, date) {
            Ok(visit) => visit,
            Err(e) => {
                tx.rollback()
                    .await
                    .context("Failed to roll back visit transaction")?;
                return Ok(RecordOutcome::Rejected(e));
            }
        };

        let result = sqlx::query(
            r#"
            INSERT INTO visitas (clienteId, fardos, botellones, subtotal, nota, fecha)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(visit.client_id)
        .bind(visit.fardos)
        .bind(visit.botellones)
        .bind(visit.subtotal)
        .bind(&visit.note)
        .bind(format_date(visit.date))
        .execute(&mut *tx)
        .await
        .context("Failed to save visit")?;

        tx.commit()
            .await
            .context("Failed to commit visit transaction")?;

        visit.id = result.last_insert_rowid();
        Ok(RecordOutcome::Recorded(visit))
    }

    /// Insert an already priced visit as-is and return its assigned identifier.
    /// No price lookup happens; used to seed visits on dates other than today.
    pub async fn insert_visit(&self, visit: &Visit) -> Result<VisitId> {
        let result = sqlx::query(
            r#"
            INSERT INTO visitas (clienteId, fardos, botellones, subtotal, nota, fecha)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(visit.client_id)
        .bind(visit.fardos)
        .bind(visit.botellones)
        .bind(visit.subtotal)
        .bind(&visit.note)
        .bind(format_date(visit.date))
        .execute(&self.pool)
        .await
        .context("Failed to insert visit")?;

        Ok(result.last_insert_rowid())
    }

    /// List visits stamped with exactly this date, in insertion order.
    pub async fn list_visits_on(&self, date: NaiveDate) -> Result<Vec<Visit>> {
        let rows = sqlx::query(
            r#"
            SELECT id, clienteId, fardos, botellones, subtotal, nota, fecha
            FROM visitas
            WHERE fecha = ?
            ORDER BY id
            "#,
        )
        .bind(format_date(date))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list visits")?;

        rows.iter().map(Self::row_to_visit).collect()
    }

    /// Delete a visit. Returns whether a row was removed.
    pub async fn delete_visit(&self, id: VisitId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM visitas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete visit")?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_visit(row: &sqlx::sqlite::SqliteRow) -> Result<Visit> {
        let fecha: String = row.try_get("fecha").context("Invalid visit date")?;
        let fardos: Option<i64> = row.try_get("fardos").context("Invalid fardos")?;
        let botellones: Option<i64> = row.try_get("botellones").context("Invalid botellones")?;
        let subtotal: Option<f64> = row.try_get("subtotal").context("Invalid subtotal")?;

        Ok(Visit {
            id: row.try_get("id").context("Invalid visit ID")?,
            client_id: row.try_get("clienteId").context("Invalid client reference")?,
            fardos: fardos.unwrap_or_default(),
            botellones: botellones.unwrap_or_default(),
            subtotal: subtotal.unwrap_or_default(),
            note: row.try_get("nota").context("Invalid visit note")?,
            date: parse_date(&fecha)
                .with_context(|| format!("Invalid visit date: {}", fecha))?,
        })
    }
}
