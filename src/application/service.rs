use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    service_date, today, Client, ClientId, DailyLedger, NewClient, Visit, VisitDraft, VisitId,
};
use crate::storage::{RecordOutcome, Repository};

use super::AppError;

/// Application service for the client registry and the visit ledger.
/// Both the HTTP server and the CLI go through this type.
pub struct DeliveryService {
    repo: Repository,
}

impl DeliveryService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Open (creating if needed) the database at the given path and ensure the schema.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Direct access to the store, for seeding and maintenance.
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Whether the store currently answers queries.
    pub async fn store_available(&self) -> bool {
        match self.repo.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Store unavailable: {:#}", e);
                false
            }
        }
    }

    pub async fn close(&self) {
        self.repo.close().await;
    }

    // ========================
    // Client operations
    // ========================

    /// List every registered client.
    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        Ok(self.repo.list_clients().await?)
    }

    /// Get a client by ID.
    pub async fn get_client(&self, id: ClientId) -> Result<Client, AppError> {
        self.repo
            .get_client(id)
            .await?
            .ok_or(AppError::ClientNotFound(id))
    }

    /// Register a new client.
    pub async fn register_client(&self, client: NewClient) -> Result<Client, AppError> {
        let client = client.normalized()?;
        let client = self.repo.save_client(&client).await?;
        tracing::info!(client_id = client.id, name = %client.name, "Registered client");
        Ok(client)
    }

    /// Delete a client. Unknown IDs are a successful no-op.
    /// Visits referencing the client are kept.
    pub async fn delete_client(&self, id: ClientId) -> Result<(), AppError> {
        let removed = self.repo.delete_client(id).await?;
        if removed {
            tracing::info!(client_id = id, "Deleted client");
        } else {
            tracing::debug!(client_id = id, "Delete requested for unknown client");
        }
        Ok(())
    }

    // ========================
    // Visit operations
    // ========================

    /// Record a visit stamped with today's date.
    pub async fn record_visit(&self, draft: VisitDraft) -> Result<Visit, AppError> {
        self.record_visit_at(draft, Utc::now()).await
    }

    /// Record a visit as of the given instant. The subtotal is computed from the
    /// client's prices at this moment and never recomputed.
    pub async fn record_visit_at(
        &self,
        draft: VisitDraft,
        at: DateTime<Utc>,
    ) -> Result<Visit, AppError> {
        let draft = draft.normalized()?;
        let date = service_date(at);

        let visit = match self.repo.record_visit(&draft, date).await? {
            RecordOutcome::Recorded(visit) => visit,
            RecordOutcome::ClientMissing => {
                return Err(AppError::ClientNotFound(draft.client_id));
            }
            RecordOutcome::Rejected(e) => return Err(e.into()),
        };

        tracing::info!(
            visit_id = visit.id,
            client_id = visit.client_id,
            subtotal = visit.subtotal,
            fecha = %date,
            "Recorded visit"
        );
        Ok(visit)
    }

    /// Visits stamped with today's date and their total.
    pub async fn todays_ledger(&self) -> Result<DailyLedger, AppError> {
        self.ledger_for(today()).await
    }

    /// Visits stamped with the given date and their total.
    pub async fn ledger_for(&self, date: NaiveDate) -> Result<DailyLedger, AppError> {
        let visits = self.repo.list_visits_on(date).await?;
        Ok(DailyLedger::from_visits(date, visits))
    }

    /// Delete a visit. Unknown IDs are a successful no-op.
    pub async fn delete_visit(&self, id: VisitId) -> Result<(), AppError> {
        let removed = self.repo.delete_visit(id).await?;
        if removed {
            tracing::info!(visit_id = id, "Deleted visit");
        } else {
            tracing::debug!(visit_id = id, "Delete requested for unknown visit");
        }
        Ok(())
    }
}
