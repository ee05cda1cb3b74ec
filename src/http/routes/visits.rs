// HTTP routes: visit ledger.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::domain::{DailyLedger, VisitId};
use crate::http::dto::{CreateVisitRequest, OkResponse};
use crate::http::error::{ApiError, ApiResult};
use crate::http::state::AppState;

/// Builds the visit routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/visitas", get(todays_visits).post(record_visit))
        .route("/visitas/:id", delete(delete_visit))
}

/// Today's visits (UTC) and their total as `{visitas, totalDia}`.
async fn todays_visits(State(state): State<AppState>) -> ApiResult<Json<DailyLedger>> {
    Ok(Json(state.service.todays_ledger().await?))
}

/// Records a visit priced at the client's current rates.
/// Unknown clients yield 404 and nothing is stored.
async fn record_visit(
    State(state): State<AppState>,
    body: Result<Json<CreateVisitRequest>, JsonRejection>,
) -> ApiResult<Json<OkResponse>> {
    let Json(request) = body?;
    let draft = request
        .into_draft()
        .ok_or_else(|| ApiError::bad_request("clienteId is required"))?;
    state.service.record_visit(draft).await?;
    Ok(Json(OkResponse::ok()))
}

async fn delete_visit(
    State(state): State<AppState>,
    path: Result<Path<VisitId>, PathRejection>,
) -> ApiResult<Json<OkResponse>> {
    let Path(id) = path?;
    state.service.delete_visit(id).await?;
    Ok(Json(OkResponse::ok()))
}
