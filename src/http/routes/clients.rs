// HTTP routes: client registry.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::domain::{Client, ClientId};
use crate::http::dto::{CreateClientRequest, OkResponse};
use crate::http::error::ApiResult;
use crate::http::state::AppState;

/// Builds the client routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clientes", get(list_clients).post(create_client))
        .route("/clientes/:id", get(get_client).delete(delete_client))
}

async fn list_clients(State(state): State<AppState>) -> ApiResult<Json<Vec<Client>>> {
    Ok(Json(state.service.list_clients().await?))
}

async fn get_client(
    State(state): State<AppState>,
    path: Result<Path<ClientId>, PathRejection>,
) -> ApiResult<Json<Client>> {
    let Path(id) = path?;
    Ok(Json(state.service.get_client(id).await?))
}

/// Registers a client. The response stays `{ok: true}`; the new id shows up in the listing.
async fn create_client(
    State(state): State<AppState>,
    body: Result<Json<CreateClientRequest>, JsonRejection>,
) -> ApiResult<Json<OkResponse>> {
    let Json(request) = body?;
    state.service.register_client(request.into()).await?;
    Ok(Json(OkResponse::ok()))
}

async fn delete_client(
    State(state): State<AppState>,
    path: Result<Path<ClientId>, PathRejection>,
) -> ApiResult<Json<OkResponse>> {
    let Path(id) = path?;
    state.service.delete_client(id).await?;
    Ok(Json(OkResponse::ok()))
}
