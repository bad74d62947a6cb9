//! Ledger endpoints. Every write links to an income or expense row that the
//! route preconditions have already resolved.

use api_types::{
    Message,
    transaction::{TransactionKind as ApiKind, TransactionNew, TransactionUpdate},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{NewTransaction, ReferenceKind, Transaction, TransactionChanges};

use crate::{
    ServerError,
    extract::{Param, Payload},
    server::ServerState,
};

/// The wire enum lives in `api_types`, which does not depend on the engine.
fn map_kind(kind: ApiKind) -> ReferenceKind {
    match kind {
        ApiKind::Income => ReferenceKind::Income,
        ApiKind::Expense => ReferenceKind::Expense,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    Ok(Json(state.engine.transactions().await?))
}

pub async fn list_for_user(
    State(state): State<ServerState>,
    Param(user_id): Param<i32>,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    Ok(Json(state.engine.transactions_for_user(user_id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<TransactionNew>,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    let tx = state
        .engine
        .create_transaction(NewTransaction {
            user_id: payload.user_id,
            kind: map_kind(payload.kind),
            reference_id: payload.reference_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(tx)))
}

pub async fn update(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
    Payload(payload): Payload<TransactionUpdate>,
) -> Result<Json<Transaction>, ServerError> {
    let changes = TransactionChanges {
        user_id: Some(payload.user_id),
        kind: Some(map_kind(payload.kind)),
        reference_id: Some(payload.reference_id),
    };
    Ok(Json(state.engine.update_transaction(id, changes).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_transaction(id).await?;
    Ok(Json(Message::new("Transacción eliminada correctamente")))
}
