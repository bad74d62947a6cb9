//! Expense endpoints.

use api_types::{
    Message,
    expense::{ExpenseNew, ExpenseUpdate},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{EngineError, Expense, ExpenseChanges, NewExpense};

use crate::{
    ServerError,
    extract::{Param, Payload},
    provided,
    provided_amount,
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Expense>>, ServerError> {
    Ok(Json(state.engine.expenses().await?))
}

pub async fn list_for_user(
    State(state): State<ServerState>,
    Param(user_id): Param<i32>,
) -> Result<Json<Vec<Expense>>, ServerError> {
    Ok(Json(state.engine.expenses_for_user(user_id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<ExpenseNew>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let (Some(kind), Some(amount), Some(category)) = (
        provided(payload.kind),
        provided_amount(payload.amount),
        provided(payload.category),
    ) else {
        return Err(EngineError::MissingField(
            "type, amount y category son obligatorios".to_string(),
        )
        .into());
    };

    let expense = state
        .engine
        .create_expense(NewExpense {
            user_id: payload.user_id,
            kind,
            amount,
            category,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn update(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
    Payload(payload): Payload<ExpenseUpdate>,
) -> Result<Json<Expense>, ServerError> {
    let changes = ExpenseChanges {
        user_id: Some(payload.user_id),
        kind: payload.kind,
        amount: payload.amount,
        category: payload.category,
    };
    Ok(Json(state.engine.update_expense(id, changes).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_expense(id).await?;
    Ok(Json(Message::new("Gasto eliminado correctamente")))
}
