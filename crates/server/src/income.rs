//! Income endpoints.

use api_types::{
    Message,
    income::{IncomeNew, IncomeUpdate},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{EngineError, Income, IncomeChanges, NewIncome};

use crate::{
    ServerError,
    extract::{Param, Payload},
    provided,
    provided_amount,
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Income>>, ServerError> {
    Ok(Json(state.engine.incomes().await?))
}

pub async fn list_for_user(
    State(state): State<ServerState>,
    Param(user_id): Param<i32>,
) -> Result<Json<Vec<Income>>, ServerError> {
    Ok(Json(state.engine.incomes_for_user(user_id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<IncomeNew>,
) -> Result<(StatusCode, Json<Income>), ServerError> {
    let (Some(category), Some(kind), Some(amount)) = (
        provided(payload.category),
        provided(payload.kind),
        provided_amount(payload.amount),
    ) else {
        return Err(EngineError::MissingField(
            "category, type y amount son obligatorios".to_string(),
        )
        .into());
    };

    let income = state
        .engine
        .create_income(NewIncome {
            user_id: payload.user_id,
            category,
            kind,
            amount,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(income)))
}

pub async fn update(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
    Payload(payload): Payload<IncomeUpdate>,
) -> Result<Json<Income>, ServerError> {
    let changes = IncomeChanges {
        user_id: Some(payload.user_id),
        category: payload.category,
        kind: payload.kind,
        amount: payload.amount,
    };
    Ok(Json(state.engine.update_income(id, changes).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_income(id).await?;
    Ok(Json(Message::new("Ingreso eliminado correctamente")))
}
