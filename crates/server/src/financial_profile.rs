//! Financial profile endpoints.

use api_types::{
    Message,
    financial_profile::{FinancialProfileNew, FinancialProfileUpdate},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{FinancialProfile, FinancialProfileChanges, NewFinancialProfile};

use crate::{
    ServerError,
    extract::{Param, Payload},
    server::ServerState,
};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<FinancialProfile>>, ServerError> {
    Ok(Json(state.engine.financial_profiles().await?))
}

pub async fn get_for_user(
    State(state): State<ServerState>,
    Param(user_id): Param<i32>,
) -> Result<Json<FinancialProfile>, ServerError> {
    Ok(Json(state.engine.financial_profile_for_user(user_id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<FinancialProfileNew>,
) -> Result<(StatusCode, Json<FinancialProfile>), ServerError> {
    let profile = state
        .engine
        .create_financial_profile(NewFinancialProfile {
            user_id: payload.user_id,
            income: payload.income,
            expenses: payload.expenses,
            savings: payload.savings,
            risk_tolerance: payload.risk_tolerance,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn update(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
    Payload(payload): Payload<FinancialProfileUpdate>,
) -> Result<Json<FinancialProfile>, ServerError> {
    let changes = FinancialProfileChanges {
        income: payload.income,
        expenses: payload.expenses,
        savings: payload.savings,
        risk_tolerance: payload.risk_tolerance,
    };
    Ok(Json(state.engine.update_financial_profile(id, changes).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_financial_profile(id).await?;
    Ok(Json(Message::new("Perfil financiero eliminado correctamente")))
}
