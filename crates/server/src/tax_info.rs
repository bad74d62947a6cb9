//! Tax information endpoints.

use api_types::{
    Message,
    tax_info::{TaxInfoNew, TaxInfoUpdate},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{NewTaxInfo, TaxInfo, TaxInfoChanges};

use crate::{
    ServerError,
    extract::{Param, Payload},
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TaxInfo>>, ServerError> {
    Ok(Json(state.engine.tax_infos().await?))
}

pub async fn get_for_user(
    State(state): State<ServerState>,
    Param(user_id): Param<i32>,
) -> Result<Json<TaxInfo>, ServerError> {
    Ok(Json(state.engine.tax_info_for_user(user_id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<TaxInfoNew>,
) -> Result<(StatusCode, Json<TaxInfo>), ServerError> {
    let record = state
        .engine
        .create_tax_info(NewTaxInfo {
            user_id: payload.user_id,
            gross_income: payload.gross_income,
            taxable_income: payload.taxable_income,
            tax_paid: payload.tax_paid,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
    Payload(payload): Payload<TaxInfoUpdate>,
) -> Result<Json<TaxInfo>, ServerError> {
    let changes = TaxInfoChanges {
        gross_income: payload.gross_income,
        taxable_income: payload.taxable_income,
        tax_paid: payload.tax_paid,
    };
    Ok(Json(state.engine.update_tax_info(id, changes).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_tax_info(id).await?;
    Ok(Json(Message::new(
        "Registro de impuestos eliminado correctamente",
    )))
}
