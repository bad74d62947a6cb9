use api_types::health::HealthStatus;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn live() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        database: None,
    })
}

/// Reports whether the store answers a trivial query.
pub async fn database(State(state): State<ServerState>) -> Result<Json<HealthStatus>, ServerError> {
    state.engine.ping().await?;
    Ok(Json(HealthStatus {
        status: "ok".to_string(),
        database: Some("connected".to_string()),
    }))
}
