//! User account endpoints.

use api_types::{
    Message,
    user::{UserNew, UserUpdate},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{EngineError, NewUser, UserAccount, UserChanges};

use crate::{
    ServerError,
    extract::{Param, Payload},
    provided,
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserAccount>>, ServerError> {
    Ok(Json(state.engine.users().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
) -> Result<Json<UserAccount>, ServerError> {
    Ok(Json(state.engine.user(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<UserNew>,
) -> Result<(StatusCode, Json<UserAccount>), ServerError> {
    let (Some(first_name), Some(last_name), Some(password)) = (
        provided(payload.first_name),
        provided(payload.last_name),
        provided(payload.password),
    ) else {
        return Err(EngineError::MissingField(
            "first_name, last_name y password son obligatorios".to_string(),
        )
        .into());
    };

    let user = state
        .engine
        .create_user(NewUser {
            first_name,
            last_name,
            occupation: payload.occupation,
            phone: payload.phone,
            password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
    Payload(payload): Payload<UserUpdate>,
) -> Result<Json<UserAccount>, ServerError> {
    let changes = UserChanges {
        first_name: payload.first_name,
        last_name: payload.last_name,
        occupation: payload.occupation,
        phone: payload.phone,
        password: payload.password,
    };
    Ok(Json(state.engine.update_user(id, changes).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Param(id): Param<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_user(id).await?;
    Ok(Json(Message::new("Usuario eliminado correctamente")))
}
