use axum::{
    Router,
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
    routing::{MethodRouter, get, post, put},
};
use engine::{Engine, Pipeline, Reference, RequestView, Source};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::{collections::HashMap, sync::Arc};

use crate::{
    ServerError, expense,
    extract::{Param, QueryParams},
    financial_profile, health, income, tax_info, transactions, user,
};

/// Largest body a guarded route buffers, the same as axum's default limit.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

/// State of one guarded route: the pool the checks run on and the route's
/// own preconditions.
#[derive(Clone)]
struct Guard {
    db: DatabaseConnection,
    pipeline: Arc<Pipeline>,
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn body_error(err: axum::Error) -> ServerError {
    let err = err.into_inner();
    if err.is::<http_body_util::LengthLimitError>() {
        ServerError::TooLarge(format!("request body exceeds {BODY_LIMIT} bytes"))
    } else {
        ServerError::Generic(format!("failed to read request body: {err}"))
    }
}

/// Runs the route's preconditions and forwards the untouched request when
/// they all pass. An empty body reads as `{}`.
async fn guard(
    State(guard): State<Guard>,
    Param(params): Param<HashMap<String, String>>,
    QueryParams(query): QueryParams<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT).await.map_err(body_error)?;

    let body = if bytes.is_empty() {
        Value::Object(Default::default())
    } else if !is_json(&parts.headers) {
        return Err(ServerError::Generic(
            "Expected request with `Content-Type: application/json`".to_string(),
        ));
    } else {
        serde_json::from_slice(&bytes)
            .map_err(|err| ServerError::Generic(format!("invalid JSON body: {err}")))?
    };

    let view = RequestView {
        body,
        params,
        query,
    };
    guard.pipeline.run(&guard.db, &view).await?;

    Ok(next
        .run(Request::from_parts(parts, Body::from(bytes)))
        .await)
}

fn guarded(
    state: &ServerState,
    pipeline: Pipeline,
    route: MethodRouter<ServerState>,
) -> MethodRouter<ServerState> {
    let guard_state = Guard {
        db: state.db.clone(),
        pipeline: Arc::new(pipeline),
    };
    route.route_layer(middleware::from_fn_with_state(guard_state, guard))
}

fn owner_in_body() -> Pipeline {
    Pipeline::new().exists(Reference::UserAccount, Source::Body, "user_id")
}

fn owner_in_path() -> Pipeline {
    Pipeline::new().exists(Reference::UserAccount, Source::Params, "userId")
}

fn users() -> Router<ServerState> {
    Router::new()
        .route("/", get(user::list).post(user::create))
        .route(
            "/{id}",
            get(user::get).put(user::update).delete(user::delete),
        )
}

fn incomes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(income::list).merge(guarded(state, owner_in_body(), post(income::create))),
        )
        .route(
            "/user/{userId}",
            guarded(state, owner_in_path(), get(income::list_for_user)),
        )
        .route(
            "/{id}",
            guarded(state, owner_in_body(), put(income::update))
                .merge(axum::routing::delete(income::delete)),
        )
}

fn expenses(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(expense::list).merge(guarded(state, owner_in_body(), post(expense::create))),
        )
        .route(
            "/user/{userId}",
            guarded(state, owner_in_path(), get(expense::list_for_user)),
        )
        .route(
            "/{id}",
            guarded(state, owner_in_body(), put(expense::update))
                .merge(axum::routing::delete(expense::delete)),
        )
}

fn financial_profiles(state: &ServerState) -> Router<ServerState> {
    let by_id = Pipeline::new().exists(Reference::FinancialProfile, Source::Params, "id");
    Router::new()
        .route(
            "/",
            get(financial_profile::list).merge(guarded(
                state,
                owner_in_body(),
                post(financial_profile::create),
            )),
        )
        .route(
            "/user/{userId}",
            guarded(state, owner_in_path(), get(financial_profile::get_for_user)),
        )
        .route(
            "/{id}",
            guarded(
                state,
                by_id,
                put(financial_profile::update).delete(financial_profile::delete),
            ),
        )
}

fn tax_infos(state: &ServerState) -> Router<ServerState> {
    let by_id = Pipeline::new().exists(Reference::TaxInfo, Source::Params, "id");
    Router::new()
        .route(
            "/",
            get(tax_info::list).merge(guarded(state, owner_in_body(), post(tax_info::create))),
        )
        .route(
            "/user/{userId}",
            guarded(state, owner_in_path(), get(tax_info::get_for_user)),
        )
        .route(
            "/{id}",
            guarded(state, by_id, put(tax_info::update).delete(tax_info::delete)),
        )
}

fn ledger(state: &ServerState) -> Router<ServerState> {
    let linked = || owner_in_body().reference();
    Router::new()
        .route(
            "/",
            get(transactions::list).merge(guarded(state, linked(), post(transactions::create))),
        )
        .route(
            "/user/{userId}",
            guarded(state, owner_in_path(), get(transactions::list_for_user)),
        )
        .route(
            "/{id}",
            guarded(state, linked(), put(transactions::update))
                .merge(axum::routing::delete(transactions::delete)),
        )
}

pub fn router(state: ServerState) -> Router {
    let api = Router::new()
        .nest("/user", users())
        .nest("/income", incomes(&state))
        .nest("/expense", expenses(&state))
        .nest("/financial_profile", financial_profiles(&state))
        .nest("/tax_info", tax_infos(&state))
        .nest("/transaction", ledger(&state));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health::live))
        .route("/health/db", get(health::database))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
