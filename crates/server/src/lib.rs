use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod expense;
mod extract;
mod financial_profile;
mod health;
mod income;
mod server;
mod tax_info;
mod transactions;
mod user;

pub mod types {
    pub use api_types::Message;

    pub mod user {
        pub use api_types::user::{UserNew, UserUpdate};
        pub use engine::UserAccount;
    }

    pub mod income {
        pub use api_types::income::{IncomeNew, IncomeUpdate};
        pub use engine::Income;
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseNew, ExpenseUpdate};
        pub use engine::Expense;
    }

    pub mod financial_profile {
        pub use api_types::financial_profile::{FinancialProfileNew, FinancialProfileUpdate};
        pub use engine::FinancialProfile;
    }

    pub mod tax_info {
        pub use api_types::tax_info::{TaxInfoNew, TaxInfoUpdate};
        pub use engine::TaxInfo;
    }

    pub mod transaction {
        pub use api_types::transaction::{TransactionKind, TransactionNew, TransactionUpdate};
        pub use engine::Transaction;
    }

    pub mod health {
        pub use api_types::health::HealthStatus;
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    TooLarge(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::MissingField(_) | EngineError::InvalidField(_) => StatusCode::BAD_REQUEST,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Store failures are passed through with the driver's own message.
fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            db_err.to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::TooLarge(err) => (StatusCode::PAYLOAD_TOO_LARGE, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Malformed bodies, a missing `Content-Type` and wrongly typed fields all
/// answer 400; only an oversized body keeps its own status.
impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::TooLarge(rejection.body_text())
        } else {
            Self::Generic(rejection.body_text())
        }
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        Self::Generic(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Generic(rejection.body_text())
    }
}

/// A text field counts as provided only when it is non-empty.
pub(crate) fn provided(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// An amount counts as provided only when it is non-zero.
pub(crate) fn provided_amount(value: Option<f64>) -> Option<f64> {
    value.filter(|value| *value != 0.0)
}
