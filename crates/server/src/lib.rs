use api_types::error::ErrorBody;
use axum::{Json, response::IntoResponse};
use engine::{EngineError, ErrorKind};
use thiserror::Error;

pub use errors::{WebError, classify};
pub use server::{app, run_with_listener, spawn_with_listener};
pub use validation::{Validate, ValidationError, decode_and_validate};

mod errors;
mod expenses;
mod server;
pub mod validation;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{Expense, ExpenseNew, ExpenseQuery, ExpenseUpdate};
    }

    pub mod error {
        pub use api_types::error::ErrorBody;
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Generic(String),
}

impl ServerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServerError::Engine(err) => err.kind(),
            ServerError::Validation(ValidationError::Decode { .. }) => ErrorKind::Decode,
            ServerError::Validation(_) => ErrorKind::Validation,
            ServerError::Generic(_) => ErrorKind::Unclassified,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let WebError {
            code,
            status,
            message,
        } = classify(&self);

        if code.is_server_error() {
            tracing::error!(kind = ?self.kind(), "request failed: {message}");
        } else {
            tracing::debug!(kind = ?self.kind(), "request rejected: {message}");
        }

        (code, Json(ErrorBody { status, message })).into_response()
    }
}
