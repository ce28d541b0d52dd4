//! Translation of failures into HTTP status codes.

use axum::http::StatusCode;
use engine::ErrorKind;

use crate::ServerError;

/// Transport view of a failure: numeric code, reason phrase and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebError {
    pub code: StatusCode,
    pub status: String,
    pub message: String,
}

impl WebError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            status: code.canonical_reason().unwrap_or_default().to_string(),
            message: message.into(),
        }
    }
}

/// Status code for an error kind.
pub fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ItemNotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidItem
        | ErrorKind::ItemAlreadyExists
        | ErrorKind::Validation
        | ErrorKind::Decode => StatusCode::BAD_REQUEST,
        ErrorKind::SaveItem
        | ErrorKind::UpdateItem
        | ErrorKind::DeleteItem
        | ErrorKind::FindItem
        | ErrorKind::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Classify `err` by kind. The message is always the error's rendered text.
pub fn classify(err: &ServerError) -> WebError {
    WebError::new(status_for_kind(err.kind()), err.to_string())
}

#[cfg(test)]
mod tests {
    use engine::EngineError;
    use sea_orm::DbErr;

    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn not_found_is_404_whatever_the_message() {
        for item in ["expense", "", "something else entirely"] {
            let web = classify(&EngineError::ItemNotFound(item.to_string()).into());
            assert_eq!(web.code, StatusCode::NOT_FOUND);
            assert_eq!(web.status, "Not Found");
        }
    }

    #[test]
    fn client_errors_are_400() {
        let errors: Vec<ServerError> = vec![
            EngineError::ItemAlreadyExists("expense".to_string()).into(),
            EngineError::invalid_item("expense", &["field id must not be empty"]).into(),
            ValidationError::MissingParameter("id").into(),
            ValidationError::Query("duplicate field `id`".to_string()).into(),
            ValidationError::Invalid {
                shape: "ExpenseNew",
                violations: vec!["field amount is required".to_string()],
            }
            .into(),
        ];

        for err in &errors {
            let web = classify(err);
            assert_eq!(web.code, StatusCode::BAD_REQUEST, "{err}");
            assert_eq!(web.status, "Bad Request");
            assert_eq!(web.message, err.to_string());
        }
    }

    #[test]
    fn operation_failures_are_500() {
        for err in [
            EngineError::SaveItem("expense".to_string()),
            EngineError::UpdateItem("expense".to_string()),
            EngineError::DeleteItem("expense".to_string()),
            EngineError::FindItem("expense if exists".to_string()),
        ] {
            let web = classify(&err.into());
            assert_eq!(web.code, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn unclassified_is_500_with_message() {
        let err: ServerError = EngineError::from(DbErr::Custom("boom".to_string())).into();
        let web = classify(&err);

        assert_eq!(web.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(web.status, "Internal Server Error");
        assert!(web.message.contains("boom"));
    }
}
