//! Expense API endpoints.

use api_types::expense::{Expense, ExpenseNew, ExpenseQuery, ExpenseUpdate};
use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    ServerError,
    server::ServerState,
    validation::{ValidationError, decode_and_validate},
};

fn view(expense: engine::Expense) -> Expense {
    Expense {
        id: expense.id,
        amount: expense.amount,
        date: expense.date,
    }
}

type ExpenseQueryResult = Result<Query<ExpenseQuery>, QueryRejection>;

/// Unwrap the query string, reporting extractor failures as validation errors.
fn query_id(query: ExpenseQueryResult) -> Result<Option<String>, ValidationError> {
    let Query(query) =
        query.map_err(|rejection| ValidationError::Query(rejection.body_text()))?;
    Ok(query.id.filter(|id| !id.trim().is_empty()))
}

/// Handle requests for one expense (`?id=`) or, without an id, all of them.
pub async fn find(
    State(state): State<ServerState>,
    query: ExpenseQueryResult,
) -> Result<Response, ServerError> {
    match query_id(query)? {
        Some(id) => {
            let expense = state.use_case.find_by_id(&id).await?;
            Ok(Json(view(expense)).into_response())
        }
        None => {
            let expenses = state.use_case.find_all().await?;
            let views: Vec<Expense> = expenses.into_iter().map(view).collect();
            Ok(Json(views).into_response())
        }
    }
}

/// Handle requests for creating a new expense.
pub async fn save(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let expense = decode_and_validate::<ExpenseNew>(&body)?;
    let saved = state.use_case.save(expense).await?;

    tracing::info!("expense {} created", saved.id);
    Ok((StatusCode::CREATED, Json(view(saved))))
}

/// Handle requests for replacing an existing expense.
pub async fn update(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<Expense>, ServerError> {
    let expense = decode_and_validate::<ExpenseUpdate>(&body)?;
    let updated = state.use_case.update(expense).await?;

    tracing::info!("expense {} updated", updated.id);
    Ok(Json(view(updated)))
}

pub async fn delete(
    State(state): State<ServerState>,
    query: ExpenseQueryResult,
) -> Result<StatusCode, ServerError> {
    let id = query_id(query)?.ok_or(ValidationError::MissingParameter("id"))?;
    state.use_case.delete(&id).await?;

    tracing::info!("expense {id} deleted");
    Ok(StatusCode::NO_CONTENT)
}
