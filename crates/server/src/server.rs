use api_types::health::Health;
use axum::{Json, Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::expenses;
use engine::ExpenseUseCase;

const EXPENSE_ROUTE: &str = "/budget/expense";

#[derive(Clone)]
pub struct ServerState {
    pub use_case: ExpenseUseCase,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "UP".to_string(),
    })
}

/// Build the application router around `use_case`.
pub fn app(use_case: ExpenseUseCase) -> Router {
    let state = ServerState { use_case };

    Router::new()
        .route("/health", get(health))
        .route(
            EXPENSE_ROUTE,
            get(expenses::find)
                .post(expenses::save)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_with_listener(
    use_case: ExpenseUseCase,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(use_case)).await
}

pub fn spawn_with_listener(
    use_case: ExpenseUseCase,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(use_case, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
