//! Ports the use case depends on.
//!
//! Implementations (adapters) provide the actual storage and id generation.

use async_trait::async_trait;

use crate::{Expense, ResultEngine};

/// Persistence contract for expenses.
///
/// Storage failures are returned as errors and are never folded into a
/// `false` from [`exists`](ExpenseRepository::exists).
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// True iff a record with `id` is currently persisted.
    async fn exists(&self, id: &str) -> ResultEngine<bool>;

    /// Fetch one record, failing with `ItemNotFound` when absent.
    async fn find_by_id(&self, id: &str) -> ResultEngine<Expense>;

    /// Fetch every record. Empty when nothing is stored.
    async fn find_all(&self) -> ResultEngine<Vec<Expense>>;

    /// Persist a new record exactly as given.
    async fn save(&self, expense: Expense) -> ResultEngine<Expense>;

    /// Replace the mutable fields of the record with the same id.
    async fn update(&self, expense: Expense) -> ResultEngine<Expense>;

    async fn delete(&self, id: &str) -> ResultEngine<()>;
}

/// Source of fresh record identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}
