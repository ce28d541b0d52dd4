//! SQL-backed `ExpenseRepository` built on sea-orm.
//!
//! Schema and migrations live in the `migration` crate; this adapter only
//! assumes the `expenses` table exists.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder,
};

use crate::{
    EXPENSE, EngineError, Expense, ExpenseRepository, ResultEngine,
    expenses::{ActiveModel, Column, Entity},
};

#[derive(Clone, Debug)]
pub struct SeaOrmExpenseRepository {
    db: DatabaseConnection,
}

impl SeaOrmExpenseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExpenseRepository for SeaOrmExpenseRepository {
    async fn exists(&self, id: &str) -> ResultEngine<bool> {
        let count = Entity::find_by_id(id.to_string())
            .count(&self.db)
            .await
            .inspect_err(|err| tracing::error!("error searching for expense {id}: {err}"))?;
        Ok(count > 0)
    }

    async fn find_by_id(&self, id: &str) -> ResultEngine<Expense> {
        let model = Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .inspect_err(|err| tracing::error!("error reading expense {id}: {err}"))?;

        model
            .map(Expense::from)
            .ok_or_else(|| EngineError::ItemNotFound(EXPENSE.to_string()))
    }

    async fn find_all(&self) -> ResultEngine<Vec<Expense>> {
        let models = Entity::find()
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .inspect_err(|err| tracing::error!("error listing expenses: {err}"))?;

        Ok(models.into_iter().map(Expense::from).collect())
    }

    async fn save(&self, expense: Expense) -> ResultEngine<Expense> {
        let model = ActiveModel::from(&expense)
            .insert(&self.db)
            .await
            .inspect_err(|err| tracing::error!("error inserting expense {}: {err}", expense.id))?;
        Ok(model.into())
    }

    async fn update(&self, expense: Expense) -> ResultEngine<Expense> {
        // Fails with `RecordNotUpdated` when no row matches the id.
        let model = ActiveModel::from(&expense)
            .update(&self.db)
            .await
            .inspect_err(|err| tracing::error!("error updating expense {}: {err}", expense.id))?;
        Ok(model.into())
    }

    async fn delete(&self, id: &str) -> ResultEngine<()> {
        let res = Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .inspect_err(|err| tracing::error!("error deleting expense {id}: {err}"))?;

        if res.rows_affected == 0 {
            tracing::error!("error deleting expense {id}: 0 rows deleted");
            return Err(EngineError::ItemNotFound(EXPENSE.to_string()));
        }
        Ok(())
    }
}
