//! The module contains `Expense` struct and its storage model.

use chrono::{DateTime, Utc};

use sea_orm::entity::{ActiveValue, prelude::*};

/// A single monetary expense.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    /// Identifier assigned when the expense is saved.
    ///
    /// Empty until the expense has been through `ExpenseUseCase::save`.
    pub id: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Build an expense that has not been persisted yet.
    pub fn new(amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            amount,
            date,
        }
    }

    pub fn with_id(id: impl Into<String>, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            amount,
            date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(value.id.clone()),
            amount: ActiveValue::Set(value.amount),
            date: ActiveValue::Set(value.date),
        }
    }
}

impl From<Model> for Expense {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            amount: value.amount,
            date: value.date,
        }
    }
}
