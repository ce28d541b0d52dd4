//! In-process `ExpenseRepository` backed by an ordered map.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::{EXPENSE, EngineError, Expense, ExpenseRepository, ResultEngine};

#[derive(Debug, Default)]
pub struct MemoryExpenseRepository {
    expenses: RwLock<BTreeMap<String, Expense>>,
}

impl MemoryExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ResultEngine<std::sync::RwLockReadGuard<'_, BTreeMap<String, Expense>>> {
        self.expenses
            .read()
            .map_err(|_| DbErr::Custom("expense store lock poisoned".to_string()).into())
    }

    fn write(&self) -> ResultEngine<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Expense>>> {
        self.expenses
            .write()
            .map_err(|_| DbErr::Custom("expense store lock poisoned".to_string()).into())
    }
}

#[async_trait]
impl ExpenseRepository for MemoryExpenseRepository {
    async fn exists(&self, id: &str) -> ResultEngine<bool> {
        Ok(self.read()?.contains_key(id))
    }

    async fn find_by_id(&self, id: &str) -> ResultEngine<Expense> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::ItemNotFound(EXPENSE.to_string()))
    }

    async fn find_all(&self) -> ResultEngine<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self.read()?.values().cloned().collect();
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(expenses)
    }

    async fn save(&self, expense: Expense) -> ResultEngine<Expense> {
        let mut expenses = self.write()?;
        if expenses.contains_key(&expense.id) {
            return Err(EngineError::ItemAlreadyExists(EXPENSE.to_string()));
        }
        expenses.insert(expense.id.clone(), expense.clone());
        Ok(expense)
    }

    async fn update(&self, expense: Expense) -> ResultEngine<Expense> {
        let mut expenses = self.write()?;
        match expenses.get_mut(&expense.id) {
            Some(stored) => {
                *stored = expense.clone();
                Ok(expense)
            }
            None => Err(EngineError::ItemNotFound(EXPENSE.to_string())),
        }
    }

    async fn delete(&self, id: &str) -> ResultEngine<()> {
        match self.write()?.remove(id) {
            Some(_) => Ok(()),
            None => Err(EngineError::ItemNotFound(EXPENSE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn expense(id: &str, day: u32) -> Expense {
        Expense::with_id(id, 10.0, Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn save_rejects_duplicate_ids() {
        let repo = MemoryExpenseRepository::new();
        repo.save(expense("a", 1)).await.unwrap();

        let err = repo.save(expense("a", 2)).await.unwrap_err();
        assert_eq!(err, EngineError::ItemAlreadyExists("expense".to_string()));
    }

    #[tokio::test]
    async fn find_all_orders_by_date() {
        let repo = MemoryExpenseRepository::new();
        repo.save(expense("z", 1)).await.unwrap();
        repo.save(expense("a", 9)).await.unwrap();
        repo.save(expense("m", 5)).await.unwrap();

        let ids: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["z", "m", "a"]);
    }

    #[tokio::test]
    async fn update_and_delete_require_a_stored_record() {
        let repo = MemoryExpenseRepository::new();

        assert!(repo.update(expense("ghost", 1)).await.is_err());
        assert!(repo.delete("ghost").await.is_err());
        assert!(!repo.exists("ghost").await.unwrap());
    }
}
