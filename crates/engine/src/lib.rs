use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use error::{EngineError, ErrorKind};
pub use expenses::Expense;
pub use ids::UuidGenerator;
pub use memory::MemoryExpenseRepository;
pub use ports::{ExpenseRepository, IdGenerator};
pub use repository::SeaOrmExpenseRepository;

pub mod expenses;

mod error;
mod ids;
mod memory;
mod ports;
mod repository;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Item name used in every expense error message.
pub const EXPENSE: &str = "expense";
const EXPENSE_IF_EXISTS: &str = "expense if exists";

/// Business rules for expenses, layered over an [`ExpenseRepository`].
///
/// The use case owns no state besides its ports. Existence is always checked
/// before a mutation so callers get `ItemNotFound` instead of a storage
/// failure. The check and the mutation are two independent repository calls.
#[derive(Clone)]
pub struct ExpenseUseCase {
    repository: Arc<dyn ExpenseRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl ExpenseUseCase {
    pub fn new(repository: Arc<dyn ExpenseRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Return a builder for `ExpenseUseCase`. Help to build the struct.
    pub fn builder() -> ExpenseUseCaseBuilder {
        ExpenseUseCaseBuilder::default()
    }

    pub async fn find_by_id(&self, id: &str) -> ResultEngine<Expense> {
        require_id(id)?;
        self.ensure_exists(id).await?;
        self.repository.find_by_id(id).await
    }

    pub async fn find_all(&self) -> ResultEngine<Vec<Expense>> {
        self.repository.find_all().await
    }

    /// Persist `expense` under a freshly generated id.
    ///
    /// Any id carried by the input is discarded.
    pub async fn save(&self, mut expense: Expense) -> ResultEngine<Expense> {
        expense.id = self.ids.generate_id();
        self.repository
            .save(expense)
            .await
            .map_err(|_| EngineError::SaveItem(EXPENSE.to_string()))
    }

    /// Replace `amount` and `date` of an existing expense.
    pub async fn update(&self, expense: Expense) -> ResultEngine<Expense> {
        require_id(&expense.id)?;
        self.ensure_exists(&expense.id).await?;
        self.repository
            .update(expense)
            .await
            .map_err(|_| EngineError::UpdateItem(EXPENSE.to_string()))
    }

    pub async fn delete(&self, id: &str) -> ResultEngine<()> {
        require_id(id)?;
        self.ensure_exists(id).await?;
        self.repository
            .delete(id)
            .await
            .map_err(|_| EngineError::DeleteItem(EXPENSE.to_string()))
    }

    async fn ensure_exists(&self, id: &str) -> ResultEngine<()> {
        let exists = self
            .repository
            .exists(id)
            .await
            .map_err(|_| EngineError::FindItem(EXPENSE_IF_EXISTS.to_string()))?;
        if !exists {
            return Err(EngineError::ItemNotFound(EXPENSE.to_string()));
        }
        Ok(())
    }
}

fn require_id(id: &str) -> ResultEngine<()> {
    if id.trim().is_empty() {
        return Err(EngineError::invalid_item(
            EXPENSE,
            &["field id must not be empty"],
        ));
    }
    Ok(())
}

/// Builder for [`ExpenseUseCase`].
///
/// Unset ports fall back to an in-memory repository and [`UuidGenerator`].
#[derive(Default)]
pub struct ExpenseUseCaseBuilder {
    repository: Option<Arc<dyn ExpenseRepository>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl ExpenseUseCaseBuilder {
    /// Store expenses in the given database (tables must be migrated).
    pub fn database(self, db: DatabaseConnection) -> ExpenseUseCaseBuilder {
        self.repository(Arc::new(SeaOrmExpenseRepository::new(db)))
    }

    pub fn repository(mut self, repository: Arc<dyn ExpenseRepository>) -> ExpenseUseCaseBuilder {
        self.repository = Some(repository);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> ExpenseUseCaseBuilder {
        self.ids = Some(ids);
        self
    }

    /// Construct `ExpenseUseCase`
    pub fn build(self) -> ExpenseUseCase {
        ExpenseUseCase {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(MemoryExpenseRepository::new())),
            ids: self.ids.unwrap_or_else(|| Arc::new(UuidGenerator)),
        }
    }
}
