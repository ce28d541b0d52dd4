//! The module contains the errors the engine can throw.
//!
//! Every error belongs to exactly one [`ErrorKind`]. Transport layers classify
//! failures through the kind and never inspect the message.
//!
//! - [`ItemNotFound`] thrown when an item does not exist.
//! - [`SaveItem`], [`UpdateItem`], [`DeleteItem`] thrown when the repository
//!   rejects a mutation.
//!
//!  [`ItemNotFound`]: EngineError::ItemNotFound
//!  [`SaveItem`]: EngineError::SaveItem
//!  [`UpdateItem`]: EngineError::UpdateItem
//!  [`DeleteItem`]: EngineError::DeleteItem
use sea_orm::DbErr;
use thiserror::Error;

/// Category of a failure, independent of its rendered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ItemNotFound,
    ItemAlreadyExists,
    InvalidItem,
    SaveItem,
    UpdateItem,
    DeleteItem,
    FindItem,
    Decode,
    Validation,
    Unclassified,
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0} not found")]
    ItemNotFound(String),
    #[error("{0} already exists")]
    ItemAlreadyExists(String),
    #[error("{item} is invalid{}", render_details(.details))]
    InvalidItem { item: String, details: Vec<String> },
    #[error("error saving {0}")]
    SaveItem(String),
    #[error("error updating {0}")]
    UpdateItem(String),
    #[error("error deleting {0}")]
    DeleteItem(String),
    #[error("error searching for {0}")]
    FindItem(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

fn render_details(details: &[String]) -> String {
    details.iter().map(|detail| format!(",{detail}")).collect()
}

impl EngineError {
    pub fn invalid_item(item: &str, details: &[&str]) -> Self {
        Self::InvalidItem {
            item: item.to_string(),
            details: details.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ItemNotFound(_) => ErrorKind::ItemNotFound,
            Self::ItemAlreadyExists(_) => ErrorKind::ItemAlreadyExists,
            Self::InvalidItem { .. } => ErrorKind::InvalidItem,
            Self::SaveItem(_) => ErrorKind::SaveItem,
            Self::UpdateItem(_) => ErrorKind::UpdateItem,
            Self::DeleteItem(_) => ErrorKind::DeleteItem,
            Self::FindItem(_) => ErrorKind::FindItem,
            Self::Database(_) => ErrorKind::Unclassified,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ItemNotFound(a), Self::ItemNotFound(b)) => a == b,
            (Self::ItemAlreadyExists(a), Self::ItemAlreadyExists(b)) => a == b,
            (
                Self::InvalidItem {
                    item: a,
                    details: da,
                },
                Self::InvalidItem {
                    item: b,
                    details: db,
                },
            ) => a == b && da == db,
            (Self::SaveItem(a), Self::SaveItem(b)) => a == b,
            (Self::UpdateItem(a), Self::UpdateItem(b)) => a == b,
            (Self::DeleteItem(a), Self::DeleteItem(b)) => a == b,
            (Self::FindItem(a), Self::FindItem(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
