use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Request body for creating an expense.
    ///
    /// Every field is optional on the wire so that a missing value is reported
    /// by validation instead of failing the JSON decode.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseNew {
        /// Ignored: the server always assigns a fresh id.
        pub id: Option<String>,
        pub amount: Option<f64>,
        /// RFC3339 timestamp.
        #[serde(alias = "created")]
        pub date: Option<String>,
    }

    /// Request body for replacing an existing expense.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub id: Option<String>,
        pub amount: Option<f64>,
        /// RFC3339 timestamp.
        #[serde(alias = "created")]
        pub date: Option<String>,
    }

    /// Query string for `GET` and `DELETE` on `/budget/expense`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseQuery {
        pub id: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: String,
        pub amount: f64,
        pub date: DateTime<Utc>,
    }
}

pub mod error {
    use super::*;

    /// JSON body written for every failed request.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ErrorBody {
        /// Canonical reason phrase of the HTTP status (e.g. `Not Found`).
        pub status: String,
        pub message: String,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
    }
}
