//! Decoding and structural validation of request bodies.
//!
//! Runs before any use case call: a body is first decoded into its target
//! shape, then checked against the shape's field rules.

use api_types::expense::{ExpenseNew, ExpenseUpdate};
use chrono::{DateTime, Utc};
use engine::Expense;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("error decoding {shape}: {source}")]
    Decode {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{shape} is invalid: {}", .violations.join(", "))]
    Invalid {
        shape: &'static str,
        violations: Vec<String>,
    },
    #[error("required parameter '{0}' not found")]
    MissingParameter(&'static str),
    #[error("invalid query string: {0}")]
    Query(String),
}

/// Field rules for a request shape.
pub trait Validate: Sized {
    /// What a value of the shape becomes once every rule holds.
    type Valid;

    /// Check every rule in field order, returning all violations on failure.
    fn validate(self) -> Result<Self::Valid, Vec<String>>;
}

/// Decode `body` as JSON into `T`, then apply `T`'s field rules.
pub fn decode_and_validate<T>(body: &[u8]) -> Result<T::Valid, ValidationError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(body).map_err(|source| ValidationError::Decode {
        shape: shape_name::<T>(),
        source,
    })?;

    value
        .validate()
        .map_err(|violations| ValidationError::Invalid {
            shape: shape_name::<T>(),
            violations,
        })
}

fn shape_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Collects violations while checking fields one by one.
#[derive(Default)]
struct Rules {
    violations: Vec<String>,
}

impl Rules {
    fn id(&mut self, id: Option<String>) -> Option<String> {
        match id {
            Some(id) if !id.trim().is_empty() => Some(id),
            _ => self.violate("field id is required"),
        }
    }

    fn amount(&mut self, amount: Option<f64>) -> Option<f64> {
        match amount {
            None => self.violate("field amount is required"),
            Some(value) if !value.is_finite() => {
                self.violate("field amount must be a finite number")
            }
            Some(value) => Some(value),
        }
    }

    fn date(&mut self, date: Option<&str>) -> Option<DateTime<Utc>> {
        match date.map(str::trim) {
            None | Some("") => self.violate("field date is required"),
            Some(value) => match DateTime::parse_from_rfc3339(value) {
                Ok(date) => Some(date.with_timezone(&Utc)),
                Err(_) => self.violate("field date must be an RFC3339 timestamp"),
            },
        }
    }

    fn violate<T>(&mut self, violation: &str) -> Option<T> {
        self.violations.push(violation.to_string());
        None
    }

    fn finish<T>(self, valid: Option<T>) -> Result<T, Vec<String>> {
        match valid {
            Some(valid) if self.violations.is_empty() => Ok(valid),
            _ => Err(self.violations),
        }
    }
}

/// A create body becomes an unsaved expense. Any client id is dropped.
impl Validate for ExpenseNew {
    type Valid = Expense;

    fn validate(self) -> Result<Expense, Vec<String>> {
        let mut rules = Rules::default();
        let amount = rules.amount(self.amount);
        let date = rules.date(self.date.as_deref());

        let valid = amount.zip(date).map(|(amount, date)| Expense::new(amount, date));
        rules.finish(valid)
    }
}

impl Validate for ExpenseUpdate {
    type Valid = Expense;

    fn validate(self) -> Result<Expense, Vec<String>> {
        let mut rules = Rules::default();
        let id = rules.id(self.id);
        let amount = rules.amount(self.amount);
        let date = rules.date(self.date.as_deref());

        let valid = id
            .zip(amount)
            .zip(date)
            .map(|((id, amount), date)| Expense::with_id(id, amount, date));
        rules.finish(valid)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn valid_body_decodes() {
        let body = br#"{"amount": 25.3, "date": "2023-04-15T00:00:00Z"}"#;
        let expense = decode_and_validate::<ExpenseNew>(body).unwrap();

        assert!(expense.id.is_empty());
        assert_eq!(expense.amount, 25.3);
        assert_eq!(
            expense.date,
            Utc.with_ymd_and_hms(2023, 4, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn client_id_is_dropped_on_create() {
        let body = br#"{"id": "mine", "amount": 1, "date": "2023-04-15T00:00:00Z"}"#;
        let expense = decode_and_validate::<ExpenseNew>(body).unwrap();

        assert!(expense.id.is_empty());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_and_validate::<ExpenseNew>(b"{\"amount\": ").unwrap_err();

        assert!(matches!(err, ValidationError::Decode { shape: "ExpenseNew", .. }));
        assert!(err.to_string().starts_with("error decoding ExpenseNew: "));
    }

    #[test]
    fn wrong_field_type_is_a_decode_error() {
        let err = decode_and_validate::<ExpenseNew>(br#"{"amount": "ten"}"#).unwrap_err();
        assert!(matches!(err, ValidationError::Decode { .. }));
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let err = decode_and_validate::<ExpenseNew>(b"{}").unwrap_err();

        assert_eq!(
            err.to_string(),
            "ExpenseNew is invalid: field amount is required, field date is required"
        );
    }

    #[test]
    fn date_must_be_rfc3339() {
        let err =
            decode_and_validate::<ExpenseNew>(br#"{"amount": 1, "date": "15/04/2023"}"#)
                .unwrap_err();

        match err {
            ValidationError::Invalid { violations, .. } => {
                assert_eq!(violations, vec!["field date must be an RFC3339 timestamp"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn every_broken_rule_is_listed_once() {
        let body = br#"{"id": "", "date": "yesterday"}"#;
        let err = decode_and_validate::<ExpenseUpdate>(body).unwrap_err();

        assert_eq!(
            err.to_string(),
            "ExpenseUpdate is invalid: field id is required, field amount is required, \
             field date must be an RFC3339 timestamp"
        );
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let body = br#"{"amount": 1, "date": "2023-04-15T02:00:00+02:00"}"#;
        let expense = decode_and_validate::<ExpenseNew>(body).unwrap();

        assert_eq!(
            expense.date,
            Utc.with_ymd_and_hms(2023, 4, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn legacy_created_field_is_accepted() {
        let body = br#"{"amount": 0, "created": "2023-04-15T00:00:00Z"}"#;
        assert!(decode_and_validate::<ExpenseNew>(body).is_ok());
    }

    #[test]
    fn update_requires_an_id() {
        let body = br#"{"id": " ", "amount": 2, "date": "2023-04-15T00:00:00Z"}"#;
        let err = decode_and_validate::<ExpenseUpdate>(body).unwrap_err();

        assert_eq!(
            err.to_string(),
            "ExpenseUpdate is invalid: field id is required"
        );
    }

    #[test]
    fn update_keeps_any_non_blank_id() {
        let body = br#"{"id": "abc", "amount": 2, "date": "2023-04-15T00:00:00Z"}"#;
        let expense = decode_and_validate::<ExpenseUpdate>(body).unwrap();

        assert_eq!(expense.id, "abc");
    }

    #[test]
    fn query_errors_render_their_cause() {
        let err = ValidationError::Query("duplicate field `id`".to_string());
        assert_eq!(err.to_string(), "invalid query string: duplicate field `id`");
    }
}
