//! Borrower model and related types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Borrower with the ids of the books currently checked out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Borrower {
    pub id: i64,
    pub name: String,
    pub email_address: String,
    #[schema(value_type = Vec<i64>)]
    pub borrowed_book_ids: BTreeSet<i64>,
}

/// Borrower row without the borrowed set
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BorrowerRow {
    pub id: i64,
    pub name: String,
    pub email_address: String,
}

impl BorrowerRow {
    pub fn with_books(self, borrowed_book_ids: BTreeSet<i64>) -> Borrower {
        Borrower {
            id: self.id,
            name: self.name,
            email_address: self.email_address,
            borrowed_book_ids,
        }
    }
}

/// Register borrower request
///
/// Unknown fields such as `borrowedBookIds` are ignored: a new borrower
/// always starts with nothing checked out.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBorrower {
    #[validate(custom(function = "not_blank", message = "name must not be blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "emailAddress must not be blank"))]
    pub email_address: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_rejected() {
        let borrower = NewBorrower {
            name: "  ".to_string(),
            email_address: "reader@example.org".to_string(),
        };
        let errors = borrower.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(!errors.field_errors().contains_key("email_address"));
    }

    #[test]
    fn test_borrower_serializes_camel_case() {
        let borrower = Borrower {
            id: 1,
            name: "Azhar".to_string(),
            email_address: "azhar@example.org".to_string(),
            borrowed_book_ids: BTreeSet::from([3, 1]),
        };
        let value = serde_json::to_value(&borrower).unwrap();
        assert_eq!(value["emailAddress"], "azhar@example.org");
        assert_eq!(value["borrowedBookIds"], serde_json::json!([1, 3]));
    }
}
