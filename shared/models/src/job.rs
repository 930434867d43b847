//! Job request and summary models exchanged at the service boundary.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::table::ValidatedRow;

/// Per-row summary entry. `price` is the first quote's price, or `None` when
/// no quote was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResultEntry {
    pub manufacturer: String,
    pub part_number: String,
    pub price: Option<f64>,
}

impl JobResultEntry {
    pub fn new(row: &ValidatedRow, price: Option<f64>) -> Self {
        Self {
            manufacturer: row.manufacturer.clone(),
            part_number: row.part_number.clone(),
            price,
        }
    }
}

/// Ordered per-row summary, one entry per validated row in input order.
pub type JobResult = Vec<JobResultEntry>;

/// Body of a job request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "filePath is required"))]
    pub file_path: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "fileName is required"))]
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub results: JobResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationPreview {
    pub rows: Vec<ValidatedRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = JobResultEntry::new(&ValidatedRow::new("Acme", "123"), Some(9.99));
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"manufacturer": "Acme", "partNumber": "123", "price": 9.99})
        );
    }

    #[test]
    fn test_missing_price_serializes_as_null() {
        let entry = JobResultEntry::new(&ValidatedRow::new("Acme", "123"), None);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["price"].is_null());
    }

    #[test]
    fn test_request_requires_all_fields() {
        let request: JobRequest =
            serde_json::from_str(r#"{"userId": "u1", "filePath": "a/b.csv"}"#).unwrap();
        assert!(request.validate().is_err());

        let request: JobRequest = serde_json::from_str(
            r#"{"userId": "u1", "filePath": "a/b.csv", "fileName": "b.csv"}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
    }
}
