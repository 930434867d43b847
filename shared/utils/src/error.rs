use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PriceCheckError {
    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Schema error: {message}")]
    Schema { row: Option<usize>, message: String },

    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid request: {field} - {message}")]
    InvalidRequest { field: String, message: String },
}

impl PriceCheckError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Schema error not tied to a particular data row (empty file, bad header).
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            row: None,
            message: message.into(),
        }
    }

    /// Schema error for a data row. `row` is the 1-based display row number,
    /// the header being row 1.
    pub fn schema_at_row(row: usize, message: impl Into<String>) -> Self {
        Self::Schema {
            row: Some(row),
            message: format!("Row {}: {}", row, message.into()),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Display row number carried by a row-level schema error.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Schema { row, .. } => *row,
            _ => None,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "PARSE_ERROR",
            Self::Schema { .. } => "SCHEMA_ERROR",
            Self::Persistence { .. } => "PERSISTENCE_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::InvalidRequest { .. } => "INVALID_REQUEST",
        }
    }
}

pub type PriceCheckResult<T> = Result<T, PriceCheckError>;

impl From<sqlx::Error> for PriceCheckError {
    fn from(error: sqlx::Error) -> Self {
        Self::persistence(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_row_is_reported() {
        let error = PriceCheckError::schema_at_row(3, "missing manufacturer");
        assert_eq!(error.row(), Some(3));
        assert_eq!(error.error_code(), "SCHEMA_ERROR");
        assert!(error.to_string().contains("Row 3"));
    }

    #[test]
    fn test_header_error_has_no_row() {
        let error = PriceCheckError::schema("Invalid header row");
        assert_eq!(error.row(), None);
    }

    #[test]
    fn test_sqlx_error_maps_to_persistence() {
        let error: PriceCheckError = sqlx::Error::RowNotFound.into();
        assert_eq!(error.error_code(), "PERSISTENCE_ERROR");
    }
}
