// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for project parsing operations

use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a project
///
/// Every variant is terminal for the parse in progress: there is no
/// partially built model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A required top-level section of the input document is absent
    #[error("Missing section: {0}")]
    MissingSection(String),

    /// A required marker block of the output document is absent
    #[error("Missing results section: {0}")]
    MissingResultsSection(String),

    /// A record line lacks a field or has the wrong shape
    #[error("Malformed record {record}: {reason}")]
    MalformedRecord { record: String, reason: String },

    /// A field value could not be parsed as the declared type
    #[error("Invalid value for field '{field}' in record {record}: {value:?}")]
    InvalidFieldValue {
        record: String,
        field: String,
        value: String,
    },

    /// A type code outside the closed set of known variants
    #[error("Unknown variant type code: {0}")]
    UnknownVariant(String),

    /// A reference to a vertex, material or support that was never declared
    #[error("Dangling {target} reference: {id}")]
    DanglingReference { target: &'static str, id: String },

    /// Style table and type table disagree
    #[error("Style correlation error: {0}")]
    StyleCorrelation(String),

    /// Positionally paired result blocks disagree in length
    #[error("Result correlation error: {0}")]
    ResultCorrelation(String),

    /// A results query was made on a project without results
    #[error("Project has no results")]
    NoResults,
}

impl ParseError {
    /// Create a missing-field error for a record
    pub fn missing_field(record: impl Into<String>, field: &str) -> Self {
        ParseError::MalformedRecord {
            record: record.into(),
            reason: format!("missing field '{}'", field),
        }
    }

    /// Create a malformed record error
    pub fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseError::MalformedRecord {
            record: record.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid field value error
    pub fn invalid_value(
        record: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ParseError::InvalidFieldValue {
            record: record.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a dangling reference error
    pub fn dangling(target: &'static str, id: impl ToString) -> Self {
        ParseError::DanglingReference {
            target,
            id: id.to_string(),
        }
    }
}
