//! Error types for the harvester.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// No identifier qualified as a landing-page URL.
    #[error("No landing-page URL found for record {doc_id}")]
    NoLandingPage { doc_id: String },

    /// Date string matched none of the accepted formats.
    #[error("Unparsable date: '{value}'")]
    UnparsableDate { value: String },

    /// Serialized record bytes were not valid UTF-8.
    #[error("Record {doc_id} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        doc_id: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HarvesterError {
    /// Shorthand for a [`HarvesterError::MissingElement`].
    pub(crate) fn missing(element: &str, context: &str) -> Self {
        Self::MissingElement {
            element: element.to_string(),
            context: context.to_string(),
        }
    }
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
