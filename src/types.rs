//! Core data types for the harvester.
//!
//! `RawDocument` carries one OAI-PMH record exactly as it appeared on the
//! wire; the remaining types form the normalized document schema that
//! downstream consumers index.

use serde::{Deserialize, Serialize};

use crate::config::SOURCE_NAME;

/// One harvested record, packaged before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Serialized `<record>` XML, UTF-8 after page decode.
    pub doc: Vec<u8>,

    /// Harvest source name (always `"wayne"`).
    pub source: &'static str,

    /// OAI header identifier of the record.
    pub doc_id: String,

    /// Payload format (always `"xml"`).
    pub filetype: &'static str,
}

impl RawDocument {
    /// Package a serialized record under its header identifier.
    #[must_use]
    pub fn new(doc: Vec<u8>, doc_id: impl Into<String>) -> Self {
        Self {
            doc,
            source: SOURCE_NAME,
            doc_id: doc_id.into(),
            filetype: "xml",
        }
    }
}

/// One parsed personal name from a `creator` element.
///
/// Email and ORCID are part of the schema but never present in this feed,
/// so they serialize as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Contributor {
    /// Honorific prefix (e.g. "Dr.").
    pub prefix: String,

    /// Given (first) name.
    pub given: String,

    /// Middle name(s), space-joined.
    pub middle: String,

    /// Family (last) name.
    pub family: String,

    /// Generational or professional suffix (e.g. "Jr.").
    pub suffix: String,

    /// Contact email; always empty for this source.
    pub email: String,

    /// ORCID identifier; always empty for this source.
    #[serde(rename = "ORCID")]
    pub orcid: String,
}

/// Identifiers block of a normalized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifiers {
    /// The OAI header identifier, copied verbatim.
    #[serde(rename = "serviceID")]
    pub service_id: String,

    /// Canonical landing-page URL for the work.
    pub url: String,

    /// DOI; always empty for this source.
    pub doi: String,
}

impl Identifiers {
    /// Build the block from the header identifier and the chosen URL.
    #[must_use]
    pub fn new(service_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            url: url.into(),
            doi: String::new(),
        }
    }
}

/// Publisher sub-object of the properties block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherInfo {
    /// Publisher name as given in the record payload.
    pub publisher: String,
}

/// Source-specific properties preserved on a normalized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// Dublin Core resource type (e.g. "text").
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Originating publication or journal, as given in the payload.
    pub source: String,

    /// Media format (e.g. "application/pdf").
    pub format: String,

    /// Publisher details.
    #[serde(rename = "publisherInfo")]
    pub publisher_info: PublisherInfo,
}

/// A record normalized into the source-agnostic document schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// Work title.
    pub title: String,

    /// Parsed creators, in document order.
    pub contributors: Vec<Contributor>,

    /// Source-specific properties.
    pub properties: Properties,

    /// Abstract or description; empty when the record carries none.
    pub description: String,

    /// Lower-cased subject terms, in document order.
    pub tags: Vec<String>,

    /// Identifier block.
    pub id: Identifiers,

    /// Harvest source name (always `"wayne"`).
    pub source: String,

    /// Repository datestamp, ISO 8601.
    #[serde(rename = "dateUpdated")]
    pub date_updated: String,

    /// Publication date, ISO 8601.
    #[serde(rename = "dateCreated")]
    pub date_created: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> NormalizedDocument {
        NormalizedDocument {
            title: "A Study of Mitochondrial DNA".to_string(),
            contributors: vec![Contributor {
                given: "John".to_string(),
                family: "Smith".to_string(),
                ..Contributor::default()
            }],
            properties: Properties {
                doc_type: "text".to_string(),
                source: "Human Biology".to_string(),
                format: "application/pdf".to_string(),
                publisher_info: PublisherInfo {
                    publisher: "DigitalCommons@WayneState".to_string(),
                },
            },
            description: String::new(),
            tags: vec!["history".to_string()],
            id: Identifiers::new(
                "oai:digitalcommons.wayne.edu:humbiol_preprints-1034",
                "http://digitalcommons.wayne.edu/humbiol_preprints/34",
            ),
            source: "wayne".to_string(),
            date_updated: "2020-06-01T00:00:00+00:00".to_string(),
            date_created: "2020-05-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn test_raw_document_constants() {
        let raw = RawDocument::new(b"<record/>".to_vec(), "oai:example:1");
        assert_eq!(raw.source, "wayne");
        assert_eq!(raw.filetype, "xml");
        assert_eq!(raw.doc_id, "oai:example:1");
    }

    #[test]
    fn test_contributor_default_is_all_empty() {
        let contributor = Contributor::default();
        assert_eq!(contributor.given, "");
        assert_eq!(contributor.family, "");
        assert_eq!(contributor.email, "");
        assert_eq!(contributor.orcid, "");
    }

    #[test]
    fn test_identifiers_new_has_empty_doi() {
        let id = Identifiers::new("oai:example:1", "http://example.org/1");
        assert_eq!(id.doi, "");
    }

    #[test]
    fn test_document_serializes_canonical_keys() {
        let value = serde_json::to_value(sample_document()).unwrap();

        assert!(value.get("dateUpdated").is_some());
        assert!(value.get("dateCreated").is_some());
        assert_eq!(
            value["id"]["serviceID"],
            "oai:digitalcommons.wayne.edu:humbiol_preprints-1034"
        );
        assert!(value["id"].get("doi").is_some());
        assert_eq!(value["properties"]["type"], "text");
        assert!(value["properties"].get("publisherInfo").is_some());
        assert_eq!(value["contributors"][0]["ORCID"], "");
        // Snake-case internals must not leak into the JSON surface.
        assert!(value.get("date_updated").is_none());
        assert!(value["properties"].get("doc_type").is_none());
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let document = sample_document();
        let json = serde_json::to_string(&document).unwrap();
        let back: NormalizedDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, document);
    }
}
