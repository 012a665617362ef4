//! Normalization of raw records into the target document schema.
//!
//! All Dublin Core lookups are scoped to the record's `<metadata>` payload
//! subtree, so the OAI header `<identifier>` can never collide with
//! `dc:identifier`; header fields are read from the `<header>` subtree.

use roxmltree::{Document, Node};
use unicode_normalization::UnicodeNormalization;

use crate::config::{DOWNLOAD_URL_MARKER, LANDING_URL_MARKER, SOURCE_NAME};
use crate::dates::{parse_date_created, parse_datestamp};
use crate::error::{HarvesterError, Result};
use crate::names::parse_name;
use crate::series::{is_approved, strip_series_prefix};
use crate::types::{
    Contributor, Identifiers, NormalizedDocument, Properties, PublisherInfo, RawDocument,
};
use crate::xml::{child_text, collect_texts, find_child, first_text};

/// Normalize one raw record.
///
/// Returns `Ok(None)` when the record's series is not on the allow-list;
/// that is a filtering outcome, not an error. Anything else the target
/// schema requires and the record lacks is an error.
///
/// Idempotent: the same raw document always yields the same result.
pub fn normalize(raw: &RawDocument) -> Result<Option<NormalizedDocument>> {
    let xml = std::str::from_utf8(&raw.doc).map_err(|source| HarvesterError::InvalidUtf8 {
        doc_id: raw.doc_id.clone(),
        source,
    })?;
    let doc = Document::parse(xml)?;
    let record = doc.root_element();

    let header = find_child(record, "header")
        .ok_or_else(|| HarvesterError::missing("header", &raw.doc_id))?;
    let set_spec = child_text(header, "setSpec")
        .ok_or_else(|| HarvesterError::missing("setSpec", &raw.doc_id))?;

    let series = strip_series_prefix(&set_spec);
    if !is_approved(series) {
        tracing::info!(doc_id = %raw.doc_id, series, "Series not approved, skipping record");
        return Ok(None);
    }

    // Deleted records carry a header but no payload.
    let payload = find_child(record, "metadata")
        .ok_or_else(|| HarvesterError::missing("metadata", &raw.doc_id))?;

    let title =
        first_text(payload, "title").ok_or_else(|| HarvesterError::missing("title", &raw.doc_id))?;
    let description = first_text(payload, "description").unwrap_or_default();

    let datestamp = child_text(header, "datestamp")
        .ok_or_else(|| HarvesterError::missing("datestamp", &raw.doc_id))?;
    let date_updated = parse_datestamp(&datestamp)?;
    let date_created = parse_date_created(&first_text(payload, "date").unwrap_or_default())?;

    Ok(Some(NormalizedDocument {
        title,
        contributors: extract_contributors(payload),
        properties: extract_properties(payload, &raw.doc_id)?,
        description,
        tags: extract_tags(payload),
        id: extract_identifiers(payload, &raw.doc_id)?,
        source: SOURCE_NAME.to_string(),
        date_updated,
        date_created,
    }))
}

/// One contributor per `creator` element, in document order.
fn extract_contributors(payload: Node<'_, '_>) -> Vec<Contributor> {
    collect_texts(payload, "creator")
        .iter()
        .map(|name| parse_name(name))
        .collect()
}

/// NFC-normalized, lower-cased `subject` terms, in document order.
fn extract_tags(payload: Node<'_, '_>) -> Vec<String> {
    collect_texts(payload, "subject")
        .iter()
        .map(|tag| tag.nfc().collect::<String>().to_lowercase())
        .collect()
}

/// First payload `type`, `source`, `format` and `publisher`; each required.
fn extract_properties(payload: Node<'_, '_>, doc_id: &str) -> Result<Properties> {
    let doc_type =
        first_text(payload, "type").ok_or_else(|| HarvesterError::missing("type", doc_id))?;
    let source =
        first_text(payload, "source").ok_or_else(|| HarvesterError::missing("source", doc_id))?;
    let format =
        first_text(payload, "format").ok_or_else(|| HarvesterError::missing("format", doc_id))?;
    let publisher = first_text(payload, "publisher")
        .ok_or_else(|| HarvesterError::missing("publisher", doc_id))?;

    Ok(Properties {
        doc_type,
        source,
        format,
        publisher_info: PublisherInfo { publisher },
    })
}

/// Identifier block: the service id plus the disambiguated landing page.
///
/// bepress payloads list the landing page along with one or more download
/// links, and download links contain `viewcontent`. Among identifiers that
/// point at the repository host and are not download links, the last one
/// wins.
fn extract_identifiers(payload: Node<'_, '_>, doc_id: &str) -> Result<Identifiers> {
    let url = collect_texts(payload, "identifier")
        .into_iter()
        .filter(|id| id.contains(LANDING_URL_MARKER) && !id.contains(DOWNLOAD_URL_MARKER))
        .next_back()
        .ok_or_else(|| HarvesterError::NoLandingPage {
            doc_id: doc_id.to_string(),
        })?;

    Ok(Identifiers::new(doc_id, url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_RECORD: &str = r#"<record>
  <header>
    <identifier>oai:digitalcommons.wayne.edu:humbiol_preprints-1034</identifier>
    <datestamp>2020-06-01T00:00:00Z</datestamp>
    <setSpec>publication:humbiol_preprints</setSpec>
  </header>
  <metadata>
    <oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/"
               xmlns:dc="http://purl.org/dc/elements/1.1/">
      <dc:title>Mitochondrial DNA Variation in Metropolitan Detroit</dc:title>
      <dc:creator>Smith, John</dc:creator>
      <dc:creator>Doe, Jane A.</dc:creator>
      <dc:description>A survey of maternal lineages.</dc:description>
      <dc:date>2020-05-01</dc:date>
      <dc:type>text</dc:type>
      <dc:format>application/pdf</dc:format>
      <dc:source>Human Biology</dc:source>
      <dc:publisher>DigitalCommons@WayneState</dc:publisher>
      <dc:subject>History</dc:subject>
      <dc:subject>Population Genetics</dc:subject>
      <dc:identifier>http://digitalcommons.wayne.edu/humbiol_preprints/34</dc:identifier>
      <dc:identifier>http://digitalcommons.wayne.edu/cgi/viewcontent.cgi?article=1034&amp;context=humbiol_preprints</dc:identifier>
    </oai_dc:dc>
  </metadata>
</record>"#;

    fn raw(xml: &str) -> RawDocument {
        RawDocument::new(
            xml.as_bytes().to_vec(),
            "oai:digitalcommons.wayne.edu:humbiol_preprints-1034",
        )
    }

    #[test]
    fn test_normalize_full_record() {
        let document = normalize(&raw(FULL_RECORD)).unwrap().unwrap();

        assert_eq!(
            document.title,
            "Mitochondrial DNA Variation in Metropolitan Detroit"
        );
        assert_eq!(document.description, "A survey of maternal lineages.");
        assert_eq!(document.source, "wayne");

        assert_eq!(document.contributors.len(), 2);
        assert_eq!(document.contributors[0].family, "Smith");
        assert_eq!(document.contributors[0].given, "John");
        assert_eq!(document.contributors[1].given, "Jane");
        assert_eq!(document.contributors[1].middle, "A.");
        assert_eq!(document.contributors[0].email, "");
        assert_eq!(document.contributors[0].orcid, "");

        assert_eq!(document.tags, vec!["history", "population genetics"]);

        assert_eq!(
            document.id.service_id,
            "oai:digitalcommons.wayne.edu:humbiol_preprints-1034"
        );
        assert_eq!(
            document.id.url,
            "http://digitalcommons.wayne.edu/humbiol_preprints/34"
        );
        assert_eq!(document.id.doi, "");

        assert_eq!(document.properties.doc_type, "text");
        assert_eq!(document.properties.source, "Human Biology");
        assert_eq!(document.properties.format, "application/pdf");
        assert_eq!(
            document.properties.publisher_info.publisher,
            "DigitalCommons@WayneState"
        );

        assert_eq!(document.date_updated, "2020-06-01T00:00:00+00:00");
        assert_eq!(document.date_created, "2020-05-01T00:00:00");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = raw(FULL_RECORD);
        let first = normalize(&raw).unwrap();
        let second = normalize(&raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unapproved_series_is_filtered() {
        let record = FULL_RECORD.replace("publication:humbiol_preprints", "publication:gallery");
        assert_eq!(normalize(&raw(&record)).unwrap(), None);
    }

    #[test]
    fn test_prefix_is_stripped_before_lookup() {
        // The bare series name, without the publication: prefix, still passes.
        let record = FULL_RECORD.replace("publication:humbiol_preprints", "humbiol_preprints");
        assert!(normalize(&raw(&record)).unwrap().is_some());
    }

    #[test]
    fn test_deleted_record_reports_missing_payload() {
        let record = r#"<record>
  <header status="deleted">
    <identifier>oai:digitalcommons.wayne.edu:humbiol_preprints-1035</identifier>
    <datestamp>2020-06-01T00:00:00Z</datestamp>
    <setSpec>publication:humbiol_preprints</setSpec>
  </header>
</record>"#;

        let err = normalize(&raw(record)).unwrap_err();
        assert!(matches!(
            err,
            HarvesterError::MissingElement { ref element, .. } if element == "metadata"
        ));
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let record = FULL_RECORD.replace(
            "<dc:title>Mitochondrial DNA Variation in Metropolitan Detroit</dc:title>",
            "",
        );
        let err = normalize(&raw(&record)).unwrap_err();
        assert!(matches!(
            err,
            HarvesterError::MissingElement { ref element, .. } if element == "title"
        ));
    }

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let record = FULL_RECORD.replace(
            "<dc:description>A survey of maternal lineages.</dc:description>",
            "",
        );
        let document = normalize(&raw(&record)).unwrap().unwrap();
        assert_eq!(document.description, "");
    }

    #[test]
    fn test_missing_date_yields_default_instant() {
        let record = FULL_RECORD.replace("<dc:date>2020-05-01</dc:date>", "");
        let document = normalize(&raw(&record)).unwrap().unwrap();
        assert_eq!(document.date_created, "1970-01-01T00:00:00");
    }

    #[test]
    fn test_missing_datestamp_is_fatal() {
        let record =
            FULL_RECORD.replace("<datestamp>2020-06-01T00:00:00Z</datestamp>", "");
        let err = normalize(&raw(&record)).unwrap_err();
        assert!(matches!(
            err,
            HarvesterError::MissingElement { ref element, .. } if element == "datestamp"
        ));
    }

    #[test]
    fn test_missing_publisher_is_fatal() {
        let record =
            FULL_RECORD.replace("<dc:publisher>DigitalCommons@WayneState</dc:publisher>", "");
        let err = normalize(&raw(&record)).unwrap_err();
        assert!(matches!(
            err,
            HarvesterError::MissingElement { ref element, .. } if element == "publisher"
        ));
    }

    #[test]
    fn test_only_download_links_is_no_landing_page() {
        let record = FULL_RECORD.replace(
            "<dc:identifier>http://digitalcommons.wayne.edu/humbiol_preprints/34</dc:identifier>",
            "",
        );
        let err = normalize(&raw(&record)).unwrap_err();
        assert!(matches!(err, HarvesterError::NoLandingPage { .. }));
    }

    #[test]
    fn test_last_qualifying_identifier_wins() {
        let record = FULL_RECORD.replace(
            "<dc:identifier>http://digitalcommons.wayne.edu/humbiol_preprints/34</dc:identifier>",
            "<dc:identifier>http://digitalcommons.wayne.edu/humbiol_preprints/33</dc:identifier>\n      <dc:identifier>http://digitalcommons.wayne.edu/humbiol_preprints/34</dc:identifier>",
        );
        let document = normalize(&raw(&record)).unwrap().unwrap();
        assert_eq!(
            document.id.url,
            "http://digitalcommons.wayne.edu/humbiol_preprints/34"
        );
    }

    #[test]
    fn test_header_identifier_is_not_a_landing_page() {
        // Even with a URL-shaped header identifier, only payload identifiers count.
        let record = r#"<record>
  <header>
    <identifier>http://digitalcommons.wayne.edu/record/1</identifier>
    <datestamp>2020-06-01T00:00:00Z</datestamp>
    <setSpec>publication:mpq</setSpec>
  </header>
  <metadata>
    <oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/"
               xmlns:dc="http://purl.org/dc/elements/1.1/">
      <dc:title>Untitled</dc:title>
      <dc:type>text</dc:type>
      <dc:format>application/pdf</dc:format>
      <dc:source>Merrill-Palmer Quarterly</dc:source>
      <dc:publisher>DigitalCommons@WayneState</dc:publisher>
    </oai_dc:dc>
  </metadata>
</record>"#;

        let err = normalize(&raw(record)).unwrap_err();
        assert!(matches!(err, HarvesterError::NoLandingPage { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let raw = RawDocument::new(vec![0xff, 0xfe, 0x3c], "oai:x:1");
        let err = normalize(&raw).unwrap_err();
        assert!(matches!(err, HarvesterError::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_tags_are_nfc_and_lowercase() {
        let record = FULL_RECORD.replace(
            "<dc:subject>History</dc:subject>",
            "<dc:subject>Ge\u{301}ne\u{301}tique</dc:subject>",
        );
        let document = normalize(&raw(&record)).unwrap().unwrap();
        assert_eq!(document.tags[0], "g\u{e9}n\u{e9}tique");
    }
}
