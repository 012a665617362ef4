//! Paginated harvesting of OAI-PMH ListRecords pages.
//!
//! One harvest walks the feed from an initial dated request through the
//! chain of resumption tokens, packaging every record on every page. The
//! walk is strictly sequential; the repository computes each token from the
//! previous response, so pages cannot be fetched ahead or in parallel.

use std::thread;
use std::time::Duration;

use roxmltree::{Document, Node};

use crate::config::{initial_url, resumption_url, start_date, OAI_BASE_URL, PAGE_DELAY_MS};
use crate::error::{HarvesterError, Result};
use crate::http::{create_client, fetch_page};
use crate::types::RawDocument;
use crate::xml::{child_text, descendants_named, find_child, first_text, node_xml};

/// Harvest every record updated in the last `days_back` days.
///
/// # Returns
/// All packaged records, in feed order across pages.
pub fn harvest(days_back: u32) -> Result<Vec<RawDocument>> {
    harvest_from(OAI_BASE_URL, days_back)
}

/// Harvest from an explicit ListRecords base URL.
///
/// Any transport or parse failure aborts the whole harvest; a partially
/// fetched window is worse than a failed one, since the caller cannot tell
/// which records are missing.
pub fn harvest_from(base_url: &str, days_back: u32) -> Result<Vec<RawDocument>> {
    let client = create_client()?;
    let from = start_date(days_back);
    tracing::info!(%from, "Starting harvest");

    let mut documents = Vec::new();
    let mut url = initial_url(base_url, from);
    let mut pages = 0_u32;

    loop {
        let page = fetch_page(&client, &url)?;
        let text = page.text();
        let token = collect_page(&text, &mut documents)?;
        pages += 1;

        match token {
            Some(token) => {
                tracing::debug!(token, "Following resumption token");
                thread::sleep(Duration::from_millis(PAGE_DELAY_MS));
                url = resumption_url(base_url, &token);
            }
            None => break,
        }
    }

    tracing::info!(pages, records = documents.len(), "Harvest complete");
    Ok(documents)
}

/// Package every record on one ListRecords page.
///
/// Appends the packaged records to `out` in document order and returns the
/// continuation token. `None` means the feed is exhausted; an empty
/// `<resumptionToken/>` element on the final page counts as exhausted.
pub fn collect_page(page: &str, out: &mut Vec<RawDocument>) -> Result<Option<String>> {
    let doc = Document::parse(page)?;

    for record in descendants_named(doc.root_element(), "record") {
        out.push(package_record(record, page)?);
    }

    Ok(first_text(doc.root_element(), "resumptionToken"))
}

/// Package one `<record>` subtree as a raw document.
///
/// The header identifier becomes the document id. `setSpec` presence is
/// validated here so a malformed feed fails at packaging time; the
/// filtering decision itself is made later, from the packaged bytes.
fn package_record(record: Node<'_, '_>, page: &str) -> Result<RawDocument> {
    let header = find_child(record, "header")
        .ok_or_else(|| HarvesterError::missing("header", "record"))?;
    let doc_id = child_text(header, "identifier")
        .ok_or_else(|| HarvesterError::missing("identifier", "record header"))?;
    if child_text(header, "setSpec").is_none() {
        return Err(HarvesterError::missing(
            "setSpec",
            &format!("record {doc_id}"),
        ));
    }

    let xml = node_xml(record, page);
    Ok(RawDocument::new(xml.as_bytes().to_vec(), doc_id))
}
