//! Configuration constants and request-URL builders for the harvester.

use chrono::{Days, Local, NaiveDate};

/// Name under which harvested documents are attributed.
pub const SOURCE_NAME: &str = "wayne";

/// Base ListRecords URL for the Digital Commons OAI-PMH endpoint.
pub const OAI_BASE_URL: &str = "http://digitalcommons.wayne.edu/do/oai/?verb=ListRecords";

/// Metadata format requested on the initial page of a harvest.
pub const METADATA_PREFIX: &str = "oai_dc";

/// Default harvesting window in days.
pub const DEFAULT_DAYS_BACK: u32 = 5;

/// Fixed pause between paginated fetches (milliseconds).
///
/// Resumption tokens are strictly sequential, so pages can only be fetched
/// one after another; the pause keeps the harvester from hammering the
/// remote endpoint.
pub const PAGE_DELAY_MS: u64 = 500;

/// HTTP timeout in seconds.
///
/// Set to 30 seconds to accommodate large result pages and slow connections.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Substring identifying a landing-page URL among a record's identifiers.
pub const LANDING_URL_MARKER: &str = "http://digitalcommons.wayne.edu";

/// Substring marking a direct-download link; never usable as a landing page.
pub const DOWNLOAD_URL_MARKER: &str = "viewcontent";

/// Literal prefix carried by `setSpec` values ahead of the series name.
pub const SERIES_PREFIX: &str = "publication:";

/// Compute the start of the harvesting window: today minus `days_back` days.
///
/// # Examples
/// ```
/// use wayne_harvester::config::start_date;
///
/// let today = chrono::Local::now().date_naive();
/// assert_eq!(start_date(0), today);
/// ```
#[must_use]
pub fn start_date(days_back: u32) -> NaiveDate {
    let today = Local::now().date_naive();
    today
        .checked_sub_days(Days::new(u64::from(days_back)))
        .unwrap_or(NaiveDate::MIN)
}

/// Build the initial ListRecords URL for a harvest window.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wayne_harvester::config::initial_url;
///
/// let from = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
/// assert_eq!(
///     initial_url("http://example.edu/oai?verb=ListRecords", from),
///     "http://example.edu/oai?verb=ListRecords&metadataPrefix=oai_dc&from=2020-05-01"
/// );
/// ```
#[must_use]
pub fn initial_url(base_url: &str, from: NaiveDate) -> String {
    format!(
        "{base_url}&metadataPrefix={METADATA_PREFIX}&from={}",
        from.format("%Y-%m-%d")
    )
}

/// Build the continuation URL for a resumption token.
///
/// `resumptionToken` replaces `metadataPrefix`/`from` on continuation
/// requests; the protocol forbids mixing them on one call.
#[must_use]
pub fn resumption_url(base_url: &str, token: &str) -> String {
    format!("{base_url}&resumptionToken={token}")
}
