//! HTTP client wrapper for fetching pages from the OAI-PMH endpoint.

use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::Result;

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("wayne-harvester/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// One fetched ListRecords page: the raw body plus the charset the server
/// declared in its Content-Type header, if any.
#[derive(Debug)]
pub struct FetchedPage {
    body: Vec<u8>,
    charset: Option<String>,
}

impl FetchedPage {
    /// Decode the body using the declared charset, falling back to UTF-8.
    ///
    /// Unknown charset labels fall back to UTF-8 as well. Malformed byte
    /// sequences are replaced rather than rejected; the XML parser decides
    /// what is fatal.
    pub fn text(&self) -> String {
        let encoding = self
            .charset
            .as_deref()
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
        let (text, _, _) = encoding.decode(&self.body);
        text.into_owned()
    }
}

/// Fetch one ListRecords page.
///
/// Non-2xx statuses are errors; the harvest run aborts rather than skipping
/// a page, since a missing page would silently truncate the window.
pub fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage> {
    let response = client.get(url).send()?.error_for_status()?;
    let charset = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(charset_from_content_type);
    let body = response.bytes()?.to_vec();
    tracing::debug!(url, bytes = body.len(), charset = ?charset, "Fetched page");
    Ok(FetchedPage { body, charset })
}

/// Extract the charset parameter from a Content-Type header value.
fn charset_from_content_type(value: &str) -> Option<String> {
    value.split(';').skip(1).find_map(|param| {
        let (key, val) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(val.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(
            charset_from_content_type("text/xml; charset=ISO-8859-1"),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(
            charset_from_content_type("text/xml; Charset=\"utf-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(charset_from_content_type("text/xml"), None);
        assert_eq!(charset_from_content_type("text/xml; boundary=x"), None);
    }

    #[test]
    fn test_text_decodes_declared_charset() {
        let page = FetchedPage {
            // "Universit\xE9" in Latin-1
            body: b"Universit\xE9".to_vec(),
            charset: Some("ISO-8859-1".to_string()),
        };
        assert_eq!(page.text(), "Universit\u{e9}");
    }

    #[test]
    fn test_text_defaults_to_utf8() {
        let page = FetchedPage {
            body: "Universit\u{e9}".as_bytes().to_vec(),
            charset: None,
        };
        assert_eq!(page.text(), "Universit\u{e9}");
    }

    #[test]
    fn test_text_unknown_label_falls_back_to_utf8() {
        let page = FetchedPage {
            body: b"plain ascii".to_vec(),
            charset: Some("x-no-such-charset".to_string()),
        };
        assert_eq!(page.text(), "plain ascii");
    }
}
