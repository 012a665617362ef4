//! Wayne State harvester - collect and normalize Digital Commons records.
//!
//! This crate harvests bibliographic metadata from the Wayne State
//! University Digital Commons OAI-PMH feed and normalizes each Dublin Core
//! record into a source-agnostic document schema suitable for downstream
//! indexing.
//!
//! # Example
//!
//! ```
//! use wayne_harvester::config;
//!
//! // Build the first request of a harvest window
//! let from = config::start_date(5);
//! let url = config::initial_url(config::OAI_BASE_URL, from);
//! assert!(url.contains("metadataPrefix=oai_dc"));
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Configuration constants and request-URL builders
//! - [`types`]: Core data types (RawDocument, NormalizedDocument, etc.)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for fetching feed pages
//! - [`xml`]: XML utilities
//! - [`harvester`]: Paginated harvesting and record packaging
//! - [`series`]: Approved-series allow-list
//! - [`names`]: Personal-name parsing for creator fields
//! - [`dates`]: Loose date parsing with deterministic defaults
//! - [`normalize`]: Normalization into the target schema
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod harvester;
pub mod http;
pub mod names;
pub mod normalize;
pub mod series;
pub mod types;
pub mod xml;

// Re-export main functions
pub use harvester::{collect_page, harvest, harvest_from};
pub use normalize::normalize;

// Re-export commonly used items
pub use error::{HarvesterError, Result};
pub use types::{Contributor, Identifiers, NormalizedDocument, Properties, RawDocument};
