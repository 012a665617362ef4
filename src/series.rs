//! Approved-series allow-list.
//!
//! Only records from approved series are normalized; everything else in the
//! feed (event announcements, image galleries, test collections) is filtered
//! out. The list is embedded at compile time so the binary stays
//! self-contained.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::config::SERIES_PREFIX;

/// Approved series identifiers, one per line; blank lines and surrounding
/// whitespace are ignored.
static APPROVED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("series_names.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
});

/// Remove the `publication:` prefix bepress puts on series set identifiers.
///
/// # Examples
/// ```
/// use wayne_harvester::series::strip_series_prefix;
///
/// assert_eq!(strip_series_prefix("publication:humbiol_preprints"), "humbiol_preprints");
/// assert_eq!(strip_series_prefix("humbiol_preprints"), "humbiol_preprints");
/// ```
#[must_use]
pub fn strip_series_prefix(set_spec: &str) -> &str {
    set_spec.strip_prefix(SERIES_PREFIX).unwrap_or(set_spec)
}

/// Whether a series identifier (already stripped) is on the allow-list.
#[must_use]
pub fn is_approved(series: &str) -> bool {
    APPROVED.contains(series)
}
