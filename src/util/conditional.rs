//! Conditional GET support: decides whether a client may keep using its
//! cached copy of a page or file.

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use hyper::{header::{CACHE_CONTROL, IF_MODIFIED_SINCE}, HeaderMap};

// Header value 'separators' according to RFC 2616
const SEPARATORS: [char; 19] = [
    '(', ')', '<', '>', '@', ',', ';', ':', '\\', '"',
    '/', '[', ']', '?', '=', '{', '}', ' ', '\t'
];

/// The parts of a request that make it conditional.
#[derive(Debug, Default, PartialEq)]
pub struct Conditional {
    if_modified_since: Option<DateTime<FixedOffset>>,
    no_cache: bool,
}

impl Conditional {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let if_modified_since = headers
            .get(IF_MODIFIED_SINCE)
            .and_then(|value| value.to_str().ok())
            .and_then(|text| DateTime::parse_from_rfc2822(text).ok());

        let no_cache = headers
            .get_all(CACHE_CONTROL)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|text| text.split(SEPARATORS))
            .any(|token| token.eq_ignore_ascii_case("no-cache"));

        Self { if_modified_since, no_cache }
    }

    /// True when the client's copy is at least as new as `modified`.
    pub fn is_fresh<TZ: TimeZone>(&self, modified: &DateTime<TZ>) -> bool {
        if self.no_cache {
            return false;
        }

        // If-Modified-Since only carries whole seconds
        self.if_modified_since
            .map_or(false, |since| modified <= &(since + Duration::seconds(1)))
    }
}
