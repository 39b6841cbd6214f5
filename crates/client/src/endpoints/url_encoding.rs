//! URL encoding for REST path segments.
//!
//! Saved search names, app and owner namespaces and search IDs are all
//! interpolated into URL paths. Each one is percent-encoded as a single
//! segment so a `/`, `?` or `#` inside a name cannot change which resource
//! is addressed.
//!
//! # Example
//!
//! ```
//! use splunk_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("slow nodes/eu"), "slow%20nodes%2Feu");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters percent-encoded in a path segment.
///
/// RFC 3986 section 3.3 delimiters plus characters Splunk treats specially.
/// `%` is included so pre-encoded input is not decoded twice.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for use as exactly one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
