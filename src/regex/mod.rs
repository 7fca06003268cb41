//! Regular expressions for matching IPv4 addresses
//!
//! This module provides a pre-compiled regular expression for extracting
//! IPv4 addresses from text.

use once_cell::sync::Lazy;
use regex::Regex;

/// IPv4 address regex
/// Matches standard IPv4 addresses like 192.168.1.1
pub static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)"
    )
    .expect("Failed to compile IPv4 regex")
});

/// Find all IPv4 addresses in text with their positions
pub fn find_ipv4(text: &str) -> Vec<(usize, usize, String)> {
    IPV4_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end(), m.as_str().to_string()))
        .collect()
}
