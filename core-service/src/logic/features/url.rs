//! URL Features - Lexical extraction
//!
//! Every feature is a single pass over the URL characters. No DNS, no
//! WHOIS, no network: safe to run inline on the request path.
//!
//! Known heuristic limits, kept as-is:
//! - `hostname_length` / `path_length` rely on `/` positions, so a URL
//!   without a scheme (`example.com/login`) reports 0 for the hostname.
//! - `num_subdomains` is the raw dot count minus one and goes negative for
//!   dot-free input.
//! - `contains_ip` matches any dotted quad, including `999.1.1.1`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::layout::*;
use super::vector::{FeatureExtractor, FeatureVector};
use crate::constants::{HTTPS_PREFIX, IP_PATTERN, SPECIAL_CHARS, SUSPICIOUS_KEYWORDS};

static IP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(IP_PATTERN).expect("IP_PATTERN is a valid regex"));

/// Lexical URL feature extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlFeatureExtractor;

impl FeatureExtractor for UrlFeatureExtractor {
    fn extract(&self, url: &str) -> FeatureVector {
        let mut vector = FeatureVector::new();

        vector.set(URL_LENGTH, char_len(url));
        vector.set(HOSTNAME_LENGTH, hostname_length(url));
        vector.set(PATH_LENGTH, path_length(url));
        vector.set(NUM_SUBDOMAINS, num_subdomains(url));
        vector.set(CONTAINS_IP, contains_ip(url) as i64);
        vector.set(CONTAINS_HTTPS, url.starts_with(HTTPS_PREFIX) as i64);
        vector.set(NUM_SPECIAL_CHARS, num_special_chars(url));
        vector.set(HAS_SUSPICIOUS_KEYWORDS, has_suspicious_keywords(url) as i64);

        vector
    }
}

/// Extract the lexical feature vector of a URL. Never fails.
pub fn extract_url_features(url: &str) -> FeatureVector {
    UrlFeatureExtractor.extract(url)
}

// ============================================================================
// INDIVIDUAL FEATURES
// ============================================================================

fn char_len(s: &str) -> i64 {
    s.chars().count() as i64
}

/// Length of the third `/`-separated segment (the authority after `scheme://`)
fn hostname_length(url: &str) -> i64 {
    url.split('/').nth(2).map(char_len).unwrap_or(0)
}

/// Length of everything after the authority; 0 with two or fewer slashes
fn path_length(url: &str) -> i64 {
    if url.matches('/').count() <= 2 {
        return 0;
    }
    url.splitn(4, '/').nth(3).map(char_len).unwrap_or(0)
}

fn num_subdomains(url: &str) -> i64 {
    url.matches('.').count() as i64 - 1
}

fn contains_ip(url: &str) -> bool {
    IP_REGEX.is_match(url)
}

fn num_special_chars(url: &str) -> i64 {
    url.chars().filter(|c| SPECIAL_CHARS.contains(c)).count() as i64
}

fn has_suspicious_keywords(url: &str) -> bool {
    let lowered = url.to_lowercase();
    SUSPICIOUS_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_https() {
        let v = extract_url_features("https://google.com");
        assert_eq!(v.get(URL_LENGTH), Some(18));
        assert_eq!(v.get(HOSTNAME_LENGTH), Some(10));
        assert_eq!(v.get(PATH_LENGTH), Some(0));
        assert_eq!(v.get(NUM_SUBDOMAINS), Some(0));
        assert_eq!(v.get(CONTAINS_HTTPS), Some(1));
        assert_eq!(v.get(HAS_SUSPICIOUS_KEYWORDS), Some(0));
    }

    #[test]
    fn test_paypal_phish() {
        let v = extract_url_features("http://paypal.com.phish.co/login");
        assert_eq!(v.get(HAS_SUSPICIOUS_KEYWORDS), Some(1));
        assert_eq!(v.get(CONTAINS_HTTPS), Some(0));
        assert_eq!(v.get(HOSTNAME_LENGTH), Some(19));
        assert_eq!(v.get(PATH_LENGTH), Some(5));
        assert_eq!(v.get(NUM_SUBDOMAINS), Some(2));
    }

    #[test]
    fn test_dotted_quad() {
        let v = extract_url_features("http://192.168.1.1/admin.html");
        assert_eq!(v.get(CONTAINS_IP), Some(1));
        assert_eq!(v.get(HAS_SUSPICIOUS_KEYWORDS), Some(1));

        // Lexical only: out-of-range octets still match
        let v = extract_url_features("http://999.999.999.999/");
        assert_eq!(v.get(CONTAINS_IP), Some(1));

        let v = extract_url_features("http://1.2.3/");
        assert_eq!(v.get(CONTAINS_IP), Some(0));
    }

    #[test]
    fn test_empty_url() {
        let v = extract_url_features("");
        assert_eq!(v.get(URL_LENGTH), Some(0));
        assert_eq!(v.get(HOSTNAME_LENGTH), Some(0));
        assert_eq!(v.get(PATH_LENGTH), Some(0));
        assert_eq!(v.get(CONTAINS_IP), Some(0));
        assert_eq!(v.get(CONTAINS_HTTPS), Some(0));
        assert_eq!(v.get(NUM_SPECIAL_CHARS), Some(0));
        assert_eq!(v.get(HAS_SUSPICIOUS_KEYWORDS), Some(0));
        assert_eq!(v.get(NUM_SUBDOMAINS), Some(-1));
    }

    #[test]
    fn test_slash_edge_cases() {
        // No slash at all
        let v = extract_url_features("example.com");
        assert_eq!(v.get(HOSTNAME_LENGTH), Some(0));
        assert_eq!(v.get(PATH_LENGTH), Some(0));

        // A single slash has no third segment
        let v = extract_url_features("example.com/login");
        assert_eq!(v.get(HOSTNAME_LENGTH), Some(0));
        assert_eq!(v.get(PATH_LENGTH), Some(0));

        // Trailing slash: empty path
        let v = extract_url_features("https://a.io/");
        assert_eq!(v.get(HOSTNAME_LENGTH), Some(4));
        assert_eq!(v.get(PATH_LENGTH), Some(0));

        // Path keeps its inner slashes
        let v = extract_url_features("https://a.io/x/y?z=1");
        assert_eq!(v.get(PATH_LENGTH), Some(7));
    }

    #[test]
    fn test_special_chars_and_case() {
        let v = extract_url_features("HTTP://Host/Sign-In?a=1&b=%20#frag@x");
        assert_eq!(v.get(NUM_SPECIAL_CHARS), Some(8));
        assert_eq!(v.get(HAS_SUSPICIOUS_KEYWORDS), Some(0));

        let v = extract_url_features("http://host/SIGNIN");
        assert_eq!(v.get(HAS_SUSPICIOUS_KEYWORDS), Some(1));
    }

    #[test]
    fn test_https_prefix_is_exact() {
        assert_eq!(extract_url_features("HTTPS://a.com").get(CONTAINS_HTTPS), Some(0));
        assert_eq!(extract_url_features("https:/a.com").get(CONTAINS_HTTPS), Some(0));
        assert_eq!(extract_url_features("https://").get(CONTAINS_HTTPS), Some(1));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let v = extract_url_features("https://bücher.de/straße");
        assert_eq!(v.get(URL_LENGTH), Some(24));
        assert_eq!(v.get(HOSTNAME_LENGTH), Some(9));
        assert_eq!(v.get(PATH_LENGTH), Some(6));
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        for url in ["/", "//", "///", "....", "\u{0}", "🙂🙂/🙂/🙂/🙂", "a b c"] {
            let v = extract_url_features(url);
            assert!(v.validate().is_ok());
        }
    }
}
