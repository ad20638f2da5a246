//! Domain extraction from raw URL strings.
//!
//! # Design Decisions
//! - Split-only parsing: the authority is returned verbatim (no lowercasing,
//!   no IDNA, no default-port removal) so it compares byte-for-byte against
//!   the host list
//! - Tab, CR and LF are dropped from anywhere in the URL before splitting
//! - Malformed input never errors; it yields an empty domain

use std::borrow::Cow;

/// Return the authority (`netloc`) component of `url`.
///
/// The authority is only recognized after `//`, optionally preceded by a
/// scheme, and runs up to the first `/`, `?` or `#`. Userinfo and port are
/// kept. Returns `None` when there is no authority or its IPv6 brackets are
/// unbalanced.
pub fn netloc(url: &str) -> Option<Cow<'_, str>> {
    match remove_tabs_and_newlines(url) {
        Cow::Borrowed(url) => split_netloc(url).map(Cow::Borrowed),
        Cow::Owned(url) => split_netloc(&url).map(|netloc| Cow::Owned(netloc.to_string())),
    }
}

/// Return the normalized domain name of `url`: its authority with one
/// leading `www.` removed. Unparsable URLs give `""`.
pub fn extract_domain(url: &str) -> Cow<'_, str> {
    match remove_tabs_and_newlines(url) {
        Cow::Borrowed(url) => Cow::Borrowed(domain_of(url)),
        Cow::Owned(url) => Cow::Owned(domain_of(&url).to_string()),
    }
}

fn domain_of(url: &str) -> &str {
    let netloc = split_netloc(url).unwrap_or_default();
    netloc.strip_prefix("www.").unwrap_or(netloc)
}

fn split_netloc(url: &str) -> Option<&str> {
    let url = url.trim_start_matches(|c: char| c <= ' ');
    let authority = strip_scheme(url).strip_prefix("//")?;

    let end = authority
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(authority.len());
    let netloc = &authority[..end];

    if netloc.contains('[') != netloc.contains(']') {
        return None;
    }

    Some(netloc)
}

fn remove_tabs_and_newlines(url: &str) -> Cow<'_, str> {
    const REMOVED: [char; 3] = ['\t', '\r', '\n'];
    if url.contains(REMOVED) {
        Cow::Owned(url.replace(REMOVED, ""))
    } else {
        Cow::Borrowed(url)
    }
}

fn strip_scheme(url: &str) -> &str {
    match url.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => url,
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_www_prefix_is_stripped() {
        assert_eq!(extract_domain("http://www.example.com/x"), "example.com");
        assert_eq!(extract_domain("http://example.com/x"), "example.com");
    }

    #[test]
    fn test_only_leading_www_is_stripped() {
        assert_eq!(extract_domain("http://www.www.example.com/"), "www.example.com");
        assert_eq!(extract_domain("http://shop.www.example.com/"), "shop.www.example.com");
        assert_eq!(extract_domain("http://WWW.example.com/"), "WWW.example.com");
    }

    #[test]
    fn test_authority_boundaries() {
        assert_eq!(extract_domain("https://example.com"), "example.com");
        assert_eq!(extract_domain("https://example.com?q=1"), "example.com");
        assert_eq!(extract_domain("https://example.com#top"), "example.com");
        assert_eq!(extract_domain("//example.com/path"), "example.com");
    }

    #[test]
    fn test_port_and_userinfo_are_kept() {
        assert_eq!(extract_domain("http://example.com:8080/a"), "example.com:8080");
        assert_eq!(extract_domain("ftp://user:pw@files.test/a"), "user:pw@files.test");
        assert_eq!(extract_domain("http://[::1]:80/"), "[::1]:80");
    }

    #[test]
    fn test_no_case_folding() {
        assert_eq!(extract_domain("HTTP://Example.COM/a"), "Example.COM");
        assert_eq!(extract_domain("http://example.com./a"), "example.com.");
    }

    #[test]
    fn test_malformed_urls_yield_empty_domain() {
        assert_eq!(extract_domain(""), "");
        assert_eq!(extract_domain("not a url"), "");
        assert_eq!(extract_domain("example.com/path"), "");
        assert_eq!(extract_domain("mailto:someone@example.com"), "");
        assert_eq!(extract_domain("http://[::1/broken"), "");
        assert_eq!(extract_domain("http://"), "");
    }

    #[test]
    fn test_leading_whitespace_is_ignored() {
        assert_eq!(extract_domain("  http://example.com/"), "example.com");
        assert_eq!(netloc("\thttp://example.com/").as_deref(), Some("example.com"));
    }

    #[test]
    fn test_invalid_scheme_is_not_stripped() {
        // "1http" is not a scheme, so there is no "//" authority to find.
        assert_eq!(netloc("1http://example.com/"), None);
        assert_eq!(netloc("svn+ssh://repo.test/trunk").as_deref(), Some("repo.test"));
    }

    #[test]
    fn test_tabs_and_newlines_are_removed() {
        assert_eq!(extract_domain("http://a.com\r"), "a.com");
        assert_eq!(extract_domain("http://a.\tcom/x"), "a.com");
        assert_eq!(extract_domain("http://www.a.com\r\n"), "a.com");
        assert_eq!(extract_domain("ht\ntp://a.com/"), "a.com");
        assert_eq!(netloc("http://a.com:80\r/x").as_deref(), Some("a.com:80"));
    }

    #[test]
    fn test_clean_urls_are_borrowed() {
        assert!(matches!(extract_domain("http://a.com/"), Cow::Borrowed("a.com")));
        assert!(matches!(extract_domain("http://a.com\r"), Cow::Owned(_)));
    }
}
