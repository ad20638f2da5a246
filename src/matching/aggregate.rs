//! URL batch matching and aggregation.
//!
//! # Responsibilities
//! - Deduplicate the submitted URLs (exact string equality only)
//! - Extract each URL's domain and test it against the `HostSet`
//! - Count matches per host and collect URLs that matched nothing
//!
//! # Design Decisions
//! - Distinct URLs keep first-occurrence order, so `unmatched_urls` is in
//!   the order the caller first submitted them
//! - `matched_per_host` is sorted by host name for stable output
//! - Pure and synchronous: safe to call from any number of tasks at once

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::matching::domain::extract_domain;
use crate::matching::hosts::{HostSet, HostSource};
use crate::matching::types::{MatchError, ValidationError};

/// Aggregate match statistics for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Distinct URLs whose domain is a known host.
    pub matched_count: usize,
    /// Distinct URLs whose domain is not a known host.
    pub unmatched_count: usize,
    /// One `count=[<n>] <host>` entry per host with at least one match.
    pub matched_per_host: Vec<String>,
    /// Distinct URLs that matched no host, as submitted.
    pub unmatched_urls: Vec<String>,
}

impl MatchResult {
    /// Number of distinct URLs the result covers.
    pub fn total(&self) -> usize {
        self.matched_count + self.unmatched_count
    }
}

/// A validated, deduplicated batch of URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBatch<'a> {
    distinct: Vec<&'a str>,
}

impl<'a> UrlBatch<'a> {
    /// Deduplicate `urls`, rejecting an empty batch.
    pub fn new<S: AsRef<str>>(urls: &'a [S]) -> Result<Self, ValidationError> {
        if urls.is_empty() {
            return Err(ValidationError::EmptyUrls);
        }

        let mut seen = HashSet::with_capacity(urls.len());
        let distinct = urls
            .iter()
            .map(|url| url.as_ref())
            .filter(|url| seen.insert(*url))
            .collect();

        Ok(Self { distinct })
    }

    /// Number of distinct URLs.
    pub fn len(&self) -> usize {
        self.distinct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distinct.is_empty()
    }

    /// Match every distinct URL against `hosts`.
    pub fn match_against(&self, hosts: &HostSet) -> MatchResult {
        let mut per_host: BTreeMap<String, usize> = BTreeMap::new();
        let mut unmatched_urls = Vec::new();

        for &url in &self.distinct {
            let domain = extract_domain(url);
            if hosts.contains(&domain) {
                *per_host.entry(domain.into_owned()).or_default() += 1;
            } else {
                unmatched_urls.push(url.to_string());
            }
        }

        let unmatched_count = unmatched_urls.len();
        MatchResult {
            matched_count: self.distinct.len() - unmatched_count,
            unmatched_count,
            matched_per_host: per_host
                .into_iter()
                .map(|(host, count)| format_host_count(&host, count))
                .collect(),
            unmatched_urls,
        }
    }
}

/// Match a raw URL batch against `hosts`.
pub fn aggregate<S: AsRef<str>>(urls: &[S], hosts: &HostSet) -> Result<MatchResult, ValidationError> {
    Ok(UrlBatch::new(urls)?.match_against(hosts))
}

/// Format one `matched_per_host` entry.
pub fn format_host_count(host: &str, count: usize) -> String {
    format!("count=[{}] {}", count, host)
}

/// Counts URL batches against a configured host source.
#[derive(Debug)]
pub struct UrlCounter {
    source: HostSource,
}

impl UrlCounter {
    pub fn new(source: HostSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &HostSource {
        &self.source
    }

    /// Validate the batch, load the host list, then aggregate.
    ///
    /// Validation comes first: an empty batch is rejected without touching
    /// the host list.
    pub fn count<S: AsRef<str>>(&self, urls: &[S]) -> Result<MatchResult, MatchError> {
        let batch = UrlBatch::new(urls)?;
        let hosts: Arc<HostSet> = self.source.load()?;
        Ok(batch.match_against(&hosts))
    }
}
