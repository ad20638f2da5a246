//! Host list loading.
//!
//! # Responsibilities
//! - Parse a newline-delimited host list into a `HostSet`
//! - Read the list from disk or a stream, mapping IO failures to `SourceUnavailable`
//! - Optionally cache the loaded set across requests
//!
//! # Design Decisions
//! - Entries are trimmed and blank lines skipped, nothing else (no case folding)
//! - Cached and fresh loads produce the same set; caching only saves the read

use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::matching::types::MatchError;

/// Deduplicated set of host names to match URL domains against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSet {
    hosts: HashSet<String>,
}

impl HostSet {
    /// Parse a newline-delimited host list.
    pub fn parse(text: &str) -> Self {
        text.lines().collect()
    }

    /// Read and parse a host list from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, MatchError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| MatchError::SourceUnavailable { path: None, source })?;
        Ok(Self::parse(&text))
    }

    /// Read and parse the host list file at `path`.
    pub fn load(path: &Path) -> Result<Self, MatchError> {
        let text = fs::read_to_string(path).map_err(|source| MatchError::SourceUnavailable {
            path: Some(path.to_path_buf()),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for HostSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let hosts = iter
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|host| !host.is_empty())
            .collect();
        Self { hosts }
    }
}

/// Where a request gets its host list from.
#[derive(Debug)]
pub enum HostSource {
    /// Re-read the file on every load.
    File(PathBuf),
    /// Read the file on first successful load and reuse the result.
    Cached {
        path: PathBuf,
        cell: OnceCell<Arc<HostSet>>,
    },
    /// A set supplied up front.
    Static(Arc<HostSet>),
}

impl HostSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        HostSource::File(path.into())
    }

    pub fn cached(path: impl Into<PathBuf>) -> Self {
        HostSource::Cached {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn fixed(hosts: HostSet) -> Self {
        HostSource::Static(Arc::new(hosts))
    }

    /// Load the host set for one request.
    ///
    /// A failed read is not cached, so a `Cached` source retries on the
    /// next call.
    pub fn load(&self) -> Result<Arc<HostSet>, MatchError> {
        match self {
            HostSource::File(path) => HostSet::load(path).map(Arc::new),
            HostSource::Cached { path, cell } => cell
                .get_or_try_init(|| HostSet::load(path).map(Arc::new))
                .cloned(),
            HostSource::Static(hosts) => Ok(hosts.clone()),
        }
    }

    /// Backing file path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            HostSource::File(path) | HostSource::Cached { path, .. } => Some(path.as_path()),
            HostSource::Static(_) => None,
        }
    }
}
