//! URL-to-host matching subsystem.
//!
//! # Data Flow
//! ```text
//! hosts.txt / reader / preloaded set
//!     → hosts.rs (HostSource → HostSet)
//!
//! Raw URL batch
//!     → aggregate.rs (validate, dedup)
//!     → domain.rs (netloc, strip "www.")
//!     → HostSet membership
//!     → MatchResult
//! ```
//!
//! # Design Decisions
//! - No IO besides the host list read; no logging (callers log around it)
//! - Errors are typed: `SourceUnavailable` is a server fault, `ValidationError`
//!   is the caller's

pub mod aggregate;
pub mod domain;
pub mod hosts;
pub mod types;

pub use aggregate::{aggregate, MatchResult, UrlBatch, UrlCounter};
pub use domain::extract_domain;
pub use hosts::{HostSet, HostSource};
pub use types::{MatchError, ValidationError};
