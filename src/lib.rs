//! URL batch host matching service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod matching;
pub mod observability;

pub use config::schema::UrlcountsConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use matching::{aggregate, HostSet, HostSource, MatchError, MatchResult, UrlCounter, ValidationError};
