//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout, limit, CORS)
//!     → handlers.rs (POST /urlcounts, GET /status), openapi.rs (GET /openapi.json)
//!     → request.rs (decode body into a URL list)
//!     → matching::UrlCounter (validate, load hosts, aggregate)
//!     → response.rs (map errors to status codes)
//!     → Send to client
//! ```

pub mod handlers;
pub mod openapi;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UrlcountsRequest, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
