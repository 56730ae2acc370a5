//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routes, static UI fallback)
//!     → request.rs (sequential request ID + span)
//!     → middleware/ (panic containment, proxy headers, logging, Server header, compression)
//!     → handlers.rs (decode command, call the display client)
//!     → response.rs (plain-text errors, generic 500)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestCounter, RequestId, RequestIdExt, RequestIdLayer};
pub use server::{AppState, HttpServer};
