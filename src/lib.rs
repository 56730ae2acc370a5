//! Web remote for Sony Bravia displays (IRCC-IP over HTTP/SOAP)

pub mod config;
pub mod http;
pub mod ircc;
pub mod lifecycle;
pub mod observability;

pub use config::schema::RemoteConfig;
pub use http::HttpServer;
pub use ircc::{IrccClient, IrccError, KeyCode};
pub use lifecycle::Shutdown;
