//! Client for the Bravia web remote's HTTP API.

mod client;

pub use client::{KeyEntry, KeyPressRequest, RemoteClient, RemoteError};
