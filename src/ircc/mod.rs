//! Sony IRCC-IP (InfraRed Compatible Control over IP) subsystem.
//!
//! # Data Flow
//! ```text
//! KeyCode (keycode.rs table or caller-supplied)
//!     → soap.rs (fixed X_SendIRCC envelope)
//!     → client.rs (POST <base>/sony/ircc with PSK + SOAPACTION headers)
//!     → client.rs (classify status, soap.rs extracts faults from 500 bodies)
//!     → IrccResult<()>
//! ```
//!
//! # Security Constraints
//! - Plain HTTP to a trusted LAN display
//! - Never log the pre-shared key
//! - Every call has a deadline; nothing is retried

pub mod client;
pub mod keycode;
pub mod soap;
pub mod types;

pub use client::IrccClient;
pub use keycode::KeyCode;
pub use types::{IrccError, IrccResult, SoapFault};
