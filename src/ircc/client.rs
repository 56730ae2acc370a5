//! IRCC-IP client with timeout and fault classification.
//!
//! # Responsibilities
//! - Send `X_SendIRCC` SOAP requests to the display
//! - Authenticate with the pre-shared key header
//! - Turn the display's responses into a typed outcome
//!
//! # Response Classification
//! ```text
//! transport failure        → IrccError::Transport
//! 500 + recognizable fault → IrccError::SoapFault
//! >= 400 (incl. other 500) → IrccError::Http
//! anything else            → Ok(())
//! ```
//!
//! The display reports most application errors as a bare 500, so the body is
//! only inspected for that status.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::ircc::keycode::KeyCode;
use crate::ircc::soap;
use crate::ircc::types::{DeviceConfig, IrccError, IrccResult};

/// Path of the IRCC control endpoint on the display.
pub const IRCC_PATH: &str = "/sony/ircc";

pub const AUTH_HEADER: &str = "X-Auth-PSK";
pub const SOAP_ACTION_HEADER: &str = "SOAPACTION";
pub const SOAP_ACTION: &str = "\"urn:schemas-sony-com:service:IRCC:1#X_SendIRCC\"";
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

/// Client for a single IRCC-IP capable display.
///
/// Cheap to clone; holds no per-call state.
#[derive(Clone)]
pub struct IrccClient {
    /// Full URL of the control endpoint (`<base>/sony/ircc`).
    endpoint: String,
    /// Pre-shared key sent with every request.
    psk: String,
    /// Underlying HTTP transport.
    http: reqwest::Client,
}

impl IrccClient {
    /// Create a client for the display at `base_url` (e.g. `http://192.168.1.12`).
    pub fn new(base_url: &str, psk: impl Into<String>) -> Self {
        Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), IRCC_PATH),
            psk: psk.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client from device configuration, with per-call deadlines.
    pub fn from_config(config: &DeviceConfig) -> IrccResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        let client = Self::new(&config.base_url(), config.psk.clone()).with_http_client(http);

        tracing::info!(
            endpoint = %client.endpoint,
            timeout_secs = config.timeout_secs,
            "IRCC client initialized"
        );

        Ok(client)
    }

    /// Replace the HTTP transport. Meant to be called before first use.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// URL every command is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one key code to the display.
    ///
    /// Exactly one request is made; nothing is retried.
    pub async fn send_key_code(&self, key: &KeyCode) -> IrccResult<()> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTH_HEADER, &self.psk)
            .header(SOAP_ACTION_HEADER, SOAP_ACTION)
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(soap::envelope(key))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            let body = response.bytes().await?;
            return classify(status, &body);
        }

        classify(status, &[])
    }
}

/// Map a display response to an outcome. `body` is only consulted for 500.
fn classify(status: StatusCode, body: &[u8]) -> IrccResult<()> {
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        if let Some(fault) = soap::extract_fault(&String::from_utf8_lossy(body)) {
            return Err(IrccError::SoapFault(fault));
        }
    }

    if status.as_u16() >= 400 {
        return Err(IrccError::Http(status));
    }

    Ok(())
}

impl std::fmt::Debug for IrccClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrccClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
