//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use tokio::net::TcpListener;

use bravia_remote::config::RemoteConfig;
use bravia_remote::ircc::keycode;
use bravia_remote::{HttpServer, IrccClient, Shutdown};

pub const DEVICE_PSK: &str = "0000";

pub const FAULT_BODY: &str = r#"<?xml version="1.0"?>
<s:Envelope
    xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"
    s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <s:Body>
    <s:Fault>
      <faultcode>s:Client</faultcode>
      <faultstring>UPnPError</faultstring>
      <detail>
        <UPnPError xmlns="urn:schemas-upnp-org:control-1-0">
          <errorCode>800</errorCode>
          <errorDescription>Cannot accept the IRCC Code</errorDescription>
        </UPnPError>
      </detail>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;

/// A request the mock display received.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: String,
}

/// Fake display: checks the PSK, accepts documented codes, faults on the rest.
pub struct MockDevice {
    pub url: String,
    pub received: Arc<Mutex<Vec<Captured>>>,
}

pub async fn start_mock_device() -> MockDevice {
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();

    let app = Router::new().route(
        "/sony/ircc",
        post(move |headers: HeaderMap, body: String| {
            let log = log.clone();
            async move {
                let psk_ok = headers
                    .get("x-auth-psk")
                    .map(|v| v == DEVICE_PSK)
                    .unwrap_or(false);
                let known = keycode::KEY_CODES
                    .iter()
                    .any(|(_, code)| body.contains(&format!("<IRCCCode>{}</IRCCCode>", code)));
                log.lock().unwrap().push(Captured { headers, body });

                if !psk_ok {
                    (StatusCode::FORBIDDEN, String::new())
                } else if known {
                    (StatusCode::OK, String::new())
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, FAULT_BODY.to_string())
                }
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockDevice {
        url: format!("http://{}", addr),
        received,
    }
}

/// A running web remote.
pub struct Remote {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl Remote {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Directory with a single `index.html`, unique per test.
pub fn ui_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bravia-remote-ui-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>remote</h1>").unwrap();
    dir
}

/// Start the remote against `device_url`, authenticating with `psk`.
pub async fn start_remote(device_url: &str, psk: &str, ui: Option<PathBuf>) -> Remote {
    let mut config = RemoteConfig::default();
    config.device.address = device_url.to_string();
    config.device.psk = psk.to_string();
    if let Some(dir) = ui {
        config.ui.static_dir = dir.to_string_lossy().into_owned();
    }

    let client = IrccClient::from_config(&config.device).unwrap();
    let server = HttpServer::with_client(config, client);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    Remote { addr, shutdown }
}
