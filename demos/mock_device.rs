//! Pretend Bravia display for trying the remote without a TV.
//!
//! Run with `cargo run --example mock_device`, then start the remote with
//! `--ip 127.0.0.1:8081 --psk 0000`.

use axum::{http::HeaderMap, http::StatusCode, routing::post, Router};
use std::net::SocketAddr;

const PSK: &str = "0000";

const FAULT: &str = "<?xml version=\"1.0\"?>
<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\">
  <s:Body>
    <s:Fault>
      <detail>
        <UPnPError xmlns=\"urn:schemas-upnp-org:control-1-0\">
          <errorCode>800</errorCode>
          <errorDescription>Cannot accept the IRCC Code</errorDescription>
        </UPnPError>
      </detail>
    </s:Fault>
  </s:Body>
</s:Envelope>";

async fn ircc(headers: HeaderMap, body: String) -> (StatusCode, &'static str) {
    if headers.get("x-auth-psk").map(|v| v != PSK).unwrap_or(true) {
        println!("rejected: bad PSK");
        return (StatusCode::FORBIDDEN, "");
    }

    let code = body
        .split("<IRCCCode>")
        .nth(1)
        .and_then(|rest| rest.split("</IRCCCode>").next())
        .unwrap_or("");

    match bravia_remote::ircc::keycode::KEY_CODES.iter().find(|(_, c)| c.as_str() == code) {
        Some((name, _)) => {
            println!("pressed {} 📺", name);
            (StatusCode::OK, "")
        }
        None => {
            println!("unknown code {:?}", code);
            (StatusCode::INTERNAL_SERVER_ERROR, FAULT)
        }
    }
}

#[tokio::main]
async fn main() {
    let app = Router::new().route("/sony/ircc", post(ircc));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Pretend display is listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
