//! API handlers.
//!
//! - `POST /irccip/key` sends one key code to the display
//! - `GET /irccip/keys` lists the documented key codes

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::response;
use crate::http::server::AppState;
use crate::ircc::keycode::{KeyCode, KEY_CODES};
use crate::ircc::IrccError;
use crate::observability::metrics;

/// Body of `POST /irccip/key`.
#[derive(Debug, Deserialize, Serialize)]
pub struct KeyPressRequest {
    pub key_code: KeyCode,
}

/// One entry of `GET /irccip/keys`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyEntry {
    pub name: String,
    pub code: KeyCode,
}

/// Why a key press was rejected. Every variant is answered with 400.
#[derive(Debug, Error)]
pub enum KeyPressError {
    #[error("{0}")]
    Decode(String),

    #[error("Failed to send key code: {0}")]
    Dispatch(#[from] IrccError),
}

impl IntoResponse for KeyPressError {
    fn into_response(self) -> Response {
        response::text(StatusCode::BAD_REQUEST, self.to_string())
    }
}

pub async fn press_key(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, KeyPressError> {
    let body = body.map_err(|rejection| KeyPressError::Decode(rejection.body_text()))?;
    let request: KeyPressRequest =
        serde_json::from_slice(&body).map_err(|e| KeyPressError::Decode(e.to_string()))?;

    tracing::debug!(key_code = %request.key_code, "Sending key code");

    if let Err(e) = state.ircc.send_key_code(&request.key_code).await {
        tracing::error!(
            error = %e,
            key_code = %request.key_code,
            timeout = e.is_timeout(),
            "Failed to send key code"
        );
        metrics::record_key_press(e.kind());
        return Err(e.into());
    }

    metrics::record_key_press("ok");
    Ok(StatusCode::OK)
}

pub async fn list_keys() -> Json<Vec<KeyEntry>> {
    Json(
        KEY_CODES
            .iter()
            .map(|(name, code)| KeyEntry {
                name: name.to_string(),
                code: code.clone(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{body::Body, http::Request, routing::post, Router};
    use tower::ServiceExt;

    use crate::ircc::client::IRCC_PATH;
    use crate::ircc::IrccClient;

    fn app(device_url: &str) -> Router {
        let state = AppState {
            ircc: Arc::new(IrccClient::new(device_url, "0000")),
        };
        Router::new()
            .route("/irccip/key", post(press_key))
            .with_state(state)
    }

    fn press(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/irccip/key")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_without_calling_device() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", IRCC_PATH).expect(0).create_async().await;

        let response = app(&server.url()).oneshot(press("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.ends_with('\n'));

        let response = app(&server.url()).oneshot(press("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("key_code"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_success_is_empty_200() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("POST", IRCC_PATH).with_status(200).create_async().await;

        let response = app(&server.url())
            .oneshot(press(r#"{"key_code": "AAAAAQAAAAEAAABgAw=="}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_device_failure_is_400_with_reason() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("POST", IRCC_PATH).with_status(403).create_async().await;

        let response = app(&server.url())
            .oneshot(press(r#"{"key_code": "AAAAAQAAAAEAAABgAw=="}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            "Failed to send key code: HTTP error: 403 Forbidden\n"
        );
    }

    #[tokio::test]
    async fn test_list_keys() {
        let Json(keys) = list_keys().await;
        assert_eq!(keys.len(), KEY_CODES.len());
        assert_eq!(keys[0].name, "Power");
        assert_eq!(keys[0].code.as_str(), "AAAAAQAAAAEAAAAVAw==");
    }
}
