use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct KeyPressRequest {
    pub key_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyEntry {
    pub name: String,
    pub code: String,
}

/// Failure talking to the web remote.
#[derive(Debug)]
pub enum RemoteError {
    /// The remote could not be reached or returned an unreadable body.
    Http(reqwest::Error),
    /// The remote answered with a non-success status; `message` is its body.
    Rejected { status: StatusCode, message: String },
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteError::Http(e) => write!(f, "request failed: {}", e),
            RemoteError::Rejected { status, message } => {
                write!(f, "remote returned {}: {}", status, message.trim_end())
            }
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        RemoteError::Http(e)
    }
}

pub struct RemoteClient {
    client: Client,
    remote_url: String,
}

impl RemoteClient {
    pub fn new(remote_url: &str) -> Self {
        Self::with_client(remote_url, Client::new())
    }

    pub fn with_client(remote_url: &str, client: Client) -> Self {
        Self {
            client,
            remote_url: remote_url.trim_end_matches('/').to_string(),
        }
    }

    /// Press one key on the display behind the remote.
    pub async fn press(&self, key_code: &str) -> Result<(), RemoteError> {
        let resp = self
            .client
            .post(format!("{}/irccip/key", self.remote_url))
            .json(&KeyPressRequest {
                key_code: key_code.to_string(),
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await?;
            return Err(RemoteError::Rejected { status, message });
        }
        Ok(())
    }

    /// Fetch the documented key table.
    pub async fn keys(&self) -> Result<Vec<KeyEntry>, RemoteError> {
        let resp = self
            .client
            .get(format!("{}/irccip/keys", self.remote_url))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await?;
            return Err(RemoteError::Rejected { status, message });
        }
        Ok(resp.json().await?)
    }
}
