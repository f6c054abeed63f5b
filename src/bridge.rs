use serde::Deserialize;

use crate::gate::Credential;
use crate::models::FileEntry;
use crate::sync::http::cache_buster;

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    Transport(String),
    Status(u16),
    Malformed(String),
    Remote(String),
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::Transport(msg) => write!(f, "File bridge request failed: {msg}"),
            BridgeError::Status(code) => write!(f, "File bridge returned status {code}"),
            BridgeError::Malformed(msg) => write!(f, "Malformed file bridge response: {msg}"),
            BridgeError::Remote(msg) => write!(f, "File bridge error: {msg}"),
        }
    }
}

impl std::error::Error for BridgeError {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ReplyStatus {
    Ok,
    Error,
}

#[derive(Debug, Deserialize)]
struct Reply<T> {
    status: ReplyStatus,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListReply {
    Envelope(Reply<Vec<FileEntry>>),
    Bare(Vec<FileEntry>),
}

/// Remote call interface of the file browser: `action=list|read` over GET.
pub struct FileBridge {
    client: reqwest::Client,
    endpoint: String,
}

impl FileBridge {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub async fn list(&self, credential: Option<&Credential>) -> Result<Vec<FileEntry>, BridgeError> {
        let body = self.call("list", None, credential).await?;
        match serde_json::from_str::<ListReply>(&body)
            .map_err(|e| BridgeError::Malformed(e.to_string()))?
        {
            ListReply::Bare(files) => Ok(files),
            ListReply::Envelope(reply) => match reply.status {
                ReplyStatus::Ok => Ok(reply.data.unwrap_or_default()),
                ReplyStatus::Error => Err(remote_error(reply.message)),
            },
        }
    }

    pub async fn read(&self, id: &str, credential: Option<&Credential>) -> Result<String, BridgeError> {
        let body = self.call("read", Some(id), credential).await?;
        let reply: Reply<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| BridgeError::Malformed(e.to_string()))?;
        match reply.status {
            ReplyStatus::Ok => reply
                .content
                .ok_or_else(|| BridgeError::Malformed("missing content".to_string())),
            ReplyStatus::Error => Err(remote_error(reply.message)),
        }
    }

    async fn call(
        &self,
        action: &str,
        id: Option<&str>,
        credential: Option<&Credential>,
    ) -> Result<String, BridgeError> {
        let mut query: Vec<(&str, String)> = vec![("action", action.to_string())];
        if let Some(id) = id {
            query.push(("id", id.to_string()));
        }
        if let Some(credential) = credential {
            query.push(("p", credential.as_str().to_string()));
        }
        query.push(("t", cache_buster()));

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(BridgeError::Status(resp.status().as_u16()));
        }

        resp.text()
            .await
            .map_err(|e| BridgeError::Transport(e.to_string()))
    }
}

fn remote_error(message: Option<String>) -> BridgeError {
    BridgeError::Remote(message.unwrap_or_else(|| "unknown error".to_string()))
}
