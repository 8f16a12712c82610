use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use super::request::{encode_form, MessageRequest};
use super::{MESSAGES_PATH, ROOMS_PATH};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::Rooms;

/// Status and raw body of a `POST /messages` call
#[derive(Debug, Clone)]
pub struct SendResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Webex REST API client bound to one access token
pub struct WebexClient {
    http: Client,
    base_url: String,
    token: String,
}

impl WebexClient {
    /// Create a client using the API settings from `config`
    pub fn new(config: &Config, token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(
            &config.api.base_url,
            token,
            Duration::from_secs(config.api.timeout),
        )
    }

    pub fn with_base_url(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a message. The body is returned verbatim whatever the status.
    pub async fn send_message(&self, request: MessageRequest) -> Result<SendResponse> {
        let url = self.url(MESSAGES_PATH);
        info!("POST {} ({})", url, request.kind());

        let builder = self.http.post(&url).bearer_auth(&self.token);
        let builder = match request {
            MessageRequest::Multipart(body) => builder.multipart(body.into_form()?),
            MessageRequest::Json(body) => builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body),
            MessageRequest::Form(fields) => builder
                .header(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                )
                .body(encode_form(&fields)?),
        };

        let res = builder.send().await?;
        let status = res.status();
        let body = res.text().await?;
        debug!("POST {} -> {}", url, status);

        Ok(SendResponse { status, body })
    }

    /// Fetch the rooms visible to the token, in API order
    pub async fn list_rooms(&self) -> Result<Rooms> {
        let url = self.url(ROOMS_PATH);
        info!("GET {}", url);

        let res = self.http.get(&url).bearer_auth(&self.token).send().await?;
        let status = res.status();
        let body = res.text().await?;
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            return Err(Error::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
