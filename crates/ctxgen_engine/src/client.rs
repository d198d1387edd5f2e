use std::time::Duration;

use ctxgen_logging::ctx_debug;
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::wire::{GenerateRequestBody, GenerateResponseBody};
use crate::{FailureKind, GenerateError, GenerateOutput};

pub const GENERATE_PATH: &str = "/generate-context";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// `None` waits for the OS connect timeout.
    pub connect_timeout: Option<Duration>,
    /// `None` lets a request run until it completes or the transport fails.
    pub request_timeout: Option<Duration>,
    pub max_body_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait ContextGenerator: Send + Sync {
    /// Sends one generation request for `repo_url` and reads the reply.
    async fn generate(&self, repo_url: &str) -> Result<GenerateOutput, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerator {
    endpoint: Url,
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestGenerator {
    /// `api_base` is the service base endpoint without a trailing slash.
    pub fn new(api_base: &str, settings: ClientSettings) -> Result<Self, GenerateError> {
        let endpoint = Url::parse(&format!("{api_base}{GENERATE_PATH}"))
            .map_err(|err| GenerateError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = build_client(&settings)?;
        Ok(Self {
            endpoint,
            settings,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

pub(crate) fn build_client(settings: &ClientSettings) -> Result<reqwest::Client, GenerateError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = settings.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = settings.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))
}

#[async_trait::async_trait]
impl ContextGenerator for ReqwestGenerator {
    async fn generate(&self, repo_url: &str) -> Result<GenerateOutput, GenerateError> {
        let body = serde_json::to_vec(&GenerateRequestBody {
            repo_url: repo_url.to_string(),
        })
        .map_err(|err| GenerateError::new(FailureKind::InvalidBody, err.to_string()))?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_body_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(GenerateError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(GenerateError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        ctx_debug!("generation reply: status={} bytes={}", status, bytes.len());

        let parsed: GenerateResponseBody = serde_json::from_slice(&bytes)
            .map_err(|err| GenerateError::new(FailureKind::InvalidBody, err.to_string()))?;

        Ok(GenerateOutput {
            file_path: parsed.file_path,
        })
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}
