//! Mission briefing uplink
//!
//! Briefings come from a remote text service. Any failure (transport,
//! non-success status, bad payload, empty text) is recovered here with a fixed
//! fallback briefing so play is never blocked.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body sent to the briefing service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefingRequest {
    /// 1-based mission number
    pub level: u32,
    pub enemy_types: Vec<String>,
}

/// Successful response body
#[derive(Debug, Clone, Deserialize)]
pub struct BriefingResponse {
    #[serde(default)]
    pub briefing: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BriefingErrorResponse {
    error: String,
}

#[derive(Debug)]
pub enum BriefingError {
    Transport(reqwest::Error),
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },
    Decode(reqwest::Error),
    /// Response parsed but carried no briefing text
    MissingBriefing,
}

impl fmt::Display for BriefingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BriefingError::Transport(err) => write!(f, "briefing transport error: {err}"),
            BriefingError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "briefing upstream error {status}: {message}")
                } else {
                    write!(f, "briefing upstream error {status}")
                }
            }
            BriefingError::Decode(err) => write!(f, "briefing response decode error: {err}"),
            BriefingError::MissingBriefing => write!(f, "briefing response had no text"),
        }
    }
}

impl std::error::Error for BriefingError {}

/// Source of mission briefings
#[async_trait(?Send)]
pub trait BriefingProvider {
    async fn fetch_briefing(&self, req: &BriefingRequest) -> Result<String, BriefingError>;
}

/// HTTP client for the briefing service
#[derive(Clone)]
pub struct HttpBriefingClient {
    http: Client,
    pub endpoint: String,
}

impl HttpBriefingClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl BriefingProvider for HttpBriefingClient {
    async fn fetch_briefing(&self, req: &BriefingRequest) -> Result<String, BriefingError> {
        let res = self
            .http
            .post(&self.endpoint)
            .json(req)
            .send()
            .await
            .map_err(BriefingError::Transport)?;
        let status = res.status();

        // Keep the service's error message when it sends one
        if !status.is_success() {
            let message = res
                .json::<BriefingErrorResponse>()
                .await
                .ok()
                .map(|payload| payload.error);
            return Err(BriefingError::Upstream { status, message });
        }

        let body = res
            .json::<BriefingResponse>()
            .await
            .map_err(BriefingError::Decode)?;
        extract_briefing(body)
    }
}

/// Pull non-empty text out of a response body
pub fn extract_briefing(body: BriefingResponse) -> Result<String, BriefingError> {
    match body.briefing {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(BriefingError::MissingBriefing),
    }
}

/// Briefing shown when the uplink fails
pub fn fallback_briefing(level: u32) -> String {
    format!(
        "**// COMMAND ALERT: UPLINK FAILED //**\n\n\
         Transmission lost. Could not retrieve mission briefing.\n\n\
         **Mission {level}**\n\
         Primary Objective: Eradicate all hostile signatures in the designated quadrant. \
         Enemy composition is unknown due to signal interference. Expect heavy resistance. \
         Good luck, pilot. Command out."
    )
}

/// Fetch a briefing, substituting the fallback on any failure
pub async fn briefing_or_fallback<P: BriefingProvider + ?Sized>(
    provider: &P,
    level: u32,
    enemy_types: Vec<String>,
) -> String {
    let req = BriefingRequest { level, enemy_types };
    match provider.fetch_briefing(&req).await {
        Ok(text) => text,
        Err(err) => {
            log::warn!("Failed to get mission briefing: {err}");
            fallback_briefing(level)
        }
    }
}
