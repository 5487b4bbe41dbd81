//! HTTP client for the playback-control backend.
//!
//! This module provides the one outbound collaborator shared by the
//! TapTunes services: a small JSON-over-HTTP client for the backend's
//! audio and RFID endpoints.
//!
//! # Architecture
//!
//! ```text
//! ButtonDispatcher ──┐
//!                    ├─> ControlClient ───(HTTP)───> playback backend
//! PresenceTracker ───┘
//! ```
//!
//! # Design Principles
//!
//! The client is a plain transport layer:
//! - **No automatic retry**: callers drop a failed call and rely on the
//!   next poll cycle to retry naturally if the condition persists.
//! - **No connection pooling policy**: `reqwest`'s defaults are used.
//! - **Bounded waits**: every request carries a fixed timeout so an
//!   unreachable backend cannot stall a polling loop beyond one request.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use taptunes_core::{
    CardId, Volume,
    constants::{CARD_TIMEOUT, DEFAULT_BACKEND_URL, PLAYBACK_TIMEOUT},
};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Configuration for the control client.
///
/// # Example
///
/// ```
/// use taptunes_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig {
///     base_url: "http://localhost:3001".to_string(),
///     playback_timeout: Duration::from_secs(2),
///     card_timeout: Duration::from_secs(5),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,

    /// Timeout for the playback endpoints (volume, transport).
    pub playback_timeout: Duration,

    /// Timeout for the card endpoints (scan notify, save-position).
    pub card_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            playback_timeout: PLAYBACK_TIMEOUT,
            card_timeout: CARD_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given base URL with default timeouts.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Errors that can occur during backend communication.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend does not recognize the scanned card.
    #[error("Unknown card: {0}")]
    UnknownCard(CardId),

    /// The backend answered with a status outside the success range.
    #[error("Unexpected status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    /// The request failed at the transport level (timeout, connection
    /// refused, DNS).
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The response body could not be decoded.
    #[error("Invalid response from {endpoint}: {source}")]
    InvalidBody {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The client itself could not be constructed.
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns `true` for [`ClientError::UnknownCard`].
    #[must_use]
    pub fn is_unknown_card(&self) -> bool {
        matches!(self, ClientError::UnknownCard(_))
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Current playback state as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatus {
    /// Current playback volume.
    pub volume: Volume,

    /// Whether a track is currently playing.
    pub is_playing: bool,
}

#[derive(Debug, Serialize)]
struct SetVolumeRequest {
    volume: Volume,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CardRequest<'a> {
    card_id: &'a CardId,
}

/// HTTP client for the playback-control backend.
///
/// Cloneable and cheap to clone (`reqwest::Client` is an `Arc`
/// internally); each service owns its own clone.
///
/// # Example
///
/// ```no_run
/// use taptunes_client::{ClientConfig, ControlClient};
///
/// # async fn example() -> taptunes_client::Result<()> {
/// let client = ControlClient::new(ClientConfig::default())?;
///
/// let status = client.current_playback().await?;
/// println!("volume {} playing {}", status.volume, status.is_playing);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ControlClient {
    http: reqwest::Client,
    base_url: String,
    card_timeout: Duration,
}

impl ControlClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        debug!("Creating control client for backend {}", config.base_url);

        let http = reqwest::Client::builder()
            .timeout(config.playback_timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            card_timeout: config.card_timeout,
        })
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the current playback state.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, answers outside
    /// the success range, or the body cannot be decoded.
    pub async fn current_playback(&self) -> Result<PlaybackStatus> {
        let endpoint = "/audio/current";
        trace!(endpoint, "Fetching playback state");

        let response = self
            .http
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ClientError::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }

        let status: PlaybackStatus =
            response
                .json()
                .await
                .map_err(|source| ClientError::InvalidBody {
                    endpoint: endpoint.to_string(),
                    source,
                })?;

        trace!(volume = %status.volume, is_playing = status.is_playing, "Playback state received");
        Ok(status)
    }

    /// Set the playback volume.
    ///
    /// The [`Volume`] type guarantees the value is within bounds before it
    /// ever reaches the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers
    /// outside the success range.
    pub async fn set_volume(&self, volume: Volume) -> Result<()> {
        let endpoint = "/audio/volume";
        debug!(%volume, "Setting volume");

        let response = self
            .http
            .post(self.url(endpoint))
            .json(&SetVolumeRequest { volume })
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Self::expect_success(endpoint, response.status())
    }

    /// Skip to the next track.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers
    /// outside the success range.
    pub async fn next_track(&self) -> Result<()> {
        self.post_empty("/audio/next").await
    }

    /// Go back to the previous track.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers
    /// outside the success range.
    pub async fn previous_track(&self) -> Result<()> {
        self.post_empty("/audio/previous").await
    }

    /// Resume playback.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers
    /// outside the success range.
    pub async fn play(&self) -> Result<()> {
        self.post_empty("/audio/play").await
    }

    /// Pause playback.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers
    /// outside the success range.
    pub async fn pause(&self) -> Result<()> {
        self.post_empty("/audio/pause").await
    }

    /// Stop playback.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers
    /// outside the success range.
    pub async fn stop_playback(&self) -> Result<()> {
        self.post_empty("/audio/stop").await
    }

    /// Notify the backend that a card arrived on the reader.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownCard`] if the backend answers 404 for
    /// this card, or a transport/status error otherwise.
    pub async fn notify_card_detected(&self, card_id: &CardId) -> Result<()> {
        let endpoint = "/api/rfid/card-detected";
        debug!(card = %card_id, "Notifying card scan");

        let response = self
            .http
            .post(self.url(endpoint))
            .timeout(self.card_timeout)
            .json(&CardRequest { card_id })
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            warn!(card = %card_id, "Backend does not recognize card");
            return Err(ClientError::UnknownCard(card_id.clone()));
        }

        Self::expect_success(endpoint, response.status())
    }

    /// Ask the backend to persist the playback position for a card.
    ///
    /// Best-effort by convention: callers log a failure and move on.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers
    /// outside the success range.
    pub async fn save_position(&self, card_id: &CardId) -> Result<()> {
        let endpoint = "/api/rfid/save-position";
        debug!(card = %card_id, "Saving playback position");

        let response = self
            .http
            .post(self.url(endpoint))
            .timeout(self.card_timeout)
            .json(&CardRequest { card_id })
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Self::expect_success(endpoint, response.status())
    }

    async fn post_empty(&self, endpoint: &str) -> Result<()> {
        debug!(endpoint, "Posting transport command");

        let response = self
            .http
            .post(self.url(endpoint))
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Self::expect_success(endpoint, response.status())
    }

    fn expect_success(endpoint: &str, status: reqwest::StatusCode) -> Result<()> {
        if status.is_success() {
            trace!(endpoint, "Request succeeded");
            Ok(())
        } else {
            Err(ClientError::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            })
        }
    }
}
