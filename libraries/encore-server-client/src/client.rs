//! Music server client.
//!
//! Thin HTTP collaborator for the playback core: submits play logs, builds
//! stream/artwork URLs, and warms the artwork cache. Implements the
//! collaborator traits the player store consumes.

use crate::error::{Result, ServerClientError};
use crate::types::{LogPlaybackRequest, ServerConfig};
use async_trait::async_trait;
use encore_core::Track;
use encore_playback::{ArtworkPrefetcher, PlayLogger, PlaybackError, StreamUrlResolver};
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Client for a personal music server.
///
/// # Example
///
/// ```ignore
/// use encore_server_client::{EncoreServerClient, ServerConfig};
///
/// let config = ServerConfig::new("https://music.example.com").with_token("abc");
/// let client = EncoreServerClient::new(config)?;
///
/// client.log_track("trackhash123", 30, "al:albumhash").await?;
/// ```
pub struct EncoreServerClient {
    http: Client,
    config: ServerConfig,

    /// Cache-busting counter for artwork prefetches
    artwork_nonce: AtomicU64,
}

impl EncoreServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("EncorePlayer/{} (Mobile)", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServerClientError::Request)?;

        Ok(Self {
            http,
            config: ServerConfig {
                url,
                access_token: config.access_token,
            },
            artwork_nonce: AtomicU64::new(0),
        })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Build the stream URL for a track.
    pub fn track_stream_url(&self, track: &Track) -> String {
        format!(
            "{}/track/stream/{}?filepath={}",
            self.config.url,
            track.track_hash,
            urlencode(&track.filepath)
        )
    }

    /// Build the artwork thumbnail URL for an image reference.
    pub fn thumbnail_url(&self, image_ref: &str) -> String {
        format!("{}/img/thumbnail/{}", self.config.url, image_ref)
    }

    /// Submit one play-log entry.
    pub async fn log_track(
        &self,
        track_hash: &str,
        threshold_secs: u32,
        source_tag: &str,
    ) -> Result<()> {
        let url = format!("{}/logger/track/log", self.config.url);
        let body = LogPlaybackRequest {
            trackhash: track_hash.to_string(),
            duration: threshold_secs,
            source: source_tag.to_string(),
        };

        debug!(track = %track_hash, source = %source_tag, "logging playback");

        let mut request = self.http.post(&url).json(&body);
        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ServerClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Warm the server-side and HTTP caches for an artwork image.
    ///
    /// Fire-and-forget: failures only cost a cold cache, so they are logged
    /// and swallowed. Each fetch carries a fresh cache-busting nonce so a
    /// re-rendered artwork is not masked by an intermediary cache.
    pub async fn prefetch_artwork(&self, image_ref: &str) {
        let nonce = self.artwork_nonce.fetch_add(1, Ordering::Relaxed);
        let url = format!("{}?nocache={}", self.thumbnail_url(image_ref), nonce);

        match self.http.get(&url).send().await {
            Ok(response) => {
                // Drain the body so the bytes actually land in caches
                let _ = response.bytes().await;
            }
            Err(e) => {
                warn!(image = %image_ref, error = %e, "artwork prefetch failed");
            }
        }
    }
}

// ===== Playback collaborator impls =====

impl StreamUrlResolver for EncoreServerClient {
    fn stream_url(&self, track: &Track) -> String {
        self.track_stream_url(track)
    }
}

#[async_trait]
impl PlayLogger for EncoreServerClient {
    async fn log_playback(
        &self,
        track_hash: &str,
        threshold_secs: u32,
        source_tag: &str,
    ) -> encore_playback::Result<()> {
        self.log_track(track_hash, threshold_secs, source_tag)
            .await
            .map_err(|e| PlaybackError::LogSubmission(e.to_string()))
    }
}

#[async_trait]
impl ArtworkPrefetcher for EncoreServerClient {
    async fn prefetch(&self, image_ref: &str) {
        self.prefetch_artwork(image_ref).await;
    }
}

/// Percent-encode a path for use as a query value.
fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
