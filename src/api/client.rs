//! CDN API client.
//!
//! # Responsibilities
//! - Build authenticated requests against the configured root URL
//! - Validate the response status and envelope
//! - Decode typed zone and setting payloads
//! - Apply an update plan one setting at a time

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, Request, StatusCode};
use serde::Serialize;
use url::Url;
use urlencoding::encode;

use crate::api::envelope::ApiEnvelope;
use crate::api::error::{ApiError, ApiResult, ApplyError};
use crate::api::types::{settings_snapshot, RemoteSetting, SettingUpdate, ZoneItem};
use crate::config::SyncConfig;
use crate::reconcile::{ConfigSnapshot, SettingValue, UpdatePlan};

const AUTH_EMAIL_HEADER: &str = "x-auth-email";
const AUTH_KEY_HEADER: &str = "x-auth-key";

/// Client for the zones and settings endpoints.
///
/// Holds no per-call state; configuration is fixed at construction.
#[derive(Clone)]
pub struct CdnClient {
    http: reqwest::Client,
    root_url: String,
    auth_headers: HeaderMap,
}

impl CdnClient {
    /// Create a client from validated configuration.
    ///
    /// Credentials are turned into header values here, so a request can
    /// never fail later because of them.
    pub fn new(config: &SyncConfig) -> ApiResult<Self> {
        let mut auth_headers = HeaderMap::new();
        auth_headers.insert(AUTH_EMAIL_HEADER, header_value(&config.auth.email, "email")?);
        let mut key = header_value(&config.auth.key, "key")?;
        key.set_sensitive(true);
        auth_headers.insert(AUTH_KEY_HEADER, key);

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.api.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::RequestConstruction(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            root_url: config.api.root_url.trim_end_matches('/').to_string(),
            auth_headers,
        })
    }

    /// Build a request for `root_url + path`.
    ///
    /// Always carries the auth headers. A body is sent as JSON with a
    /// matching content type.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Request> {
        let raw = format!("{}{}", self.root_url, path);
        let url = Url::parse(&raw)
            .map_err(|e| ApiError::RequestConstruction(format!("invalid URL '{}': {}", raw, e)))?;

        let mut builder = self.http.request(method, url).headers(self.auth_headers.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        builder
            .build()
            .map_err(|e| ApiError::RequestConstruction(e.to_string()))
    }

    /// Execute a request and validate the envelope. No retries.
    pub async fn send(&self, request: Request) -> ApiResult<ApiEnvelope> {
        tracing::debug!(method = %request.method(), url = %request.url(), "Sending API request");

        let response = self.http.execute(request).await.map_err(ApiError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Transport)?;

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "API returned non-200 status");
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiEnvelope =
            serde_json::from_str(&body).map_err(ApiError::MalformedResponse)?;

        if !envelope.is_success() {
            return Err(ApiError::RemoteFailure(Box::new(envelope)));
        }

        Ok(envelope)
    }

    async fn get(&self, path: &str) -> ApiResult<ApiEnvelope> {
        let request = self.build_request::<()>(Method::GET, path, None)?;
        self.send(request).await
    }

    /// List the zones visible to these credentials.
    pub async fn list_zones(&self) -> ApiResult<Vec<ZoneItem>> {
        self.get("/zones").await?.into_result()
    }

    /// Fetch the raw settings of a zone.
    pub async fn settings(&self, zone_id: &str) -> ApiResult<Vec<RemoteSetting>> {
        self.get(&format!("/zones/{}/settings", encode(zone_id)))
            .await?
            .into_result()
    }

    /// Fetch a zone's settings as a snapshot.
    pub async fn fetch_settings(&self, zone_id: &str) -> ApiResult<ConfigSnapshot> {
        let settings = self.settings(zone_id).await?;
        tracing::debug!(zone = %zone_id, count = settings.len(), "Fetched zone settings");
        Ok(settings_snapshot(settings))
    }

    /// Change one setting. The endpoint name is assumed to match the key.
    ///
    /// The zone ID and key are percent-encoded, so each stays a single path
    /// segment whatever characters it holds.
    pub async fn set_setting(&self, zone_id: &str, key: &str, value: &SettingValue) -> ApiResult<()> {
        let request = self.build_request(
            Method::PATCH,
            &format!("/zones/{}/settings/{}", encode(zone_id), encode(key)),
            Some(&SettingUpdate { value }),
        )?;
        self.send(request).await.map(|_| ())
    }

    /// Push every change in `plan`, in key order, one request at a time.
    ///
    /// In dry-run mode the changes are only logged and no request is made.
    ///
    /// Not atomic: the first failing key stops the run and its error is
    /// returned. Keys after it are not attempted, and keys before it are
    /// not rolled back. [`ApplyError::applied`] lists what was changed.
    ///
    /// Returns the keys that were (or, in dry-run mode, would be) changed.
    pub async fn apply_plan(
        &self,
        zone_id: &str,
        plan: &UpdatePlan,
        dry_run: bool,
    ) -> Result<Vec<String>, ApplyError> {
        let mut applied = Vec::with_capacity(plan.len());

        for (key, change) in plan {
            if dry_run {
                tracing::info!(
                    zone = %zone_id,
                    key = %key,
                    from = %change.current,
                    to = %change.expected,
                    "Would change setting"
                );
                applied.push(key.clone());
                continue;
            }

            tracing::info!(
                zone = %zone_id,
                key = %key,
                from = %change.current,
                to = %change.expected,
                "Changing setting"
            );

            if let Err(source) = self.set_setting(zone_id, key, &change.expected).await {
                tracing::error!(
                    key = %key,
                    error = %source,
                    already_applied = applied.len(),
                    "Setting update failed, aborting"
                );
                return Err(ApplyError {
                    key: key.clone(),
                    applied,
                    source,
                });
            }
            applied.push(key.clone());
        }

        Ok(applied)
    }
}

fn header_value(value: &str, field: &str) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        ApiError::RequestConstruction(format!("auth {} cannot be sent as a header value", field))
    })
}
