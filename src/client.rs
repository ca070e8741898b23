//! HTTP client for the event-store service.
//!
//! Thin wrapper around the five endpoints the calendar feature consumes.
//! Responses come back as raw records; normalization happens in the store
//! layer, not here.

use anyhow::{Context, Result};
use serde::Deserialize;

use keepday_core::event::EventPayload;
use keepday_core::normalize::{EventsResponse, RawEvent};

/// HTTP client for the event store.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Client {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// GET /calendar/month?year={y}&month={m}
    pub async fn month_events(&self, year: i32, month: u32) -> Result<Vec<RawEvent>> {
        let resp = self
            .http
            .get(format!(
                "{}/calendar/month?year={}&month={}",
                self.base_url, year, month
            ))
            .send()
            .await
            .context("Failed to connect to event store")?;

        let resp = check_status(resp).await?;
        let body: EventsResponse = resp.json().await?;
        Ok(body.into_events())
    }

    /// GET /events/upcoming
    pub async fn upcoming_events(&self) -> Result<Vec<RawEvent>> {
        let resp = self
            .http
            .get(format!("{}/events/upcoming", self.base_url))
            .send()
            .await
            .context("Failed to connect to event store")?;

        let resp = check_status(resp).await?;
        let body: EventsResponse = resp.json().await?;
        Ok(body.into_events())
    }

    /// POST /events
    pub async fn create_event(&self, payload: &EventPayload) -> Result<RawEvent> {
        let resp = self
            .http
            .post(format!("{}/events", self.base_url))
            .json(payload)
            .send()
            .await
            .context("Failed to connect to event store")?;

        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// PUT /events/{id}
    pub async fn update_event(&self, id: &str, payload: &EventPayload) -> Result<RawEvent> {
        let resp = self
            .http
            .put(format!("{}/events/{}", self.base_url, id))
            .json(payload)
            .send()
            .await
            .context("Failed to connect to event store")?;

        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// DELETE /events/{id}
    ///
    /// Any non-error status counts as success; no body is required.
    pub async fn delete_event(&self, id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(format!("{}/events/{}", self.base_url, id))
            .send()
            .await
            .context("Failed to connect to event store")?;

        check_status(resp).await?;
        Ok(())
    }
}

/// Bail with the server's `{"error": ...}` body on a non-success status,
/// falling back to the bare status code when the body isn't readable.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status();
    let err = resp
        .json::<ErrorResponse>()
        .await
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("status {status}"));
    anyhow::bail!("{}", err)
}
