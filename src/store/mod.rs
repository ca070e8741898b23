//! The event store orchestrator.
//!
//! Owns the in-memory [`EventCache`] and is the only place that mutates
//! it. Every mutation goes through the remote store first; the cache is
//! touched only after the store confirms. Fetch failures degrade to empty
//! collections and are logged, never propagated.

mod create;
mod delete;
mod update;

use anyhow::Result;
use chrono::NaiveDate;

use keepday_core::cache::EventCache;
use keepday_core::event::EventPayload;
use keepday_core::normalize::{normalize_batch, RawEvent};

use crate::client::Client;

/// The five operations the event-store collaborator exposes.
///
/// The reqwest [`crate::client::Client`] is the production implementation;
/// tests substitute a stub.
pub trait EventApi {
    async fn month_events(&self, year: i32, month: u32) -> Result<Vec<RawEvent>>;
    async fn upcoming_events(&self) -> Result<Vec<RawEvent>>;
    async fn create_event(&self, payload: &EventPayload) -> Result<RawEvent>;
    async fn update_event(&self, id: &str, payload: &EventPayload) -> Result<RawEvent>;
    async fn delete_event(&self, id: &str) -> Result<()>;
}

impl EventApi for Client {
    async fn month_events(&self, year: i32, month: u32) -> Result<Vec<RawEvent>> {
        Client::month_events(self, year, month).await
    }
    async fn upcoming_events(&self) -> Result<Vec<RawEvent>> {
        Client::upcoming_events(self).await
    }
    async fn create_event(&self, payload: &EventPayload) -> Result<RawEvent> {
        Client::create_event(self, payload).await
    }
    async fn update_event(&self, id: &str, payload: &EventPayload) -> Result<RawEvent> {
        Client::update_event(self, id, payload).await
    }
    async fn delete_event(&self, id: &str) -> Result<()> {
        Client::delete_event(self, id).await
    }
}

pub struct EventStore<A: EventApi> {
    api: A,
    pub cache: EventCache,
    /// Latest issued month-fetch token. A completed fetch is applied only
    /// if it still holds this token, so a stale response can never
    /// overwrite a newer month's data.
    month_token: u64,
}

impl<A: EventApi> EventStore<A> {
    pub fn new(api: A, today: NaiveDate) -> Self {
        EventStore {
            api,
            cache: EventCache::new(today),
            month_token: 0,
        }
    }

    /// Fetch the given month and replace the month slice wholesale.
    /// Failures empty the slice; nothing is returned to the caller.
    pub async fn fetch_month(&mut self, year: i32, month: u32) {
        let token = self.begin_month_fetch();
        let result = self.api.month_events(year, month).await;
        self.apply_month_fetch(token, result);
    }

    /// Fetch the upcoming candidates and replace the upcoming slice
    /// wholesale (once per session). Failures empty the slice.
    pub async fn fetch_upcoming(&mut self) {
        match self.api.upcoming_events().await {
            Ok(raws) => self.cache.replace_upcoming(normalize_batch(raws)),
            Err(e) => {
                tracing::warn!("upcoming fetch failed: {e}");
                self.cache.clear_upcoming();
            }
        }
    }

    /// Issue a token for a month fetch.
    pub fn begin_month_fetch(&mut self) -> u64 {
        self.month_token += 1;
        self.month_token
    }

    /// Apply a completed month fetch, unless a newer fetch was issued in
    /// the meantime. Returns whether the result was applied.
    pub fn apply_month_fetch(&mut self, token: u64, result: Result<Vec<RawEvent>>) -> bool {
        if token != self.month_token {
            tracing::debug!(token, latest = self.month_token, "discarding stale month fetch");
            return false;
        }

        match result {
            Ok(raws) => self.cache.replace_month(normalize_batch(raws)),
            Err(e) => {
                tracing::warn!("month fetch failed: {e}");
                self.cache.clear_month();
            }
        }
        true
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use serde_json::json;

    /// Stub API with canned responses. `fail` makes every call reject.
    pub struct StubApi {
        pub month: Vec<RawEvent>,
        pub upcoming: Vec<RawEvent>,
        /// Response to create/update calls.
        pub mutation: Option<RawEvent>,
        pub fail: bool,
    }

    impl Default for StubApi {
        fn default() -> Self {
            StubApi {
                month: Vec::new(),
                upcoming: Vec::new(),
                mutation: None,
                fail: false,
            }
        }
    }

    impl EventApi for StubApi {
        async fn month_events(&self, _year: i32, _month: u32) -> Result<Vec<RawEvent>> {
            if self.fail {
                anyhow::bail!("stub: request failed");
            }
            Ok(self.month.clone())
        }

        async fn upcoming_events(&self) -> Result<Vec<RawEvent>> {
            if self.fail {
                anyhow::bail!("stub: request failed");
            }
            Ok(self.upcoming.clone())
        }

        async fn create_event(&self, _payload: &EventPayload) -> Result<RawEvent> {
            if self.fail {
                anyhow::bail!("stub: request failed");
            }
            Ok(self.mutation.clone().expect("stub mutation response"))
        }

        async fn update_event(&self, _id: &str, _payload: &EventPayload) -> Result<RawEvent> {
            if self.fail {
                anyhow::bail!("stub: request failed");
            }
            Ok(self.mutation.clone().expect("stub mutation response"))
        }

        async fn delete_event(&self, _id: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("stub: request failed");
            }
            Ok(())
        }
    }

    pub fn raw_event(id: &str, title: &str, date: &str) -> RawEvent {
        serde_json::from_value(json!({
            "id": id,
            "title": title,
            "type": "생일",
            "date": date,
            "personName": "김민수",
        }))
        .unwrap()
    }

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    pub fn store_with(api: StubApi) -> EventStore<StubApi> {
        EventStore::new(api, today())
    }
}
