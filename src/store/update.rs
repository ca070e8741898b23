//! Update an event through the store.

use keepday_core::error::{KeepdayError, KeepdayResult};
use keepday_core::event::{Event, EventForm};
use keepday_core::normalize::normalize_with;

use super::{EventApi, EventStore};

impl<A: EventApi> EventStore<A> {
    /// Submit the form for an existing event id.
    ///
    /// On success the matching entry is replaced in both cache slices
    /// (fields the store omitted fall back to the submitted form). On
    /// failure the caches are untouched.
    pub async fn update(&mut self, id: &str, form: &EventForm) -> KeepdayResult<Event> {
        let payload = form.to_payload();
        let mut raw = self.api.update_event(id, &payload).await.map_err(|e| {
            tracing::warn!("update of {id} failed: {e}");
            KeepdayError::Request(e.to_string())
        })?;

        // Some stores respond without echoing the id.
        if raw.id.is_none() {
            raw.id = Some(id.to_string());
        }

        let event = normalize_with(raw, Some(&payload))?;
        self.cache.apply_update(event.clone());
        Ok(event)
    }
}
