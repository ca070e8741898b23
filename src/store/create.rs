//! Create an event through the store.

use keepday_core::error::{KeepdayError, KeepdayResult};
use keepday_core::event::{Event, EventForm};
use keepday_core::normalize::normalize_with;

use super::{EventApi, EventStore};

impl<A: EventApi> EventStore<A> {
    /// Create a new event.
    ///
    /// Validates the form first: a missing `title`, `person` or `date`
    /// fails immediately without any request being sent. On success the
    /// store-assigned record (with the submitted form as fallback for
    /// omitted fields) joins both cache slices. On failure the caches are
    /// untouched.
    pub async fn create(&mut self, form: &EventForm) -> KeepdayResult<Event> {
        form.validate()?;

        let payload = form.to_payload();
        let raw = self.api.create_event(&payload).await.map_err(|e| {
            tracing::warn!("create failed: {e}");
            KeepdayError::Request(e.to_string())
        })?;

        let event = normalize_with(raw, Some(&payload))?;
        self.cache.insert(event.clone());
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use serde_json::json;

    fn form() -> EventForm {
        EventForm {
            title: "생일 파티".to_string(),
            person: "김민수".to_string(),
            date: "2025-03-10".to_string(),
            ..EventForm::default()
        }
    }

    #[tokio::test]
    async fn test_create_inserts_into_both_slices() {
        let mut store = store_with(StubApi {
            mutation: Some(raw_event("new-1", "생일 파티", "2025-03-10")),
            ..StubApi::default()
        });

        let event = store.create(&form()).await.unwrap();
        assert_eq!(event.id, "new-1");
        assert_eq!(store.cache.month_events().len(), 1);
        assert_eq!(store.cache.upcoming().len(), 1);
    }

    #[tokio::test]
    async fn test_create_past_event_skips_upcoming() {
        let mut store = store_with(StubApi {
            mutation: Some(raw_event("old-1", "지난 일", "2025-02-10")),
            ..StubApi::default()
        });

        let mut past = form();
        past.date = "2025-02-10".to_string();
        store.create(&past).await.unwrap();

        assert_eq!(store.cache.month_events().len(), 1);
        assert!(store.cache.upcoming().is_empty());
    }

    #[tokio::test]
    async fn test_create_falls_back_to_form_values() {
        // Store echoes only the id and title.
        let mut store = store_with(StubApi {
            mutation: Some(
                serde_json::from_value(json!({ "id": "new-2", "title": "생일 파티" })).unwrap(),
            ),
            ..StubApi::default()
        });

        let mut form = form();
        form.memo = "케이크 준비".to_string();
        let event = store.create(&form).await.unwrap();

        assert_eq!(event.person, "김민수");
        assert_eq!(event.memo, "케이크 준비");
        assert_eq!(event.date.to_string(), "2025-03-10");
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing_and_changes_nothing() {
        // No mutation response configured: a request would panic the stub.
        let mut store = store_with(StubApi::default());

        let mut blank = form();
        blank.title = String::new();
        let err = store.create(&blank).await.unwrap_err();

        assert!(err.is_validation());
        assert!(store.cache.month_events().is_empty());
        assert!(store.cache.upcoming().is_empty());
    }

    #[tokio::test]
    async fn test_request_failure_leaves_caches_unchanged() {
        let mut store = store_with(StubApi {
            fail: true,
            ..StubApi::default()
        });

        let err = store.create(&form()).await.unwrap_err();
        assert!(matches!(err, KeepdayError::Request(_)));
        assert!(store.cache.month_events().is_empty());
        assert!(store.cache.upcoming().is_empty());
    }
}
