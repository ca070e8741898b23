//! Delete an event through the store.

use keepday_core::error::{KeepdayError, KeepdayResult};

use super::{EventApi, EventStore};

impl<A: EventApi> EventStore<A> {
    /// Delete an event by id.
    ///
    /// On confirmation the entry is removed from both cache slices;
    /// deleting an id the caches no longer hold is a no-op. On failure
    /// the caches are untouched.
    pub async fn delete(&mut self, id: &str) -> KeepdayResult<()> {
        self.api.delete_event(id).await.map_err(|e| {
            tracing::warn!("delete of {id} failed: {e}");
            KeepdayError::Request(e.to_string())
        })?;

        self.cache.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    async fn seeded_store(fail: bool) -> EventStore<StubApi> {
        let mut store = store_with(StubApi {
            month: vec![
                raw_event("a", "생일 파티", "2025-03-10"),
                raw_event("b", "집들이", "2025-03-12"),
            ],
            upcoming: vec![
                raw_event("a", "생일 파티", "2025-03-10"),
                raw_event("b", "집들이", "2025-03-12"),
            ],
            ..StubApi::default()
        });
        store.fetch_month(2025, 3).await;
        store.fetch_upcoming().await;
        store.api.fail = fail;
        store
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_entry_everywhere() {
        let mut store = seeded_store(false).await;

        store.delete("a").await.unwrap();

        assert!(store.cache.get("a").is_none());
        assert_eq!(store.cache.month_events().len(), 1);
        assert_eq!(store.cache.upcoming().len(), 1);
        assert_eq!(store.cache.month_events()[0].id, "b");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_once_confirmed() {
        let mut store = seeded_store(false).await;

        store.delete("a").await.unwrap();
        store.delete("a").await.unwrap();
        assert_eq!(store.cache.month_events().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_caches_unchanged() {
        let mut store = seeded_store(true).await;

        let err = store.delete("a").await.unwrap_err();
        assert!(matches!(err, KeepdayError::Request(_)));
        assert!(store.cache.get("a").is_some());
        assert_eq!(store.cache.month_events().len(), 2);
        assert_eq!(store.cache.upcoming().len(), 2);
    }
}
