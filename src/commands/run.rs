use anyhow::Result;

use crate::notifier::TermNotifier;
use crate::session::Session;
use crate::store::{EventApi, EventStore};

pub async fn run<A: EventApi>(store: EventStore<A>) -> Result<()> {
    Session::new(store, TermNotifier).run().await
}
