use anyhow::Result;

use crate::render;
use crate::store::{EventApi, EventStore};

use super::create_spinner;

pub async fn run<A: EventApi>(store: &mut EventStore<A>) -> Result<()> {
    let spinner = create_spinner("불러오는 중…".to_string());
    store.fetch_upcoming().await;
    spinner.finish_and_clear();

    println!("{}", render::render_upcoming_list(&store.cache.upcoming()));

    Ok(())
}
