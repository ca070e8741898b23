use anyhow::Result;
use chrono::Datelike;

use keepday_core::event::parse_day;

use crate::render;
use crate::store::{EventApi, EventStore};

use super::create_spinner;

pub async fn run<A: EventApi>(store: &mut EventStore<A>, date: Option<String>) -> Result<()> {
    let selected = match date {
        Some(s) => parse_day(s.trim())?,
        None => store.cache.today(),
    };

    let spinner = create_spinner("주간 일정을 불러오는 중…".to_string());
    store.fetch_month(selected.year(), selected.month()).await;
    spinner.finish_and_clear();

    println!("{}", render::render_week_strip(&store.cache, selected));

    Ok(())
}
