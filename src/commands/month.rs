use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use crate::render;
use crate::store::{EventApi, EventStore};

use super::create_spinner;

pub async fn run<A: EventApi>(
    store: &mut EventStore<A>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let today = store.cache.today();
    let anchor = NaiveDate::from_ymd_opt(
        year.unwrap_or_else(|| today.year()),
        month.unwrap_or_else(|| today.month()),
        1,
    )
    .context("Invalid year/month")?;

    let spinner = create_spinner("달력을 불러오는 중…".to_string());
    store.fetch_month(anchor.year(), anchor.month()).await;
    store.fetch_upcoming().await;
    spinner.finish_and_clear();

    println!("{}", render::render_month(&store.cache, anchor, today));
    println!();
    println!("{}", render::render_upcoming_preview(&store.cache));

    Ok(())
}
