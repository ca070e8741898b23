use anyhow::Result;
use owo_colors::OwoColorize;

use keepday_core::event::EventForm;

use crate::store::{EventApi, EventStore};

use super::create_spinner;

#[allow(clippy::too_many_arguments)]
pub async fn run<A: EventApi>(
    store: &mut EventStore<A>,
    id: String,
    title: Option<String>,
    person: Option<String>,
    event_type: Option<String>,
    date: Option<String>,
    memo: Option<String>,
    remind: Option<String>,
) -> Result<()> {
    // Pull the current entry so unspecified fields keep their values.
    let spinner = create_spinner("불러오는 중…".to_string());
    store.fetch_upcoming().await;
    spinner.finish_and_clear();

    let Some(target) = store.cache.get(&id).cloned() else {
        anyhow::bail!("Event '{}' not found in upcoming events", id);
    };

    let mut form = EventForm::from_event(&target);
    if let Some(t) = title {
        form.title = t;
    }
    if let Some(p) = person {
        form.person = p;
    }
    if let Some(t) = event_type {
        form.event_type = t;
    }
    if let Some(d) = date {
        form.date = d;
    }
    if let Some(m) = memo {
        form.memo = m;
    }
    if let Some(r) = remind {
        form.remind_on = true;
        form.remind_datetime = r;
    }

    let spinner = create_spinner("이벤트를 수정하는 중…".to_string());
    let result = store.update(&id, &form).await;
    spinner.finish_and_clear();

    match result {
        Ok(event) => {
            println!(
                "{}",
                format!("  수정됨: {} ({})", event.title, event.date).green()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("  {}", e.to_string().red());
            anyhow::bail!("이벤트를 수정하지 못했습니다")
        }
    }
}
