use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

use keepday_core::event::{EventForm, EVENT_TYPES};

use crate::render;
use crate::store::{EventApi, EventStore};

use super::create_spinner;

#[allow(clippy::too_many_arguments)]
pub async fn run<A: EventApi>(
    store: &mut EventStore<A>,
    title: Option<String>,
    person: Option<String>,
    event_type: Option<String>,
    date: Option<String>,
    memo: Option<String>,
    remind: Option<String>,
) -> Result<()> {
    let interactive = title.is_none() || person.is_none() || date.is_none();

    let mut form = EventForm::default();

    // --- Title / person / date ---
    form.title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  제목")
            .interact_text()?,
    };
    form.person = match person {
        Some(p) => p,
        None => Input::<String>::new()
            .with_prompt("  지인 이름")
            .interact_text()?,
    };
    form.date = match date {
        Some(d) => d,
        None => Input::<String>::new()
            .with_prompt("  날짜 (년-월-일)")
            .interact_text()?,
    };

    // --- Type ---
    if let Some(t) = event_type {
        form.event_type = t;
    } else if interactive {
        let idx = Select::new()
            .with_prompt("  이벤트 유형")
            .items(EVENT_TYPES)
            .default(0)
            .interact()?;
        form.event_type = EVENT_TYPES[idx].to_string();
    }

    // --- Memo / reminder ---
    if let Some(m) = memo {
        form.memo = m;
    } else if interactive {
        form.memo = Input::<String>::new()
            .with_prompt("  메모 (생략 가능)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
    }
    if let Some(r) = remind {
        form.remind_on = true;
        form.remind_datetime = r;
    }

    let spinner = create_spinner("이벤트를 추가하는 중…".to_string());
    let result = store.create(&form).await;
    spinner.finish_and_clear();

    let event = match result {
        Ok(event) => event,
        Err(e) => {
            eprintln!("  {}", e.to_string().red());
            anyhow::bail!("이벤트를 추가하지 못했습니다");
        }
    };

    println!(
        "{}",
        format!("  추가됨: {} ({})", event.title, event.date).green()
    );

    // The guide modal, CLI style: offer the guide right after a create.
    let view_guide = if interactive {
        println!("  새로운 이벤트가 추가되었습니다.");
        Confirm::new()
            .with_prompt("  이벤트에 대한 가이드를 확인해 볼까요?")
            .default(true)
            .interact()?
    } else {
        false
    };

    if view_guide {
        println!();
        println!("{}", render::render_guide(&event));
    }

    Ok(())
}
