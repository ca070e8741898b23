//! Terminal rendering for keepday types.
//!
//! Colored, read-only projections of the cache and the selected date:
//! the month grid, the week strip, upcoming cards and the TPO guide.

use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use keepday_core::cache::EventCache;
use keepday_core::dday;
use keepday_core::event::{Event, Upcoming};
use keepday_core::grid::{month_grid, week_row, Cell};

pub const DAY_NAMES: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Month heading, e.g. "25년 3월".
pub fn month_label(anchor: NaiveDate) -> String {
    format!("{}년 {}월", anchor.year() % 100, anchor.month())
}

/// Short day label, e.g. "3월 10일".
pub fn day_label(date: NaiveDate) -> String {
    format!("{}월 {}일", date.month(), date.day())
}

fn day_names_row() -> String {
    DAY_NAMES
        .iter()
        .map(|d| format!("{d:>3}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One grid cell: right-aligned day number plus an event marker.
fn render_cell(cell: &Cell, cache: &EventCache, selected: NaiveDate) -> String {
    let has_event = cache.pill_text(cell.date).is_some();
    let num = format!("{:>2}", cell.date.day());
    let marker = if has_event { "•" } else { " " };

    let num = if !cell.in_month {
        num.dimmed().to_string()
    } else if cell.date == selected {
        num.reversed().to_string()
    } else if cell.date == cache.today() {
        num.green().bold().to_string()
    } else {
        num
    };

    let marker = if has_event {
        marker.yellow().to_string()
    } else {
        marker.to_string()
    };

    format!("{num}{marker}")
}

/// The month view: heading, day names and the trimmed grid, with the
/// selected day's events listed underneath.
pub fn render_month(cache: &EventCache, anchor: NaiveDate, selected: NaiveDate) -> String {
    let mut lines = vec![
        format!("  {}", month_label(anchor).bold()),
        format!("  {}", day_names_row().dimmed()),
    ];

    for week in month_grid(anchor).chunks(7) {
        let row = week
            .iter()
            .map(|c| format!(" {}", render_cell(c, cache, selected)))
            .collect::<String>();
        lines.push(format!("  {row}"));
    }

    if let Some(day_list) = render_selected_list(cache, selected) {
        lines.push(String::new());
        lines.push(day_list);
    }

    lines.join("\n")
}

/// The single-week strip shown on the upcoming screen.
pub fn render_week_strip(cache: &EventCache, selected: NaiveDate) -> String {
    let mut lines = vec![format!("  {}", day_names_row().dimmed())];

    let week = week_row(selected);
    let row = week
        .iter()
        .map(|c| format!(" {}", render_cell(c, cache, selected)))
        .collect::<String>();
    lines.push(format!("  {row}"));

    // Pills for the strip's event days.
    for cell in &week {
        if let Some(pill) = cache.pill_text(cell.date) {
            lines.push(format!("  {} {}", day_label(cell.date).dimmed(), pill));
        }
    }

    lines.join("\n")
}

/// The selected day's event list, or None when the day is empty.
pub fn render_selected_list(cache: &EventCache, selected: NaiveDate) -> Option<String> {
    let events = cache.events_on(selected);
    if events.is_empty() {
        return None;
    }

    let mut lines = vec![format!(
        "  {} {}",
        day_label(selected).bold(),
        format!("{}개", events.len()).dimmed()
    )];
    for event in events {
        lines.push(format!("   · {} ({})", event.title, event.person));
    }
    Some(lines.join("\n"))
}

/// Colored D-day tag: "D-DAY", "D-3", "D+2".
pub fn dday_tag(dday: i64) -> String {
    let label = dday::label(dday);
    match dday {
        0 => label.red().bold().to_string(),
        n if n > 0 => label.cyan().to_string(),
        _ => label.dimmed().to_string(),
    }
}

/// One upcoming card line:
/// "3월 10일  D-3  생일 파티  김민수 · 생일 · 36.5°"
pub fn render_upcoming_item(item: &Upcoming) -> String {
    let ev = &item.event;
    format!(
        "  {:<8} {:<6} {}  {}",
        day_label(item.occurs_on),
        dday_tag(item.dday),
        ev.title.bold(),
        format!("{} · {} · {}°", ev.person, ev.event_type, ev.temp).dimmed()
    )
}

/// Header + cards for the full upcoming screen.
pub fn render_upcoming_list(items: &[Upcoming]) -> String {
    let mut lines = vec![format!(
        "  {} {}",
        "다가오는 이벤트".bold(),
        items.len().to_string().dimmed()
    )];
    if items.is_empty() {
        lines.push(format!("  {}", "예정된 이벤트가 없습니다".dimmed()));
    }
    for item in items {
        lines.push(render_upcoming_item(item));
    }
    lines.join("\n")
}

/// The 3-card preview under the calendar grid.
pub fn render_upcoming_preview(cache: &EventCache) -> String {
    let preview = cache.upcoming_preview(3);
    let mut lines = vec![format!(
        "  {} {} ›",
        "다가오는 이벤트".bold(),
        preview.len().to_string().dimmed()
    )];
    for item in &preview {
        lines.push(render_upcoming_item(item));
    }
    lines.join("\n")
}

// ---- TPO guide ----

/// Suggested message card for an event type.
pub fn guide_message(event_type: &str) -> String {
    if event_type == "생일" {
        "생일 진심으로 축하드려요 🎂 평소에 많이 도와주셔서 감사합니다. \
         올해도 함께 잘 부탁드립니다!"
            .to_string()
    } else {
        "진심으로 축하드려요 😊 평소에 많이 도와주셔서 감사합니다. \
         앞으로도 잘 부탁드립니다!"
            .to_string()
    }
}

/// The guide screen for a just-created event.
pub fn render_guide(event: &Event) -> String {
    let person = if event.person.is_empty() {
        "지인"
    } else {
        &event.person
    };
    let headline = if event.event_type == "생일" {
        format!("🎉 {person} 님의 생일에는")
    } else {
        format!("🎉 {person} 님의 {}에는", event.event_type)
    };

    let mut lines = vec![
        format!("  {}", "TPO 가이드".bold()),
        String::new(),
        format!("  {headline}"),
        "  이 정도가 딱 좋을 것 같아요!".to_string(),
        format!("  {}", "너무 과하지 않게 마음만 전해도 충분해요:)".dimmed()),
        String::new(),
        format!("  {}", "적정 금액".bold()),
        "  20,000원 ~ 30,000원".to_string(),
        format!("  {}", "지인 / 동기 기준 예시 금액".dimmed()),
        String::new(),
        format!("  {}", "메시지 카드".bold()),
        format!("  \"{}\"", guide_message(&event.event_type)),
        String::new(),
        format!("  {}", "행동 가이드".bold()),
        "  2~3만 원대 기프트 카드 + 축하 메시지(손편지)".to_string(),
        "   · 직접 건네거나 회사 메신저로 감사 인사 함께 전달".to_string(),
        "   · 과하면 부담 느끼실 수 있어요".to_string(),
        "   · 이번 주 팀 미팅 전에 건네면 타이밍 굿! 👍".to_string(),
    ];

    if !event.title.is_empty() {
        lines.insert(1, format!("  {}", event.title.dimmed()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_label_uses_short_year() {
        let anchor = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(month_label(anchor), "25년 3월");
    }

    #[test]
    fn test_guide_message_depends_on_type() {
        assert!(guide_message("생일").contains("생일"));
        assert!(!guide_message("승진").contains("생일"));
    }
}
