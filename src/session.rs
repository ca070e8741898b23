//! The interactive session.
//!
//! Drives the view state machine from terminal prompts: each iteration
//! renders the active screen, asks for one action, runs any store
//! operation it implies, and feeds the confirmed outcome back into
//! [`ViewState::apply`]. A failed operation sends no message, so the
//! view simply stays put.

use anyhow::Result;
use chrono::Datelike;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

use keepday_core::event::{EventForm, EVENT_TYPES};
use keepday_core::view::{Msg, Screen, ViewState};

use crate::commands::create_spinner;
use crate::notifier::Notifier;
use crate::render;
use crate::store::{EventApi, EventStore};

pub struct Session<A: EventApi, N: Notifier> {
    store: EventStore<A>,
    view: ViewState,
    notifier: N,
}

/// What a menu handler asks the loop to do next.
enum Flow {
    Continue,
    Quit,
}

impl<A: EventApi, N: Notifier> Session<A, N> {
    pub fn new(store: EventStore<A>, notifier: N) -> Self {
        let view = ViewState::new(store.cache.today());
        Session {
            store,
            view,
            notifier,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        // Upcoming is fetched once per session; the month slice follows
        // the displayed anchor.
        let spinner = create_spinner("불러오는 중…".to_string());
        self.store.fetch_upcoming().await;
        spinner.finish_and_clear();

        let mut fetched_anchor = None;

        loop {
            if fetched_anchor != Some(self.view.anchor) {
                let spinner = create_spinner("달력을 불러오는 중…".to_string());
                self.store
                    .fetch_month(self.view.anchor.year(), self.view.anchor.month())
                    .await;
                spinner.finish_and_clear();
                fetched_anchor = Some(self.view.anchor);
            }

            println!();
            let flow = match self.view.screen {
                Screen::Calendar => self.calendar_screen()?,
                Screen::Upcoming => self.upcoming_screen().await?,
                Screen::Add => self.add_screen().await?,
                Screen::Edit => self.edit_screen().await?,
                Screen::Guide => self.guide_screen()?,
            };

            if matches!(flow, Flow::Quit) {
                return Ok(());
            }
        }
    }

    // ---- Calendar ----

    fn calendar_screen(&mut self) -> Result<Flow> {
        println!(
            "{}",
            render::render_month(&self.store.cache, self.view.anchor, self.view.selected)
        );
        println!();
        println!("{}", render::render_upcoming_preview(&self.store.cache));
        println!();

        let choice = Select::new()
            .items(&[
                "‹ 이전 달",
                "다음 달 ›",
                "날짜 선택",
                "이벤트 추가",
                "다가오는 이벤트",
                "종료",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => self.view.apply(Msg::PrevMonth),
            1 => self.view.apply(Msg::NextMonth),
            2 => {
                let date = prompt_day("  날짜 (년-월-일)")?;
                self.view.apply(Msg::SelectDay(date))
            }
            3 => self.view.apply(Msg::GoAdd),
            4 => self.view.apply(Msg::GoUpcoming),
            _ => return Ok(Flow::Quit),
        };
        Ok(Flow::Continue)
    }

    // ---- Upcoming ----

    async fn upcoming_screen(&mut self) -> Result<Flow> {
        let upcoming = self.store.cache.upcoming();
        println!(
            "{}",
            render::render_week_strip(&self.store.cache, self.view.selected)
        );
        println!();
        println!("{}", render::render_upcoming_list(&upcoming));
        println!();

        if let Some(open_id) = self.view.menu_open.clone() {
            let choice = Select::new()
                .items(&["이벤트 수정", "이벤트 삭제", "메뉴 닫기", "‹ 뒤로"])
                .default(0)
                .interact()?;

            match choice {
                0 => {
                    if let Some(event) = self.store.cache.get(&open_id).cloned() {
                        self.view.apply(Msg::MenuEdit(event));
                    }
                }
                1 => {
                    let spinner = create_spinner("이벤트를 삭제하는 중…".to_string());
                    let result = self.store.delete(&open_id).await;
                    spinner.finish_and_clear();
                    match result {
                        Ok(()) => {
                            self.view.apply(Msg::DeleteSucceeded(open_id));
                        }
                        Err(e) => eprintln!("  {}", e.to_string().red()),
                    }
                }
                2 => {
                    // Toggling the open menu closes it.
                    self.view.apply(Msg::ToggleMenu(open_id));
                }
                _ => {
                    self.view.apply(Msg::Back);
                }
            }
            return Ok(Flow::Continue);
        }

        let choice = Select::new()
            .items(&["메뉴 열기", "날짜 선택", "‹ 뒤로"])
            .default(0)
            .interact()?;

        match choice {
            0 if !upcoming.is_empty() => {
                let labels: Vec<String> =
                    upcoming.iter().map(render::render_upcoming_item).collect();
                let idx = Select::new()
                    .with_prompt("  어떤 이벤트인가요?")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                self.view
                    .apply(Msg::ToggleMenu(upcoming[idx].event.id.clone()));
            }
            0 => println!("  {}", "예정된 이벤트가 없습니다".dimmed()),
            1 => {
                let date = prompt_day("  날짜 (년-월-일)")?;
                self.view.apply(Msg::SelectDay(date));
            }
            _ => {
                self.view.apply(Msg::Back);
            }
        }
        Ok(Flow::Continue)
    }

    // ---- Add ----

    async fn add_screen(&mut self) -> Result<Flow> {
        if self.view.guide_modal_open {
            println!("  새로운 이벤트가 추가되었습니다.");
            let choice = Select::new()
                .with_prompt("  이벤트에 대한 가이드를 확인해 볼까요?")
                .items(&["가이드 보기", "닫기"])
                .default(0)
                .interact()?;

            if choice == 0 {
                self.view.apply(Msg::ViewGuide);
            } else {
                self.view.apply(Msg::CloseGuideModal);
            }
            return Ok(Flow::Continue);
        }

        println!("  {}", "이벤트 추가".bold());
        prompt_form(&mut self.view.form)?;

        let choice = Select::new()
            .items(&["추가하기", "‹ 뒤로"])
            .default(0)
            .interact()?;

        if choice == 0 {
            let form = self.view.form.clone();
            let spinner = create_spinner("이벤트를 추가하는 중…".to_string());
            let result = self.store.create(&form).await;
            spinner.finish_and_clear();
            match result {
                Ok(event) => {
                    self.view.apply(Msg::CreateSucceeded(event));
                }
                // Validation or request failure: stay on Add.
                Err(e) => eprintln!("  {}", e.to_string().red()),
            }
        } else {
            self.view.apply(Msg::Back);
        }
        Ok(Flow::Continue)
    }

    // ---- Edit ----

    async fn edit_screen(&mut self) -> Result<Flow> {
        println!("  {}", "이벤트 수정".bold());
        if let Some(editing) = &self.view.editing {
            println!(
                "  {}",
                format!("{} · {}°", editing.person, editing.temp).dimmed()
            );
        }
        prompt_form(&mut self.view.form)?;

        let choice = Select::new()
            .items(&["수정하기", "‹ 뒤로"])
            .default(0)
            .interact()?;

        if choice == 0 {
            let Some(editing) = self.view.editing.clone() else {
                return Ok(Flow::Continue);
            };
            let form = self.view.form.clone();
            let spinner = create_spinner("이벤트를 수정하는 중…".to_string());
            let result = self.store.update(&editing.id, &form).await;
            spinner.finish_and_clear();
            match result {
                Ok(event) => {
                    self.view.apply(Msg::UpdateSucceeded(event));
                }
                // Edit stays on Edit when the update fails.
                Err(e) => eprintln!("  {}", e.to_string().red()),
            }
        } else {
            self.view.apply(Msg::Back);
        }
        Ok(Flow::Continue)
    }

    // ---- Guide ----

    fn guide_screen(&mut self) -> Result<Flow> {
        let Some(event) = self.view.guide_event.clone() else {
            self.view.apply(Msg::Back);
            return Ok(Flow::Continue);
        };

        println!("{}", render::render_guide(&event));
        println!();

        let choice = Select::new()
            .items(&["메시지 복사", "‹ 뒤로"])
            .default(0)
            .interact()?;

        if choice == 0 {
            self.notifier
                .copy_text(&render::guide_message(&event.event_type));
            self.notifier.notify("메시지가 복사되었어요!");
        } else {
            self.view.apply(Msg::Back);
        }
        Ok(Flow::Continue)
    }
}

/// Prompt for a calendar day with retry on parse errors.
fn prompt_day(prompt: &str) -> Result<chrono::NaiveDate> {
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match keepday_core::event::parse_day(input.trim()) {
            Ok(date) => return Ok(date),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Fill the form buffer in place. Existing values become defaults, so the
/// edit flow shows the current event.
fn prompt_form(form: &mut EventForm) -> Result<()> {
    form.title = Input::new()
        .with_prompt("  제목")
        .allow_empty(true)
        .default(form.title.clone())
        .interact_text()?;
    form.person = Input::new()
        .with_prompt("  지인 이름")
        .allow_empty(true)
        .default(form.person.clone())
        .interact_text()?;

    let type_idx = EVENT_TYPES
        .iter()
        .position(|t| *t == form.event_type)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("  이벤트 유형")
        .items(EVENT_TYPES)
        .default(type_idx)
        .interact()?;
    form.event_type = EVENT_TYPES[idx].to_string();

    form.date = Input::new()
        .with_prompt("  날짜 (년-월-일)")
        .allow_empty(true)
        .default(form.date.clone())
        .interact_text()?;

    form.remind_on = Confirm::new()
        .with_prompt("  미리 알림")
        .default(form.remind_on)
        .interact()?;
    if form.remind_on {
        form.remind_datetime = Input::new()
            .with_prompt("  알림 날짜/시간 (예: 2025.12.26 / 오전 10:00)")
            .allow_empty(true)
            .default(form.remind_datetime.clone())
            .interact_text()?;
    }

    form.memo = Input::new()
        .with_prompt("  메모")
        .allow_empty(true)
        .default(form.memo.clone())
        .interact_text()?;

    Ok(())
}
