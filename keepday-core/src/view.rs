//! The view state machine.
//!
//! The calendar feature is a cyclic multi-screen flow. State lives in one
//! explicit type and changes only through [`ViewState::apply`], which
//! enumerates the allowed (screen, message) pairs; anything else is
//! rejected. Messages carry confirmed results only (`CreateSucceeded`
//! holds the event the store returned), so the machine itself never does
//! I/O: the driver runs a CRUD operation first and feeds in the outcome.

use chrono::{Datelike, Months, NaiveDate};

use crate::event::{Event, EventForm};

/// Which screen of the flow is active. The machine has no terminal state;
/// it is only exited by navigating away from the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Calendar,
    Upcoming,
    Add,
    Edit,
    Guide,
}

/// Inputs to the state machine. Mutating operations appear here only as
/// their confirmed results; a failed operation sends nothing, so the view
/// simply stays where it is.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Calendar: open the add-event form.
    GoAdd,
    /// Calendar: open the upcoming list.
    GoUpcoming,
    /// Leave the current sub-screen.
    Back,
    /// Calendar/Upcoming: select a day cell.
    SelectDay(NaiveDate),
    /// Calendar: shift the displayed month.
    PrevMonth,
    NextMonth,
    /// Upcoming: toggle the per-item action menu.
    ToggleMenu(String),
    /// Upcoming: the menu's edit action, carrying the target event.
    MenuEdit(Event),
    /// Upcoming: a delete the store confirmed.
    DeleteSucceeded(String),
    /// Add: a create the store confirmed.
    CreateSucceeded(Event),
    /// Add (modal open): jump to the guide screen.
    ViewGuide,
    /// Add (modal open): dismiss the modal.
    CloseGuideModal,
    /// Edit: an update the store confirmed.
    UpdateSucceeded(Event),
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub screen: Screen,
    /// First day of the displayed month.
    pub anchor: NaiveDate,
    /// Selected day; persists across all screens.
    pub selected: NaiveDate,
    /// Form buffer for the add/edit screens.
    pub form: EventForm,
    /// Set only while editing an existing event.
    pub editing: Option<Event>,
    /// Id of the open action menu, at most one at a time.
    pub menu_open: Option<String>,
    /// Guide modal shown over the add screen after a create.
    pub guide_modal_open: bool,
    /// Target of the guide modal / guide screen.
    pub guide_event: Option<Event>,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        ViewState {
            screen: Screen::Calendar,
            anchor: today.with_day(1).unwrap(),
            selected: today,
            form: EventForm::default(),
            editing: None,
            menu_open: None,
            guide_modal_open: false,
            guide_event: None,
        }
    }

    /// Apply one message. Returns `false` when the (screen, message) pair
    /// is not in the transition table, in which case nothing changed.
    pub fn apply(&mut self, msg: Msg) -> bool {
        match (self.screen, msg) {
            (Screen::Calendar, Msg::GoAdd) => {
                self.editing = None;
                self.form = EventForm::default();
                self.screen = Screen::Add;
            }
            (Screen::Calendar, Msg::GoUpcoming) => {
                self.screen = Screen::Upcoming;
            }
            // The upcoming screen's week strip is clickable too.
            (Screen::Calendar | Screen::Upcoming, Msg::SelectDay(date)) => {
                self.selected = date;
            }
            (Screen::Calendar, Msg::PrevMonth) => {
                self.anchor = self.anchor - Months::new(1);
            }
            (Screen::Calendar, Msg::NextMonth) => {
                self.anchor = self.anchor + Months::new(1);
            }

            (Screen::Add, Msg::Back) => {
                self.editing = None;
                self.guide_modal_open = false;
                self.screen = Screen::Calendar;
            }
            (Screen::Add, Msg::CreateSucceeded(event)) => {
                self.guide_event = Some(event);
                self.guide_modal_open = true;
            }
            (Screen::Add, Msg::ViewGuide) if self.guide_modal_open => {
                self.guide_modal_open = false;
                self.screen = Screen::Guide;
            }
            (Screen::Add, Msg::CloseGuideModal) => {
                self.guide_modal_open = false;
            }

            (Screen::Upcoming, Msg::Back) => {
                self.screen = Screen::Calendar;
            }
            (Screen::Upcoming, Msg::ToggleMenu(id)) => {
                // Opening one menu closes any other.
                self.menu_open = if self.menu_open.as_deref() == Some(id.as_str()) {
                    None
                } else {
                    Some(id)
                };
            }
            (Screen::Upcoming, Msg::MenuEdit(event)) => {
                self.form = EventForm::from_event(&event);
                self.editing = Some(event);
                self.menu_open = None;
                self.screen = Screen::Edit;
            }
            (Screen::Upcoming, Msg::DeleteSucceeded(_)) => {
                self.menu_open = None;
            }

            (Screen::Edit, Msg::Back) => {
                self.editing = None;
                self.screen = Screen::Upcoming;
            }
            (Screen::Edit, Msg::UpdateSucceeded(_)) => {
                self.editing = None;
                self.screen = Screen::Upcoming;
            }

            (Screen::Guide, Msg::Back) => {
                self.screen = Screen::Calendar;
            }

            (screen, msg) => {
                tracing::debug!(?screen, ?msg, "ignoring message outside the transition table");
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    fn make_event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            title: "생일 파티".to_string(),
            event_type: "생일".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            person: "김민수".to_string(),
            memo: "메모".to_string(),
            remind_on: true,
            remind_datetime: "2025.03.19".to_string(),
            temp: 36.5,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = ViewState::new(today());
        assert_eq!(state.screen, Screen::Calendar);
        assert_eq!(state.anchor, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(state.selected, today());
        assert!(state.editing.is_none());
        assert!(state.menu_open.is_none());
    }

    #[test]
    fn test_go_add_resets_form() {
        let mut state = ViewState::new(today());
        state.form.title = "남은 입력".to_string();
        assert!(state.apply(Msg::GoAdd));
        assert_eq!(state.screen, Screen::Add);
        assert_eq!(state.form, EventForm::default());
    }

    #[test]
    fn test_month_paging() {
        let mut state = ViewState::new(today());
        state.apply(Msg::NextMonth);
        assert_eq!(state.anchor, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        state.apply(Msg::PrevMonth);
        state.apply(Msg::PrevMonth);
        assert_eq!(state.anchor, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }

    #[test]
    fn test_selected_day_persists_across_screens() {
        let mut state = ViewState::new(today());
        let picked = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        state.apply(Msg::SelectDay(picked));
        state.apply(Msg::GoUpcoming);
        assert_eq!(state.selected, picked);

        // The upcoming week strip can change it too.
        let other = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        assert!(state.apply(Msg::SelectDay(other)));
        assert_eq!(state.selected, other);
    }

    #[test]
    fn test_create_opens_guide_modal_over_add() {
        let mut state = ViewState::new(today());
        state.apply(Msg::GoAdd);
        state.apply(Msg::CreateSucceeded(make_event("new")));

        assert_eq!(state.screen, Screen::Add);
        assert!(state.guide_modal_open);
        assert_eq!(state.guide_event.as_ref().unwrap().id, "new");

        // Dismissing only hides the modal.
        state.apply(Msg::CloseGuideModal);
        assert_eq!(state.screen, Screen::Add);
        assert!(!state.guide_modal_open);
    }

    #[test]
    fn test_view_guide_requires_open_modal() {
        let mut state = ViewState::new(today());
        state.apply(Msg::GoAdd);
        assert!(!state.apply(Msg::ViewGuide));
        assert_eq!(state.screen, Screen::Add);

        state.apply(Msg::CreateSucceeded(make_event("new")));
        assert!(state.apply(Msg::ViewGuide));
        assert_eq!(state.screen, Screen::Guide);
        assert!(!state.guide_modal_open);

        state.apply(Msg::Back);
        assert_eq!(state.screen, Screen::Calendar);
    }

    #[test]
    fn test_menu_exclusivity() {
        let mut state = ViewState::new(today());
        state.apply(Msg::GoUpcoming);

        state.apply(Msg::ToggleMenu("a".to_string()));
        assert_eq!(state.menu_open.as_deref(), Some("a"));

        // Opening b's menu closes a's.
        state.apply(Msg::ToggleMenu("b".to_string()));
        assert_eq!(state.menu_open.as_deref(), Some("b"));

        // Toggling the open one closes it.
        state.apply(Msg::ToggleMenu("b".to_string()));
        assert!(state.menu_open.is_none());
    }

    #[test]
    fn test_menu_edit_populates_form_and_closes_menu() {
        let mut state = ViewState::new(today());
        state.apply(Msg::GoUpcoming);
        state.apply(Msg::ToggleMenu("ev".to_string()));

        let event = make_event("ev");
        state.apply(Msg::MenuEdit(event.clone()));

        assert_eq!(state.screen, Screen::Edit);
        assert!(state.menu_open.is_none());
        assert_eq!(state.editing.as_ref().unwrap().id, "ev");
        assert_eq!(state.form, EventForm::from_event(&event));
    }

    #[test]
    fn test_delete_closes_menu_and_stays_on_upcoming() {
        let mut state = ViewState::new(today());
        state.apply(Msg::GoUpcoming);
        state.apply(Msg::ToggleMenu("ev".to_string()));

        state.apply(Msg::DeleteSucceeded("ev".to_string()));
        assert_eq!(state.screen, Screen::Upcoming);
        assert!(state.menu_open.is_none());
    }

    #[test]
    fn test_edit_back_and_update_clear_editing_target() {
        let mut state = ViewState::new(today());
        state.apply(Msg::GoUpcoming);
        state.apply(Msg::MenuEdit(make_event("ev")));

        state.apply(Msg::Back);
        assert_eq!(state.screen, Screen::Upcoming);
        assert!(state.editing.is_none());

        state.apply(Msg::MenuEdit(make_event("ev")));
        state.apply(Msg::UpdateSucceeded(make_event("ev")));
        assert_eq!(state.screen, Screen::Upcoming);
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_messages_outside_the_table_are_ignored() {
        let mut state = ViewState::new(today());

        // Calendar doesn't accept upcoming-only messages.
        assert!(!state.apply(Msg::ToggleMenu("a".to_string())));
        assert!(!state.apply(Msg::UpdateSucceeded(make_event("a"))));
        assert_eq!(state.screen, Screen::Calendar);

        // Month paging only works on the calendar screen.
        state.apply(Msg::GoUpcoming);
        let anchor = state.anchor;
        assert!(!state.apply(Msg::NextMonth));
        assert_eq!(state.anchor, anchor);
    }
}
