//! Canonical event types.
//!
//! These types represent relationship events in a store-agnostic way.
//! The normalizer converts raw event-store records into these types, and
//! everything downstream (cache, grids, views) works exclusively with them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{KeepdayError, KeepdayResult};

/// Default category for new events.
pub const DEFAULT_EVENT_TYPE: &str = "생일";

/// Curated event categories offered in the add/edit forms.
/// The `event_type` field itself is free text, so the store may hold others.
pub const EVENT_TYPES: &[&str] = &[
    "생일", "승진", "입사", "퇴사", "결혼", "출산", "병문안", "집들이",
];

/// A relationship event (post-normalization).
///
/// `id` is assigned by the event store, never client-generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Category label, e.g. "생일" or "승진". Stored as free text.
    pub event_type: String,
    /// The calendar day the event falls on (the grouping key).
    pub date: NaiveDate,
    /// Display name of the related person.
    pub person: String,
    pub memo: String,
    pub remind_on: bool,
    pub remind_datetime: String,
    /// Intimacy score ("temperature") for the related person.
    pub temp: f64,
}

/// An event in the upcoming window: the event plus its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Upcoming {
    pub event: Event,
    /// Concrete day the event occurs on.
    pub occurs_on: NaiveDate,
    /// Signed day offset from today. Always >= 0 for cached upcoming events.
    pub dday: i64,
}

/// Wire body for POST /events and PUT /events/{id}.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    /// YYYY-MM-DD
    pub date: String,
    pub person_name: String,
    pub memo: String,
    pub remind_on: bool,
    pub remind_date_time: String,
}

/// In-progress form buffer for the add/edit screens.
///
/// `date` stays free text while the user is typing; it is parsed (and the
/// required fields checked) only on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub person: String,
    pub event_type: String,
    pub date: String,
    pub memo: String,
    pub remind_on: bool,
    pub remind_datetime: String,
}

impl Default for EventForm {
    fn default() -> Self {
        EventForm {
            title: String::new(),
            person: String::new(),
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            date: String::new(),
            memo: String::new(),
            remind_on: false,
            remind_datetime: String::new(),
        }
    }
}

impl EventForm {
    /// Populate the buffer from an existing event (edit flow).
    pub fn from_event(event: &Event) -> Self {
        EventForm {
            title: event.title.clone(),
            person: event.person.clone(),
            event_type: event.event_type.clone(),
            date: event.date.format("%Y-%m-%d").to_string(),
            memo: event.memo.clone(),
            remind_on: event.remind_on,
            remind_datetime: event.remind_datetime.clone(),
        }
    }

    /// Check the create/update preconditions: `title`, `person` and `date`
    /// must all be non-empty, and `date` must parse as a calendar day.
    ///
    /// Returns the parsed date so callers don't parse twice.
    pub fn validate(&self) -> KeepdayResult<NaiveDate> {
        if self.title.trim().is_empty() {
            return Err(KeepdayError::MissingField("title"));
        }
        if self.person.trim().is_empty() {
            return Err(KeepdayError::MissingField("person"));
        }
        if self.date.trim().is_empty() {
            return Err(KeepdayError::MissingField("date"));
        }
        parse_day(self.date.trim())
    }

    /// Wire payload for this form.
    pub fn to_payload(&self) -> EventPayload {
        EventPayload {
            title: self.title.clone(),
            event_type: self.event_type.clone(),
            date: self.date.trim().to_string(),
            person_name: self.person.clone(),
            memo: self.memo.clone(),
            remind_on: self.remind_on,
            remind_date_time: self.remind_datetime.clone(),
        }
    }
}

/// Parse a YYYY-MM-DD day string.
pub fn parse_day(s: &str) -> KeepdayResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| KeepdayError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> EventForm {
        EventForm {
            title: "생일 파티".to_string(),
            person: "김민수".to_string(),
            date: "2025-03-10".to_string(),
            ..EventForm::default()
        }
    }

    #[test]
    fn test_default_form_uses_birthday_type() {
        let form = EventForm::default();
        assert_eq!(form.event_type, "생일");
        assert!(!form.remind_on);
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        let date = filled_form().validate().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn test_validate_rejects_missing_required_fields() {
        let mut form = filled_form();
        form.title = String::new();
        assert!(matches!(
            form.validate(),
            Err(KeepdayError::MissingField("title"))
        ));

        let mut form = filled_form();
        form.person = "   ".to_string();
        assert!(matches!(
            form.validate(),
            Err(KeepdayError::MissingField("person"))
        ));

        let mut form = filled_form();
        form.date = String::new();
        assert!(matches!(
            form.validate(),
            Err(KeepdayError::MissingField("date"))
        ));
    }

    #[test]
    fn test_validate_rejects_malformed_date() {
        let mut form = filled_form();
        form.date = "2025.03.10".to_string();
        assert!(matches!(form.validate(), Err(KeepdayError::InvalidDate(_))));
    }

    #[test]
    fn test_payload_uses_store_field_names() {
        let payload = filled_form().to_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["personName"], "김민수");
        assert_eq!(json["type"], "생일");
        assert_eq!(json["remindDateTime"], "");
        assert_eq!(json["date"], "2025-03-10");
    }
}
