//! Normalization of raw event-store records.
//!
//! The store's response shape is only loosely specified, so records are
//! accepted tolerantly: `personName`/`person` and `degree`/`temp` are
//! ordered-fallback aliases, optional fields get defaults, and a malformed
//! record fails only itself, never the whole batch.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{KeepdayError, KeepdayResult};
use crate::event::{parse_day, Event, EventPayload};

/// A raw record as returned by the event store, before normalization.
///
/// Every field is optional here; requiredness is enforced by [`normalize`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    /// "YYYY-MM-DD"-style string.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, rename = "personName")]
    pub person_name: Option<String>,
    #[serde(default)]
    pub person: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default, rename = "remindOn")]
    pub remind_on: Option<bool>,
    #[serde(default, rename = "remindDateTime")]
    pub remind_datetime: Option<String>,
    #[serde(default)]
    pub degree: Option<f64>,
    #[serde(default)]
    pub temp: Option<f64>,
}

/// Event collections arrive either as a bare array or wrapped in an
/// `events` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EventsResponse {
    Wrapped { events: Vec<RawEvent> },
    Bare(Vec<RawEvent>),
}

impl EventsResponse {
    pub fn into_events(self) -> Vec<RawEvent> {
        match self {
            EventsResponse::Wrapped { events } => events,
            EventsResponse::Bare(events) => events,
        }
    }
}

/// Accept ids sent as JSON strings or numbers.
fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Normalize a fetched record. Requires `id`, `title` and a parseable
/// `date`; everything else defaults.
pub fn normalize(raw: RawEvent) -> KeepdayResult<Event> {
    normalize_with(raw, None)
}

/// Normalize a create/update response, falling back to the submitted
/// payload for any field the store omitted.
///
/// Fallback order per field: store's aliased fields first (`personName`
/// over `person`, `degree` over `temp`), then the payload, then the
/// default from the data model.
pub fn normalize_with(raw: RawEvent, payload: Option<&EventPayload>) -> KeepdayResult<Event> {
    let id = raw.id.ok_or(KeepdayError::MissingField("id"))?;

    let title = raw
        .title
        .filter(|t| !t.is_empty())
        .or_else(|| payload.map(|p| p.title.clone()))
        .ok_or(KeepdayError::MissingField("title"))?;

    let date_str = raw
        .date
        .filter(|d| !d.is_empty())
        .or_else(|| payload.map(|p| p.date.clone()))
        .ok_or(KeepdayError::MissingField("date"))?;
    let date = parse_day(&date_str)?;

    let person = raw
        .person_name
        .filter(|p| !p.is_empty())
        .or(raw.person.filter(|p| !p.is_empty()))
        .or_else(|| payload.map(|p| p.person_name.clone()))
        .unwrap_or_default();

    let event_type = raw
        .event_type
        .filter(|t| !t.is_empty())
        .or_else(|| payload.map(|p| p.event_type.clone()))
        .unwrap_or_default();

    let memo = raw
        .memo
        .or_else(|| payload.map(|p| p.memo.clone()))
        .unwrap_or_default();

    let remind_on = raw
        .remind_on
        .or(payload.map(|p| p.remind_on))
        .unwrap_or(false);

    let remind_datetime = raw
        .remind_datetime
        .filter(|r| !r.is_empty())
        .or_else(|| payload.map(|p| p.remind_date_time.clone()))
        .unwrap_or_default();

    let temp = raw.degree.or(raw.temp).unwrap_or(0.0);

    Ok(Event {
        id,
        title,
        event_type,
        date,
        person,
        memo,
        remind_on,
        remind_datetime,
        temp,
    })
}

/// Normalize a fetched batch, dropping (and logging) malformed records
/// instead of failing the whole response.
pub fn normalize_batch(raws: Vec<RawEvent>) -> Vec<Event> {
    raws.into_iter()
        .filter_map(|raw| match normalize(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!("skipping malformed event record: {e}");
                None
            }
        })
        .collect()
}
