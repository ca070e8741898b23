//! The in-memory event cache.
//!
//! One authoritative entity table keyed by id, with the month view and the
//! upcoming window as derived projections. The caches are views, not the
//! source of truth: the month slice is replaced whenever the displayed
//! month changes, the upcoming slice once per session, and mutations are
//! applied only after the store confirms them.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::dday::days_until;
use crate::event::{Event, Upcoming};

#[derive(Debug, Clone)]
pub struct EventCache {
    today: NaiveDate,
    /// Authoritative entity table. An id resolves to the same logical
    /// event no matter which projection it is read through.
    events: HashMap<String, Event>,
    /// Membership of the current month slice, in store response order.
    month_ids: Vec<String>,
    /// Membership of the upcoming slice, in store response order.
    upcoming_ids: Vec<String>,
    /// date -> ids index over the month slice. Rebuilt from `month_ids`
    /// after every mutation so it can never drift.
    by_date: HashMap<NaiveDate, Vec<String>>,
}

impl EventCache {
    pub fn new(today: NaiveDate) -> Self {
        EventCache {
            today,
            events: HashMap::new(),
            month_ids: Vec::new(),
            upcoming_ids: Vec::new(),
            by_date: HashMap::new(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.get(id)
    }

    // ---- Wholesale replacement (fetch results) ----

    /// Replace the month slice with a fetched batch.
    pub fn replace_month(&mut self, events: Vec<Event>) {
        self.month_ids = events.iter().map(|e| e.id.clone()).collect();
        for event in events {
            self.events.insert(event.id.clone(), event);
        }
        self.prune();
        self.rebuild_index();
    }

    /// Empty the month slice (fetch failure fallback).
    pub fn clear_month(&mut self) {
        self.replace_month(Vec::new());
    }

    /// Replace the upcoming slice with a fetched batch. Events whose
    /// D-day is already negative are not retained in the slice.
    pub fn replace_upcoming(&mut self, events: Vec<Event>) {
        self.upcoming_ids = events
            .iter()
            .filter(|e| days_until(e.date, self.today) >= 0)
            .map(|e| e.id.clone())
            .collect();
        for event in events {
            self.events.insert(event.id.clone(), event);
        }
        self.prune();
        self.rebuild_index();
    }

    /// Empty the upcoming slice (fetch failure fallback).
    pub fn clear_upcoming(&mut self) {
        self.replace_upcoming(Vec::new());
    }

    // ---- Confirmed single-event mutations ----

    /// Insert an event the store confirmed as created. Joins the month
    /// slice, and the upcoming slice when its D-day is non-negative.
    pub fn insert(&mut self, event: Event) {
        let id = event.id.clone();
        let dday = days_until(event.date, self.today);
        self.events.insert(id.clone(), event);

        if !self.month_ids.contains(&id) {
            self.month_ids.push(id.clone());
        }
        if dday >= 0 && !self.upcoming_ids.contains(&id) {
            self.upcoming_ids.push(id);
        }
        self.rebuild_index();
    }

    /// Replace the entry matching the updated event's id. Membership is
    /// untouched; unknown ids are ignored.
    pub fn apply_update(&mut self, event: Event) {
        if !self.events.contains_key(&event.id) {
            return;
        }
        self.events.insert(event.id.clone(), event);
        self.rebuild_index();
    }

    /// Remove a confirmed-deleted id from the table and both slices.
    /// A no-op when the id is already absent.
    pub fn remove(&mut self, id: &str) {
        self.events.remove(id);
        self.month_ids.retain(|m| m != id);
        self.upcoming_ids.retain(|u| u != id);
        self.rebuild_index();
    }

    // ---- Derived projections ----

    /// The month slice, in store response order.
    pub fn month_events(&self) -> Vec<&Event> {
        self.month_ids
            .iter()
            .filter_map(|id| self.events.get(id))
            .collect()
    }

    /// Events of the month slice falling on `date`.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.by_date
            .get(&date)
            .map(|ids| ids.iter().filter_map(|id| self.events.get(id)).collect())
            .unwrap_or_default()
    }

    /// The upcoming window: D-day >= 0, ascending by occurrence date.
    /// Same-date ties keep store response order (stable sort).
    pub fn upcoming(&self) -> Vec<Upcoming> {
        let mut upcoming: Vec<Upcoming> = self
            .upcoming_ids
            .iter()
            .filter_map(|id| self.events.get(id))
            .map(|event| Upcoming {
                occurs_on: event.date,
                dday: days_until(event.date, self.today),
                event: event.clone(),
            })
            .filter(|u| u.dday >= 0)
            .collect();
        upcoming.sort_by_key(|u| u.occurs_on);
        upcoming
    }

    /// The first `n` upcoming events (calendar-screen preview).
    pub fn upcoming_preview(&self, n: usize) -> Vec<Upcoming> {
        let mut upcoming = self.upcoming();
        upcoming.truncate(n);
        upcoming
    }

    /// Short label for a day cell: a single event shows its own title,
    /// several show a count.
    pub fn pill_text(&self, date: NaiveDate) -> Option<String> {
        let events = self.events_on(date);
        match events.len() {
            0 => None,
            1 => Some(events[0].title.clone()),
            n => Some(format!("{n}개 이벤트")),
        }
    }

    // ---- Internal ----

    /// Drop table entries no slice references anymore.
    fn prune(&mut self) {
        let month_ids = &self.month_ids;
        let upcoming_ids = &self.upcoming_ids;
        self.events
            .retain(|id, _| month_ids.contains(id) || upcoming_ids.contains(id));
    }

    fn rebuild_index(&mut self) {
        self.by_date.clear();
        for id in &self.month_ids {
            if let Some(event) = self.events.get(id) {
                self.by_date
                    .entry(event.date)
                    .or_default()
                    .push(id.clone());
            }
        }
    }
}
