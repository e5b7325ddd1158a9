//! Roster state: the local in-memory variant and the state machine that mirrors the
//! remote collection.

use shared::domain::{SortOrder, Superhero};
use tracing::debug;

use crate::validation::{validate, FieldErrors, SuperheroForm};

#[derive(Debug, Clone, Default)]
pub struct LocalRoster {
    entries: Vec<Superhero>,
}

impl LocalRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, hero: Superhero) {
        self.entries.push(hero);
    }

    /// Validates and appends. A rejected form leaves the roster untouched.
    pub fn submit(&mut self, form: &SuperheroForm) -> Result<&Superhero, FieldErrors> {
        let hero = validate(form)?;
        self.entries.push(hero);
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn entries(&self) -> &[Superhero] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Populated,
    Errored,
}

/// Handle for one issued list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub request_id: u64,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    Populated,
    Errored,
    /// A newer request was issued after this one; its result was dropped.
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSnapshot {
    pub heroes: Vec<Superhero>,
    pub order: SortOrder,
    pub phase: FetchPhase,
    pub fetch_error: Option<String>,
    pub create_error: Option<String>,
    pub create_in_flight: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RemoteRoster {
    cache: Vec<Superhero>,
    order: SortOrder,
    phase: FetchPhase,
    fetch_error: Option<String>,
    create_error: Option<String>,
    creates_in_flight: usize,
    last_issued: u64,
}

impl RemoteRoster {
    pub fn new(order: SortOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn heroes(&self) -> &[Superhero] {
        &self.cache
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn create_error(&self) -> Option<&str> {
        self.create_error.as_deref()
    }

    /// Starts a list request for `order`, which also becomes the current order.
    pub fn begin_fetch(&mut self, order: SortOrder) -> FetchTicket {
        self.last_issued += 1;
        self.order = order;
        self.phase = FetchPhase::Loading;
        self.fetch_error = None;
        FetchTicket {
            request_id: self.last_issued,
            order,
        }
    }

    /// Applies a finished list request, unless a newer one has been issued since.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<Superhero>, String>,
    ) -> FetchApplied {
        if ticket.request_id != self.last_issued {
            debug!(
                request_id = ticket.request_id,
                latest = self.last_issued,
                "dropping stale roster response"
            );
            return FetchApplied::Stale;
        }

        match outcome {
            Ok(heroes) => {
                self.cache = heroes;
                self.fetch_error = None;
                self.phase = FetchPhase::Populated;
                FetchApplied::Populated
            }
            Err(message) => {
                self.fetch_error = Some(message);
                self.phase = FetchPhase::Errored;
                FetchApplied::Errored
            }
        }
    }

    /// Issues a fetch only when the order actually changes.
    pub fn set_order(&mut self, order: SortOrder) -> Option<FetchTicket> {
        if order == self.order {
            return None;
        }
        Some(self.begin_fetch(order))
    }

    pub fn toggle_order(&mut self) -> FetchTicket {
        self.begin_fetch(self.order.toggle())
    }

    pub fn begin_create(&mut self) {
        self.create_error = None;
        self.creates_in_flight += 1;
    }

    /// A successful create hands back the refresh ticket for the current order.
    pub fn complete_create(&mut self, outcome: Result<(), String>) -> Option<FetchTicket> {
        self.creates_in_flight = self.creates_in_flight.saturating_sub(1);
        match outcome {
            Ok(()) => Some(self.begin_fetch(self.order)),
            Err(message) => {
                self.create_error = Some(message);
                None
            }
        }
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            heroes: self.cache.clone(),
            order: self.order,
            phase: self.phase,
            fetch_error: self.fetch_error.clone(),
            create_error: self.create_error.clone(),
            create_in_flight: self.creates_in_flight > 0,
        }
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
