use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use shared::{
    domain::{SortOrder, Superhero},
    error::ApiFailure,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    api::SuperheroApi,
    roster::{FetchApplied, FetchTicket, RemoteRoster, RosterSnapshot},
    validation::{validate, FieldErrors, SuperheroForm},
};

#[derive(Debug, Clone)]
pub enum RosterEvent {
    /// Published whenever the visible roster state changes.
    Updated(RosterSnapshot),
    OrderChanged(SortOrder),
    /// The service acknowledged the record; the form that produced it can be cleared.
    Created(Superhero),
    CreateFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Failed(ApiFailure),
}

#[async_trait]
pub trait RosterHandle: Send + Sync {
    async fn list(&self, order: SortOrder) -> FetchApplied;
    async fn refresh(&self) -> FetchApplied;
    async fn set_order(&self, order: SortOrder) -> Option<FetchApplied>;
    async fn toggle_order(&self) -> FetchApplied;
    async fn create(&self, hero: Superhero) -> Result<(), ApiFailure>;
    async fn submit(&self, form: &SuperheroForm) -> Result<SubmitOutcome, FieldErrors>;
    fn snapshot(&self) -> RosterSnapshot;
    fn subscribe_events(&self) -> broadcast::Receiver<RosterEvent>;
}

/// Keeps a [`RemoteRoster`] in sync with the service.
///
/// Fetches are split into a synchronous `begin_*` step, which assigns the request id
/// in call order, and [`RosterClient::run_fetch`], which performs the request. The
/// state lock is never held across a network call.
pub struct RosterClient {
    api: Arc<dyn SuperheroApi>,
    inner: Mutex<RemoteRoster>,
    events: broadcast::Sender<RosterEvent>,
}

impl RosterClient {
    pub fn new(api: Arc<dyn SuperheroApi>, order: SortOrder) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            api,
            inner: Mutex::new(RemoteRoster::new(order)),
            events,
        })
    }

    fn state(&self) -> MutexGuard<'_, RemoteRoster> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn begin_list(&self, order: SortOrder) -> FetchTicket {
        let (ticket, snapshot) = {
            let mut guard = self.state();
            let ticket = guard.begin_fetch(order);
            (ticket, guard.snapshot())
        };
        self.emit(RosterEvent::Updated(snapshot));
        ticket
    }

    pub fn begin_refresh(&self) -> FetchTicket {
        let order = self.state().order();
        self.begin_list(order)
    }

    /// `None` when `order` is already current; nothing needs fetching then.
    pub fn begin_set_order(&self, order: SortOrder) -> Option<FetchTicket> {
        let (ticket, snapshot) = {
            let mut guard = self.state();
            let ticket = guard.set_order(order)?;
            (ticket, guard.snapshot())
        };
        self.emit(RosterEvent::OrderChanged(order));
        self.emit(RosterEvent::Updated(snapshot));
        Some(ticket)
    }

    pub fn begin_toggle_order(&self) -> FetchTicket {
        let (ticket, snapshot) = {
            let mut guard = self.state();
            let ticket = guard.toggle_order();
            (ticket, guard.snapshot())
        };
        self.emit(RosterEvent::OrderChanged(ticket.order));
        self.emit(RosterEvent::Updated(snapshot));
        ticket
    }

    pub async fn run_fetch(&self, ticket: FetchTicket) -> FetchApplied {
        debug!(
            request_id = ticket.request_id,
            order = %ticket.order,
            "fetching roster"
        );
        let outcome = self
            .api
            .list(ticket.order)
            .await
            .map_err(|failure| failure.message);

        let (applied, snapshot) = {
            let mut guard = self.state();
            let applied = guard.complete_fetch(ticket, outcome);
            (applied, guard.snapshot())
        };

        match applied {
            FetchApplied::Populated => {
                info!(
                    request_id = ticket.request_id,
                    order = %ticket.order,
                    count = snapshot.heroes.len(),
                    "roster refreshed"
                );
                self.emit(RosterEvent::Updated(snapshot));
            }
            FetchApplied::Errored => {
                warn!(
                    request_id = ticket.request_id,
                    order = %ticket.order,
                    error = snapshot.fetch_error.as_deref().unwrap_or_default(),
                    "roster refresh failed"
                );
                self.emit(RosterEvent::Updated(snapshot));
            }
            FetchApplied::Stale => {}
        }
        applied
    }

    fn emit(&self, event: RosterEvent) {
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl RosterHandle for RosterClient {
    async fn list(&self, order: SortOrder) -> FetchApplied {
        let ticket = self.begin_list(order);
        self.run_fetch(ticket).await
    }

    async fn refresh(&self) -> FetchApplied {
        let ticket = self.begin_refresh();
        self.run_fetch(ticket).await
    }

    async fn set_order(&self, order: SortOrder) -> Option<FetchApplied> {
        let ticket = self.begin_set_order(order)?;
        Some(self.run_fetch(ticket).await)
    }

    async fn toggle_order(&self) -> FetchApplied {
        let ticket = self.begin_toggle_order();
        self.run_fetch(ticket).await
    }

    async fn create(&self, hero: Superhero) -> Result<(), ApiFailure> {
        let snapshot = {
            let mut guard = self.state();
            guard.begin_create();
            guard.snapshot()
        };
        self.emit(RosterEvent::Updated(snapshot));

        let result = self.api.create(&hero).await;

        let (refresh, snapshot) = {
            let mut guard = self.state();
            let refresh = guard.complete_create(
                result
                    .as_ref()
                    .map(|_| ())
                    .map_err(|failure| failure.message.clone()),
            );
            (refresh, guard.snapshot())
        };

        match refresh {
            Some(ticket) => {
                info!(name = %hero.name, "superhero created");
                self.emit(RosterEvent::Created(hero));
                self.emit(RosterEvent::Updated(snapshot));
                self.run_fetch(ticket).await;
            }
            None => {
                let message = snapshot.create_error.clone().unwrap_or_default();
                warn!(name = %hero.name, error = %message, "superhero create failed");
                self.emit(RosterEvent::CreateFailed(message));
                self.emit(RosterEvent::Updated(snapshot));
            }
        }

        result
    }

    async fn submit(&self, form: &SuperheroForm) -> Result<SubmitOutcome, FieldErrors> {
        let hero = validate(form)?;
        Ok(match self.create(hero).await {
            Ok(()) => SubmitOutcome::Created,
            Err(failure) => SubmitOutcome::Failed(failure),
        })
    }

    fn snapshot(&self) -> RosterSnapshot {
        self.state().snapshot()
    }

    fn subscribe_events(&self) -> broadcast::Receiver<RosterEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
