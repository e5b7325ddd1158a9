use super::*;
use std::{collections::VecDeque, time::Duration};

use shared::domain::HumilityScore;
use tokio::sync::{oneshot, Mutex};

use crate::roster::FetchPhase;

#[derive(Default)]
struct FakeApi {
    heroes: Mutex<Vec<Superhero>>,
    list_calls: Mutex<Vec<SortOrder>>,
    create_calls: Mutex<Vec<Superhero>>,
    fail_list: Mutex<Option<String>>,
    fail_create: Mutex<Option<String>>,
    list_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
}

impl FakeApi {
    fn with_heroes(heroes: Vec<Superhero>) -> Arc<Self> {
        Arc::new(Self {
            heroes: Mutex::new(heroes),
            ..Self::default()
        })
    }

    async fn hold_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.lock().await.push_back(rx);
        tx
    }
}

#[async_trait]
impl SuperheroApi for FakeApi {
    async fn list(&self, order: SortOrder) -> Result<Vec<Superhero>, ApiFailure> {
        self.list_calls.lock().await.push(order);
        let gate = self.list_gates.lock().await.pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(message) = self.fail_list.lock().await.clone() {
            return Err(ApiFailure::new(Some(500), message));
        }
        let mut heroes = self.heroes.lock().await.clone();
        heroes.sort_by_key(|hero| hero.humility_score);
        if order == SortOrder::Dsc {
            heroes.reverse();
        }
        Ok(heroes)
    }

    async fn create(&self, hero: &Superhero) -> Result<(), ApiFailure> {
        self.create_calls.lock().await.push(hero.clone());
        if let Some(message) = self.fail_create.lock().await.clone() {
            return Err(ApiFailure::new(Some(400), message));
        }
        self.heroes.lock().await.push(hero.clone());
        Ok(())
    }
}

fn hero(name: &str, score: i64) -> Superhero {
    Superhero {
        name: name.to_string(),
        superpower: "Flight".to_string(),
        humility_score: HumilityScore::new(score).expect("score"),
    }
}

fn names(snapshot: &RosterSnapshot) -> Vec<&str> {
    snapshot.heroes.iter().map(|hero| hero.name.as_str()).collect()
}

fn drain(rx: &mut broadcast::Receiver<RosterEvent>) -> Vec<RosterEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn refresh_populates_roster_in_requested_order() {
    let api = FakeApi::with_heroes(vec![hero("Orion", 7), hero("Vega", 3)]);
    let client = RosterClient::new(api.clone(), SortOrder::Asc);
    let mut rx = client.subscribe_events();

    assert_eq!(client.refresh().await, FetchApplied::Populated);

    let snapshot = client.snapshot();
    assert_eq!(names(&snapshot), ["Vega", "Orion"]);
    assert_eq!(snapshot.phase, FetchPhase::Populated);

    let phases: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter_map(|event| match event {
            RosterEvent::Updated(snapshot) => Some(snapshot.phase),
            _ => None,
        })
        .collect();
    assert_eq!(phases, [FetchPhase::Loading, FetchPhase::Populated]);
}

#[tokio::test]
async fn toggling_order_issues_exactly_one_fetch_with_new_order() {
    let api = FakeApi::with_heroes(vec![hero("Orion", 7), hero("Vega", 3)]);
    let client = RosterClient::new(api.clone(), SortOrder::Asc);
    let mut rx = client.subscribe_events();

    client.toggle_order().await;

    assert_eq!(*api.list_calls.lock().await, vec![SortOrder::Dsc]);
    let snapshot = client.snapshot();
    assert_eq!(snapshot.order, SortOrder::Dsc);
    assert_eq!(names(&snapshot), ["Orion", "Vega"]);
    assert!(drain(&mut rx)
        .iter()
        .any(|event| matches!(event, RosterEvent::OrderChanged(SortOrder::Dsc))));
}

#[tokio::test]
async fn setting_unchanged_order_does_not_fetch() {
    let api = FakeApi::with_heroes(Vec::new());
    let client = RosterClient::new(api.clone(), SortOrder::Dsc);

    assert_eq!(client.set_order(SortOrder::Dsc).await, None);
    assert!(api.list_calls.lock().await.is_empty());

    assert_eq!(
        client.set_order(SortOrder::Asc).await,
        Some(FetchApplied::Populated)
    );
    assert_eq!(*api.list_calls.lock().await, vec![SortOrder::Asc]);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_roster_and_reports_error() {
    let api = FakeApi::with_heroes(vec![hero("Vega", 3)]);
    let client = RosterClient::new(api.clone(), SortOrder::Asc);
    client.refresh().await;

    *api.fail_list.lock().await = Some("Failed to fetch superheroes.".to_string());
    assert_eq!(client.refresh().await, FetchApplied::Errored);

    let snapshot = client.snapshot();
    assert_eq!(names(&snapshot), ["Vega"]);
    assert_eq!(snapshot.phase, FetchPhase::Errored);
    assert_eq!(
        snapshot.fetch_error.as_deref(),
        Some("Failed to fetch superheroes.")
    );
}

#[tokio::test]
async fn valid_submission_creates_then_refreshes_in_current_order() {
    let api = FakeApi::with_heroes(vec![hero("Vega", 3), hero("Nova", 9)]);
    let client = RosterClient::new(api.clone(), SortOrder::Dsc);
    let mut rx = client.subscribe_events();

    let outcome = client
        .submit(&SuperheroForm::new("Orion", "Flight", "7"))
        .await
        .expect("valid form");

    assert_eq!(outcome, SubmitOutcome::Created);
    assert_eq!(*api.list_calls.lock().await, vec![SortOrder::Dsc]);
    assert_eq!(names(&client.snapshot()), ["Nova", "Orion", "Vega"]);
    assert!(drain(&mut rx)
        .iter()
        .any(|event| matches!(event, RosterEvent::Created(hero) if hero.name == "Orion")));
}

#[tokio::test]
async fn invalid_submission_never_reaches_the_service() {
    let api = FakeApi::with_heroes(Vec::new());
    let client = RosterClient::new(api.clone(), SortOrder::Asc);

    let errors = client
        .submit(&SuperheroForm::new("", "X", "5"))
        .await
        .expect_err("must reject");

    assert_eq!(
        errors.get(crate::validation::FormField::Name),
        Some("Name is required")
    );
    assert!(api.create_calls.lock().await.is_empty());
    assert!(api.list_calls.lock().await.is_empty());
    assert_eq!(client.snapshot().phase, FetchPhase::Idle);
}

#[tokio::test]
async fn failed_create_keeps_cache_and_emits_failure() {
    let api = FakeApi::with_heroes(vec![hero("Vega", 3)]);
    let client = RosterClient::new(api.clone(), SortOrder::Asc);
    client.refresh().await;
    *api.fail_create.lock().await = Some("Orion already exists".to_string());
    let mut rx = client.subscribe_events();

    let outcome = client
        .submit(&SuperheroForm::new("Orion", "Flight", "7"))
        .await
        .expect("valid form");

    assert!(matches!(outcome, SubmitOutcome::Failed(ref failure) if failure.message == "Orion already exists"));
    let snapshot = client.snapshot();
    assert_eq!(names(&snapshot), ["Vega"]);
    assert_eq!(snapshot.create_error.as_deref(), Some("Orion already exists"));
    assert_eq!(api.list_calls.lock().await.len(), 1);
    assert!(drain(&mut rx)
        .iter()
        .any(|event| matches!(event, RosterEvent::CreateFailed(message) if message == "Orion already exists")));
}

#[tokio::test]
async fn slow_first_fetch_resolving_late_is_discarded() {
    let api = FakeApi::with_heroes(vec![hero("Orion", 7), hero("Vega", 3)]);
    let client = RosterClient::new(api.clone(), SortOrder::Asc);
    let release_slow = api.hold_next_list().await;

    let slow_client = Arc::clone(&client);
    let slow = tokio::spawn(async move { slow_client.list(SortOrder::Asc).await });

    tokio::time::timeout(Duration::from_secs(1), async {
        while api.list_calls.lock().await.is_empty() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("slow fetch started");

    assert_eq!(client.toggle_order().await, FetchApplied::Populated);
    assert_eq!(names(&client.snapshot()), ["Orion", "Vega"]);

    release_slow.send(()).expect("release slow fetch");
    assert_eq!(slow.await.expect("join"), FetchApplied::Stale);

    let snapshot = client.snapshot();
    assert_eq!(snapshot.order, SortOrder::Dsc);
    assert_eq!(names(&snapshot), ["Orion", "Vega"]);
    assert_eq!(snapshot.phase, FetchPhase::Populated);
}

#[tokio::test]
async fn request_ids_follow_call_order_even_when_fetches_finish_out_of_order() {
    let api = FakeApi::with_heroes(vec![hero("Orion", 7), hero("Vega", 3)]);
    let client = RosterClient::new(api.clone(), SortOrder::Asc);

    let to_dsc = client.begin_set_order(SortOrder::Dsc).expect("order changed");
    let back_to_asc = client.begin_set_order(SortOrder::Asc).expect("order changed");
    assert!(back_to_asc.request_id > to_dsc.request_id);

    assert_eq!(client.run_fetch(back_to_asc).await, FetchApplied::Populated);
    assert_eq!(client.run_fetch(to_dsc).await, FetchApplied::Stale);

    let snapshot = client.snapshot();
    assert_eq!(snapshot.order, SortOrder::Asc);
    assert_eq!(names(&snapshot), ["Vega", "Orion"]);
}
