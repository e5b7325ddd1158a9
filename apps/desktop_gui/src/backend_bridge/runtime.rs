//! Worker thread owning the tokio runtime and the roster client.

use std::{sync::Arc, thread};

use client_core::{HttpSuperheroApi, RosterClient, RosterHandle, RosterSnapshot};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::domain::SortOrder;
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    api_base_url: String,
    initial_order: SortOrder,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        forward_ui_event(&ui_tx, UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                forward_ui_event(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let api = Arc::new(HttpSuperheroApi::new(api_base_url.clone()));
            let client = RosterClient::new(api, initial_order);

            let mut events = client.subscribe_events();
            let forward_client = Arc::clone(&client);
            let forward_tx = ui_tx.clone();
            tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            forward_ui_event(&forward_tx, UiEvent::from(event));
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "roster event forwarder lagged; resending current state");
                            for event in lag_recovery_events(forward_client.snapshot(), skipped) {
                                forward_ui_event(&forward_tx, event);
                            }
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            tracing::info!(api_base_url = %api_base_url, order = %initial_order, "backend worker ready");
            forward_ui_event(&ui_tx, UiEvent::Info(format!("Using roster service at {api_base_url}")));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Refresh => {
                        let ticket = client.begin_refresh();
                        let client = Arc::clone(&client);
                        tokio::spawn(async move {
                            client.run_fetch(ticket).await;
                        });
                    }
                    BackendCommand::SetOrder { order } => {
                        let Some(ticket) = client.begin_set_order(order) else {
                            tracing::debug!(order = %order, "sort order unchanged; nothing to fetch");
                            continue;
                        };
                        let client = Arc::clone(&client);
                        tokio::spawn(async move {
                            client.run_fetch(ticket).await;
                        });
                    }
                    BackendCommand::Create { hero } => {
                        let client = Arc::clone(&client);
                        tokio::spawn(async move {
                            let _ = client.create(hero).await;
                        });
                    }
                }
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}

fn ui_event_name(event: &UiEvent) -> &'static str {
    match event {
        UiEvent::Info(_) => "info",
        UiEvent::Roster(_) => "roster",
        UiEvent::OrderChanged(_) => "order_changed",
        UiEvent::HeroCreated(_) => "hero_created",
        UiEvent::CreateFailed(_) => "create_failed",
        UiEvent::Error(_) => "error",
    }
}

/// Non-blocking send toward the UI. A dropped event is logged, never silently lost.
fn forward_ui_event(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(event)) => {
            tracing::warn!(event = ui_event_name(&event), "backend->ui queue full; dropping event");
            false
        }
        Err(TrySendError::Disconnected(event)) => {
            tracing::warn!(event = ui_event_name(&event), "ui event receiver disconnected; dropping event");
            false
        }
    }
}

/// Events that put the UI back in step after the broadcast receiver skipped `skipped`
/// events. The snapshot carries the roster, the order and any create error; the
/// status line says some updates were missed.
fn lag_recovery_events(snapshot: RosterSnapshot, skipped: u64) -> Vec<UiEvent> {
    let order = snapshot.order;
    vec![
        UiEvent::Roster(snapshot),
        UiEvent::OrderChanged(order),
        UiEvent::Info(format!("Caught up after missing {skipped} roster updates")),
    ]
}
