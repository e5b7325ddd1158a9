//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::Refresh => "refresh",
        BackendCommand::SetOrder { .. } => "set_order",
        BackendCommand::Create { .. } => "create",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend queue full");
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::SortOrder;

    #[test]
    fn queued_command_leaves_status_alone() {
        let (tx, rx) = bounded(1);
        let mut status = "idle".to_string();
        dispatch_backend_command(&tx, BackendCommand::Refresh, &mut status);
        assert_eq!(status, "idle");
        assert!(matches!(rx.try_recv(), Ok(BackendCommand::Refresh)));
    }

    #[test]
    fn full_queue_reports_retry_status() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::Refresh, &mut status);
        dispatch_backend_command(
            &tx,
            BackendCommand::SetOrder {
                order: SortOrder::Dsc,
            },
            &mut status,
        );
        assert_eq!(status, "UI command queue is full; please retry");
    }

    #[test]
    fn disconnected_backend_is_reported() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::Refresh, &mut status);
        assert!(status.starts_with("Backend command processor disconnected"));
    }
}
