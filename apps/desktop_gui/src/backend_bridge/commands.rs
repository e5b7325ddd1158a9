//! Backend commands queued from UI to backend worker.

use shared::domain::{SortOrder, Superhero};

pub enum BackendCommand {
    /// Re-fetch in the current order.
    Refresh,
    SetOrder {
        order: SortOrder,
    },
    /// `hero` has already passed form validation.
    Create {
        hero: Superhero,
    },
}
