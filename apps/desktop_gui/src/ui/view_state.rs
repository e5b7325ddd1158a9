use client_core::{FetchPhase, RosterSnapshot};

/// Number of placeholder rows drawn while a fetch is in flight.
pub const SKELETON_ROWS: usize = 5;
pub const EMPTY_TITLE: &str = "No superheroes added yet!";
pub const EMPTY_HINT: &str = "Add some to see the list here.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListBody {
    Loading,
    Populated,
    Empty,
    /// No rows and a fetch error banner is already explaining why.
    Blank,
}

pub fn list_body(is_loading: bool, row_count: usize, fetch_error_showing: bool) -> ListBody {
    if is_loading {
        ListBody::Loading
    } else if row_count > 0 {
        ListBody::Populated
    } else if fetch_error_showing {
        ListBody::Blank
    } else {
        ListBody::Empty
    }
}

/// Until the first fetch settles there is nothing to show but placeholders, so a
/// remote roster that is still `Idle` renders like one that is `Loading`.
pub fn remote_list_body(snapshot: &RosterSnapshot) -> ListBody {
    let pending = matches!(snapshot.phase, FetchPhase::Idle | FetchPhase::Loading);
    list_body(pending, snapshot.heroes.len(), snapshot.fetch_error.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_wins_over_cached_rows_and_errors() {
        assert_eq!(list_body(true, 4, false), ListBody::Loading);
        assert_eq!(list_body(true, 0, true), ListBody::Loading);
    }

    #[test]
    fn rows_are_shown_even_alongside_a_fetch_error() {
        assert_eq!(list_body(false, 2, true), ListBody::Populated);
    }

    #[test]
    fn empty_placeholder_is_hidden_behind_fetch_error() {
        assert_eq!(list_body(false, 0, false), ListBody::Empty);
        assert_eq!(list_body(false, 0, true), ListBody::Blank);
    }

    #[test]
    fn remote_roster_is_loading_until_the_first_fetch_settles() {
        let mut snapshot = RosterSnapshot::default();
        assert_eq!(remote_list_body(&snapshot), ListBody::Loading);

        snapshot.phase = FetchPhase::Populated;
        assert_eq!(remote_list_body(&snapshot), ListBody::Empty);

        snapshot.phase = FetchPhase::Errored;
        snapshot.fetch_error = Some("Failed to fetch superheroes.".to_string());
        assert_eq!(remote_list_body(&snapshot), ListBody::Blank);
    }
}
