//! Client core for the superhero roster: form validation, roster state, page location
//! handling and the HTTP client for the roster service.

pub mod api;
mod client;
pub mod config;
pub mod navigation;
pub mod roster;
pub mod validation;

pub use api::{HttpSuperheroApi, SuperheroApi};
pub use client::{RosterClient, RosterEvent, RosterHandle, SubmitOutcome};
pub use navigation::PageLocation;
pub use roster::{FetchApplied, FetchPhase, FetchTicket, LocalRoster, RemoteRoster, RosterSnapshot};
pub use validation::{validate, validate_field, FieldErrors, FormField, SuperheroForm};
