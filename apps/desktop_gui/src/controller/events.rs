//! Backend-to-UI events and error modeling for the desktop roster.

use client_core::{RosterEvent, RosterSnapshot};
use shared::domain::{SortOrder, Superhero};

pub enum UiEvent {
    Info(String),
    Roster(RosterSnapshot),
    OrderChanged(SortOrder),
    HeroCreated(Superhero),
    CreateFailed(UiError),
    Error(UiError),
}

impl From<RosterEvent> for UiEvent {
    fn from(event: RosterEvent) -> Self {
        match event {
            RosterEvent::Updated(snapshot) => UiEvent::Roster(snapshot),
            RosterEvent::OrderChanged(order) => UiEvent::OrderChanged(order),
            RosterEvent::Created(hero) => UiEvent::HeroCreated(hero),
            RosterEvent::CreateFailed(message) => {
                UiEvent::CreateFailed(UiError::from_message(UiErrorContext::CreateHero, message))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchRoster,
    CreateHero,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("required")
            || message_lower.contains("must be")
            || message_lower.contains("cannot be")
            || message_lower.contains("invalid")
            || message_lower.contains("already exists")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("failed to fetch")
            || message_lower.contains("error adding")
            || message_lower.contains("connection")
            || message_lower.contains("timed out")
            || message_lower.contains("unreachable")
            || message_lower.contains("network")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue is full")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Rejected",
        UiErrorCategory::Transport => "Network error",
        UiErrorCategory::Unknown => "Error",
    }
}
