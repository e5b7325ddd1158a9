//! UI layer for the roster window: app shell, form state, list windowing, and themes.

pub mod app;
pub mod form;
pub mod list_window;
pub mod theme;
pub mod view_state;

pub use app::{HeroesApp, StartupConfig};
