use arboard::Clipboard;
use client_core::{FormField, LocalRoster, PageLocation, RosterSnapshot};
use crossbeam_channel::{bounded, Receiver, Sender};
use eframe::egui;
use shared::domain::Superhero;

use crate::backend_bridge::{self, commands::BackendCommand};
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::form::FormState;
use crate::ui::list_window::{show_windowed, ROW_HEIGHT};
use crate::ui::theme::{DisplayMode, Palette, PersistedGuiSettings, SETTINGS_STORAGE_KEY};
use crate::ui::view_state::{
    list_body, remote_list_body, ListBody, EMPTY_HINT, EMPTY_TITLE, SKELETON_ROWS,
};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_base_url: String,
    /// Location given on the command line; wins over the persisted one.
    pub location: Option<PageLocation>,
    pub configured_location: PageLocation,
    pub local: bool,
}

impl StartupConfig {
    pub fn resolve_location(&self, persisted: Option<&str>) -> PageLocation {
        if let Some(location) = &self.location {
            return location.clone();
        }
        persisted
            .and_then(|raw| PageLocation::parse(raw).ok())
            .unwrap_or_else(|| self.configured_location.clone())
    }
}

struct RemoteState {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    snapshot: RosterSnapshot,
    mounted: bool,
}

enum RosterMode {
    Local(LocalRoster),
    Remote(RemoteState),
}

pub struct HeroesApp {
    mode: RosterMode,
    form: FormState,
    location: PageLocation,
    display_mode: DisplayMode,
    applied_display_mode: Option<DisplayMode>,
    status: String,
    status_banner: Option<UiError>,
}

impl HeroesApp {
    /// Builds the app and, unless running locally, starts the backend worker.
    pub fn bootstrap(startup: StartupConfig, persisted: Option<PersistedGuiSettings>) -> Self {
        let persisted = persisted.unwrap_or_default();
        let location = startup.resolve_location(persisted.last_location.as_deref());

        let mode = if startup.local {
            tracing::info!("running with a local in-memory roster");
            RosterMode::Local(LocalRoster::new())
        } else {
            let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
            let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
            backend_bridge::runtime::launch(
                startup.api_base_url.clone(),
                location.sort_order(),
                cmd_rx,
                ui_tx,
            );
            RosterMode::Remote(RemoteState::new(cmd_tx, ui_rx, &location))
        };

        Self::new(mode, location, persisted.display_mode)
    }

    fn new(mode: RosterMode, mut location: PageLocation, display_mode: DisplayMode) -> Self {
        if matches!(mode, RosterMode::Remote(_)) {
            location.set_sort_order(location.sort_order());
        }
        Self {
            mode,
            form: FormState::default(),
            location,
            display_mode,
            applied_display_mode: None,
            status: String::new(),
            status_banner: None,
        }
    }

    fn mount(&mut self) {
        if let RosterMode::Remote(remote) = &mut self.mode {
            if !remote.mounted {
                remote.mounted = true;
                dispatch_backend_command(&remote.cmd_tx, BackendCommand::Refresh, &mut self.status);
            }
        }
    }

    fn process_ui_events(&mut self) {
        let RosterMode::Remote(remote) = &mut self.mode else {
            return;
        };
        let events: Vec<UiEvent> = remote.ui_rx.try_iter().collect();
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Roster(snapshot) => {
                if let RosterMode::Remote(remote) = &mut self.mode {
                    if snapshot.fetch_error != remote.snapshot.fetch_error {
                        if let Some(message) = snapshot.fetch_error.as_deref() {
                            let err = UiError::from_message(UiErrorContext::FetchRoster, message);
                            self.status = format!("{}: {}", err_label(err.category()), err.message());
                        }
                    }
                    remote.snapshot = snapshot;
                }
            }
            UiEvent::OrderChanged(order) => {
                self.location.set_sort_order(order);
            }
            UiEvent::HeroCreated(hero) => {
                self.status = format!("Added {}", hero.name);
                self.form.reset();
            }
            UiEvent::CreateFailed(err) => {
                tracing::warn!(category = ?err.category(), "create failed: {}", err.message());
                self.status = format!("{}: {}", err_label(err.category()), err.message());
            }
            UiEvent::Error(err) => {
                tracing::error!(context = ?err.context(), "{}", err.message());
                self.status_banner = Some(err);
            }
        }
    }

    fn submit_form(&mut self) {
        let Some(hero) = self.form.try_submit() else {
            return;
        };
        match &mut self.mode {
            RosterMode::Local(roster) => {
                self.status = format!("Added {}", hero.name);
                roster.append(hero);
                self.form.reset();
            }
            RosterMode::Remote(remote) => {
                dispatch_backend_command(
                    &remote.cmd_tx,
                    BackendCommand::Create { hero },
                    &mut self.status,
                );
            }
        }
    }

    fn toggle_sort(&mut self) {
        let RosterMode::Remote(remote) = &self.mode else {
            return;
        };
        let order = self.location.sort_order().toggle();
        self.location.set_sort_order(order);
        dispatch_backend_command(&remote.cmd_tx, BackendCommand::SetOrder { order }, &mut self.status);
    }

    fn copy_link(&mut self) {
        let result = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(self.location.to_string()));
        match result {
            Ok(()) => self.status = "Link copied to clipboard".to_string(),
            Err(err) => {
                self.status_banner = Some(UiError::from_message(
                    UiErrorContext::General,
                    format!("Could not copy link: {err}"),
                ));
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_display_mode == Some(self.display_mode) {
            return;
        }
        ctx.set_visuals(self.display_mode.visuals());
        self.applied_display_mode = Some(self.display_mode);
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(111, 53, 53))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "{}: {}",
                                err_label(banner.category()),
                                banner.message()
                            ))
                            .color(egui::Color32::WHITE),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_location_bar(&mut self, ctx: &egui::Context, palette: Palette) {
        egui::TopBottomPanel::top("location_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Location").color(palette.muted_text));
                ui.monospace(self.location.as_str());
                if ui.button("Copy link").clicked() {
                    self.copy_link();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.status).color(palette.muted_text));
                });
            });
            self.show_status_banner(ui);
            ui.add_space(4.0);
        });
    }

    fn show_form_panel(&mut self, ctx: &egui::Context, palette: Palette) {
        egui::SidePanel::left("hero_form")
            .resizable(false)
            .exact_width(340.0)
            .frame(
                egui::Frame::NONE
                    .fill(palette.card_background)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::same(20)),
            )
            .show(ctx, |ui| {
                if let RosterMode::Remote(remote) = &self.mode {
                    if let Some(message) = remote.snapshot.create_error.as_deref() {
                        error_banner(ui, palette, message);
                        ui.add_space(12.0);
                    }
                }

                let mut submit = false;
                for (field, hint) in [
                    (FormField::Name, "Superhero Name"),
                    (FormField::Superpower, "Superpower"),
                    (FormField::HumilityScore, "1-10"),
                ] {
                    ui.label(egui::RichText::new(field.label()).color(palette.accent));
                    let response = ui.add(
                        egui::TextEdit::singleline(self.form.field_mut(field))
                            .hint_text(hint)
                            .desired_width(f32::INFINITY),
                    );
                    if response.changed() {
                        self.form.after_edit(field);
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                    if let Some(message) = self.form.error(field) {
                        ui.label(
                            egui::RichText::new(message)
                                .color(palette.field_error)
                                .small(),
                        );
                    }
                    ui.add_space(14.0);
                }

                let creating = matches!(&self.mode, RosterMode::Remote(remote) if remote.snapshot.create_in_flight);
                let add = egui::Button::new(
                    egui::RichText::new("Add Superhero").color(egui::Color32::WHITE),
                )
                .fill(palette.accent)
                .min_size(egui::vec2(ui.available_width(), 36.0));
                if ui.add_enabled(!creating, add).clicked() {
                    submit = true;
                }
                ui.add_space(10.0);
                let toggle = egui::Button::new("Toggle Theme")
                    .min_size(egui::vec2(ui.available_width(), 36.0));
                if ui.add(toggle).clicked() {
                    self.display_mode = self.display_mode.toggle();
                }

                if submit {
                    self.submit_form();
                }
            });
    }

    fn show_list_panel(&mut self, ctx: &egui::Context, palette: Palette) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::NONE
                .fill(palette.card_background)
                .corner_radius(6.0)
                .inner_margin(egui::Margin::same(20))
                .show(ui, |ui| {
                    ui.set_min_size(ui.available_size());
                    let mut toggle_sort = false;
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new("Superhero List")
                                .size(20.0)
                                .strong()
                                .color(palette.accent),
                        );
                        if matches!(self.mode, RosterMode::Remote(_)) {
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let label = format!("Sort: {}", self.location.sort_order().label());
                                let button = egui::Button::new(
                                    egui::RichText::new(label).color(egui::Color32::WHITE),
                                )
                                .fill(palette.accent);
                                if ui.add(button).clicked() {
                                    toggle_sort = true;
                                }
                            });
                        }
                    });
                    ui.add_space(12.0);

                    let (heroes, body) = match &self.mode {
                        RosterMode::Local(roster) => {
                            (roster.entries(), list_body(false, roster.len(), false))
                        }
                        RosterMode::Remote(remote) => {
                            let snapshot = &remote.snapshot;
                            if let Some(message) = snapshot.fetch_error.as_deref() {
                                error_banner(ui, palette, message);
                                ui.add_space(12.0);
                            }
                            (snapshot.heroes.as_slice(), remote_list_body(snapshot))
                        }
                    };

                    match body {
                        ListBody::Loading => show_skeleton_rows(ui, palette),
                        ListBody::Populated => {
                            show_windowed(ui, "hero_rows", heroes, ROW_HEIGHT, |ui, _, hero| {
                                show_hero_row(ui, palette, hero);
                            });
                        }
                        ListBody::Empty => {
                            ui.add_space(ui.available_height() * 0.35);
                            ui.vertical_centered(|ui| {
                                ui.label(egui::RichText::new(EMPTY_TITLE).color(palette.muted_text));
                                ui.add_space(8.0);
                                ui.label(egui::RichText::new(EMPTY_HINT).color(palette.muted_text));
                            });
                        }
                        ListBody::Blank => {}
                    }

                    if toggle_sort {
                        self.toggle_sort();
                    }
                });
        });
    }
}

impl RemoteState {
    fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, location: &PageLocation) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            snapshot: RosterSnapshot {
                order: location.sort_order(),
                ..RosterSnapshot::default()
            },
            mounted: false,
        }
    }
}

fn error_banner(ui: &mut egui::Ui, palette: Palette, message: &str) {
    egui::Frame::NONE
        .fill(palette.banner_fill)
        .corner_radius(4.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(message).color(palette.banner_text));
        });
}

fn show_hero_row(ui: &mut egui::Ui, palette: Palette, hero: &Superhero) {
    ui.add_space(8.0);
    ui.label(
        egui::RichText::new(format!("Name: {}", hero.name))
            .size(17.0)
            .strong()
            .color(palette.accent),
    );
    ui.label(egui::RichText::new(format!("Super Power: {}", hero.superpower)).color(palette.muted_text));
    ui.label(format!("Humility: {}", hero.humility_score));
    let rect = ui.max_rect();
    ui.painter().hline(
        rect.x_range(),
        rect.bottom() - 0.5,
        egui::Stroke::new(1.0, palette.row_divider),
    );
}

fn show_skeleton_rows(ui: &mut egui::Ui, palette: Palette) {
    let time = ui.input(|i| i.time);
    let pulse = 0.55 + 0.45 * ((time * 3.0).sin() as f32 * 0.5 + 0.5);
    let fill = palette.skeleton.gamma_multiply(pulse);
    let width = ui.available_width();

    for _ in 0..SKELETON_ROWS {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, ROW_HEIGHT), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let left = rect.left() + 12.0;
        let mut top = rect.top() + 14.0;
        for (fraction, height) in [(1.0 / 3.0, 16.0), (0.5, 12.0), (0.25, 12.0)] {
            let bar = egui::Rect::from_min_size(
                egui::pos2(left, top),
                egui::vec2((rect.width() - 24.0) * fraction, height),
            );
            painter.rect_filled(bar, 4.0, fill);
            top += height + 8.0;
        }
        painter.hline(
            rect.x_range(),
            rect.bottom() - 0.5,
            egui::Stroke::new(1.0, palette.row_divider),
        );
    }
    ui.ctx().request_repaint();
}

impl eframe::App for HeroesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.mount();
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        let palette = self.display_mode.palette();
        self.show_location_bar(ctx, palette);
        self.show_form_panel(ctx, palette);
        self.show_list_panel(ctx, palette);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedGuiSettings {
            display_mode: self.display_mode,
            last_location: Some(self.location.to_string()),
        };
        if let Some(serialized) = settings.to_json() {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
