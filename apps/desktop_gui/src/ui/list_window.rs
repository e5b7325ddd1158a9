//! Fixed-height row windowing: only the rows intersecting the viewport (plus overscan)
//! are laid out.

use std::ops::Range;

use eframe::egui;

pub const ROW_HEIGHT: f32 = 92.0;
pub const OVERSCAN_ROWS: usize = 10;

/// Range of row indices to lay out for a viewport starting `viewport_top` points into
/// the content and `viewport_height` points tall.
pub fn visible_rows(
    row_count: usize,
    row_height: f32,
    viewport_top: f32,
    viewport_height: f32,
    overscan: usize,
) -> Range<usize> {
    if row_count == 0 || row_height <= 0.0 {
        return 0..0;
    }
    let top = viewport_top.max(0.0);
    let bottom = top + viewport_height.max(0.0);
    let first = (top / row_height).floor() as usize;
    let last = (bottom / row_height).ceil() as usize;

    let start = first.saturating_sub(overscan).min(row_count);
    let end = last.saturating_add(overscan).min(row_count);
    start..end
}

pub fn ui_in_rect(ui: &mut egui::Ui, rect: egui::Rect, add: impl FnOnce(&mut egui::Ui)) {
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect)
            .layout(egui::Layout::top_down(egui::Align::Min)),
    );
    child.set_clip_rect(rect.intersect(ui.clip_rect()));
    add(&mut child);
}

/// Scrollable list of `items`; `add_row` is called for visible rows only.
pub fn show_windowed<T>(
    ui: &mut egui::Ui,
    id_salt: impl std::hash::Hash,
    items: &[T],
    row_height: f32,
    mut add_row: impl FnMut(&mut egui::Ui, usize, &T),
) {
    egui::ScrollArea::vertical()
        .id_salt(id_salt)
        .auto_shrink([false, false])
        .show_viewport(ui, |ui, viewport| {
            let origin = ui.min_rect().min;
            let width = ui.available_width();
            ui.set_height(row_height * items.len() as f32);

            let rows = visible_rows(
                items.len(),
                row_height,
                viewport.min.y,
                viewport.height(),
                OVERSCAN_ROWS,
            );
            for index in rows {
                let top_left = origin + egui::vec2(0.0, index as f32 * row_height);
                let rect = egui::Rect::from_min_size(top_left, egui::vec2(width, row_height));
                ui_in_rect(ui, rect, |ui| add_row(ui, index, &items[index]));
            }
        });
}
