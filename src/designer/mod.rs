//! Designer screen
//!
//! Layout: palette column on the right, blueprint canvas (or the 3D
//! viewport) in the center, action buttons and a status bar at the bottom.

mod canvas;
mod palette;
mod report;
mod state;

pub use canvas::{draw_canvas, pointer_moved, pointer_pressed, pointer_released};
pub use palette::{centered_position, draw_palette, room_palette, RoomSpec};
pub use report::{save_png, write_report, ExportError};
pub use state::*;

use macroquad::prelude::*;

use crate::auth;
use crate::ui::{self, Rect, UiContext};
use crate::view3d;

const PALETTE_WIDTH: f32 = 250.0;
const BUTTON_BAR_HEIGHT: f32 = 54.0;
const STATUS_BAR_HEIGHT: f32 = 26.0;

/// Draw the whole designer screen for this frame.
pub fn draw_designer(ctx: &mut UiContext, area: Rect, state: &mut DesignerState) {
    let status_bar = Rect::new(area.x, area.bottom() - STATUS_BAR_HEIGHT, area.w, STATUS_BAR_HEIGHT);
    let button_bar = Rect::new(
        area.x,
        status_bar.y - BUTTON_BAR_HEIGHT,
        area.w,
        BUTTON_BAR_HEIGHT,
    );
    let palette_rect = Rect::new(
        area.right() - PALETTE_WIDTH,
        area.y,
        PALETTE_WIDTH,
        button_bar.y - area.y,
    );
    let center = Rect::new(area.x, area.y, area.w - PALETTE_WIDTH, button_bar.y - area.y);

    // Center content: blueprint sheet or the 3D preview.
    let mut canvas_rect = Rect::default();
    if state.show_3d {
        let viewport = Rect::new(
            center.x + 10.0,
            center.y + 10.0,
            center.w - 20.0,
            center.h - 20.0,
        );
        let DesignerState { store, view3d: view, .. } = state;
        view3d::draw_viewport(ctx, viewport, store, view);
    } else {
        let title = "House Blueprint";
        let dims = measure_text(title, None, 20, 1.0);
        draw_text(
            title,
            center.center_x() - dims.width * 0.5,
            center.y + 30.0,
            20.0,
            ui::TEXT_COLOR,
        );

        canvas_rect = Rect::new(
            center.x + (center.w - CANVAS_WIDTH) * 0.5,
            center.y + 44.0 + (center.h - 44.0 - CANVAS_HEIGHT) * 0.5,
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
        );
        draw_canvas(ctx, canvas_rect, state);
    }

    draw_palette(ctx, palette_rect, state);
    draw_buttons(ctx, button_bar, canvas_rect, state);
    draw_status_bar(status_bar, state);
}

fn draw_buttons(ctx: &mut UiContext, bar: Rect, canvas_rect: Rect, state: &mut DesignerState) {
    draw_rectangle(bar.x, bar.y, bar.w, bar.h, Color::from_rgba(224, 224, 224, 255));

    let toggle_label = if state.show_3d { "Show 2D View" } else { "Show 3D View" };
    let labels = ["Save Blueprint", "Generate Report", "Clear All", toggle_label];
    let widths = [140.0, 150.0, 100.0, 130.0];
    let gap = 15.0;
    let total: f32 = widths.iter().sum::<f32>() + gap * (labels.len() as f32 - 1.0);
    let mut x = bar.center_x() - total * 0.5;
    let y = bar.y + (bar.h - 36.0) * 0.5;

    let mut clicked: Option<usize> = None;
    for (i, (label, w)) in labels.iter().zip(widths).enumerate() {
        if ui::button(ctx, Rect::new(x, y, w, 36.0), label) {
            clicked = Some(i);
        }
        x += w + gap;
    }

    match clicked {
        Some(0) => save_blueprint(state, canvas_rect),
        Some(1) => generate_report(state, canvas_rect),
        Some(2) => {
            state.store.clear_all();
            auth::log_usage(&state.session.username, &state.session.role, "Cleared blueprint");
            state.set_status("Blueprint cleared", 2.0);
        }
        Some(3) => {
            state.show_3d = !state.show_3d;
            if state.show_3d {
                // Toggling in always regenerates from the current snapshot.
                state.view3d.mark_stale();
            }
        }
        _ => {}
    }
}

fn draw_status_bar(bar: Rect, state: &DesignerState) {
    draw_rectangle(bar.x, bar.y, bar.w, bar.h, Color::from_rgba(208, 208, 208, 255));
    if let Some(message) = state.status() {
        draw_text(message, bar.x + 10.0, bar.y + 18.0, 14.0, ui::TEXT_COLOR);
    }
    let who = format!("{} ({})", state.session.username, state.session.role);
    let dims = measure_text(&who, None, 14, 1.0);
    draw_text(&who, bar.right() - dims.width - 10.0, bar.y + 18.0, 14.0, ui::TEXT_COLOR);
}

/// Capture the canvas from the frame it was just drawn into and write it
/// out as a PNG. Returns the chosen path when something was written.
#[cfg(not(target_arch = "wasm32"))]
fn export_blueprint_png(
    state: &mut DesignerState,
    canvas_rect: Rect,
) -> Option<std::path::PathBuf> {
    if state.show_3d {
        state.set_status("Switch to the 2D view to export the blueprint", 3.0);
        return None;
    }

    let path = report::prompt_save_path("Save Blueprint", "PNG Image", "png", "blueprint.png")?;
    let (pixels, w, h) = report::grab_region(canvas_rect);
    match report::save_png(&path, &pixels, w, h) {
        Ok(()) => Some(path),
        Err(e) => {
            state.set_status(&format!("Error saving blueprint: {}", e), 5.0);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_blueprint(state: &mut DesignerState, canvas_rect: Rect) {
    if let Some(path) = export_blueprint_png(state, canvas_rect) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        auth::log_usage(
            &state.session.username,
            &state.session.role,
            &format!("Saved blueprint to {}", name),
        );
        state.set_status("Blueprint saved successfully!", 3.0);
    }
}

#[cfg(target_arch = "wasm32")]
fn save_blueprint(state: &mut DesignerState, _canvas_rect: Rect) {
    state.set_status("Saving is not available in the browser", 3.0);
}

#[cfg(not(target_arch = "wasm32"))]
fn generate_report(state: &mut DesignerState, canvas_rect: Rect) {
    auth::log_usage(&state.session.username, &state.session.role, "Generated report");

    // The report references the blueprint image, so that is saved first;
    // canceling either dialog aborts without touching anything.
    let Some(image_path) = export_blueprint_png(state, canvas_rect) else {
        return;
    };
    let Some(report_path) =
        report::prompt_save_path("Save Report", "Text Report", "txt", "report.txt")
    else {
        return;
    };

    let snapshot = state.store.snapshot();
    match report::write_report(
        &report_path,
        &state.config,
        &state.session,
        &snapshot,
        Some(&image_path),
    ) {
        Ok(()) => state.set_status(&format!("Report saved to {}", report_path.display()), 3.0),
        Err(e) => state.set_status(&format!("Error generating report: {}", e), 5.0),
    }
}

#[cfg(target_arch = "wasm32")]
fn generate_report(state: &mut DesignerState, _canvas_rect: Rect) {
    state.set_status("Reports are not available in the browser", 3.0);
}
