//! Blueprint canvas: pointer interaction + 2D rendering
//!
//! The gesture logic lives in three plain functions over canvas-local
//! coordinates so the click/drag/promote behavior is testable without a
//! window. `draw_canvas` feeds them from the frame's mouse state and then
//! repaints the store in the fixed order structures -> rooms -> furniture.

use macroquad::prelude::*;

use crate::scene::Rgba;
use crate::ui::{Rect, UiContext};

use super::state::{DesignerState, CLICK_THRESHOLD};

/// Pointer pressed at canvas-local (x, y): pick a candidate item and anchor
/// the gesture. Furniture beats rooms beats structures; within a category
/// the most recently added (topmost) item wins.
pub fn pointer_pressed(state: &mut DesignerState, x: f32, y: f32) {
    state.selected = state.store.hit_test(x, y);
    state.drag_anchor = (x, y);
    state.last_mouse = (x, y);
}

/// Pointer moved while pressed: translate the selection by the delta since
/// the last event. No clamping; items may leave the canvas.
pub fn pointer_moved(state: &mut DesignerState, x: f32, y: f32) {
    if let Some(slot) = state.selected {
        let dx = x - state.last_mouse.0;
        let dy = y - state.last_mouse.1;
        if dx != 0.0 || dy != 0.0 {
            state.store.translate(slot, dx, dy);
        }
    }
    state.last_mouse = (x, y);
}

/// Pointer released: a displacement under the threshold on both axes is a
/// click and promotes the item to the top of its sequence; a real drag
/// stands as-is. Selection clears either way.
pub fn pointer_released(state: &mut DesignerState, x: f32, y: f32) {
    if let Some(slot) = state.selected {
        let moved_x = (x - state.drag_anchor.0).abs();
        let moved_y = (y - state.drag_anchor.1).abs();
        if moved_x < CLICK_THRESHOLD && moved_y < CLICK_THRESHOLD {
            state.store.promote(slot);
        }
    }
    state.selected = None;
}

/// Draw the canvas and run its interaction for this frame.
pub fn draw_canvas(ctx: &mut UiContext, rect: Rect, state: &mut DesignerState) {
    // Canvas-local pointer position.
    let cx = ctx.mouse.x - rect.x;
    let cy = ctx.mouse.y - rect.y;

    if ctx.mouse.left_pressed && ctx.mouse.inside(&rect) {
        pointer_pressed(state, cx, cy);
    } else if ctx.mouse.left_down && state.selected.is_some() {
        // Keep dragging even when the pointer leaves the canvas.
        pointer_moved(state, cx, cy);
    }
    if ctx.mouse.left_released {
        pointer_released(state, cx, cy);
    }

    // White sheet with a hairline border.
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, WHITE);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, Color::from_rgba(204, 204, 204, 255));

    // Clip item drawing to the sheet; dragged items may extend past it.
    let dpi = screen_dpi_scale();
    gl_use_default_material();
    unsafe {
        get_internal_gl().quad_gl.scissor(Some((
            (rect.x * dpi) as i32,
            (rect.y * dpi) as i32,
            (rect.w * dpi) as i32,
            (rect.h * dpi) as i32,
        )));
    }

    paint_scene(rect, state);

    unsafe {
        get_internal_gl().quad_gl.scissor(None);
    }
}

/// Fixed draw order: structures, then rooms, then furniture, so furniture
/// is never occluded by the larger items.
fn paint_scene(rect: Rect, state: &DesignerState) {
    let ox = rect.x;
    let oy = rect.y;

    for structure in state.store.structures() {
        if !structure.fill.is_transparent() {
            draw_rectangle(
                ox + structure.x,
                oy + structure.y,
                structure.width,
                structure.height,
                structure.fill.to_color(),
            );
        }
        if let Some(stroke) = structure.stroke {
            draw_rectangle_lines(
                ox + structure.x,
                oy + structure.y,
                structure.width,
                structure.height,
                structure.stroke_width,
                stroke.to_color(),
            );
        }
        draw_label(&structure.name, ox + structure.x, oy + structure.y);
    }

    for room in state.store.rooms() {
        draw_rectangle(ox + room.x, oy + room.y, room.width, room.height, room.color.to_color());
        draw_rectangle_lines(
            ox + room.x,
            oy + room.y,
            room.width,
            room.height,
            1.0,
            Rgba::BLACK.to_color(),
        );
        draw_label(&room.name, ox + room.x, oy + room.y);
    }

    for item in state.store.furniture() {
        draw_rectangle(ox + item.x, oy + item.y, item.width, item.height, item.color.to_color());
        draw_rectangle_lines(
            ox + item.x,
            oy + item.y,
            item.width,
            item.height,
            1.0,
            Rgba::BLACK.to_color(),
        );
        draw_label(&item.kind, ox + item.x, oy + item.y);
    }
}

fn draw_label(text: &str, item_x: f32, item_y: f32) {
    draw_text(text, item_x + 5.0, item_y + 15.0, 14.0, Rgba::BLACK.to_color());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{HouseConfig, Session};
    use crate::scene::{Furniture, ItemSlot, Room, Structure};

    fn designer() -> DesignerState {
        DesignerState::new(
            HouseConfig {
                width: 20,
                height: 15,
                bedrooms: 2,
                bathrooms: 1,
                kitchens: 1,
                garden: false,
            },
            Session {
                username: "ada".to_string(),
                role: "Designer".to_string(),
            },
        )
    }

    fn add_furniture(state: &mut DesignerState, kind: &str, x: f32, y: f32) {
        let mut item = Furniture::new(kind, 60.0, 40.0, Rgba::LIGHT_BLUE);
        item.set_position(x, y);
        state.store.add_furniture(item);
    }

    #[test]
    fn pressing_empty_space_selects_nothing() {
        let mut state = designer();
        pointer_pressed(&mut state, 2.0, 2.0); // outside the outline
        assert_eq!(state.selected, None);
        pointer_released(&mut state, 2.0, 2.0);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn drag_moves_by_the_exact_delta_and_keeps_order() {
        let mut state = designer();
        add_furniture(&mut state, "Bed", 100.0, 100.0);
        add_furniture(&mut state, "Sofa", 300.0, 300.0);

        pointer_pressed(&mut state, 110.0, 110.0);
        assert_eq!(state.selected, Some(ItemSlot::Furniture(0)));
        pointer_moved(&mut state, 150.0, 90.0);
        pointer_moved(&mut state, 180.0, 60.0);
        pointer_released(&mut state, 180.0, 60.0);

        // Moved by the total delta (70, -50), no promotion on a real drag.
        assert_eq!(state.store.furniture()[0].x, 170.0);
        assert_eq!(state.store.furniture()[0].y, 50.0);
        assert_eq!(state.store.furniture()[0].kind, "Bed");
        assert_eq!(state.selected, None);
    }

    #[test]
    fn click_without_drag_promotes_to_top() {
        let mut state = designer();
        add_furniture(&mut state, "Bed", 100.0, 100.0);
        add_furniture(&mut state, "Sofa", 200.0, 100.0);
        add_furniture(&mut state, "Table", 300.0, 100.0);

        // Click the first-added item with sub-threshold jitter.
        pointer_pressed(&mut state, 110.0, 110.0);
        pointer_moved(&mut state, 112.0, 111.0);
        pointer_released(&mut state, 112.0, 111.0);

        let kinds: Vec<&str> = state.store.furniture().iter().map(|f| f.kind.as_str()).collect();
        assert_eq!(kinds, ["Sofa", "Table", "Bed"]);
    }

    #[test]
    fn threshold_is_per_axis() {
        let mut state = designer();
        add_furniture(&mut state, "Bed", 100.0, 100.0);

        // 4.9 on one axis but 5.0 on the other: that is a drag, not a click.
        pointer_pressed(&mut state, 110.0, 110.0);
        pointer_moved(&mut state, 114.9, 115.0);
        pointer_released(&mut state, 114.9, 115.0);
        assert_eq!(state.store.furniture()[0].x, 104.9);
        assert_eq!(state.store.furniture()[0].y, 105.0);
    }

    #[test]
    fn furniture_wins_over_overlapping_room_and_structure() {
        let mut state = designer();
        state.store.add_structure(Structure::new(
            "Surface",
            50.0,
            50.0,
            300.0,
            300.0,
            Rgba::SANDY_BROWN,
        ));
        let mut room = Room::new("Bedroom 1", 200.0, 200.0, Rgba::LIGHT_BLUE);
        room.set_position(60.0, 60.0);
        state.store.add_room(room);
        add_furniture(&mut state, "Chair", 100.0, 100.0);

        pointer_pressed(&mut state, 120.0, 120.0);
        assert_eq!(state.selected, Some(ItemSlot::Furniture(0)));
        pointer_released(&mut state, 120.0, 120.0);
    }

    #[test]
    fn items_may_be_dragged_off_canvas() {
        let mut state = designer();
        add_furniture(&mut state, "Desk", 10.0, 10.0);
        pointer_pressed(&mut state, 20.0, 20.0);
        pointer_moved(&mut state, -200.0, 500.0);
        pointer_released(&mut state, -200.0, 500.0);
        assert_eq!(state.store.furniture()[0].x, -210.0);
        assert_eq!(state.store.furniture()[0].y, 490.0);
    }

    #[test]
    fn selection_is_gesture_scoped() {
        let mut state = designer();
        add_furniture(&mut state, "Bed", 100.0, 100.0);
        pointer_pressed(&mut state, 110.0, 110.0);
        assert!(state.selected.is_some());
        pointer_released(&mut state, 300.0, 300.0);
        assert!(state.selected.is_none());
    }
}
