//! 3D viewport: input handling and rebuild policy
//!
//! One gesture at a time: a press that lands on a furniture node drags that
//! node in the horizontal plane; a press anywhere else orbits the camera.
//! The scene is regenerated wholesale whenever the store changed.

use macroquad::prelude::*;

use crate::scene::SceneStore;
use crate::ui::{Rect, UiContext};

use super::camera::OrbitCamera;
use super::projector::{project_scene, NodeTag, Scene3};
use super::render;

/// Screen-to-world factor for dragging furniture nodes.
const FURNITURE_DRAG_SPEED: f32 = 0.5;
/// Degrees of rotation per pixel of orbit drag.
const ORBIT_SPEED: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Idle,
    Orbiting,
    /// Dragging the node at this index in the scene arena.
    DraggingFurniture(usize),
}

pub struct ViewState {
    pub camera: OrbitCamera,
    pub scene: Scene3,
    built_revision: u64,
    gesture: Gesture,
    last_mouse: (f32, f32),
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            camera: OrbitCamera::new(),
            scene: Scene3::empty(),
            built_revision: 0,
            gesture: Gesture::Idle,
            last_mouse: (0.0, 0.0),
        }
    }

    /// Force a rebuild on the next frame (used when toggling into 3D).
    pub fn mark_stale(&mut self) {
        self.built_revision = 0;
    }

    /// Regenerate the node arena if the store moved on. Discards any
    /// transient furniture drags, per the full-rebuild model.
    pub fn sync(&mut self, store: &SceneStore) {
        if self.built_revision != store.revision() {
            self.scene = project_scene(&store.snapshot());
            self.built_revision = store.revision();
            self.gesture = Gesture::Idle;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the nearest furniture node whose projected bounds contain the
/// pointer. Returns an index into the scene arena.
pub fn pick_furniture(
    scene: &Scene3,
    camera: &OrbitCamera,
    viewport: Rect,
    mx: f32,
    my: f32,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, node) in scene.nodes.iter().enumerate() {
        if !matches!(node.tag, NodeTag::Furniture(_)) {
            continue;
        }

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        let mut depth = f32::MAX;
        let mut visible = true;
        for corner in node.aabb().corners() {
            match camera.project(corner, viewport) {
                Some(p) => {
                    min_x = min_x.min(p.x);
                    min_y = min_y.min(p.y);
                    max_x = max_x.max(p.x);
                    max_y = max_y.max(p.y);
                    depth = depth.min(p.depth);
                }
                None => {
                    visible = false;
                    break;
                }
            }
        }
        if !visible {
            continue;
        }

        if mx >= min_x && mx <= max_x && my >= min_y && my <= max_y {
            if best.map_or(true, |(_, best_depth)| depth < best_depth) {
                best = Some((index, depth));
            }
        }
    }
    best.map(|(index, _)| index)
}

/// Draw the 3D viewport and process its input for this frame.
pub fn draw_viewport(ctx: &mut UiContext, viewport: Rect, store: &SceneStore, view: &mut ViewState) {
    view.sync(store);

    let mouse = (ctx.mouse.x, ctx.mouse.y);
    let inside = ctx.mouse.inside(&viewport);

    if ctx.mouse.left_pressed && inside {
        view.gesture = match pick_furniture(&view.scene, &view.camera, viewport, mouse.0, mouse.1) {
            Some(index) => Gesture::DraggingFurniture(index),
            None => Gesture::Orbiting,
        };
        view.last_mouse = mouse;
    }

    if ctx.mouse.left_down {
        let dx = mouse.0 - view.last_mouse.0;
        let dy = mouse.1 - view.last_mouse.1;
        match view.gesture {
            Gesture::DraggingFurniture(index) => {
                if let Some(node) = view.scene.nodes.get_mut(index) {
                    node.drag_offset.x += dx * FURNITURE_DRAG_SPEED;
                    node.drag_offset.z += dy * FURNITURE_DRAG_SPEED;
                }
            }
            Gesture::Orbiting => {
                view.camera.rotate(dx * ORBIT_SPEED, dy * ORBIT_SPEED);
            }
            Gesture::Idle => {}
        }
        view.last_mouse = mouse;
    }

    if ctx.mouse.left_released {
        view.gesture = Gesture::Idle;
    }

    if inside && ctx.mouse.scroll != 0.0 {
        view.camera.zoom(ctx.mouse.scroll);
    }

    // Clip to the viewport while painting the scene.
    let dpi = screen_dpi_scale();
    gl_use_default_material();
    unsafe {
        get_internal_gl().quad_gl.scissor(Some((
            (viewport.x * dpi) as i32,
            (viewport.y * dpi) as i32,
            (viewport.w * dpi) as i32,
            (viewport.h * dpi) as i32,
        )));
    }

    render::draw_scene(&view.scene, &view.camera, viewport);

    unsafe {
        get_internal_gl().quad_gl.scissor(None);
    }

    draw_text(
        "Drag to orbit, scroll to zoom. Dragging furniture moves it.",
        viewport.x + 10.0,
        viewport.bottom() - 10.0,
        14.0,
        Color::from_rgba(60, 60, 70, 255),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Furniture, Rgba, Room, SceneStore};

    fn store_with_furniture() -> SceneStore {
        let mut store = SceneStore::new(600.0, 400.0);
        let mut bed = Furniture::new("Bed", 60.0, 40.0, Rgba::LIGHT_BLUE);
        // Dead center of the anchor: world origin.
        bed.set_position(300.0, 200.0);
        store.add_furniture(bed);
        store
    }

    #[test]
    fn sync_rebuilds_only_when_the_store_changed() {
        let store = store_with_furniture();
        let mut view = ViewState::new();
        view.sync(&store);
        let first = view.scene.clone();
        view.sync(&store);
        assert_eq!(view.scene, first);
    }

    #[test]
    fn rebuild_discards_furniture_drag_offsets() {
        let mut store = store_with_furniture();
        let mut view = ViewState::new();
        view.sync(&store);
        view.scene.nodes[0].drag_offset.x = 42.0;

        store.add_room(Room::new("Bedroom 1", 100.0, 80.0, Rgba::LIGHT_BLUE));
        view.sync(&store);
        for node in &view.scene.nodes {
            assert_eq!(node.drag_offset, macroquad::math::Vec3::ZERO);
        }
    }

    #[test]
    fn mark_stale_forces_a_rebuild() {
        let store = store_with_furniture();
        let mut view = ViewState::new();
        view.sync(&store);
        view.scene.nodes[0].drag_offset.z = 7.0;
        view.mark_stale();
        view.sync(&store);
        assert_eq!(view.scene.nodes[0].drag_offset, macroquad::math::Vec3::ZERO);
    }

    #[test]
    fn picking_hits_furniture_under_the_pointer() {
        let store = store_with_furniture();
        let mut view = ViewState::new();
        view.sync(&store);

        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        // The bed sits at the world origin; project its node center.
        let center = view.scene.nodes[0].aabb().center();
        let p = view.camera.project(center, viewport).unwrap();
        assert_eq!(
            pick_furniture(&view.scene, &view.camera, viewport, p.x, p.y),
            Some(0)
        );
    }

    #[test]
    fn picking_misses_empty_space() {
        let store = store_with_furniture();
        let mut view = ViewState::new();
        view.sync(&store);
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(
            pick_furniture(&view.scene, &view.camera, viewport, 5.0, 5.0),
            None
        );
    }
}
