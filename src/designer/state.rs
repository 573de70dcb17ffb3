//! Designer screen state

use macroquad::time::get_time;

use crate::app::{HouseConfig, Session};
use crate::scene::{Furniture, ItemSlot, Rgba, SceneStore};
use crate::view3d::ViewState;

/// Blueprint canvas size in scene units (canvas pixels).
pub const CANVAS_WIDTH: f32 = 600.0;
pub const CANVAS_HEIGHT: f32 = 400.0;

/// Maximum per-axis displacement for a press/release pair to count as a
/// click (which promotes the item) rather than a drag.
pub const CLICK_THRESHOLD: f32 = 5.0;

/// Structure kinds with a user-adjustable color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Surface,
    Roof,
    Walls,
}

pub struct DesignerState {
    pub store: SceneStore,
    pub config: HouseConfig,
    pub session: Session,

    /// Prototypes cloned into the scene by the furniture palette.
    pub furniture_catalog: Vec<Furniture>,

    /// Active canvas gesture; present only between press and release.
    pub selected: Option<ItemSlot>,
    pub drag_anchor: (f32, f32),
    pub last_mouse: (f32, f32),

    /// Session color choices for the structure palette.
    pub surface_color: Rgba,
    pub roof_color: Rgba,
    pub walls_color: Rgba,
    /// Which structure color picker row is expanded, if any.
    pub open_picker: Option<StructureKind>,

    /// 3D preview toggle and its per-view state.
    pub show_3d: bool,
    pub view3d: ViewState,

    pub palette_scroll: f32,

    /// Status message (shown in the status bar): (message, expiry_time)
    pub status_message: Option<(String, f64)>,
}

impl DesignerState {
    pub fn new(config: HouseConfig, session: Session) -> Self {
        Self {
            store: SceneStore::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            config,
            session,
            furniture_catalog: default_catalog(),
            selected: None,
            drag_anchor: (0.0, 0.0),
            last_mouse: (0.0, 0.0),
            surface_color: Rgba::SANDY_BROWN,
            roof_color: Rgba::DARK_RED,
            walls_color: Rgba::LIGHT_GRAY,
            open_picker: None,
            show_3d: false,
            view3d: ViewState::new(),
            palette_scroll: 0.0,
            status_message: None,
        }
    }

    /// Set a status message that will be displayed for a duration
    pub fn set_status(&mut self, message: &str, duration_secs: f64) {
        let expiry = get_time() + duration_secs;
        self.status_message = Some((message.to_string(), expiry));
    }

    /// Get current status message if not expired
    pub fn status(&self) -> Option<&str> {
        if let Some((msg, expiry)) = &self.status_message {
            if get_time() < *expiry {
                return Some(msg);
            }
        }
        None
    }

    pub fn color_for(&self, kind: StructureKind) -> Rgba {
        match kind {
            StructureKind::Surface => self.surface_color,
            StructureKind::Roof => self.roof_color,
            StructureKind::Walls => self.walls_color,
        }
    }

    pub fn set_color_for(&mut self, kind: StructureKind, color: Rgba) {
        match kind {
            StructureKind::Surface => self.surface_color = color,
            StructureKind::Roof => self.roof_color = color,
            StructureKind::Walls => self.walls_color = color,
        }
    }
}

/// The furniture the palette offers, with per-type default sizes/colors.
fn default_catalog() -> Vec<Furniture> {
    vec![
        Furniture::new("Bed", 60.0, 40.0, Rgba::LIGHT_BLUE),
        Furniture::new("Sofa", 80.0, 40.0, Rgba::LIGHT_CORAL),
        Furniture::new("Table", 60.0, 60.0, Rgba::LIGHT_GREEN),
        Furniture::new("Chair", 30.0, 30.0, Rgba::LIGHT_GOLDENROD),
        Furniture::new("Cabinet", 40.0, 40.0, Rgba::LIGHT_SALMON),
        Furniture::new("Desk", 70.0, 40.0, Rgba::LIGHT_SEA_GREEN),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_projected_type() {
        let kinds: Vec<String> = default_catalog().into_iter().map(|f| f.kind).collect();
        assert_eq!(kinds, ["Bed", "Sofa", "Table", "Chair", "Cabinet", "Desk"]);
    }
}
