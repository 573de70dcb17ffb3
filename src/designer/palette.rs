//! Item palettes: rooms from the house configuration, the furniture
//! catalog, and structure buttons with per-kind color choices.

use macroquad::prelude::*;

use crate::app::HouseConfig;
use crate::scene::{Furniture, Rgba, Room, Structure};
use crate::ui::{self, Rect, UiContext};

use super::state::{DesignerState, StructureKind, CANVAS_HEIGHT, CANVAS_WIDTH};

/// One room button offered by the palette.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSpec {
    pub label: String,
    pub width: f32,
    pub height: f32,
    pub color: Rgba,
}

/// Colors offered by the structure color pickers.
const SWATCHES: [Rgba; 8] = [
    Rgba::SANDY_BROWN,
    Rgba::DARK_RED,
    Rgba::LIGHT_GRAY,
    Rgba::BURLYWOOD,
    Rgba::LIGHT_BLUE,
    Rgba::LIGHT_GREEN,
    Rgba::PALE_GREEN,
    Rgba::SILVER,
];

/// Default position that centers an item on the canvas.
pub fn centered_position(canvas_w: f32, canvas_h: f32, item_w: f32, item_h: f32) -> (f32, f32) {
    (canvas_w / 2.0 - item_w / 2.0, canvas_h / 2.0 - item_h / 2.0)
}

/// Expand the house configuration into the room palette.
pub fn room_palette(config: &HouseConfig) -> Vec<RoomSpec> {
    let mut specs = Vec::new();
    for i in 1..=config.bedrooms {
        specs.push(RoomSpec {
            label: format!("Bedroom {}", i),
            width: 100.0,
            height: 80.0,
            color: Rgba::LIGHT_BLUE,
        });
    }
    for i in 1..=config.bathrooms {
        specs.push(RoomSpec {
            label: format!("Bathroom {}", i),
            width: 80.0,
            height: 60.0,
            color: Rgba::LIGHT_CORAL,
        });
    }
    for i in 1..=config.kitchens {
        specs.push(RoomSpec {
            label: format!("Kitchen {}", i),
            width: 120.0,
            height: 80.0,
            color: Rgba::LIGHT_GREEN,
        });
    }
    if config.garden {
        specs.push(RoomSpec {
            label: "Garden".to_string(),
            width: config.width as f32 * 20.0,
            height: 40.0,
            color: Rgba::PALE_GREEN,
        });
    }
    specs
}

const BUTTON_H: f32 = 30.0;
const ROW_GAP: f32 = 8.0;
const SECTION_GAP: f32 = 18.0;

/// Draw the palette column and apply any clicks to the store.
pub fn draw_palette(ctx: &mut UiContext, rect: Rect, state: &mut DesignerState) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::from_rgba(240, 240, 240, 255));
    draw_line(rect.x, rect.y, rect.x, rect.bottom(), 1.0, Color::from_rgba(160, 160, 160, 255));

    // Wheel scroll when the pointer is over the column.
    if ctx.mouse.inside(&rect) && ctx.mouse.scroll != 0.0 {
        state.palette_scroll = (state.palette_scroll - ctx.mouse.scroll * 30.0).max(0.0);
    }

    let x = rect.x + 14.0;
    let w = rect.w - 28.0;
    let mut y = rect.y + 12.0 - state.palette_scroll;

    let section = |title: &str, y: &mut f32| {
        draw_text(title, x, *y + 14.0, 18.0, ui::TEXT_COLOR);
        *y += 26.0;
    };

    section("Rooms", &mut y);
    for spec in room_palette(&state.config) {
        let button = Rect::new(x, y, w, BUTTON_H);
        let tooltip = format!("Click to add {} to blueprint", spec.label);
        if ui::palette_button(ctx, button, &spec.label, spec.color.to_color(), &tooltip) {
            let mut room = Room::new(spec.label.clone(), spec.width, spec.height, spec.color);
            let (rx, ry) = centered_position(CANVAS_WIDTH, CANVAS_HEIGHT, spec.width, spec.height);
            room.set_position(rx, ry);
            state.store.add_room(room);
        }
        y += BUTTON_H + ROW_GAP;
    }
    y += SECTION_GAP;

    section("Furniture", &mut y);
    for i in 0..state.furniture_catalog.len() {
        let prototype = state.furniture_catalog[i].clone();
        let button = Rect::new(x, y, w, BUTTON_H);
        let tooltip = format!("Click to add {} to blueprint", prototype.kind);
        if ui::palette_button(ctx, button, &prototype.kind, prototype.color.to_color(), &tooltip) {
            let mut item = Furniture::new(
                prototype.kind.clone(),
                prototype.width,
                prototype.height,
                prototype.color,
            );
            let (fx, fy) =
                centered_position(CANVAS_WIDTH, CANVAS_HEIGHT, prototype.width, prototype.height);
            item.set_position(fx, fy);
            state.store.add_furniture(item);
        }
        y += BUTTON_H + ROW_GAP;
    }
    y += SECTION_GAP;

    section("Structure", &mut y);
    for kind in [StructureKind::Surface, StructureKind::Roof, StructureKind::Walls] {
        let label = match kind {
            StructureKind::Surface => "Surface",
            StructureKind::Roof => "Roof",
            StructureKind::Walls => "Walls",
        };
        let color = state.color_for(kind);
        let button = Rect::new(x, y, w, BUTTON_H);
        let tooltip = format!("Add {} to blueprint", label.to_lowercase());
        if ui::palette_button(ctx, button, label, color.to_color(), &tooltip) {
            state.store.add_structure(make_structure(kind, color));
        }
        y += BUTTON_H + ROW_GAP;
    }

    // Color choosers: a button per kind that expands into a swatch row.
    y += 6.0;
    for kind in [StructureKind::Surface, StructureKind::Roof, StructureKind::Walls] {
        let label = match kind {
            StructureKind::Surface => "Surface Color",
            StructureKind::Roof => "Roof Color",
            StructureKind::Walls => "Walls Color",
        };
        let button = Rect::new(x, y, w, BUTTON_H);
        if ui::button(ctx, button, label) {
            state.open_picker = if state.open_picker == Some(kind) {
                None
            } else {
                Some(kind)
            };
        }
        y += BUTTON_H + 4.0;

        if state.open_picker == Some(kind) {
            let row = Rect::new(x, y, w, 20.0);
            let colors: Vec<Color> = SWATCHES.iter().map(|c| c.to_color()).collect();
            if let Some(index) = ui::swatch_row(ctx, row, &colors) {
                state.set_color_for(kind, SWATCHES[index]);
                state.open_picker = None;
            }
            y += 26.0;
        }
        y += 4.0;
    }
}

/// Default geometry for each structure button.
fn make_structure(kind: StructureKind, color: Rgba) -> Structure {
    match kind {
        StructureKind::Surface => Structure::new(
            "Surface",
            CANVAS_WIDTH / 2.0 - 200.0,
            CANVAS_HEIGHT / 2.0 - 150.0,
            400.0,
            300.0,
            color,
        ),
        StructureKind::Roof => {
            Structure::new("Roof", CANVAS_WIDTH / 2.0 - 100.0, 20.0, 200.0, 40.0, color)
        }
        StructureKind::Walls => Structure::new(
            "Walls",
            50.0,
            50.0,
            CANVAS_WIDTH - 100.0,
            CANVAS_HEIGHT - 100.0,
            color,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HouseConfig {
        HouseConfig {
            width: 20,
            height: 15,
            bedrooms: 2,
            bathrooms: 1,
            kitchens: 1,
            garden: true,
        }
    }

    #[test]
    fn palette_follows_the_house_configuration() {
        let specs = room_palette(&config());
        let labels: Vec<&str> = specs.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Bedroom 1", "Bedroom 2", "Bathroom 1", "Kitchen 1", "Garden"]
        );
        // Garden width scales with the house width.
        assert_eq!(specs[4].width, 400.0);
    }

    #[test]
    fn garden_is_optional() {
        let mut cfg = config();
        cfg.garden = false;
        let specs = room_palette(&cfg);
        assert!(specs.iter().all(|s| s.label != "Garden"));
    }

    #[test]
    fn default_placement_is_centered() {
        // A 10x8 canvas mapping with a 4x2 item.
        let (x, y) = centered_position(10.0, 8.0, 4.0, 2.0);
        assert_eq!(x, 10.0 / 2.0 - 4.0 / 2.0);
        assert_eq!(y, 8.0 / 2.0 - 2.0 / 2.0);

        // The real canvas with the Bedroom default size.
        let (x, y) = centered_position(CANVAS_WIDTH, CANVAS_HEIGHT, 100.0, 80.0);
        assert_eq!((x, y), (250.0, 160.0));
    }

    #[test]
    fn structure_defaults_match_their_buttons() {
        let roof = make_structure(StructureKind::Roof, Rgba::DARK_RED);
        assert_eq!(roof.name, "Roof");
        assert_eq!((roof.x, roof.y), (CANVAS_WIDTH / 2.0 - 100.0, 20.0));
        assert_eq!((roof.width, roof.height), (200.0, 40.0));

        let walls = make_structure(StructureKind::Walls, Rgba::LIGHT_GRAY);
        assert_eq!((walls.width, walls.height), (500.0, 300.0));
    }
}
