//! House setup screen
//!
//! Collects the dimensions and room counts the designer palettes are
//! generated from. Invalid input is reported in place and nothing else
//! happens; the user fixes the fields and tries again.

use macroquad::prelude::*;

use crate::app::HouseConfig;
use crate::ui::{self, Rect, UiContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupField {
    Width,
    Height,
}

pub struct SetupState {
    width_text: String,
    height_text: String,
    bedrooms: u32,
    bathrooms: u32,
    kitchens: u32,
    garden: bool,
    error: Option<String>,
    focus: Option<SetupField>,
}

impl SetupState {
    pub fn new() -> Self {
        Self {
            width_text: String::new(),
            height_text: String::new(),
            bedrooms: 3,
            bathrooms: 2,
            kitchens: 1,
            garden: true,
            error: None,
            focus: Some(SetupField::Width),
        }
    }

    fn submit(&mut self) -> Option<HouseConfig> {
        match parse_dimensions(&self.width_text, &self.height_text) {
            Ok((width, height)) => Some(HouseConfig {
                width,
                height,
                bedrooms: self.bedrooms,
                bathrooms: self.bathrooms,
                kitchens: self.kitchens,
                garden: self.garden,
            }),
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}

/// Validate the free-text dimension fields.
fn parse_dimensions(width_text: &str, height_text: &str) -> Result<(i32, i32), String> {
    let width: i32 = width_text
        .trim()
        .parse()
        .map_err(|_| "Please enter valid numbers for width and height.".to_string())?;
    let height: i32 = height_text
        .trim()
        .parse()
        .map_err(|_| "Please enter valid numbers for width and height.".to_string())?;

    if width <= 0 || height <= 0 {
        return Err("Width and height must be positive numbers.".to_string());
    }
    Ok((width, height))
}

/// Draw the setup screen. Returns the configuration once it validates.
pub fn draw_setup(ctx: &mut UiContext, area: Rect, state: &mut SetupState) -> Option<HouseConfig> {
    let panel_w = 420.0;
    let panel_h = 430.0;
    let panel = Rect::new(
        area.x + (area.w - panel_w) * 0.5,
        area.y + (area.h - panel_h) * 0.5,
        panel_w,
        panel_h,
    );

    draw_rectangle(panel.x, panel.y, panel.w, panel.h, Color::from_rgba(240, 248, 255, 255));
    draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 1.0, Color::from_rgba(160, 160, 160, 255));

    let title = "Enter House Details";
    let title_dims = measure_text(title, None, 22, 1.0);
    draw_text(
        title,
        panel.center_x() - title_dims.width * 0.5,
        panel.y + 40.0,
        22.0,
        ui::TEXT_COLOR,
    );

    let label_x = panel.x + 30.0;
    let control_x = panel.x + 190.0;
    let control_w = panel_w - 190.0 - 30.0;
    let row_h = 32.0;
    let row_gap = 12.0;
    let mut row_y = panel.y + 64.0;

    let label = |text: &str, y: f32| {
        draw_text(text, label_x, y + row_h * 0.5 + 5.0, 16.0, ui::TEXT_COLOR);
    };

    label("House Width (m):", row_y);
    if ui::text_field(
        ctx,
        Rect::new(control_x, row_y, control_w, row_h),
        &mut state.width_text,
        "e.g., 20",
        false,
        state.focus == Some(SetupField::Width),
    ) {
        state.focus = Some(SetupField::Width);
    }
    row_y += row_h + row_gap;

    label("House Height (m):", row_y);
    if ui::text_field(
        ctx,
        Rect::new(control_x, row_y, control_w, row_h),
        &mut state.height_text,
        "e.g., 15",
        false,
        state.focus == Some(SetupField::Height),
    ) {
        state.focus = Some(SetupField::Height);
    }
    row_y += row_h + row_gap;

    if is_key_pressed(KeyCode::Tab) {
        state.focus = match state.focus {
            Some(SetupField::Width) => Some(SetupField::Height),
            _ => Some(SetupField::Width),
        };
    }

    label("Bedrooms:", row_y);
    ui::spinner(ctx, Rect::new(control_x, row_y, control_w, row_h), &mut state.bedrooms, 1, 10);
    row_y += row_h + row_gap;

    label("Bathrooms:", row_y);
    ui::spinner(ctx, Rect::new(control_x, row_y, control_w, row_h), &mut state.bathrooms, 1, 10);
    row_y += row_h + row_gap;

    label("Kitchens:", row_y);
    ui::spinner(ctx, Rect::new(control_x, row_y, control_w, row_h), &mut state.kitchens, 1, 10);
    row_y += row_h + row_gap;

    ui::checkbox(
        ctx,
        Rect::new(label_x, row_y, panel_w - 60.0, 24.0),
        &mut state.garden,
        "Include Garden",
    );
    row_y += 24.0 + row_gap;

    if let Some(error) = &state.error {
        let dims = measure_text(error, None, 14, 1.0);
        draw_text(
            error,
            panel.center_x() - dims.width * 0.5,
            row_y + 12.0,
            14.0,
            ui::ERROR_COLOR,
        );
    }
    row_y += 26.0;

    let button_rect = Rect::new(panel.center_x() - 75.0, row_y, 150.0, 36.0);
    if ui::button(ctx, button_rect, "Design House") || is_key_pressed(KeyCode::Enter) {
        return state.submit();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(parse_dimensions("20", "15"), Ok((20, 15)));
        assert_eq!(parse_dimensions(" 100 ", "80"), Ok((100, 80)));
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = parse_dimensions("wide", "15").unwrap_err();
        assert_eq!(err, "Please enter valid numbers for width and height.");
        assert!(parse_dimensions("20", "").is_err());
        assert!(parse_dimensions("12.5", "15").is_err());
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let err = parse_dimensions("0", "15").unwrap_err();
        assert_eq!(err, "Width and height must be positive numbers.");
        assert!(parse_dimensions("20", "-3").is_err());
    }
}
