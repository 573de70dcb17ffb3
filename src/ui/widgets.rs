//! Basic UI widgets
//!
//! Flat immediate-mode widgets: draw, test the mouse, return what happened.

use macroquad::prelude::*;

use super::{Rect, UiContext};

pub const TEXT_COLOR: Color = Color::new(0.12, 0.12, 0.14, 1.0);
pub const ERROR_COLOR: Color = Color::new(0.8, 0.1, 0.1, 1.0);
const FIELD_BG: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const FIELD_BORDER: Color = Color::new(0.6, 0.6, 0.65, 1.0);
const FIELD_BORDER_ACTIVE: Color = Color::new(0.2, 0.45, 0.8, 1.0);
const BUTTON_BG: Color = Color::new(0.88, 0.88, 0.9, 1.0);

/// Draw a rounded rectangle (approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}

/// Text centered inside a rect
fn draw_text_centered(text: &str, rect: &Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let x = (rect.x + (rect.w - dims.width) * 0.5).round();
    let y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

fn button_impl(ctx: &mut UiContext, rect: Rect, label: &str, bg: Color, tooltip: &str) -> bool {
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);
    let clicked = ctx.mouse.clicked(&rect);

    if hovered && !tooltip.is_empty() {
        ctx.set_tooltip(tooltip, ctx.mouse.x, ctx.mouse.y);
    }

    let color = if pressed {
        darken(bg, 0.85)
    } else if hovered {
        darken(bg, 0.93)
    } else {
        bg
    };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 5.0, color);
    draw_text_centered(label, &rect, 16.0, TEXT_COLOR);

    clicked
}

fn darken(c: Color, f: f32) -> Color {
    Color::new(c.r * f, c.g * f, c.b * f, c.a)
}

/// Neutral action button, returns true when clicked
pub fn button(ctx: &mut UiContext, rect: Rect, label: &str) -> bool {
    button_impl(ctx, rect, label, BUTTON_BG, "")
}

/// Palette button filled with the color of the item it creates
pub fn palette_button(
    ctx: &mut UiContext,
    rect: Rect,
    label: &str,
    fill: Color,
    tooltip: &str,
) -> bool {
    button_impl(ctx, rect, label, fill, tooltip)
}

/// Single-line text input. The caller decides which field is `active`;
/// the active field consumes the keyboard. Returns true when clicked
/// (so the caller can move focus).
pub fn text_field(
    ctx: &mut UiContext,
    rect: Rect,
    text: &mut String,
    placeholder: &str,
    masked: bool,
    active: bool,
) -> bool {
    let clicked = ctx.mouse.clicked(&rect);

    if active {
        while let Some(c) = get_char_pressed() {
            if !c.is_control() {
                text.push(c);
            }
        }
        if is_key_pressed(KeyCode::Backspace) {
            text.pop();
        }
    }

    draw_rectangle(rect.x, rect.y, rect.w, rect.h, FIELD_BG);
    let border = if active { FIELD_BORDER_ACTIVE } else { FIELD_BORDER };
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, border);

    let font_size = 16.0;
    let shown: String = if masked {
        text.chars().map(|_| '*').collect()
    } else {
        text.clone()
    };
    let pad = 8.0;
    let baseline = (rect.y + (rect.h + font_size * 0.6) * 0.5).round();
    if shown.is_empty() && !active {
        draw_text(placeholder, rect.x + pad, baseline, font_size, FIELD_BORDER);
    } else {
        draw_text(&shown, rect.x + pad, baseline, font_size, TEXT_COLOR);
    }

    // Blinking caret at the end of the text
    if active && (get_time() * 2.0) as i64 % 2 == 0 {
        let dims = measure_text(&shown, None, font_size as u16, 1.0);
        let cx = rect.x + pad + dims.width + 1.0;
        draw_line(cx, rect.y + 5.0, cx, rect.bottom() - 5.0, 1.0, TEXT_COLOR);
    }

    clicked
}

/// Integer spinner: [-] value [+]. Returns true when the value changed.
pub fn spinner(ctx: &mut UiContext, rect: Rect, value: &mut u32, min: u32, max: u32) -> bool {
    let btn_w = rect.h;
    let minus = Rect::new(rect.x, rect.y, btn_w, rect.h);
    let plus = Rect::new(rect.right() - btn_w, rect.y, btn_w, rect.h);
    let value_rect = Rect::new(rect.x + btn_w, rect.y, rect.w - btn_w * 2.0, rect.h);

    let mut changed = false;
    if button(ctx, minus, "-") && *value > min {
        *value -= 1;
        changed = true;
    }
    if button(ctx, plus, "+") && *value < max {
        *value += 1;
        changed = true;
    }

    draw_rectangle(value_rect.x, value_rect.y, value_rect.w, value_rect.h, FIELD_BG);
    draw_rectangle_lines(value_rect.x, value_rect.y, value_rect.w, value_rect.h, 1.0, FIELD_BORDER);
    draw_text_centered(&value.to_string(), &value_rect, 16.0, TEXT_COLOR);

    changed
}

/// Labeled checkbox. Returns true when toggled.
pub fn checkbox(ctx: &mut UiContext, rect: Rect, checked: &mut bool, label: &str) -> bool {
    let box_size = rect.h.min(18.0);
    let box_rect = Rect::new(rect.x, rect.y + (rect.h - box_size) * 0.5, box_size, box_size);

    draw_rectangle(box_rect.x, box_rect.y, box_rect.w, box_rect.h, FIELD_BG);
    draw_rectangle_lines(box_rect.x, box_rect.y, box_rect.w, box_rect.h, 1.0, FIELD_BORDER);
    if *checked {
        draw_rectangle(
            box_rect.x + 4.0,
            box_rect.y + 4.0,
            box_rect.w - 8.0,
            box_rect.h - 8.0,
            FIELD_BORDER_ACTIVE,
        );
    }

    let font_size = 16.0;
    let baseline = (rect.y + (rect.h + font_size * 0.6) * 0.5).round();
    draw_text(label, box_rect.right() + 8.0, baseline, font_size, TEXT_COLOR);

    if ctx.mouse.clicked(&rect) {
        *checked = !*checked;
        return true;
    }
    false
}

/// Row of color swatches. Returns the index of the clicked swatch.
pub fn swatch_row(ctx: &mut UiContext, rect: Rect, colors: &[Color]) -> Option<usize> {
    let mut picked = None;
    let size = rect.h;
    let spacing = 4.0;
    for (i, color) in colors.iter().enumerate() {
        let swatch = Rect::new(rect.x + i as f32 * (size + spacing), rect.y, size, size);
        draw_rectangle(swatch.x, swatch.y, swatch.w, swatch.h, *color);
        let border = if ctx.mouse.inside(&swatch) {
            FIELD_BORDER_ACTIVE
        } else {
            FIELD_BORDER
        };
        draw_rectangle_lines(swatch.x, swatch.y, swatch.w, swatch.h, 1.0, border);
        if ctx.mouse.clicked(&swatch) {
            picked = Some(i);
        }
    }
    picked
}
