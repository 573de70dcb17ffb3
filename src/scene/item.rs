//! Placeable items: rooms, furniture, structural elements
//!
//! Plain data with a shared positional contract. Sizes are fixed at
//! creation; positions move freely (the canvas does not clamp).

use serde::{Deserialize, Serialize};

/// Serializable RGBA color, converted to the renderer's color at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    // Web color names used by the palettes.
    pub const LIGHT_BLUE: Rgba = Rgba::opaque(173, 216, 230);
    pub const LIGHT_CORAL: Rgba = Rgba::opaque(240, 128, 128);
    pub const LIGHT_GREEN: Rgba = Rgba::opaque(144, 238, 144);
    pub const LIGHT_GOLDENROD: Rgba = Rgba::opaque(250, 250, 210);
    pub const LIGHT_SALMON: Rgba = Rgba::opaque(255, 160, 122);
    pub const LIGHT_SEA_GREEN: Rgba = Rgba::opaque(32, 178, 170);
    pub const PALE_GREEN: Rgba = Rgba::opaque(152, 251, 152);
    pub const SANDY_BROWN: Rgba = Rgba::opaque(244, 164, 96);
    pub const DARK_RED: Rgba = Rgba::opaque(139, 0, 0);
    pub const LIGHT_GRAY: Rgba = Rgba::opaque(211, 211, 211);
    pub const BURLYWOOD: Rgba = Rgba::opaque(222, 184, 135);
    pub const SILVER: Rgba = Rgba::opaque(192, 192, 192);

    /// True when fully transparent (skipped by the fill pass).
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn to_color(self) -> macroquad::color::Color {
        macroquad::color::Color::from_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Axis-aligned item bounds in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    /// Inclusive on all edges, matching the pick behavior of the canvas.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

/// A room on the blueprint (bedroom, bathroom, kitchen, garden, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgba,
}

impl Room {
    pub fn new(name: impl Into<String>, width: f32, height: f32, color: Rgba) -> Self {
        Self {
            name: name.into(),
            x: 0.0,
            y: 0.0,
            width,
            height,
            color,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            w: self.width,
            h: self.height,
        }
    }
}

/// A furniture item. `kind` doubles as the display label and as the type
/// tag the 3D projector dispatches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Furniture {
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgba,
}

impl Furniture {
    pub fn new(kind: impl Into<String>, width: f32, height: f32, color: Rgba) -> Self {
        Self {
            kind: kind.into(),
            x: 0.0,
            y: 0.0,
            width,
            height,
            color,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            w: self.width,
            h: self.height,
        }
    }
}

/// A structural element (surface, roof, walls, the canvas outline).
/// Unlike rooms and furniture it may be fill-less and carry a stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Rgba,
    pub stroke: Option<Rgba>,
    pub stroke_width: f32,
}

impl Structure {
    pub fn new(
        name: impl Into<String>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
    ) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            fill,
            stroke: None,
            stroke_width: 1.0,
        }
    }

    pub fn with_stroke(mut self, stroke: Rgba, width: f32) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = width;
        self
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            w: self.width,
            h: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_edges_are_inclusive() {
        let mut room = Room::new("Bedroom 1", 100.0, 80.0, Rgba::LIGHT_BLUE);
        room.set_position(10.0, 20.0);
        let b = room.bounds();
        assert!(b.contains(10.0, 20.0));
        assert!(b.contains(110.0, 100.0));
        assert!(!b.contains(110.1, 100.0));
        assert!(!b.contains(9.9, 20.0));
    }

    #[test]
    fn transparent_fill_detected() {
        assert!(Rgba::TRANSPARENT.is_transparent());
        assert!(!Rgba::SANDY_BROWN.is_transparent());
    }
}
