//! The scene store: ordered collections of rooms, furniture, and structures
//!
//! List position is both paint order and pick order within a category
//! (later = drawn on top, matched first). The store is the single owner of
//! all items; views read through slices or an owned snapshot.

use serde::{Deserialize, Serialize};

use super::{Furniture, Rgba, Room, Structure};

/// Margin between the canvas edge and the seeded outline structure.
pub const OUTLINE_MARGIN: f32 = 10.0;

/// Tagged reference to an item by its position in the owning sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSlot {
    Room(usize),
    Furniture(usize),
    Structure(usize),
}

/// Owned, immutable copy of the scene for the 3D projector and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub rooms: Vec<Room>,
    pub furniture: Vec<Furniture>,
    pub structures: Vec<Structure>,
}

pub struct SceneStore {
    rooms: Vec<Room>,
    furniture: Vec<Furniture>,
    structures: Vec<Structure>,
    canvas_width: f32,
    canvas_height: f32,
    revision: u64,
}

impl SceneStore {
    /// Create an empty scene seeded with the house outline.
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        let mut store = Self {
            rooms: Vec::new(),
            furniture: Vec::new(),
            structures: Vec::new(),
            canvas_width,
            canvas_height,
            revision: 0,
        };
        store.seed_outline();
        store.revision = 1;
        store
    }

    fn seed_outline(&mut self) {
        let outline = Structure::new(
            "House Outline",
            OUTLINE_MARGIN,
            OUTLINE_MARGIN,
            self.canvas_width - OUTLINE_MARGIN * 2.0,
            self.canvas_height - OUTLINE_MARGIN * 2.0,
            Rgba::TRANSPARENT,
        )
        .with_stroke(Rgba::BLACK, 2.0);
        self.structures.push(outline);
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Bumped on every mutation; the 3D viewport rebuilds when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add_room(&mut self, room: Room) {
        self.rooms.push(room);
        self.revision += 1;
    }

    pub fn add_furniture(&mut self, item: Furniture) {
        self.furniture.push(item);
        self.revision += 1;
    }

    pub fn add_structure(&mut self, structure: Structure) {
        self.structures.push(structure);
        self.revision += 1;
    }

    /// Remove everything, then re-seed the outline sized to the canvas.
    pub fn clear_all(&mut self) {
        self.rooms.clear();
        self.furniture.clear();
        self.structures.clear();
        self.seed_outline();
        self.revision += 1;
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn furniture(&self) -> &[Furniture] {
        &self.furniture
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            rooms: self.rooms.clone(),
            furniture: self.furniture.clone(),
            structures: self.structures.clone(),
        }
    }

    /// Find the topmost item under the pointer.
    ///
    /// Furniture always wins over rooms, rooms over structures, regardless
    /// of true insertion order across categories; within a category the
    /// latest-added item is checked first.
    pub fn hit_test(&self, px: f32, py: f32) -> Option<ItemSlot> {
        for (i, item) in self.furniture.iter().enumerate().rev() {
            if item.bounds().contains(px, py) {
                return Some(ItemSlot::Furniture(i));
            }
        }
        for (i, room) in self.rooms.iter().enumerate().rev() {
            if room.bounds().contains(px, py) {
                return Some(ItemSlot::Room(i));
            }
        }
        for (i, structure) in self.structures.iter().enumerate().rev() {
            if structure.bounds().contains(px, py) {
                return Some(ItemSlot::Structure(i));
            }
        }
        None
    }

    /// Move an item by a signed delta. No clamping: items may leave the
    /// visible canvas entirely.
    pub fn translate(&mut self, slot: ItemSlot, dx: f32, dy: f32) {
        match slot {
            ItemSlot::Room(i) => {
                if let Some(room) = self.rooms.get_mut(i) {
                    room.set_position(room.x + dx, room.y + dy);
                }
            }
            ItemSlot::Furniture(i) => {
                if let Some(item) = self.furniture.get_mut(i) {
                    item.set_position(item.x + dx, item.y + dy);
                }
            }
            ItemSlot::Structure(i) => {
                if let Some(structure) = self.structures.get_mut(i) {
                    structure.set_position(structure.x + dx, structure.y + dy);
                }
            }
        }
        self.revision += 1;
    }

    /// Move an item to the end of its sequence so it draws last (on top)
    /// and is matched first by future hit tests.
    pub fn promote(&mut self, slot: ItemSlot) {
        match slot {
            ItemSlot::Room(i) => {
                if i < self.rooms.len() {
                    let room = self.rooms.remove(i);
                    self.rooms.push(room);
                }
            }
            ItemSlot::Furniture(i) => {
                if i < self.furniture.len() {
                    let item = self.furniture.remove(i);
                    self.furniture.push(item);
                }
            }
            ItemSlot::Structure(i) => {
                if i < self.structures.len() {
                    let structure = self.structures.remove(i);
                    self.structures.push(structure);
                }
            }
        }
        self.revision += 1;
    }

    /// Current position of an item, if the slot is still valid.
    pub fn position(&self, slot: ItemSlot) -> Option<(f32, f32)> {
        match slot {
            ItemSlot::Room(i) => self.rooms.get(i).map(|r| (r.x, r.y)),
            ItemSlot::Furniture(i) => self.furniture.get(i).map(|f| (f.x, f.y)),
            ItemSlot::Structure(i) => self.structures.get(i).map(|s| (s.x, s.y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SceneStore {
        SceneStore::new(600.0, 400.0)
    }

    fn room_at(name: &str, x: f32, y: f32) -> Room {
        let mut room = Room::new(name, 100.0, 80.0, Rgba::LIGHT_BLUE);
        room.set_position(x, y);
        room
    }

    fn furniture_at(kind: &str, x: f32, y: f32) -> Furniture {
        let mut item = Furniture::new(kind, 60.0, 40.0, Rgba::LIGHT_CORAL);
        item.set_position(x, y);
        item
    }

    #[test]
    fn new_store_holds_only_the_outline() {
        let store = store();
        assert!(store.rooms().is_empty());
        assert!(store.furniture().is_empty());
        assert_eq!(store.structures().len(), 1);
        let outline = &store.structures()[0];
        assert_eq!(outline.name, "House Outline");
        assert_eq!(outline.x, 10.0);
        assert_eq!(outline.width, 580.0);
        assert_eq!(outline.height, 380.0);
        assert!(outline.fill.is_transparent());
        assert_eq!(outline.stroke, Some(Rgba::BLACK));
    }

    #[test]
    fn adds_append_at_the_end() {
        let mut store = store();
        store.add_room(room_at("Bedroom 1", 0.0, 0.0));
        store.add_room(room_at("Bedroom 2", 10.0, 10.0));
        assert_eq!(store.rooms().len(), 2);
        assert_eq!(store.rooms()[1].name, "Bedroom 2");
    }

    #[test]
    fn clear_all_restores_the_invariant() {
        let mut store = store();
        store.add_room(room_at("Kitchen 1", 50.0, 50.0));
        store.add_furniture(furniture_at("Bed", 60.0, 60.0));
        store.add_structure(Structure::new(
            "Surface",
            100.0,
            50.0,
            400.0,
            300.0,
            Rgba::SANDY_BROWN,
        ));
        store.clear_all();
        assert!(store.rooms().is_empty());
        assert!(store.furniture().is_empty());
        assert_eq!(store.structures().len(), 1);
        assert_eq!(store.structures()[0].name, "House Outline");
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutations() {
        let mut store = store();
        store.add_room(room_at("Bedroom 1", 0.0, 0.0));
        let snap = store.snapshot();
        store.translate(ItemSlot::Room(0), 25.0, -10.0);
        store.clear_all();
        assert_eq!(snap.rooms.len(), 1);
        assert_eq!(snap.rooms[0].x, 0.0);
    }

    #[test]
    fn furniture_wins_hit_test_over_rooms_and_structures() {
        let mut store = store();
        store.add_structure(Structure::new(
            "Surface",
            0.0,
            0.0,
            300.0,
            300.0,
            Rgba::SANDY_BROWN,
        ));
        store.add_room(room_at("Bedroom 1", 50.0, 50.0));
        // Added last of all, yet furniture must still win at the overlap.
        store.add_furniture(furniture_at("Chair", 60.0, 60.0));
        // Room added after the furniture keeps losing the tie.
        store.add_room(room_at("Bedroom 2", 55.0, 55.0));

        assert_eq!(store.hit_test(70.0, 70.0), Some(ItemSlot::Furniture(0)));
    }

    #[test]
    fn later_items_are_picked_first_within_a_category() {
        let mut store = store();
        store.add_furniture(furniture_at("Bed", 50.0, 50.0));
        store.add_furniture(furniture_at("Sofa", 60.0, 60.0));
        assert_eq!(store.hit_test(80.0, 80.0), Some(ItemSlot::Furniture(1)));
    }

    #[test]
    fn hit_test_miss_is_none() {
        let store = store();
        // Outside the outline.
        assert_eq!(store.hit_test(5.0, 5.0), None);
    }

    #[test]
    fn translate_applies_exact_unclamped_delta() {
        let mut store = store();
        store.add_furniture(furniture_at("Desk", 100.0, 100.0));
        store.translate(ItemSlot::Furniture(0), -250.0, 1000.0);
        assert_eq!(store.position(ItemSlot::Furniture(0)), Some((-150.0, 1100.0)));
    }

    #[test]
    fn promote_moves_item_to_the_end() {
        let mut store = store();
        store.add_furniture(furniture_at("Bed", 0.0, 0.0));
        store.add_furniture(furniture_at("Sofa", 10.0, 10.0));
        store.add_furniture(furniture_at("Table", 20.0, 20.0));
        store.promote(ItemSlot::Furniture(0));
        let kinds: Vec<&str> = store.furniture().iter().map(|f| f.kind.as_str()).collect();
        assert_eq!(kinds, ["Sofa", "Table", "Bed"]);
    }

    #[test]
    fn every_mutation_bumps_the_revision() {
        let mut store = store();
        let r0 = store.revision();
        store.add_room(room_at("Bedroom 1", 0.0, 0.0));
        let r1 = store.revision();
        assert!(r1 > r0);
        store.translate(ItemSlot::Room(0), 1.0, 1.0);
        let r2 = store.revision();
        assert!(r2 > r1);
        store.clear_all();
        assert!(store.revision() > r2);
    }
}
