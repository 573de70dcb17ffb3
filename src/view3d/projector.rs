//! 2D -> 3D scene projection
//!
//! Pure mapping from a scene snapshot to an arena of primitive nodes. The
//! whole arena is discarded and regenerated on every rebuild; nothing here
//! touches the window or the renderer.
//!
//! Coordinate convention: blueprint (x, y) maps to world (x - 300, e, y - 200)
//! with 1 canvas pixel = 1 world unit. The world is Y-down: the floor sits at
//! y = 300 and "up" is toward smaller y. `e` is a per-item elevation chosen so
//! geometry rests on the floor.

use macroquad::math::{vec3, Vec3};

use crate::scene::{Furniture, Room, SceneSnapshot, Structure};

/// Blueprint point subtracted from every item to center the world.
pub const ANCHOR_X: f32 = 300.0;
pub const ANCHOR_Z: f32 = 200.0;

/// Y of the floor plane.
pub const FLOOR_LEVEL: f32 = 300.0;
/// Wall height of projected rooms.
pub const ROOM_HEIGHT: f32 = 100.0;
/// Wall slab thickness.
pub const WALL_THICKNESS: f32 = 10.0;

/// Tessellation detail for round parts.
pub const CYLINDER_SIDES: u32 = 12;

/// Fixed material palette; parts pick one by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Wood,
    Fabric,
    Metal,
    Floor,
    Wall,
}

/// Primitive shapes the furniture library is built from.
///
/// Boxes and cylinders are centered on the part offset; a pyramid's offset
/// is the center of its base, with the apex `height` units up (toward -y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box { size: Vec3 },
    Cylinder { radius: f32, height: f32 },
    Sphere { radius: f32 },
    Pyramid { base: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part {
    pub shape: Shape,
    /// Position relative to the owning node's origin.
    pub offset: Vec3,
    pub material: Material,
}

/// Which kind of scene item generated a node. Furniture keeps its snapshot
/// index so the viewport can map a picked node back to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTag {
    Room,
    Furniture(usize),
    Structure,
}

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn empty_at(point: Vec3) -> Self {
        Self { min: point, max: point }
    }

    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            vec3(a.x, a.y, a.z),
            vec3(b.x, a.y, a.z),
            vec3(a.x, b.y, a.z),
            vec3(b.x, b.y, a.z),
            vec3(a.x, a.y, b.z),
            vec3(b.x, a.y, b.z),
            vec3(a.x, b.y, b.z),
            vec3(b.x, b.y, b.z),
        ]
    }
}

/// One generated scene-graph node: a bag of parts anchored at an origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag: NodeTag,
    pub origin: Vec3,
    pub parts: Vec<Part>,
    /// Transient viewport drag, horizontal plane only. Not part of the
    /// projection; every rebuild resets it.
    pub drag_offset: Vec3,
}

impl Node {
    fn new(tag: NodeTag, origin: Vec3) -> Self {
        Self {
            tag,
            origin,
            parts: Vec::new(),
            drag_offset: Vec3::ZERO,
        }
    }

    fn push(&mut self, shape: Shape, offset: Vec3, material: Material) {
        self.parts.push(Part { shape, offset, material });
    }

    /// Current world position including the transient drag.
    pub fn position(&self) -> Vec3 {
        self.origin + self.drag_offset
    }

    /// World-space bounds over all parts.
    pub fn aabb(&self) -> Aabb {
        let base = self.position();
        let mut bounds = Aabb::empty_at(base);
        for part in &self.parts {
            let center = base + part.offset;
            match part.shape {
                Shape::Box { size } => {
                    let half = size * 0.5;
                    bounds.expand(center - half);
                    bounds.expand(center + half);
                }
                Shape::Cylinder { radius, height } => {
                    let half = vec3(radius, height * 0.5, radius);
                    bounds.expand(center - half);
                    bounds.expand(center + half);
                }
                Shape::Sphere { radius } => {
                    let half = Vec3::splat(radius);
                    bounds.expand(center - half);
                    bounds.expand(center + half);
                }
                Shape::Pyramid { base: b, height } => {
                    let half = vec3(b * 0.5, 0.0, b * 0.5);
                    bounds.expand(center - half);
                    bounds.expand(center + half);
                    bounds.expand(center - vec3(0.0, height, 0.0));
                }
            }
        }
        bounds
    }
}

/// The generated 3D scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene3 {
    pub nodes: Vec<Node>,
}

impl Scene3 {
    pub fn empty() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// Build the full 3D scene from a snapshot. Deterministic: the same
/// snapshot always yields the same nodes in the same order
/// (rooms, then furniture, then structures).
pub fn project_scene(snapshot: &SceneSnapshot) -> Scene3 {
    let mut nodes = Vec::new();
    for room in &snapshot.rooms {
        nodes.push(room_node(room));
    }
    for (index, item) in snapshot.furniture.iter().enumerate() {
        nodes.push(furniture_node(index, item));
    }
    for structure in &snapshot.structures {
        nodes.push(structure_node(structure));
    }
    Scene3 { nodes }
}

/// How far above floor level a furniture item's origin sits, per type tag.
pub fn furniture_elevation(kind: &str) -> f32 {
    match kind {
        "Bed" => 20.0,
        "Sofa" => 30.0,
        "Table" => 35.0,
        "Chair" => 40.0,
        "Cabinet" => 60.0,
        "Desk" => 37.5,
        _ => 15.0,
    }
}

/// A room becomes a floor slab plus four enclosing wall slabs. Adjacent
/// rooms do not share walls; every room is fully enclosed on its own.
fn room_node(room: &Room) -> Node {
    let (w, h) = (room.width, room.height);
    let mut node = Node::new(
        NodeTag::Room,
        vec3(room.x - ANCHOR_X, 0.0, room.y - ANCHOR_Z),
    );

    let wall_y = FLOOR_LEVEL - ROOM_HEIGHT * 0.5;

    node.push(
        Shape::Box { size: vec3(w, 5.0, h) },
        vec3(0.0, FLOOR_LEVEL - 2.5, 0.0),
        Material::Floor,
    );

    // North and south walls span the full width, east and west the depth.
    node.push(
        Shape::Box { size: vec3(w, ROOM_HEIGHT, WALL_THICKNESS) },
        vec3(0.0, wall_y, -h * 0.5),
        Material::Wall,
    );
    node.push(
        Shape::Box { size: vec3(w, ROOM_HEIGHT, WALL_THICKNESS) },
        vec3(0.0, wall_y, h * 0.5),
        Material::Wall,
    );
    node.push(
        Shape::Box { size: vec3(WALL_THICKNESS, ROOM_HEIGHT, h) },
        vec3(-w * 0.5, wall_y, 0.0),
        Material::Wall,
    );
    node.push(
        Shape::Box { size: vec3(WALL_THICKNESS, ROOM_HEIGHT, h) },
        vec3(w * 0.5, wall_y, 0.0),
        Material::Wall,
    );

    node
}

fn furniture_node(index: usize, item: &Furniture) -> Node {
    let origin = vec3(
        item.x - ANCHOR_X,
        FLOOR_LEVEL - furniture_elevation(&item.kind),
        item.y - ANCHOR_Z,
    );
    let mut node = Node::new(NodeTag::Furniture(index), origin);
    let (w, h) = (item.width, item.height);

    match item.kind.as_str() {
        "Bed" => build_bed(&mut node, w, h),
        "Sofa" => build_sofa(&mut node, w, h),
        "Table" => build_table(&mut node, w, h),
        "Chair" => build_chair(&mut node, w, h),
        "Cabinet" => build_cabinet(&mut node, w, h),
        "Desk" => build_desk(&mut node, w, h),
        _ => {
            node.push(Shape::Box { size: vec3(w, 30.0, h) }, Vec3::ZERO, Material::Wood);
        }
    }
    node
}

fn build_bed(node: &mut Node, w: f32, h: f32) {
    node.push(
        Shape::Box { size: vec3(w - 10.0, 15.0, h - 10.0) },
        vec3(0.0, -7.5, 0.0),
        Material::Fabric,
    );
    node.push(
        Shape::Box { size: vec3(w, 10.0, h) },
        vec3(0.0, 5.0, 0.0),
        Material::Wood,
    );
    node.push(
        Shape::Box { size: vec3(10.0, 40.0, h) },
        vec3(-w * 0.5 + 5.0, -30.0, 0.0),
        Material::Wood,
    );
    for side in [-1.0, 1.0] {
        node.push(
            Shape::Box { size: vec3(30.0, 8.0, 40.0) },
            vec3(side * w * 0.25, -25.0, 15.0),
            Material::Fabric,
        );
    }
}

fn build_sofa(node: &mut Node, w: f32, h: f32) {
    node.push(
        Shape::Box { size: vec3(w, 25.0, h - 10.0) },
        vec3(0.0, -12.5, 0.0),
        Material::Fabric,
    );
    node.push(
        Shape::Box { size: vec3(w, 35.0, 10.0) },
        vec3(0.0, -35.0, h * 0.5 - 5.0),
        Material::Fabric,
    );
    for side in [-1.0, 1.0] {
        node.push(
            Shape::Box { size: vec3(15.0, 35.0, h) },
            vec3(side * (w * 0.5 - 7.5), -27.5, 0.0),
            Material::Fabric,
        );
    }
    for i in [-1.0, 1.0] {
        for j in [-1.0, 1.0] {
            node.push(
                Shape::Cylinder { radius: 2.5, height: 10.0 },
                vec3(i * (w * 0.5 - 10.0), 10.0, j * (h * 0.5 - 10.0)),
                Material::Wood,
            );
        }
    }
}

fn build_table(node: &mut Node, w: f32, h: f32) {
    node.push(
        Shape::Cylinder { radius: w * 0.5 - 5.0, height: 5.0 },
        vec3(0.0, -h * 0.5, 0.0),
        Material::Wood,
    );
    let leg_count = 4;
    for i in 0..leg_count {
        let angle = 2.0 * std::f32::consts::PI * i as f32 / leg_count as f32;
        node.push(
            Shape::Cylinder { radius: 3.0, height: h - 10.0 },
            vec3(angle.cos() * w / 3.0, 5.0, angle.sin() * w / 3.0),
            Material::Wood,
        );
    }
}

fn build_chair(node: &mut Node, w: f32, h: f32) {
    node.push(
        Shape::Box { size: vec3(w, 5.0, h) },
        vec3(0.0, -h * 0.5, 0.0),
        Material::Wood,
    );
    node.push(
        Shape::Box { size: vec3(w, h, 5.0) },
        vec3(0.0, -h, h * 0.5 - 2.5),
        Material::Wood,
    );
    for i in [-1.0, 1.0] {
        for j in [-1.0, 1.0] {
            node.push(
                Shape::Cylinder { radius: 1.5, height: h - 5.0 },
                vec3(i * w / 3.0, 5.0, j * (h * 0.5 - 5.0)),
                Material::Wood,
            );
        }
    }
}

fn build_cabinet(node: &mut Node, w: f32, h: f32) {
    node.push(
        Shape::Box { size: vec3(w, h, h) },
        vec3(0.0, -h * 0.5, 0.0),
        Material::Wood,
    );
    let drawer_count = 3;
    let drawer_h = h / (drawer_count as f32 + 1.0);
    for i in 0..drawer_count {
        let y = -h + (i as f32 + 0.5) * drawer_h;
        node.push(
            Shape::Box { size: vec3(w - 10.0, drawer_h - 5.0, h - 5.0) },
            vec3(0.0, y, 2.5),
            Material::Wood,
        );
        node.push(
            Shape::Sphere { radius: 2.5 },
            vec3(w * 0.5 - 8.0, y, h * 0.5 - 2.0),
            Material::Metal,
        );
    }
}

fn build_desk(node: &mut Node, w: f32, h: f32) {
    node.push(
        Shape::Box { size: vec3(w, 5.0, h) },
        vec3(0.0, -h * 0.5, 0.0),
        Material::Wood,
    );
    for side in [-1.0, 1.0] {
        node.push(
            Shape::Cylinder { radius: 3.0, height: h - 10.0 },
            vec3(side * (w * 0.5 - 10.0), 5.0, h * 0.5 - 15.0),
            Material::Wood,
        );
    }
    node.push(
        Shape::Box { size: vec3(10.0, h - 20.0, h - 30.0) },
        vec3(-w * 0.5 + 5.0, -h * 0.5 + 10.0, 0.0),
        Material::Wood,
    );
}

/// Structures are flat slabs, except a "Roof", which becomes a four-sided
/// pyramid centered over its footprint and raised above room height.
fn structure_node(structure: &Structure) -> Node {
    let (w, h) = (structure.width, structure.height);
    if structure.name == "Roof" {
        let mut node = Node::new(
            NodeTag::Structure,
            vec3(
                structure.x + w * 0.5 - ANCHOR_X,
                FLOOR_LEVEL - ROOM_HEIGHT - 40.0,
                structure.y + h * 0.5 - ANCHOR_Z,
            ),
        );
        node.push(
            Shape::Pyramid { base: w, height: 80.0 },
            vec3(0.0, 40.0, 0.0),
            Material::Wood,
        );
        node
    } else {
        let mut node = Node::new(
            NodeTag::Structure,
            vec3(structure.x - ANCHOR_X, FLOOR_LEVEL - 10.0, structure.y - ANCHOR_Z),
        );
        node.push(Shape::Box { size: vec3(w, 20.0, h) }, Vec3::ZERO, Material::Wood);
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Rgba, SceneStore};

    fn snapshot_with(
        rooms: Vec<Room>,
        furniture: Vec<Furniture>,
        structures: Vec<Structure>,
    ) -> SceneSnapshot {
        SceneSnapshot { rooms, furniture, structures }
    }

    fn furniture(kind: &str, x: f32, y: f32, w: f32, h: f32) -> Furniture {
        let mut item = Furniture::new(kind, w, h, Rgba::LIGHT_BLUE);
        item.set_position(x, y);
        item
    }

    #[test]
    fn projection_is_deterministic() {
        let mut store = SceneStore::new(600.0, 400.0);
        let mut room = Room::new("Bedroom 1", 100.0, 80.0, Rgba::LIGHT_BLUE);
        room.set_position(250.0, 160.0);
        store.add_room(room);
        store.add_furniture(furniture("Bed", 270.0, 180.0, 60.0, 40.0));
        store.add_furniture(furniture("Table", 100.0, 100.0, 60.0, 60.0));
        let snap = store.snapshot();

        let a = project_scene(&snap);
        let b = project_scene(&snap);
        assert_eq!(a, b);
    }

    #[test]
    fn anchor_recenters_the_world() {
        let mut room = Room::new("Bedroom 1", 100.0, 80.0, Rgba::LIGHT_BLUE);
        room.set_position(ANCHOR_X, ANCHOR_Z);
        let scene = project_scene(&snapshot_with(vec![room], vec![], vec![]));
        assert_eq!(scene.nodes[0].origin, vec3(0.0, 0.0, 0.0));
    }

    #[test]
    fn rooms_are_fully_enclosed() {
        let room = Room::new("Kitchen 1", 120.0, 80.0, Rgba::LIGHT_GREEN);
        let scene = project_scene(&snapshot_with(vec![room], vec![], vec![]));
        let node = &scene.nodes[0];
        assert_eq!(node.tag, NodeTag::Room);
        // Floor slab + four walls.
        assert_eq!(node.parts.len(), 5);
        let walls: Vec<&Part> = node
            .parts
            .iter()
            .filter(|p| p.material == Material::Wall)
            .collect();
        assert_eq!(walls.len(), 4);
        for wall in &walls {
            match wall.shape {
                Shape::Box { size } => {
                    assert!((size.x - WALL_THICKNESS).abs() < f32::EPSILON
                        || (size.z - WALL_THICKNESS).abs() < f32::EPSILON);
                    assert_eq!(size.y, ROOM_HEIGHT);
                }
                _ => panic!("walls are box slabs"),
            }
        }
    }

    #[test]
    fn furniture_part_counts_per_type() {
        let expected = [
            ("Bed", 5),
            ("Sofa", 8),
            ("Table", 5),
            ("Chair", 6),
            ("Cabinet", 7),
            ("Desk", 4),
            ("Bookshelf", 1), // unrecognized -> generic box
        ];
        for (kind, count) in expected {
            let scene = project_scene(&snapshot_with(
                vec![],
                vec![furniture(kind, 0.0, 0.0, 60.0, 40.0)],
                vec![],
            ));
            assert_eq!(scene.nodes[0].parts.len(), count, "{}", kind);
        }
    }

    #[test]
    fn furniture_rests_at_its_type_elevation() {
        let scene = project_scene(&snapshot_with(
            vec![],
            vec![furniture("Cabinet", 300.0, 200.0, 40.0, 40.0)],
            vec![],
        ));
        let node = &scene.nodes[0];
        assert_eq!(node.tag, NodeTag::Furniture(0));
        assert_eq!(node.origin.y, FLOOR_LEVEL - 60.0);
    }

    #[test]
    fn roof_structures_become_pyramids_above_room_height() {
        let roof = Structure::new("Roof", 200.0, 20.0, 200.0, 40.0, Rgba::DARK_RED);
        let scene = project_scene(&snapshot_with(vec![], vec![], vec![roof]));
        let node = &scene.nodes[0];
        assert_eq!(node.parts.len(), 1);
        match node.parts[0].shape {
            Shape::Pyramid { base, height } => {
                assert_eq!(base, 200.0);
                assert_eq!(height, 80.0);
            }
            _ => panic!("roof must be a pyramid"),
        }
        // Centered over the footprint, above the top of the room walls.
        assert_eq!(node.origin.x, 200.0 + 100.0 - ANCHOR_X);
        assert!(node.origin.y < FLOOR_LEVEL - ROOM_HEIGHT);
    }

    #[test]
    fn plain_structures_become_floor_slabs() {
        let surface = Structure::new("Surface", 100.0, 50.0, 400.0, 300.0, Rgba::SANDY_BROWN);
        let scene = project_scene(&snapshot_with(vec![], vec![], vec![surface]));
        let node = &scene.nodes[0];
        assert_eq!(node.parts.len(), 1);
        assert_eq!(node.origin, vec3(-200.0, FLOOR_LEVEL - 10.0, -150.0));
        match node.parts[0].shape {
            Shape::Box { size } => assert_eq!(size, vec3(400.0, 20.0, 300.0)),
            _ => panic!("plain structures are slabs"),
        }
    }

    #[test]
    fn node_order_is_rooms_furniture_structures() {
        let mut store = SceneStore::new(600.0, 400.0);
        store.add_furniture(furniture("Bed", 0.0, 0.0, 60.0, 40.0));
        store.add_room(Room::new("Bedroom 1", 100.0, 80.0, Rgba::LIGHT_BLUE));
        let scene = project_scene(&store.snapshot());
        // One room, one furniture, plus the seeded outline structure.
        assert_eq!(scene.nodes.len(), 3);
        assert_eq!(scene.nodes[0].tag, NodeTag::Room);
        assert_eq!(scene.nodes[1].tag, NodeTag::Furniture(0));
        assert_eq!(scene.nodes[2].tag, NodeTag::Structure);
    }

    #[test]
    fn aabb_covers_parts_and_follows_drag() {
        let scene = project_scene(&snapshot_with(
            vec![],
            vec![furniture("Bed", 300.0, 200.0, 60.0, 40.0)],
            vec![],
        ));
        let mut node = scene.nodes[0].clone();
        let before = node.aabb();
        assert!(before.min.x <= -30.0 && before.max.x >= 30.0);

        node.drag_offset = vec3(50.0, 0.0, -20.0);
        let after = node.aabb();
        assert!((after.center().x - before.center().x - 50.0).abs() < 1e-3);
        assert!((after.center().z - before.center().z + 20.0).abs() < 1e-3);
    }
}
