//! Software polygon renderer for the 3D preview
//!
//! Tessellates scene nodes into faces, projects them through the orbit
//! camera, flat-shades against a fixed light, and paints back-to-front with
//! 2D primitives. Stylized on purpose; this is an illustration, not CAD.

use macroquad::prelude::*;

use crate::ui::Rect;

use super::camera::OrbitCamera;
use super::projector::{Material, Scene3, Shape, CYLINDER_SIDES, FLOOR_LEVEL};

const BACKGROUND: Color = Color::new(0.68, 0.85, 0.90, 1.0); // light blue sky
const GROUND_COLOR: Color = Color::new(0.78, 0.78, 0.78, 1.0);
const GRID_COLOR: Color = Color::new(0.5, 0.5, 0.5, 0.4);
const GROUND_EXTENT: f32 = 1000.0;
const GRID_STEP: f32 = 100.0;

/// Fixed material palette.
pub fn material_color(material: Material) -> Color {
    match material {
        Material::Wood => Color::from_rgba(222, 184, 135, 255),   // burlywood
        Material::Fabric => Color::from_rgba(240, 128, 128, 255), // light coral
        Material::Metal => Color::from_rgba(192, 192, 192, 255),  // silver
        Material::Floor => Color::from_rgba(211, 211, 211, 255),  // light gray
        Material::Wall => Color::from_rgba(169, 169, 169, 255),   // dimmed light gray
    }
}

/// A face ready for projection: up to 4 world-space corners.
struct Face {
    points: [Vec3; 4],
    count: usize,
    material: Material,
}

impl Face {
    fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3, material: Material) -> Self {
        Self { points: [a, b, c, d], count: 4, material }
    }

    fn tri(a: Vec3, b: Vec3, c: Vec3, material: Material) -> Self {
        Self { points: [a, b, c, c], count: 3, material }
    }
}

/// A projected drawable, sorted by view depth before painting.
enum Prim {
    Poly {
        points: [(f32, f32); 4],
        count: usize,
        depth: f32,
        color: Color,
    },
    Disc {
        x: f32,
        y: f32,
        radius: f32,
        depth: f32,
        color: Color,
    },
}

impl Prim {
    fn depth(&self) -> f32 {
        match self {
            Prim::Poly { depth, .. } => *depth,
            Prim::Disc { depth, .. } => *depth,
        }
    }
}

/// Draw the whole scene into the viewport rect.
pub fn draw_scene(scene: &Scene3, camera: &OrbitCamera, viewport: Rect) {
    draw_rectangle(viewport.x, viewport.y, viewport.w, viewport.h, BACKGROUND);
    draw_ground(camera, viewport);

    let mut prims: Vec<Prim> = Vec::new();
    let eye = camera.eye();
    let light = vec3(0.35, -0.8, 0.45).normalize();

    for node in &scene.nodes {
        let base = node.position();
        for part in &node.parts {
            let center = base + part.offset;
            match part.shape {
                Shape::Sphere { radius } => {
                    if let Some(p) = camera.project(center, viewport) {
                        // Screen radius from a point one radius to the side.
                        let (right, _, _) = camera.basis();
                        if let Some(edge) = camera.project(center + right * radius, viewport) {
                            prims.push(Prim::Disc {
                                x: p.x,
                                y: p.y,
                                radius: (edge.x - p.x).abs().max(1.0),
                                depth: p.depth,
                                color: material_color(part.material),
                            });
                        }
                    }
                }
                _ => {
                    for face in tessellate(part.shape, center, part.material) {
                        if let Some(prim) = project_face(&face, camera, viewport, eye, light) {
                            prims.push(prim);
                        }
                    }
                }
            }
        }
    }

    // Painter's algorithm: far faces first.
    prims.sort_by(|a, b| b.depth().total_cmp(&a.depth()));
    for prim in &prims {
        match prim {
            Prim::Poly { points, count, color, .. } => {
                let p0 = vec2(points[0].0, points[0].1);
                for i in 1..count - 1 {
                    draw_triangle(
                        p0,
                        vec2(points[i].0, points[i].1),
                        vec2(points[i + 1].0, points[i + 1].1),
                        *color,
                    );
                }
            }
            Prim::Disc { x, y, radius, color, .. } => {
                draw_circle(*x, *y, *radius, *color);
            }
        }
    }
}

/// Project a face; flat-shade by its normal. None when any corner is
/// behind the camera.
fn project_face(
    face: &Face,
    camera: &OrbitCamera,
    viewport: Rect,
    eye: Vec3,
    light: Vec3,
) -> Option<Prim> {
    let mut points = [(0.0f32, 0.0f32); 4];
    let mut depth_sum = 0.0;
    for i in 0..face.count {
        let p = camera.project(face.points[i], viewport)?;
        points[i] = (p.x, p.y);
        depth_sum += p.depth;
    }

    let mut normal = (face.points[1] - face.points[0])
        .cross(face.points[2] - face.points[0])
        .normalize_or_zero();
    // Orient toward the camera; occlusion is handled by the depth sort.
    let face_center = (face.points[0] + face.points[face.count - 1]) * 0.5;
    if normal.dot(face_center - eye) > 0.0 {
        normal = -normal;
    }

    let shade = 0.55 + 0.45 * normal.dot(light).max(0.0);
    let base = material_color(face.material);
    Some(Prim::Poly {
        points,
        count: face.count,
        depth: depth_sum / face.count as f32,
        color: Color::new(base.r * shade, base.g * shade, base.b * shade, base.a),
    })
}

/// Split a shape into flat faces around its world-space center.
fn tessellate(shape: Shape, center: Vec3, material: Material) -> Vec<Face> {
    match shape {
        Shape::Box { size } => box_faces(center, size, material),
        Shape::Cylinder { radius, height } => cylinder_faces(center, radius, height, material),
        Shape::Pyramid { base, height } => pyramid_faces(center, base, height, material),
        // Spheres are drawn as screen-space discs, not faces.
        Shape::Sphere { .. } => Vec::new(),
    }
}

fn box_faces(center: Vec3, size: Vec3, material: Material) -> Vec<Face> {
    let h = size * 0.5;
    let corner = |sx: f32, sy: f32, sz: f32| center + vec3(h.x * sx, h.y * sy, h.z * sz);

    let (a, b, c, d) = (
        corner(-1.0, -1.0, -1.0),
        corner(1.0, -1.0, -1.0),
        corner(1.0, -1.0, 1.0),
        corner(-1.0, -1.0, 1.0),
    );
    let (e, f, g, i) = (
        corner(-1.0, 1.0, -1.0),
        corner(1.0, 1.0, -1.0),
        corner(1.0, 1.0, 1.0),
        corner(-1.0, 1.0, 1.0),
    );

    vec![
        Face::quad(a, b, c, d, material), // top (y is down, -y face)
        Face::quad(e, f, g, i, material), // bottom
        Face::quad(a, b, f, e, material), // -z
        Face::quad(d, c, g, i, material), // +z
        Face::quad(a, d, i, e, material), // -x
        Face::quad(b, c, g, f, material), // +x
    ]
}

fn cylinder_faces(center: Vec3, radius: f32, height: f32, material: Material) -> Vec<Face> {
    let mut faces = Vec::with_capacity(CYLINDER_SIDES as usize * 3);
    let half = height * 0.5;
    let top = center - vec3(0.0, half, 0.0);
    let bottom = center + vec3(0.0, half, 0.0);

    for i in 0..CYLINDER_SIDES {
        let a0 = 2.0 * std::f32::consts::PI * i as f32 / CYLINDER_SIDES as f32;
        let a1 = 2.0 * std::f32::consts::PI * (i + 1) as f32 / CYLINDER_SIDES as f32;
        let r0 = vec3(a0.cos() * radius, 0.0, a0.sin() * radius);
        let r1 = vec3(a1.cos() * radius, 0.0, a1.sin() * radius);

        faces.push(Face::quad(top + r0, top + r1, bottom + r1, bottom + r0, material));
        faces.push(Face::tri(top, top + r0, top + r1, material));
        faces.push(Face::tri(bottom, bottom + r1, bottom + r0, material));
    }
    faces
}

/// Four-sided pyramid: square base centered at `center`, apex straight up.
fn pyramid_faces(center: Vec3, base: f32, height: f32, material: Material) -> Vec<Face> {
    let h = base * 0.5;
    let apex = center - vec3(0.0, height, 0.0);
    let corners = [
        center + vec3(-h, 0.0, -h),
        center + vec3(h, 0.0, -h),
        center + vec3(h, 0.0, h),
        center + vec3(-h, 0.0, h),
    ];

    let mut faces = Vec::with_capacity(5);
    for i in 0..4 {
        faces.push(Face::tri(corners[i], corners[(i + 1) % 4], apex, material));
    }
    faces.push(Face::quad(corners[0], corners[1], corners[2], corners[3], material));
    faces
}

/// Ground plane and grid, drawn before (under) the sorted scene.
fn draw_ground(camera: &OrbitCamera, viewport: Rect) {
    let y = FLOOR_LEVEL + 2.0;
    let corners = [
        vec3(-GROUND_EXTENT, y, -GROUND_EXTENT),
        vec3(GROUND_EXTENT, y, -GROUND_EXTENT),
        vec3(GROUND_EXTENT, y, GROUND_EXTENT),
        vec3(-GROUND_EXTENT, y, GROUND_EXTENT),
    ];
    let projected: Vec<_> = corners
        .iter()
        .filter_map(|c| camera.project(*c, viewport))
        .collect();
    if projected.len() == 4 {
        let p0 = vec2(projected[0].x, projected[0].y);
        for i in 1..3 {
            draw_triangle(
                p0,
                vec2(projected[i].x, projected[i].y),
                vec2(projected[i + 1].x, projected[i + 1].y),
                GROUND_COLOR,
            );
        }
    }

    let mut t = -GROUND_EXTENT;
    while t <= GROUND_EXTENT {
        draw_world_line(camera, viewport, vec3(t, y - 1.0, -GROUND_EXTENT), vec3(t, y - 1.0, GROUND_EXTENT));
        draw_world_line(camera, viewport, vec3(-GROUND_EXTENT, y - 1.0, t), vec3(GROUND_EXTENT, y - 1.0, t));
        t += GRID_STEP;
    }
}

fn draw_world_line(camera: &OrbitCamera, viewport: Rect, a: Vec3, b: Vec3) {
    if let (Some(pa), Some(pb)) = (camera.project(a, viewport), camera.project(b, viewport)) {
        draw_line(pa.x, pa.y, pb.x, pb.y, 1.0, GRID_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_tessellates_into_six_quads() {
        let faces = box_faces(vec3(0.0, 0.0, 0.0), vec3(10.0, 20.0, 30.0), Material::Wood);
        assert_eq!(faces.len(), 6);
        assert!(faces.iter().all(|f| f.count == 4));
    }

    #[test]
    fn cylinder_tessellates_sides_and_caps() {
        let faces = cylinder_faces(vec3(0.0, 0.0, 0.0), 5.0, 10.0, Material::Wood);
        assert_eq!(faces.len(), CYLINDER_SIDES as usize * 3);
    }

    #[test]
    fn pyramid_has_four_sides_and_a_base() {
        let faces = pyramid_faces(vec3(0.0, 200.0, 0.0), 100.0, 80.0, Material::Wood);
        assert_eq!(faces.len(), 5);
        // Apex is above the base (smaller y in a Y-down world).
        assert_eq!(faces[0].points[2].y, 120.0);
    }
}
