//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Target length of one tessellated arc step along the centerline (pixels)
const ARC_STEP_LENGTH: f32 = 4.0;

/// Tessellate a stroked circular arc into a triangle list.
///
/// Angles are in screen space (y down), so a positive `sweep` runs clockwise on
/// screen. The stroke is a band `width` wide centred on `radius`; consecutive steps
/// share edges, so the bend is smooth with no join artifacts.
pub fn stroke_arc(
    center: Vec2,
    radius: f32,
    start: f32,
    sweep: f32,
    width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    if sweep.abs() <= f32::EPSILON || width <= 0.0 || radius <= 0.0 {
        return Vec::new();
    }

    let steps = ((sweep.abs() * radius / ARC_STEP_LENGTH).ceil() as u32).max(1);
    let inner_r = (radius - width / 2.0).max(0.0);
    let outer_r = radius + width / 2.0;

    let mut vertices = Vec::with_capacity((steps * 6) as usize);

    for i in 0..steps {
        let theta1 = start + sweep * (i as f32 / steps as f32);
        let theta2 = start + sweep * ((i + 1) as f32 / steps as f32);

        let dir1 = Vec2::from_angle(theta1);
        let dir2 = Vec2::from_angle(theta2);
        let inner1 = center + dir1 * inner_r;
        let outer1 = center + dir1 * outer_r;
        let inner2 = center + dir2 * inner_r;
        let outer2 = center + dir2 * outer_r;

        // Two triangles per step
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}
