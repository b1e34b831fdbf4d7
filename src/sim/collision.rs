//! Swept collision between moving circles
//!
//! A circle moving by `vel` during one tick sweeps a capsule: the segment from its
//! start position to `start + vel`, thickened by its radius. Two capsules touch when
//! the distance between their segments is at most the sum of the radii. Sweeping the
//! whole tick keeps fast enemies from tunnelling through the player during a rush.

use glam::Vec2;

/// Degenerate-segment threshold (squared length)
const EPSILON: f32 = 1e-8;

/// Check whether two swept circles overlap at any point of their sweeps
pub fn capsules_collide(
    a_start: Vec2,
    a_vel: Vec2,
    a_radius: f32,
    b_start: Vec2,
    b_vel: Vec2,
    b_radius: f32,
) -> bool {
    let reach = a_radius + b_radius;
    segment_distance_sq(a_start, a_start + a_vel, b_start, b_start + b_vel) <= reach * reach
}

/// Squared distance between segments `p1..q1` and `p2..q2`.
///
/// Zero-length segments are treated as points.
pub fn segment_distance_sq(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> f32 {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    let (s, t) = if a <= EPSILON && e <= EPSILON {
        (0.0, 0.0)
    } else if a <= EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            // Parallel segments: any s works, pick the start and let t correct it
            let mut s = if denom > EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    let c1 = p1 + d1 * s;
    let c2 = p2 + d2 * t;
    (c1 - c2).length_squared()
}
