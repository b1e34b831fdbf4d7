//! Pinhole camera for the scenery layer
//!
//! World space: x to the right, y downward (ground plane at y = 0, sky far above at
//! negative y), z into the screen. Screen space: origin top-left, projection centre
//! at the middle of the screen.
//!
//! `sx = W/2 + x * screen_z / z`
//! `sy = H/2 + (y - camera_y) * screen_z / z`

use glam::{Vec2, Vec3};

use crate::consts::*;

/// Smallest offset from the projection centre we are willing to divide by
const CENTER_EPSILON: f32 = 1e-6;

/// Perspective camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical camera position in world space
    pub camera_y: f32,
    /// Distance from the eye to the projection plane
    pub screen_z: f32,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::GAME
    }
}

/// A world point with some components unknown.
///
/// Used to recover the missing coordinates of a point whose screen position is known.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorldHint {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl WorldHint {
    pub fn with_x(x: f32) -> Self {
        Self {
            x: Some(x),
            ..Default::default()
        }
    }

    pub fn with_y(y: f32) -> Self {
        Self {
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn with_z(z: f32) -> Self {
        Self {
            z: Some(z),
            ..Default::default()
        }
    }
}

impl Camera {
    /// The camera every runner uses
    pub const GAME: Camera = Camera {
        camera_y: CAMERA_Y,
        screen_z: SCREEN_Z,
        screen_width: SCREEN_WIDTH,
        screen_height: SCREEN_HEIGHT,
    };

    #[inline]
    fn center(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    /// Project a world point. `p.z` must be positive.
    pub fn world_to_screen(&self, p: Vec3) -> Vec2 {
        let k = self.screen_z / p.z;
        self.center() + Vec2::new(p.x, p.y - self.camera_y) * k
    }

    /// Unproject a screen point onto the plane at depth `z` (must be positive).
    pub fn screen_to_world_at_depth(&self, screen: Vec2, z: f32) -> Vec3 {
        let offset = (screen - self.center()) * (z / self.screen_z);
        Vec3::new(offset.x, offset.y + self.camera_y, z)
    }

    /// Recover a world point from its screen position and the known components of `hint`.
    ///
    /// Depth is taken from `hint.z`, or solved from `hint.y`, or from `hint.x`, in that
    /// order. Known components are kept as given. Returns `None` when nothing is known
    /// or the solved depth is not a positive finite number.
    pub fn screen_to_world(&self, screen: Vec2, hint: WorldHint) -> Option<Vec3> {
        let offset = screen - self.center();

        let z = match (hint.z, hint.y, hint.x) {
            (Some(z), _, _) => z,
            (None, Some(y), _) => {
                if offset.y.abs() < CENTER_EPSILON {
                    return None;
                }
                (y - self.camera_y) * self.screen_z / offset.y
            }
            (None, None, Some(x)) => {
                if offset.x.abs() < CENTER_EPSILON {
                    return None;
                }
                x * self.screen_z / offset.x
            }
            (None, None, None) => return None,
        };

        if !z.is_finite() || z <= 0.0 {
            return None;
        }

        let solved = self.screen_to_world_at_depth(screen, z);
        Some(Vec3::new(
            hint.x.unwrap_or(solved.x),
            hint.y.unwrap_or(solved.y),
            z,
        ))
    }
}
