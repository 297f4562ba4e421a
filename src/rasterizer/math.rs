//! Rotation and projection math
//!
//! Screen convention: origin at the top-left corner, x grows right, y grows
//! down. Projected camera-space y is therefore *added* to the viewport
//! center, never subtracted. Every projection in the crate goes through
//! [`Projection::project`], so this is the only place the convention lives.

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Integer screen coordinate, consumed immediately by the rasterizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Cached sine/cosine of one sweep angle (rotation around the ring axis)
#[derive(Debug, Clone, Copy)]
pub struct Sweep {
    pub cos: f32,
    pub sin: f32,
}

impl Sweep {
    pub fn new(phi: f32) -> Self {
        Self { cos: phi.cos(), sin: phi.sin() }
    }
}

/// Tilt (A) and spin (B) trig, computed once per frame
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    cos_a: f32,
    sin_a: f32,
    cos_b: f32,
    sin_b: f32,
}

impl Rotation {
    pub fn new(a: f32, b: f32) -> Self {
        Self {
            cos_a: a.cos(),
            sin_a: a.sin(),
            cos_b: b.cos(),
            sin_b: b.sin(),
        }
    }

    /// Sweep around the ring axis, tilt by A, spin by B, then push the result
    /// `camera_distance` units down the view axis.
    ///
    /// The product of the three rotation matrices is expanded by hand for a
    /// local point lying in the z = 0 plane, so `local.z` is ignored.
    pub fn apply(&self, local: Vec3, sweep: Sweep, camera_distance: f32) -> Vec3 {
        let Rotation { cos_a, sin_a, cos_b, sin_b } = *self;
        let (x, y) = (local.x, local.y);

        Vec3 {
            x: x * (cos_b * sweep.cos + sin_a * sin_b * sweep.sin) - y * cos_a * sin_b,
            y: x * (sweep.cos * sin_b - cos_b * sin_a * sweep.sin) + y * cos_a * cos_b,
            z: camera_distance + cos_a * x * sweep.sin + y * sin_a,
        }
    }
}

/// Perspective projection onto a fixed viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Viewport scale (K1)
    pub k1: f32,
    /// Camera standoff (K2)
    pub k2: f32,
    pub center_x: f32,
    pub center_y: f32,
}

impl Projection {
    /// `extent` is the farthest a surface point can sit from the shape's
    /// center (R + w for a torus). K1 is chosen so that extent spans 3/8 of
    /// the viewport width at depth K2, whatever the resolution.
    pub fn new(width: usize, height: usize, camera_distance: f32, extent: f32) -> Self {
        Self {
            k1: width as f32 * camera_distance * 3.0 / (8.0 * extent),
            k2: camera_distance,
            center_x: width as f32 / 2.0,
            center_y: height as f32 / 2.0,
        }
    }

    /// Perspective divide a camera-space point.
    ///
    /// Returns `None` for points at or behind the camera plane, or when the
    /// divide does not produce a finite coordinate.
    pub fn project(&self, camera: Vec3) -> Option<Point2> {
        if !(camera.z > 0.0) {
            return None;
        }

        let sx = self.center_x + camera.x * self.k1 / camera.z;
        let sy = self.center_y + camera.y * self.k1 / camera.z;
        if !sx.is_finite() || !sy.is_finite() {
            return None;
        }

        // Truncate toward zero
        Some(Point2::new(sx as i32, sy as i32))
    }

    /// Rotate a local point into camera space and project it
    pub fn project_local(&self, local: Vec3, rotation: &Rotation, sweep: Sweep) -> Option<Point2> {
        self.project(rotation.apply(local, sweep, self.k2))
    }
}
