//! Transform state carried across statements during rendering

use glam::DVec2;

/// External knobs for a render pass. No environment variables, no globals.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Upper bound on iterations of a single DRAW loop. `None` preserves the
    /// language's native semantics, where a loop with STEP <= 0 never
    /// terminates. Callers that need bounded execution set a cap; exceeding
    /// it aborts the render.
    pub max_iterations: Option<u64>,
}

/// Accumulated origin/rotation/scale, updated in place as ORIGIN, ROT, and
/// SCALE statements execute. A DRAW loop reads whatever state is live when
/// it runs; later statements never affect earlier loops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub origin: DVec2,
    /// Rotation angle in radians
    pub angle: f64,
    pub scale: DVec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            origin: DVec2::ZERO,
            angle: 0.0,
            scale: DVec2::ONE,
        }
    }
}

impl Transform {
    /// Map a curve-space point to canvas space: scale, then rotate, then
    /// translate.
    ///
    /// The rotation is the clockwise form `x' = x cos a + y sin a,
    /// y' = y cos a - x sin a` inherited from the language definition, not
    /// the textbook counter-clockwise matrix.
    pub fn apply(&self, p: DVec2) -> DVec2 {
        let p = p * self.scale;
        let (sin, cos) = self.angle.sin_cos();
        let p = DVec2::new(p.x * cos + p.y * sin, p.y * cos - p.x * sin);
        p + self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn default_is_identity() {
        let transform = Transform::default();
        assert_eq!(transform.apply(dvec2(3.0, -4.0)), dvec2(3.0, -4.0));
    }

    #[test]
    fn rotation_is_clockwise() {
        // A quarter turn sends (x, y) to (y, -x)
        let transform = Transform {
            angle: FRAC_PI_2,
            ..Transform::default()
        };
        let p = transform.apply(dvec2(50.0, 10.0));
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y + 50.0).abs() < 1e-9);
    }

    #[test]
    fn scale_applies_before_rotation() {
        let transform = Transform {
            angle: FRAC_PI_2,
            scale: dvec2(2.0, 1.0),
            ..Transform::default()
        };
        // (1, 0) scales to (2, 0), then rotates to (0, -2)
        let p = transform.apply(dvec2(1.0, 0.0));
        assert!(p.x.abs() < 1e-9);
        assert!((p.y + 2.0).abs() < 1e-9);
    }

    #[test]
    fn translation_applies_last() {
        let transform = Transform {
            origin: dvec2(250.0, 250.0),
            ..Transform::default()
        };
        assert_eq!(transform.apply(dvec2(1.0, 2.0)), dvec2(251.0, 252.0));
    }
}
