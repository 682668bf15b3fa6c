//! Shared utility functions

use std::f32::consts::PI;

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle;
    while a > PI {
        a -= 2.0 * PI;
    }
    while a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Shortest signed angular difference `b - a`, normalized to (-π, π]
#[inline]
pub fn angle_diff(a: f32, b: f32) -> f32 {
    normalize_angle(b - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_angle() {
        assert_relative_eq!(normalize_angle(0.0), 0.0);
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-5);
        assert_relative_eq!(normalize_angle(-3.0 * PI), PI, epsilon = 1e-5);
        assert_relative_eq!(normalize_angle(2.0 * PI), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_angle_diff_wraparound() {
        // -179° to +179° is a 2° step backwards, not 358° forwards
        let a = 179.0_f32.to_radians();
        let b = -179.0_f32.to_radians();
        assert_relative_eq!(angle_diff(a, b), 2.0_f32.to_radians(), epsilon = 1e-5);
    }
}
