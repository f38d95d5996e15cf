//! Radius vector rotation strategies for arc tessellation.
//!
//! Rotating the radius vector by a fixed angle each segment avoids a `sin`
//! and `cos` per point. [`SmallAngle`] uses a third-order Taylor rotation and
//! periodically snaps back to the exact position computed from the arc start,
//! which bounds single-precision drift. [`ExactRotation`] evaluates the exact
//! rotation every segment.

use libm::{cosf, sinf};

/// Strategy producing successive radius vectors along an arc.
pub trait Rotation {
    /// Prepare for an arc advancing `theta_per_segment` radians per segment.
    fn begin(&mut self, theta_per_segment: f32);

    /// Radius vector of segment `index` (1-based), given the previous vector
    /// and the vector at the arc start.
    fn advance(&mut self, previous: [f32; 2], start: [f32; 2], index: u16) -> [f32; 2];
}

/// Exact rotation of `start` by `angle` radians.
#[inline]
fn rotate_exact(start: [f32; 2], angle: f32) -> [f32; 2] {
    let cos = cosf(angle);
    let sin = sinf(angle);
    [
        start[0] * cos - start[1] * sin,
        start[0] * sin + start[1] * cos,
    ]
}

/// Small-angle incremental rotation with periodic exact correction.
///
/// `cos ≈ 1 - θ²/2`, `sin ≈ θ - θ³/6`. After `correction_interval`
/// incremental steps the next point is computed exactly from the arc start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmallAngle {
    correction_interval: u8,
    theta: f32,
    cos_t: f32,
    sin_t: f32,
    count: u8,
}

impl SmallAngle {
    /// Create a rotation correcting every `correction_interval` increments.
    pub fn new(correction_interval: u8) -> Self {
        Self {
            correction_interval,
            theta: 0.0,
            cos_t: 1.0,
            sin_t: 0.0,
            count: 0,
        }
    }

    /// Increments between exact corrections.
    #[inline]
    pub fn correction_interval(&self) -> u8 {
        self.correction_interval
    }
}

impl Rotation for SmallAngle {
    fn begin(&mut self, theta_per_segment: f32) {
        let theta = theta_per_segment;
        let cos_t = 2.0 - theta * theta;
        self.sin_t = theta * 0.166_666_67 * (cos_t + 4.0);
        self.cos_t = cos_t * 0.5;
        self.theta = theta;
        self.count = 0;
    }

    fn advance(&mut self, previous: [f32; 2], start: [f32; 2], index: u16) -> [f32; 2] {
        if self.count < self.correction_interval {
            self.count += 1;
            [
                previous[0] * self.cos_t - previous[1] * self.sin_t,
                previous[0] * self.sin_t + previous[1] * self.cos_t,
            ]
        } else {
            self.count = 0;
            rotate_exact(start, f32::from(index) * self.theta)
        }
    }
}

/// Exact rotation on every segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExactRotation {
    theta: f32,
}

impl Rotation for ExactRotation {
    fn begin(&mut self, theta_per_segment: f32) {
        self.theta = theta_per_segment;
    }

    fn advance(&mut self, _previous: [f32; 2], start: [f32; 2], index: u16) -> [f32; 2] {
        rotate_exact(start, f32::from(index) * self.theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::PI;

    fn norm(v: [f32; 2]) -> f32 {
        libm::sqrtf(v[0] * v[0] + v[1] * v[1])
    }

    #[test]
    fn test_quarter_turn_exact() {
        let mut rotation = ExactRotation::default();
        rotation.begin(PI / 4.0);

        let v = rotation.advance([0.0, 0.0], [10.0, 0.0], 2);
        assert!(v[0].abs() < 1e-5);
        assert!((v[1] - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_small_angle_corrects_after_interval() {
        let theta = 0.05;
        let start = [10.0, 0.0];
        let mut rotation = SmallAngle::new(2);
        rotation.begin(theta);

        let mut v = start;
        for index in 1..=3u16 {
            v = rotation.advance(v, start, index);
        }

        // Third step is the exact correction
        let exact = rotate_exact(start, 3.0 * theta);
        assert_eq!(v, exact);
    }

    #[test]
    fn test_small_angle_drift_bound() {
        // Full circle, r = 10, 157 segments
        let theta = 2.0 * PI / 157.0;
        let start = [-3.0, 9.539392];
        let radius = norm(start);

        for interval in 1..=20u8 {
            let mut rotation = SmallAngle::new(interval);
            rotation.begin(theta);
            let mut v = start;
            for index in 1..157u16 {
                v = rotation.advance(v, start, index);
                let exact = rotate_exact(start, f32::from(index) * theta);
                assert!((norm(v) - radius).abs() < 1e-3, "interval {}", interval);
                assert!((v[0] - exact[0]).abs() < 1e-3, "interval {}", interval);
                assert!((v[1] - exact[1]).abs() < 1e-3, "interval {}", interval);
            }
        }
    }
}
