//! Arc tessellation.
//!
//! A circular or helical arc is approximated by straight segments whose end
//! points lie on the arc. The segment count is chosen so the chordal deviation
//! stays within the configured arc tolerance. Every segment is queued through
//! the motion gateway.

use core::f32::consts::PI;

use embedded_hal::delay::DelayNs;
use libm::{atan2f, fabsf, floorf, sqrtf};

use crate::axis::{Axis, MotionTarget};
use crate::error::Result;
use crate::interface::Machine;
use crate::system::Condition;

use super::rotation::{Rotation, SmallAngle};
use super::{LineOutcome, LineRequest, MotionControl};

/// Angular travel below which a start/end pair counts as a full circle.
pub const ARC_ANGULAR_TRAVEL_EPSILON: f32 = 5e-7;

/// Arc plane: two in-plane axes and the helical (linear) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Plane {
    /// First in-plane axis.
    pub axis_0: Axis,
    /// Second in-plane axis.
    pub axis_1: Axis,
    /// Axis travelled linearly over the arc.
    pub linear: Axis,
}

impl Plane {
    /// G17.
    pub const XY: Plane = Plane {
        axis_0: Axis::X,
        axis_1: Axis::Y,
        linear: Axis::Z,
    };
    /// G18.
    pub const ZX: Plane = Plane {
        axis_0: Axis::Z,
        axis_1: Axis::X,
        linear: Axis::Y,
    };
    /// G19.
    pub const YZ: Plane = Plane {
        axis_0: Axis::Y,
        axis_1: Axis::Z,
        linear: Axis::X,
    };
}

/// Arc direction seen from the positive end of the linear axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArcDirection {
    /// G2.
    Clockwise,
    /// G3.
    CounterClockwise,
}

/// Arc geometry in offset form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    /// Offset from the current position to the arc center.
    pub offset: MotionTarget,
    /// Arc radius.
    pub radius: f32,
    /// Arc plane.
    pub plane: Plane,
    /// Arc direction.
    pub direction: ArcDirection,
}

/// Signed angle swept from radius vector `r` to `rt`.
///
/// Clockwise arcs yield a negative angle, counter-clockwise arcs a positive
/// one. Coincident start and end points give a full circle.
pub fn angular_travel(r: [f32; 2], rt: [f32; 2], direction: ArcDirection) -> f32 {
    let mut travel = atan2f(r[0] * rt[1] - r[1] * rt[0], r[0] * rt[0] + r[1] * rt[1]);
    match direction {
        ArcDirection::Clockwise => {
            if travel >= -ARC_ANGULAR_TRAVEL_EPSILON {
                travel -= 2.0 * PI;
            }
        }
        ArcDirection::CounterClockwise => {
            if travel <= ARC_ANGULAR_TRAVEL_EPSILON {
                travel += 2.0 * PI;
            }
        }
    }
    travel
}

/// Number of segments keeping the chordal deviation within `tolerance`.
///
/// Zero means the arc is drawn as a single straight line.
pub fn segment_count(angular_travel: f32, radius: f32, tolerance: f32) -> u16 {
    let segments = floorf(
        fabsf(0.5 * angular_travel * radius) / sqrtf(tolerance * (2.0 * radius - tolerance)),
    );
    // Saturating cast; NaN (tolerance above the diameter) maps to zero
    segments as u16
}

/// Intermediate point of a tessellated arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPoint {
    /// Position on the first plane axis.
    pub axis_0: f32,
    /// Position on the second plane axis.
    pub axis_1: f32,
    /// Position on the linear axis.
    pub linear: f32,
}

/// Iterator over the intermediate points of an arc (segments 1 to n-1).
///
/// The final point is not produced; callers finish on the literal target so
/// accumulated rounding never shifts the end point.
#[derive(Debug, Clone)]
pub struct ArcSegments<R: Rotation> {
    rotation: R,
    center: [f32; 2],
    start: [f32; 2],
    radius: [f32; 2],
    linear: f32,
    linear_per_segment: f32,
    angular_travel: f32,
    segments: u16,
    index: u16,
}

impl<R: Rotation> ArcSegments<R> {
    /// Tessellate the arc from `position` to `target`.
    pub fn new(
        position: &MotionTarget,
        target: &MotionTarget,
        spec: &ArcSpec,
        tolerance: f32,
        mut rotation: R,
    ) -> Self {
        let a0 = spec.plane.axis_0.index();
        let a1 = spec.plane.axis_1.index();
        let lin = spec.plane.linear.index();

        let center = [position[a0] + spec.offset[a0], position[a1] + spec.offset[a1]];
        let start = [-spec.offset[a0], -spec.offset[a1]];
        let end = [target[a0] - center[0], target[a1] - center[1]];

        let travel = angular_travel(start, end, spec.direction);
        let segments = segment_count(travel, spec.radius, tolerance);

        let (theta_per_segment, linear_per_segment) = if segments > 0 {
            let n = f32::from(segments);
            (travel / n, (target[lin] - position[lin]) / n)
        } else {
            (0.0, 0.0)
        };
        rotation.begin(theta_per_segment);

        Self {
            rotation,
            center,
            start,
            radius: start,
            linear: position[lin],
            linear_per_segment,
            angular_travel: travel,
            segments,
            index: 1,
        }
    }

    /// Total segment count, including the final segment to the target.
    #[inline]
    pub fn segment_count(&self) -> u16 {
        self.segments
    }

    /// Signed angle swept by the arc.
    #[inline]
    pub fn angular_travel(&self) -> f32 {
        self.angular_travel
    }
}

impl<R: Rotation> Iterator for ArcSegments<R> {
    type Item = ArcPoint;

    fn next(&mut self) -> Option<ArcPoint> {
        if self.index >= self.segments {
            return None;
        }
        self.radius = self.rotation.advance(self.radius, self.start, self.index);
        self.linear += self.linear_per_segment;
        self.index += 1;

        Some(ArcPoint {
            axis_0: self.center[0] + self.radius[0],
            axis_1: self.center[1] + self.radius[1],
            linear: self.linear,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.segments.saturating_sub(self.index));
        (remaining, Some(remaining))
    }
}

impl<'a, M, D> MotionControl<'a, M, D>
where
    M: Machine,
    D: DelayNs,
{
    /// Queue an arc from `position` to `target`.
    ///
    /// `position` is advanced through every intermediate point and equals
    /// `target` once the arc has been fully queued. An inverse-time feed is
    /// rescaled to cover all segments and switched to absolute feed. Abort
    /// stops tessellation after the current segment.
    ///
    /// # Errors
    ///
    /// Propagates gateway errors (soft limit, alarm lock) from any segment.
    pub fn arc(
        &mut self,
        target: &MotionTarget,
        line: &mut LineRequest,
        position: &mut MotionTarget,
        spec: &ArcSpec,
    ) -> Result<()> {
        let settings = &self.config.motion;
        let rotation = SmallAngle::new(settings.arc_correction_interval);
        let points = ArcSegments::new(position, target, spec, settings.arc_tolerance, rotation);

        let segments = points.segment_count();
        trace!("arc: {} segments", segments);

        if segments > 0 && line.is_inverse_time() {
            line.feed_rate *= f32::from(segments);
            line.condition.remove(Condition::INVERSE_TIME);
        }

        let plane = spec.plane;
        for point in points {
            position[plane.axis_0.index()] = point.axis_0;
            position[plane.axis_1.index()] = point.axis_1;
            position[plane.linear.index()] = point.linear;

            self.line(position, line)?;
            if self.sys.is_aborted() {
                return Ok(());
            }
        }

        if self.line(target, line)? != LineOutcome::Aborted {
            *position = *target;
        }
        Ok(())
    }
}
