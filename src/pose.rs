//! Poses and port maps.
//!
//! A [`Pose`] is the atomic reference frame of the kernel: a planar position,
//! a heading, and the local strip width at that point. Ports are named poses
//! attached to a curve or pattern; the map type is [`PortMap`].
//!
//! All headings are degrees, normalized to `(-180, 180]`. Radians appear only
//! inside trig call sites.

use crate::float_types::Real;
use geo::{AffineOps, AffineTransform, Coord, Point, coord};
use indexmap::IndexMap;
use nalgebra::Vector2;

/// Named port map. Port names are unique per shape; iteration order is the
/// insertion order, but no kernel operation depends on it.
pub type PortMap = IndexMap<String, Pose>;

/// Conventional entry-port name (faces backward, against the path).
pub const PORT_IN: &str = "a0";
/// Conventional exit-port name (faces forward, along the path).
pub const PORT_OUT: &str = "b0";

/// The implicit source pose used by `to` when no source port is named:
/// the origin, facing backward, unit width. Mating this pose onto a target
/// port places the shape's local origin on the target, heading along it.
pub const BACK_FACING: Pose = Pose {
    x: 0.0,
    y: 0.0,
    angle: 180.0,
    width: 1.0,
};

/// A rigid planar reference frame plus a scalar width.
///
/// `width` records the local strip/waveguide width at the reference point.
/// Downstream consumers use it for mode matching; the kernel carries it
/// through every transform but does not enforce it.
///
/// `Pose` is an immutable `Copy` value; equality is exact numeric comparison,
/// so tests must compare with a tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: Real,
    pub y: Real,
    /// Heading in degrees, normalized to `(-180, 180]`.
    pub angle: Real,
    /// Local strip width, ≥ 0.
    pub width: Real,
}

impl Pose {
    /// Pose with unit width.
    pub fn new(x: Real, y: Real, angle: Real) -> Self {
        Self {
            x,
            y,
            angle: normalize_angle(angle),
            width: 1.0,
        }
    }

    /// Pose with an explicit width.
    pub fn with_width(x: Real, y: Real, angle: Real, width: Real) -> Self {
        Self {
            x,
            y,
            angle: normalize_angle(angle),
            width,
        }
    }

    /// Position as a geo coordinate.
    pub fn xy(&self) -> Coord<Real> {
        coord! { x: self.x, y: self.y }
    }

    /// Unit vector along the heading.
    pub fn direction(&self) -> Vector2<Real> {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        Vector2::new(cos, sin)
    }

    /// Unit vector 90° counter-clockwise of the heading.
    pub fn normal(&self) -> Vector2<Real> {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        Vector2::new(-sin, cos)
    }

    /// Same position and width, heading flipped by 180°.
    pub fn reversed(&self) -> Self {
        Self {
            angle: normalize_angle(self.angle + 180.0),
            ..*self
        }
    }

    /// Map this pose through an arbitrary affine transform.
    ///
    /// The position maps directly. The heading is re-derived from the mapped
    /// direction vector, and the width becomes the mapped length of the
    /// width-long chord along the normal, so non-uniform scales and skews
    /// keep the pose consistent with the geometry they also act on.
    pub fn apply_affine(&self, transform: &AffineTransform<Real>) -> Self {
        let origin = Point::new(self.x, self.y).affine_transform(transform);
        let d = self.direction();
        let tip = Point::new(self.x + d.x, self.y + d.y).affine_transform(transform);
        let angle = (tip.y() - origin.y())
            .atan2(tip.x() - origin.x())
            .to_degrees();
        let n = self.normal() * (self.width / 2.0);
        let left = Point::new(self.x + n.x, self.y + n.y).affine_transform(transform);
        let right = Point::new(self.x - n.x, self.y - n.y).affine_transform(transform);
        let width = (left.x() - right.x()).hypot(left.y() - right.y());
        Self {
            x: origin.x(),
            y: origin.y(),
            angle: normalize_angle(angle),
            width,
        }
    }

    /// The rigid transform that mates this pose onto `target`: positions
    /// coincide and the mapped heading is `target.angle + 180°`, the
    /// antiparallel "connector" orientation. This single definition backs
    /// both `to` and `link`.
    pub fn mating_transform(&self, target: &Pose) -> AffineTransform<Real> {
        let delta = (target.angle - self.angle + 180.0).to_radians();
        let (sin, cos) = delta.sin_cos();
        let (px, py) = (self.x, self.y);
        let (tx, ty) = (target.x - self.x, target.y - self.y);
        // rotate by delta about (px, py), then translate by (tx, ty)
        AffineTransform::new(
            cos,
            -sin,
            px + tx - cos * px + sin * py,
            sin,
            cos,
            py + ty - sin * px - cos * py,
        )
    }

    /// The transform that places child-local coordinates into a parent frame:
    /// rotate by `angle` about the origin, then translate to `(x, y)`.
    pub fn placement_transform(&self) -> AffineTransform<Real> {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        AffineTransform::new(cos, -sin, self.x, sin, cos, self.y)
    }
}

/// Fold an angle in degrees into `(-180, 180]`.
pub fn normalize_angle(angle: Real) -> Real {
    let mut a = angle % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn angle_normalization() {
        assert_relative_eq!(normalize_angle(360.0), 0.0);
        assert_relative_eq!(normalize_angle(270.0), -90.0);
        assert_relative_eq!(normalize_angle(-180.0), 180.0);
        assert_relative_eq!(normalize_angle(540.0), 180.0);
        assert_relative_eq!(Pose::new(0.0, 0.0, 450.0).angle, 90.0);
    }

    #[test]
    fn mating_is_antiparallel() {
        let from = Pose::new(2.0, -1.0, 30.0);
        let target = Pose::new(5.0, 7.0, -45.0);
        let mapped = from.apply_affine(&from.mating_transform(&target));
        assert_relative_eq!(mapped.x, target.x, epsilon = 1e-9);
        assert_relative_eq!(mapped.y, target.y, epsilon = 1e-9);
        assert_relative_eq!(
            normalize_angle(mapped.angle - target.angle).abs(),
            180.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn affine_rescales_width() {
        let pose = Pose::with_width(0.0, 0.0, 0.0, 2.0);
        // heading +x, normal +y; doubling y doubles the width chord
        let scaled = pose.apply_affine(&AffineTransform::scale(
            1.0,
            2.0,
            coord! { x: 0.0, y: 0.0 },
        ));
        assert_relative_eq!(scaled.width, 4.0, epsilon = 1e-9);
        assert_relative_eq!(scaled.angle, 0.0, epsilon = 1e-9);
    }
}
