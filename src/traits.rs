//! Shared transform, port, and alignment traits.
//!
//! [`TransformOps`] is the transform pipeline used by every planar shape:
//! one primitive, [`TransformOps::apply_affine`], and provided combinators
//! built on it. Because a shape's `apply_affine` maps its ports through the
//! same matrix as its geometry, every combinator here automatically keeps
//! the two consistent.
//!
//! The kernel policy is in-place mutation returning `&mut Self` for
//! chaining; [`TransformOps::copied`] is the explicit deep copy for callers
//! that need a non-destructive variant. Shape instances are not safe for
//! concurrent mutation from multiple threads; clone per thread instead.

use crate::errors::{GeometryError, Result};
use crate::float_types::Real;
use crate::pose::{BACK_FACING, PortMap, Pose};
use geo::{AffineTransform, Coord, Rect, coord};

/// Smallest rectangle covering both operands.
pub(crate) fn union_rects(a: Rect<Real>, b: Rect<Real>) -> Rect<Real> {
    Rect::new(
        coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

/// Affine transform pipeline shared by curves, patterns, and multilayers.
/// All angles are degrees.
pub trait TransformOps: Clone {
    /// Apply an arbitrary affine map to the geometry *and* every port.
    fn apply_affine(&mut self, transform: &AffineTransform<Real>) -> &mut Self;

    /// Axis-aligned bounding rectangle, `None` for empty geometry.
    fn bounds(&self) -> Option<Rect<Real>>;

    /// Deep copy. Shapes are value objects: after this call the two
    /// instances share no geometry or ports, and mutating one never
    /// affects the other.
    fn copied(&self) -> Self {
        self.clone()
    }

    /// Value-returning variant of [`TransformOps::apply_affine`]: clones,
    /// transforms the clone, and leaves `self` untouched. The composition
    /// routines (`link`, the alignment helpers) use the mutating form on
    /// values the caller handed over; reach for this one when the original
    /// must survive.
    fn transformed(&self, transform: &AffineTransform<Real>) -> Self {
        let mut clone = self.clone();
        clone.apply_affine(transform);
        clone
    }

    fn translate(&mut self, dx: Real, dy: Real) -> &mut Self {
        self.apply_affine(&AffineTransform::translate(dx, dy))
    }

    /// Rotate about the origin.
    fn rotate(&mut self, degrees: Real) -> &mut Self {
        self.rotate_about(degrees, coord! { x: 0.0, y: 0.0 })
    }

    fn rotate_about(&mut self, degrees: Real, origin: Coord<Real>) -> &mut Self {
        self.apply_affine(&AffineTransform::rotate(degrees, origin))
    }

    /// Scale about the origin.
    fn scale(&mut self, x_factor: Real, y_factor: Real) -> &mut Self {
        self.scale_about(x_factor, y_factor, coord! { x: 0.0, y: 0.0 })
    }

    fn scale_about(&mut self, x_factor: Real, y_factor: Real, origin: Coord<Real>) -> &mut Self {
        self.apply_affine(&AffineTransform::scale(x_factor, y_factor, origin))
    }

    /// Shear about the origin; `x_degrees`/`y_degrees` are the skew angles
    /// along each axis.
    fn skew(&mut self, x_degrees: Real, y_degrees: Real) -> &mut Self {
        self.skew_about(x_degrees, y_degrees, coord! { x: 0.0, y: 0.0 })
    }

    fn skew_about(&mut self, x_degrees: Real, y_degrees: Real, origin: Coord<Real>) -> &mut Self {
        self.apply_affine(&AffineTransform::skew(x_degrees, y_degrees, origin))
    }

    /// Translate so the bounding-box center lands on the origin.
    fn center(&mut self) -> &mut Self {
        if let Some(rect) = self.bounds() {
            let c = rect.center();
            self.translate(-c.x, -c.y);
        }
        self
    }

    /// Move this shape so its bounding-box center coincides with `other`'s.
    /// Ports travel with the geometry; none are consumed or renamed.
    fn align<O: TransformOps>(&mut self, other: &O) -> &mut Self {
        match other.bounds() {
            Some(rect) => self.align_to(rect.center()),
            None => self,
        }
    }

    /// Move this shape so its bounding-box center lands on `center`.
    fn align_to(&mut self, center: Coord<Real>) -> &mut Self {
        match self.bounds() {
            Some(rect) => {
                let own = rect.center();
                self.translate(center.x - own.x, center.y - own.y)
            },
            None => self,
        }
    }

    /// Horizontal edge alignment.
    ///
    /// Contract: with `left = true, opposite = false` (the default call in
    /// compositions) this shape's **left** bounding edge snaps to `other`'s
    /// **left** edge. `left = false` uses the right-edge pair instead.
    /// `opposite = true` selects the mirrored pair, so `(true, true)` is
    /// right-to-right, which is what makes a pair of
    /// `halign(c, ..)` / `halign(c, .., opposite)` placements symmetric
    /// about `c`'s center.
    fn halign<O: TransformOps>(&mut self, other: &O, left: bool, opposite: bool) -> &mut Self {
        let Some(target) = other.bounds() else {
            return self;
        };
        let use_min = left != opposite;
        let x = if use_min { target.min().x } else { target.max().x };
        self.halign_to(x, use_min)
    }

    /// Move this shape so its left (`left = true`) or right bounding edge
    /// sits at `x`.
    fn halign_to(&mut self, x: Real, left: bool) -> &mut Self {
        let Some(own) = self.bounds() else {
            return self;
        };
        let edge = if left { own.min().x } else { own.max().x };
        self.translate(x - edge, 0.0)
    }

    /// Vertical edge alignment; same contract as [`TransformOps::halign`]
    /// with bottom standing in for left.
    fn valign<O: TransformOps>(&mut self, other: &O, bottom: bool, opposite: bool) -> &mut Self {
        let Some(target) = other.bounds() else {
            return self;
        };
        let use_min = bottom != opposite;
        let y = if use_min { target.min().y } else { target.max().y };
        self.valign_to(y, use_min)
    }

    /// Move this shape so its bottom (`bottom = true`) or top bounding edge
    /// sits at `y`.
    fn valign_to(&mut self, y: Real, bottom: bool) -> &mut Self {
        let Some(own) = self.bounds() else {
            return self;
        };
        let edge = if bottom { own.min().y } else { own.max().y };
        self.translate(0.0, y - edge)
    }
}

/// Named-port access with defined missing-key behavior.
pub trait Ported {
    fn ports(&self) -> &PortMap;
    fn ports_mut(&mut self) -> &mut PortMap;

    /// Look up a port by name.
    fn port(&self, name: &str) -> Result<Pose> {
        self.ports()
            .get(name)
            .copied()
            .ok_or_else(|| GeometryError::PortNotFound(name.to_string()))
    }

    /// Insert or replace a named port. Ports are plain data: assigning one
    /// never aliases another shape's port.
    fn set_port(&mut self, name: impl Into<String>, pose: Pose) {
        self.ports_mut().insert(name.into(), pose);
    }
}

/// Pose-mating composition surface.
pub trait Mate: TransformOps + Ported {
    /// Rigid-transform this shape so the pose of port `from` maps onto
    /// `target` with a 180° heading flip: the two ports end up facing each
    /// other, connector-style. With `from = None` the source is the
    /// explicit [`BACK_FACING`] origin pose.
    fn to(&mut self, target: Pose, from: Option<&str>) -> Result<&mut Self> {
        let source = match from {
            Some(name) => self.port(name)?,
            None => BACK_FACING,
        };
        let transform = source.mating_transform(&target);
        Ok(self.apply_affine(&transform))
    }
}
