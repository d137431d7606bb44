//! Parametric path generators as `Curve` constructors.
//!
//! Each generator is a pure function from geometric parameters (and, where
//! the shape is actually curved, a sample resolution) to a [`Curve`] whose
//! entry/exit ports are already placed. Degenerate parameters are rejected
//! with [`GeometryError::InvalidGeometry`].

use crate::curve::{Curve, sampled_segment};
use crate::errors::{GeometryError, Result};
use crate::float_types::{Real, tolerance};
use crate::link::{LinkItem, link};
use crate::pose::{PORT_IN, PORT_OUT, PortMap, Pose};
use crate::traits::Ported;
use geo::{Coord, coord};

impl Curve {
    /// Straight run along +x: the exact 2-point chain `[(0,0), (length,0)]`.
    /// No resolution parameter (a line needs no sampling).
    pub fn straight(length: Real) -> Result<Self> {
        if !(length > tolerance()) {
            return Err(GeometryError::InvalidGeometry(format!(
                "straight length must be positive, got {length}"
            )));
        }
        let mut curve = Curve {
            segments: vec![sampled_segment(vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: length, y: 0.0 },
            ])?],
            ports: PortMap::new(),
        };
        curve.reset_end_ports(1.0);
        Ok(curve)
    }

    /// Straight run meant to carry a width taper, sampled at `resolution`
    /// points so a polynomial width function has stations to land on. The
    /// path itself is still a straight line: tapering affects the derived
    /// pattern, not the curve.
    pub fn taper(length: Real, resolution: usize) -> Result<Self> {
        if !(length > tolerance()) {
            return Err(GeometryError::InvalidGeometry(format!(
                "taper length must be positive, got {length}"
            )));
        }
        if resolution < 2 {
            return Err(GeometryError::InvalidGeometry(
                "taper needs at least 2 samples".to_string(),
            ));
        }
        let points = (0..resolution)
            .map(|i| {
                let x = length * i as Real / (resolution - 1) as Real;
                coord! { x: x, y: 0.0 }
            })
            .collect();
        let mut curve = Curve {
            segments: vec![sampled_segment(points)?],
            ports: PortMap::new(),
        };
        curve.reset_end_ports(1.0);
        Ok(curve)
    }

    /// Circular turn with optional Euler (clothoid) curvature ramps.
    ///
    /// Starts at the origin heading +x and sweeps `angle` degrees (sign
    /// picks the direction; magnitudes above 360° are allowed). With
    /// `euler_fraction > 0`, that fraction of the sweep is split between an
    /// entry and an exit ramp whose curvature grows linearly from zero, and
    /// the sampled path is uniformly rescaled so its chord matches the pure
    /// circular turn's chord, so displacement stays put while the path
    /// length grows with the fraction. `radius` is therefore the displacement
    /// radius; the effective mid-arc curvature is slightly higher.
    ///
    /// # Parameters
    ///
    /// - `radius`: turn radius, > 0
    /// - `angle`: signed sweep in degrees, non-zero
    /// - `euler_fraction`: share of the sweep given to the two ramps, `[0, 1)`
    /// - `resolution`: number of samples, ≥ 2
    pub fn turn(radius: Real, angle: Real, euler_fraction: Real, resolution: usize) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::InvalidGeometry(format!(
                "turn radius must be positive, got {radius}"
            )));
        }
        if angle == 0.0 || !angle.is_finite() {
            return Err(GeometryError::InvalidGeometry(
                "turn angle must be non-zero and finite".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&euler_fraction) {
            return Err(GeometryError::InvalidGeometry(format!(
                "euler fraction must lie in [0, 1), got {euler_fraction}"
            )));
        }
        if resolution < 2 {
            return Err(GeometryError::InvalidGeometry(
                "turn needs at least 2 samples".to_string(),
            ));
        }

        let sweep = angle.abs().to_radians();
        let sign = if angle >= 0.0 { 1.0 } else { -1.0 };
        let points = if euler_fraction == 0.0 {
            circular_samples(radius, sweep, sign, resolution)
        } else {
            euler_samples(radius, sweep, sign, euler_fraction, resolution)
        };
        let end = *points.last().expect("turn produces samples");

        // Ports carry the analytic tangent headings, not the last chord's:
        // mating accuracy must not depend on the sample resolution.
        let mut curve = Curve {
            segments: vec![sampled_segment(points)?],
            ports: PortMap::new(),
        };
        curve.set_port(PORT_IN, Pose::new(0.0, 0.0, 180.0));
        curve.set_port(PORT_OUT, Pose::new(end.x, end.y, angle));
        Ok(curve)
    }

    /// Circular arc sampled about its *center* (the origin), sweeping
    /// `angle` degrees from the +x axis: the ring-style cousin of
    /// [`Curve::turn`], which starts at its tangent point instead.
    pub fn arc(radius: Real, angle: Real, resolution: usize) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::InvalidGeometry(format!(
                "arc radius must be positive, got {radius}"
            )));
        }
        if angle == 0.0 || !angle.is_finite() {
            return Err(GeometryError::InvalidGeometry(
                "arc angle must be non-zero and finite".to_string(),
            ));
        }
        if resolution < 2 {
            return Err(GeometryError::InvalidGeometry(
                "arc needs at least 2 samples".to_string(),
            ));
        }
        let sweep = angle.to_radians();
        let points: Vec<_> = (0..resolution)
            .map(|i| {
                let theta = sweep * i as Real / (resolution - 1) as Real;
                coord! { x: radius * theta.cos(), y: radius * theta.sin() }
            })
            .collect();
        let end = *points.last().expect("arc produces samples");

        // Tangent heading along the traversal is θ ± 90°.
        let turn_side = if angle >= 0.0 { 90.0 } else { -90.0 };
        let mut curve = Curve {
            segments: vec![sampled_segment(points)?],
            ports: PortMap::new(),
        };
        curve.set_port(PORT_IN, Pose::new(radius, 0.0, turn_side + 180.0));
        curve.set_port(PORT_OUT, Pose::new(end.x, end.y, angle + turn_side));
        Ok(curve)
    }

    /// Cubic-Bezier s-bend with control points `(0,0)`, `(bend_x/2, 0)`,
    /// `(bend_x/2, bend_y)`, `(bend_x, bend_y)`: horizontal tangents at both
    /// ends. A zero `bend_y` degenerates to an exact straight line, sampled
    /// with 2 points regardless of `resolution`.
    pub fn bezier_sbend(bend_x: Real, bend_y: Real, resolution: usize) -> Result<Self> {
        if !(bend_x > tolerance()) {
            return Err(GeometryError::InvalidGeometry(format!(
                "s-bend length must be positive, got {bend_x}"
            )));
        }
        if bend_y.abs() <= tolerance() {
            return Self::straight(bend_x);
        }
        if resolution < 2 {
            return Err(GeometryError::InvalidGeometry(
                "bezier s-bend needs at least 2 samples".to_string(),
            ));
        }
        let control = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: bend_x / 2.0, y: 0.0 },
            coord! { x: bend_x / 2.0, y: bend_y },
            coord! { x: bend_x, y: bend_y },
        ];
        let points = (0..resolution)
            .map(|i| {
                let t = i as Real / (resolution - 1) as Real;
                cubic_point(&control, t)
            })
            .collect();

        // End tangents are horizontal by construction of the control points.
        let mut curve = Curve {
            segments: vec![sampled_segment(points)?],
            ports: PortMap::new(),
        };
        curve.set_port(PORT_IN, Pose::new(0.0, 0.0, 180.0));
        curve.set_port(PORT_OUT, Pose::new(bend_x, bend_y, 0.0));
        Ok(curve)
    }

    /// S-bend made of two mirrored turns, shifting the path sideways by
    /// exactly `height`.
    ///
    /// When `2·radius ≥ |height|` the turn angle is solved analytically
    /// (`θ = acos(1 − |height| / (2·radius))`, at most 90°) and no straight
    /// run is inserted. Otherwise two 90° turns cannot span the offset on
    /// their own, so a straight middle run of `|height| − 2·radius` absorbs
    /// the remainder and the net sideways displacement still equals `height`
    /// exactly. The sign of `height` picks the shift direction.
    pub fn turn_sbend(
        radius: Real,
        height: Real,
        euler_fraction: Real,
        resolution: usize,
    ) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::InvalidGeometry(format!(
                "s-bend radius must be positive, got {radius}"
            )));
        }
        if height.abs() <= tolerance() {
            return Err(GeometryError::InvalidGeometry(format!(
                "s-bend height must be non-zero, got {height}"
            )));
        }
        let rise = height.abs();
        let sign = if height >= 0.0 { 1.0 } else { -1.0 };

        let (theta, run) = if rise > 2.0 * radius {
            tracing::debug!(radius, height, "s-bend taller than two 90-degree turns; inserting straight run");
            (90.0, Some(rise - 2.0 * radius))
        } else {
            ((1.0 - rise / (2.0 * radius)).acos().to_degrees(), None)
        };

        let first = Curve::turn(radius, sign * theta, euler_fraction, resolution)?;
        let second = Curve::turn(radius, -sign * theta, euler_fraction, resolution)?;
        let mut items = vec![LinkItem::Shape(first)];
        if let Some(length) = run {
            items.push(LinkItem::Gap(length));
        }
        items.push(LinkItem::Shape(second));
        link(items)
    }
}

/// Exact samples of a circular turn from the tangent point.
fn circular_samples(radius: Real, sweep: Real, sign: Real, resolution: usize) -> Vec<Coord<Real>> {
    (0..resolution)
        .map(|i| {
            let theta = sweep * i as Real / (resolution - 1) as Real;
            coord! {
                x: radius * theta.sin(),
                y: sign * radius * (1.0 - theta.cos()),
            }
        })
        .collect()
}

/// Clothoid-ramped turn samples, rescaled onto the circular chord.
///
/// The heading profile is piecewise: a ramp whose curvature climbs linearly
/// to `1/radius`, a constant-curvature middle, and the mirrored ramp down.
/// Position comes from trapezoidal integration of the heading, which is why
/// the resolution matters here and not for the pure circular case.
fn euler_samples(
    radius: Real,
    sweep: Real,
    sign: Real,
    euler_fraction: Real,
    resolution: usize,
) -> Vec<Coord<Real>> {
    let ramp_sweep = euler_fraction * sweep / 2.0;
    let ramp_len = 2.0 * ramp_sweep * radius;
    let mid_len = (1.0 - euler_fraction) * sweep * radius;
    let total = 2.0 * ramp_len + mid_len;

    let heading = |s: Real| -> Real {
        if s <= ramp_len {
            s * s / (2.0 * ramp_len * radius)
        } else if s <= ramp_len + mid_len {
            ramp_sweep + (s - ramp_len) / radius
        } else {
            let r = total - s;
            sweep - r * r / (2.0 * ramp_len * radius)
        }
    };

    let step = total / (resolution - 1) as Real;
    let mut points = Vec::with_capacity(resolution);
    points.push(coord! { x: 0.0, y: 0.0 });
    let (mut x, mut y): (Real, Real) = (0.0, 0.0);
    let mut previous: Real = 0.0;
    for i in 1..resolution {
        let h = heading(step * i as Real);
        x += step * (previous.cos() + h.cos()) / 2.0;
        y += step * (previous.sin() + h.sin()) / 2.0;
        previous = h;
        points.push(coord! { x: x, y: y });
    }

    // Rescale onto the circular chord so the displacement matches the plain
    // turn; full-circle chords collapse to zero, in which case the
    // nominal-radius path is kept as sampled.
    let circular_chord = 2.0 * radius * (sweep / 2.0).sin().abs();
    let last = points[resolution - 1];
    let chord = last.x.hypot(last.y);
    if circular_chord > tolerance() && chord > tolerance() {
        let k = circular_chord / chord;
        for p in &mut points {
            p.x *= k;
            p.y *= k;
        }
    }
    for p in &mut points {
        p.y *= sign;
    }
    points
}

/// De Casteljau-free direct cubic evaluation.
fn cubic_point(control: &[Coord<Real>; 4], t: Real) -> Coord<Real> {
    let u = 1.0 - t;
    let b = [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t];
    coord! {
        x: control.iter().zip(b).map(|(c, w)| c.x * w).sum::<Real>(),
        y: control.iter().zip(b).map(|(c, w)| c.y * w).sum::<Real>(),
    }
}
