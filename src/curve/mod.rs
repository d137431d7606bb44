//! `Curve`: open sampled point chains with named ports.
//!
//! A curve is an ordered sequence of segments, each an open polyline of at
//! least two points. Generators live in [`shapes`](self::shapes); arc-length
//! resampling and symmetrization in [`resample`](self::resample).

use crate::errors::{GeometryError, Result};
use crate::float_types::{Real, tolerance};
use crate::pattern::Pattern;
use crate::pose::{PORT_IN, PORT_OUT, PortMap, Pose};
use crate::taper::Taper;
use crate::traits::{Mate, Ported, TransformOps, union_rects};
use geo::{AffineOps, AffineTransform, BoundingRect, Coord, LineString, Polygon, Rect, coord};
use nalgebra::Vector2;

pub mod resample;
pub mod shapes;

/// Default sample count for curved generators.
pub const DEFAULT_RESOLUTION: usize = 100;

/// A parametric path: maps the normalized parameter `t ∈ [0, 1]` to a plane
/// point. Every generator in [`shapes`](self::shapes) is a sampled instance
/// of this; [`Curve::from_parametric`] turns a caller-supplied one into a
/// curve. Plain closures qualify.
pub trait Parametric {
    fn point_at(&self, t: Real) -> Coord<Real>;
}

impl<F: Fn(Real) -> Coord<Real>> Parametric for F {
    fn point_at(&self, t: Real) -> Coord<Real> {
        self(t)
    }
}

/// An open planar path: ordered point-chain segments plus named ports.
///
/// Within a segment, consecutive points are distinct (generators filter
/// numerical duplicates against the runtime tolerance). Segments are open:
/// first and last point of a chain are not assumed to coincide. Ports are
/// poses owned by the curve; they need not lie on the path itself.
///
/// Entry/exit ports follow the outward-facing convention: [`PORT_IN`] sits
/// at the start facing against the path, [`PORT_OUT`] at the end facing
/// along it, so two mating ports are antiparallel.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Open sampled point chains, in traversal order.
    pub segments: Vec<LineString<Real>>,
    /// Named reference poses.
    pub ports: PortMap,
}

impl Curve {
    /// Curve from a single pre-sampled chain. Consecutive duplicates are
    /// dropped; fewer than two distinct points is an error. Entry/exit
    /// ports are derived from the chain's end headings with unit width.
    pub fn from_points(points: Vec<Coord<Real>>) -> Result<Self> {
        let mut curve = Self {
            segments: vec![sampled_segment(points)?],
            ports: PortMap::new(),
        };
        curve.reset_end_ports(1.0);
        Ok(curve)
    }

    /// Sample a parametric function at `resolution` uniform parameter
    /// stations. Duplicate consecutive samples are filtered; end ports are
    /// derived from the end headings with unit width.
    pub fn from_parametric<P: Parametric>(function: &P, resolution: usize) -> Result<Self> {
        if resolution < 2 {
            return Err(GeometryError::InvalidGeometry(
                "a parametric curve needs at least 2 samples".to_string(),
            ));
        }
        let points = (0..resolution)
            .map(|i| function.point_at(i as Real / (resolution - 1) as Real))
            .collect();
        Self::from_points(points)
    }

    /// Total number of samples across all segments.
    pub fn sample_count(&self) -> usize {
        self.segments.iter().map(|s| s.0.len()).sum()
    }

    /// Total polyline arc length across all segments.
    pub fn length(&self) -> Real {
        self.segments.iter().map(|s| chain_length(s)).sum()
    }

    /// Read access to the constituent segments as independent sub-curves.
    /// Each clone owns its geometry and carries fresh unit-width end ports;
    /// mutating one never affects this curve.
    pub fn subcurves(&self) -> Vec<Curve> {
        self.segments
            .iter()
            .map(|segment| {
                let mut sub = Curve {
                    segments: vec![segment.clone()],
                    ports: PortMap::new(),
                };
                sub.reset_end_ports(1.0);
                sub
            })
            .collect()
    }

    /// Owned snapshot of the sampled chains, one coordinate list per
    /// segment. This is what plotting collaborators get to overlay: a
    /// copy, never a live reference into the curve.
    pub fn segment_coords(&self) -> Vec<Vec<Coord<Real>>> {
        self.segments.iter().map(|s| s.0.clone()).collect()
    }

    /// Reverse traversal order: point order flips within every segment and
    /// the segment order flips. Entry and exit ports swap roles: under the
    /// outward-facing convention the old exit pose *is* the new entry pose,
    /// so the reversed curve links head-to-head without further adjustment.
    pub fn reverse(&mut self) -> &mut Self {
        for segment in &mut self.segments {
            segment.0.reverse();
        }
        self.segments.reverse();
        let entry = self.ports.shift_remove(PORT_IN);
        let exit = self.ports.shift_remove(PORT_OUT);
        if let Some(pose) = exit {
            self.ports.insert(PORT_IN.to_string(), pose);
        }
        if let Some(pose) = entry {
            self.ports.insert(PORT_OUT.to_string(), pose);
        }
        self
    }

    /// Build a [`Pattern`] by sweeping a width function along the curve.
    ///
    /// At each sample the local width `w(t)` is taken from `taper`, the unit
    /// normal from the local tangent (end tangents extrapolated from the
    /// adjacent edge), and the path is offset by `±w(t)/2` into two parallel
    /// chains closed into one boundary loop per segment (start cap, right
    /// chain, end cap, reversed left chain).
    ///
    /// The parameter `t` is the per-sample-index fraction across the
    /// concatenated segments, so segments with very different sample
    /// densities make a taper land unevenly; resample with
    /// [`Curve::interpolated`] first when that matters.
    ///
    /// The pattern inherits this curve's ports; its entry/exit ports carry
    /// the taper's endpoint widths.
    pub fn path(&self, taper: &Taper) -> Result<Pattern> {
        if self.segments.is_empty() {
            return Err(GeometryError::InvalidGeometry(
                "cannot sweep a width along an empty curve".to_string(),
            ));
        }
        let total: usize = self.sample_count();
        let mut boundaries = Vec::with_capacity(self.segments.len());
        let mut index = 0usize;
        for segment in &self.segments {
            let mut right = Vec::with_capacity(segment.0.len());
            let mut left = Vec::with_capacity(segment.0.len());
            for (i, point) in segment.0.iter().enumerate() {
                let t = index as Real / (total - 1).max(1) as Real;
                index += 1;
                let width = taper.eval(t);
                if width <= 0.0 {
                    return Err(GeometryError::InvalidGeometry(format!(
                        "width function is non-positive ({width}) at t = {t}"
                    )));
                }
                let tangent = sample_tangent(segment, i);
                let normal = Vector2::new(-tangent.y, tangent.x) * (width / 2.0);
                right.push(coord! { x: point.x - normal.x, y: point.y - normal.y });
                left.push(coord! { x: point.x + normal.x, y: point.y + normal.y });
            }
            left.reverse();
            right.extend(left);
            boundaries.push(Polygon::new(LineString::new(right), vec![]));
        }

        let mut pattern = Pattern::from_polygons(boundaries);
        pattern.ports = self.ports.clone();
        // Keep the curve's own entry/exit poses (generators place them with
        // analytic headings); fall back to chord headings for hand-built
        // curves. Only the widths become the taper's endpoint widths.
        let (entry_geom, exit_geom) = self.end_poses();
        let entry = self.ports.get(PORT_IN).copied().unwrap_or(entry_geom);
        let exit = self.ports.get(PORT_OUT).copied().unwrap_or(exit_geom);
        pattern.set_port(
            PORT_IN,
            Pose {
                width: taper.start(),
                ..entry
            },
        );
        pattern.set_port(
            PORT_OUT,
            Pose {
                width: taper.end(),
                ..exit
            },
        );
        Ok(pattern)
    }

    /// Entry/exit poses derived from the end samples (entry faces backward).
    pub(crate) fn end_poses(&self) -> (Pose, Pose) {
        let first = self.segments.first().expect("non-empty curve");
        let last = self.segments.last().expect("non-empty curve");
        let start = first.0[0];
        let end = *last.0.last().expect("segment has points");
        let entry = Pose::new(start.x, start.y, chain_heading(first, true) + 180.0);
        let exit = Pose::new(end.x, end.y, chain_heading(last, false));
        (entry, exit)
    }

    /// Recompute entry/exit ports from the geometry with the given width.
    pub(crate) fn reset_end_ports(&mut self, width: Real) {
        let (entry, exit) = self.end_poses();
        self.ports
            .insert(PORT_IN.to_string(), Pose { width, ..entry });
        self.ports
            .insert(PORT_OUT.to_string(), Pose { width, ..exit });
    }
}

impl TransformOps for Curve {
    fn apply_affine(&mut self, transform: &AffineTransform<Real>) -> &mut Self {
        for segment in &mut self.segments {
            segment.affine_transform_mut(transform);
        }
        for pose in self.ports.values_mut() {
            *pose = pose.apply_affine(transform);
        }
        self
    }

    fn bounds(&self) -> Option<Rect<Real>> {
        self.segments
            .iter()
            .filter_map(|s| s.bounding_rect())
            .reduce(union_rects)
    }
}

impl Ported for Curve {
    fn ports(&self) -> &PortMap {
        &self.ports
    }

    fn ports_mut(&mut self) -> &mut PortMap {
        &mut self.ports
    }
}

impl Mate for Curve {}

/// Drop consecutive points closer than the runtime tolerance.
fn dedup_chain(points: Vec<Coord<Real>>) -> LineString<Real> {
    let eps = tolerance();
    let mut chain: Vec<Coord<Real>> = Vec::with_capacity(points.len());
    for point in points {
        if let Some(prev) = chain.last() {
            if (point.x - prev.x).hypot(point.y - prev.y) <= eps {
                continue;
            }
        }
        chain.push(point);
    }
    LineString::new(chain)
}

/// Dedup a sampled chain and enforce the segment invariant: every segment
/// keeps at least 2 distinct points. Generators route their samples through
/// here so extreme-but-accepted parameters fail with `InvalidGeometry`
/// instead of producing a degenerate curve.
pub(crate) fn sampled_segment(points: Vec<Coord<Real>>) -> Result<LineString<Real>> {
    let chain = dedup_chain(points);
    if chain.0.len() < 2 {
        return Err(GeometryError::InvalidGeometry(
            "samples collapse below 2 distinct points at the current tolerance".to_string(),
        ));
    }
    Ok(chain)
}

/// Polyline length of one chain.
pub(crate) fn chain_length(chain: &LineString<Real>) -> Real {
    chain
        .0
        .windows(2)
        .map(|w| (w[1].x - w[0].x).hypot(w[1].y - w[0].y))
        .sum()
}

/// Heading (degrees) of a chain's first or last edge.
pub(crate) fn chain_heading(chain: &LineString<Real>, at_start: bool) -> Real {
    let (a, b) = if at_start {
        (chain.0[0], chain.0[1])
    } else {
        let n = chain.0.len();
        (chain.0[n - 2], chain.0[n - 1])
    };
    (b.y - a.y).atan2(b.x - a.x).to_degrees()
}

/// Unit tangent at sample `i`, extrapolated from the adjacent edge at the
/// chain ends and averaged over both edges in the interior.
fn sample_tangent(chain: &LineString<Real>, i: usize) -> Vector2<Real> {
    let pts = &chain.0;
    let n = pts.len();
    let edge = |a: Coord<Real>, b: Coord<Real>| {
        Vector2::new(b.x - a.x, b.y - a.y).normalize()
    };
    if i == 0 {
        edge(pts[0], pts[1])
    } else if i == n - 1 {
        edge(pts[n - 2], pts[n - 1])
    } else {
        let sum = edge(pts[i - 1], pts[i]) + edge(pts[i], pts[i + 1]);
        if sum.norm() <= tolerance() {
            // cusp: fall back to the outgoing edge
            edge(pts[i], pts[i + 1])
        } else {
            sum.normalize()
        }
    }
}

