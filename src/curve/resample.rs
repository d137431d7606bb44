//! Arc-length resampling and symmetrization.

use crate::curve::{Curve, chain_heading, chain_length};
use crate::float_types::Real;
use crate::pose::{PORT_OUT, Pose};
use geo::{AffineOps, AffineTransform, Coord, LineString, coord};

impl Curve {
    /// Resample to near-uniform arc-length spacing across segment
    /// boundaries.
    ///
    /// The total sample count is preserved, but redistributed so each
    /// segment's share is proportional to its share of the total arc length
    /// (with a floor of 2), and samples inside each segment are placed at
    /// uniform arc-length steps. Use this before [`Curve::path`] whenever
    /// segments have very different natural densities (a short straight
    /// run between two dense arcs, say) so an index-parameterized width
    /// taper lands evenly along the physical path.
    pub fn interpolated(&self) -> Curve {
        let total_len: Real = self.length();
        let total_samples = self.sample_count();
        if self.segments.is_empty() || total_len <= 0.0 {
            return self.clone();
        }
        let segments = self
            .segments
            .iter()
            .map(|segment| {
                let share = chain_length(segment) / total_len;
                let n = ((total_samples as Real * share).round() as usize).max(2);
                resample_chain(segment, n)
            })
            .collect();
        Curve {
            segments,
            ports: self.ports.clone(),
        }
    }

    /// Mirror the curve about the line through its last point perpendicular
    /// to its terminal tangent, appending the reflection traversed backward.
    ///
    /// The sample count doubles and the junction is tangent-continuous: the
    /// mirrored half leaves the last point along the original terminal
    /// heading. Useful for growing ring-like closed structures out of a
    /// half-design. The exit port moves to the mirrored image of the start;
    /// all other ports stay put.
    pub fn symmetrized(&self) -> Curve {
        let Some(last) = self.segments.last() else {
            return self.clone();
        };
        let end = *last.0.last().expect("segment has points");
        let heading = chain_heading(last, false).to_radians();
        // mirror line direction = path normal at the endpoint
        let (sin, cos) = heading.sin_cos();
        let (ux, uy) = (-sin, cos);
        let reflection = reflection_across(end, ux, uy);

        let mut segments = self.segments.clone();
        for segment in self.segments.iter().rev() {
            let mut mirrored = segment.affine_transform(&reflection);
            mirrored.0.reverse();
            segments.push(mirrored);
        }

        let mut curve = Curve {
            segments,
            ports: self.ports.clone(),
        };
        let (_, exit) = curve.end_poses();
        let width = curve
            .ports
            .get(PORT_OUT)
            .map(|p| p.width)
            .unwrap_or(1.0);
        curve.ports
            .insert(PORT_OUT.to_string(), Pose { width, ..exit });
        curve
    }
}

/// Reflection across the line through `origin` with unit direction `(ux, uy)`:
/// `R = 2uuᵀ − I` about that point.
fn reflection_across(origin: Coord<Real>, ux: Real, uy: Real) -> AffineTransform<Real> {
    let a = 2.0 * ux * ux - 1.0;
    let b = 2.0 * ux * uy;
    let d = b;
    let e = 2.0 * uy * uy - 1.0;
    AffineTransform::new(
        a,
        b,
        origin.x - a * origin.x - b * origin.y,
        d,
        e,
        origin.y - d * origin.x - e * origin.y,
    )
}

/// Resample one chain at `n` uniform arc-length stations by walking its
/// cumulative-length table with linear interpolation. Endpoints are kept
/// exactly.
fn resample_chain(chain: &LineString<Real>, n: usize) -> LineString<Real> {
    let pts = &chain.0;
    let mut cumulative = Vec::with_capacity(pts.len());
    cumulative.push(0.0);
    for w in pts.windows(2) {
        let step = (w[1].x - w[0].x).hypot(w[1].y - w[0].y);
        cumulative.push(cumulative.last().unwrap() + step);
    }
    let total = *cumulative.last().unwrap();
    if total <= 0.0 {
        return chain.clone();
    }

    let mut out = Vec::with_capacity(n);
    let mut cursor = 0usize;
    for i in 0..n {
        let s = total * i as Real / (n - 1) as Real;
        while cursor + 1 < cumulative.len() - 1 && cumulative[cursor + 1] < s {
            cursor += 1;
        }
        let span = cumulative[cursor + 1] - cumulative[cursor];
        let f = if span > 0.0 {
            ((s - cumulative[cursor]) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (a, b) = (pts[cursor], pts[cursor + 1]);
        out.push(coord! {
            x: a.x + (b.x - a.x) * f,
            y: a.y + (b.y - a.y) * f,
        });
    }
    LineString::new(out)
}
