//! 2D primitives as `Pattern`s.

use crate::errors::{GeometryError, Result};
use crate::float_types::{PI, Real, tolerance};
use crate::pattern::Pattern;
use geo::{LineString, Orient, Polygon as GeoPolygon, coord, line_string, orient::Direction};

impl Pattern {
    /// Axis-aligned rectangle with its lower-left corner at the origin.
    ///
    /// # Parameters
    ///
    /// - `width`: extent along x
    /// - `height`: extent along y
    pub fn rectangle(width: Real, height: Real) -> Result<Self> {
        if !(width > tolerance()) || !(height > tolerance()) {
            return Err(GeometryError::InvalidGeometry(format!(
                "rectangle sides must be positive, got {width} x {height}"
            )));
        }
        let outer = line_string![
            (x: 0.0,   y: 0.0),
            (x: width, y: 0.0),
            (x: width, y: height),
            (x: 0.0,   y: height),
            (x: 0.0,   y: 0.0),  // close explicitly
        ];
        Ok(Self::from_polygons(vec![GeoPolygon::new(outer, vec![])]))
    }

    /// Square of the given side, lower-left corner at the origin.
    pub fn square(side: Real) -> Result<Self> {
        Self::rectangle(side, side)
    }

    /// Circle about the origin, discretized into `segments` edges
    /// (minimum 3).
    pub fn circle(radius: Real, segments: usize) -> Result<Self> {
        if !(radius > tolerance()) {
            return Err(GeometryError::InvalidGeometry(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        if segments < 3 {
            return Err(GeometryError::InvalidGeometry(format!(
                "circle needs at least 3 segments, got {segments}"
            )));
        }
        Ok(Self::from_polygons(vec![circle_polygon(radius, segments)]))
    }

    /// Annulus about the origin: an outer circle with an inner-circle hole.
    pub fn ring(inner_radius: Real, outer_radius: Real, segments: usize) -> Result<Self> {
        if !(inner_radius > tolerance()) || !(outer_radius > inner_radius) {
            return Err(GeometryError::InvalidGeometry(format!(
                "ring needs 0 < inner < outer, got {inner_radius} / {outer_radius}"
            )));
        }
        if segments < 3 {
            return Err(GeometryError::InvalidGeometry(format!(
                "ring needs at least 3 segments, got {segments}"
            )));
        }
        let outer = circle_polygon(outer_radius, segments);
        let inner = circle_polygon(inner_radius, segments);
        let annulus = GeoPolygon::new(
            outer.exterior().clone(),
            vec![inner.exterior().clone()],
        );
        // hole winding must oppose the shell's for area/boolean consumers
        Ok(Self::from_polygons(vec![annulus.orient(Direction::Default)]))
    }
}

fn circle_polygon(radius: Real, segments: usize) -> GeoPolygon<Real> {
    let mut coords: Vec<_> = (0..segments)
        .map(|i| {
            let theta = 2.0 * PI * (i as Real) / (segments as Real);
            coord! { x: radius * theta.cos(), y: radius * theta.sin() }
        })
        .collect();
    // close it
    coords.push(coords[0]);
    GeoPolygon::new(LineString::new(coords), vec![])
}
