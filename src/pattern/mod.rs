//! `Pattern`: closed polygon boundary sets with named ports.
//!
//! Boundaries are stored as a [`geo::MultiPolygon`]; boolean set operations
//! are delegated wholesale to geo's [`BooleanOps`]. The kernel's job is
//! keeping the boundary-list representation lossless on the way in and out
//! and deciding what happens to ports (they are dropped: see
//! [`Pattern::union`]).

use crate::errors::{GeometryError, Result};
use crate::float_types::Real;
use crate::pose::PortMap;
use crate::traits::{Mate, Ported, TransformOps};
use geo::{
    AffineOps, AffineTransform, BooleanOps, BoundingRect, Coord, LineString, MultiPolygon,
    Polygon, Rect,
};

pub mod shapes;

/// A closed planar shape: an ordered set of polygon boundaries plus named
/// ports.
///
/// Boundaries may transiently self-intersect or overlap (offset chains from
/// a tight curve, freshly absorbed link geometry); [`Pattern::merged`]
/// resolves them by union before any boolean consumer relies on
/// non-intersection.
///
/// Like every kernel shape, `Pattern` is a value object: transforms mutate
/// in place and return `&mut Self`, and `copied` is the explicit deep copy.
/// Instances are not safe for concurrent mutation from multiple threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// Closed boundary loops, in insertion order.
    pub boundaries: MultiPolygon<Real>,
    /// Named reference poses.
    pub ports: PortMap,
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            boundaries: MultiPolygon::new(Vec::new()),
            ports: PortMap::new(),
        }
    }
}

impl Pattern {
    /// Empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern from pre-built polygons, no ports.
    pub fn from_polygons(polygons: Vec<Polygon<Real>>) -> Self {
        Self {
            boundaries: MultiPolygon::new(polygons),
            ports: PortMap::new(),
        }
    }

    /// Pattern from raw boundary point lists. Each boundary needs at least
    /// 3 points; rings are closed automatically.
    pub fn from_boundaries(boundaries: Vec<Vec<Coord<Real>>>) -> Result<Self> {
        let mut polygons = Vec::with_capacity(boundaries.len());
        for points in boundaries {
            if points.len() < 3 {
                return Err(GeometryError::InvalidGeometry(format!(
                    "a boundary needs at least 3 points, got {}",
                    points.len()
                )));
            }
            polygons.push(Polygon::new(LineString::new(points), vec![]));
        }
        Ok(Self::from_polygons(polygons))
    }

    /// Union with `other`.
    ///
    /// By contract boolean results carry **no ports**: neither operand's
    /// port set stays meaningful across a merge, so callers reassign the
    /// ones they want afterwards.
    pub fn union(&self, other: &Pattern) -> Pattern {
        tracing::debug!(
            left = self.boundaries.0.len(),
            right = other.boundaries.0.len(),
            "boolean union"
        );
        Pattern {
            boundaries: self.boundaries.union(&other.boundaries),
            ports: PortMap::new(),
        }
    }

    /// Difference `self − other`. Ports are dropped; see [`Pattern::union`].
    pub fn difference(&self, other: &Pattern) -> Pattern {
        Pattern {
            boundaries: self.boundaries.difference(&other.boundaries),
            ports: PortMap::new(),
        }
    }

    /// Intersection with `other`. Ports are dropped; see [`Pattern::union`].
    pub fn intersection(&self, other: &Pattern) -> Pattern {
        Pattern {
            boundaries: self.boundaries.intersection(&other.boundaries),
            ports: PortMap::new(),
        }
    }

    /// Owned boundary-list snapshot: every closed chain as its own
    /// coordinate list, shell first and then any holes, polygon by polygon.
    /// This is the lossless representation exchanged with boolean and
    /// plotting collaborators; it shares no storage with the pattern, and
    /// [`Pattern::from_boundaries`] is the way back in.
    pub fn boundary_coords(&self) -> Vec<Vec<Coord<Real>>> {
        let mut chains = Vec::with_capacity(self.boundaries.0.len());
        for polygon in &self.boundaries {
            chains.push(polygon.exterior().0.clone());
            for hole in polygon.interiors() {
                chains.push(hole.0.clone());
            }
        }
        chains
    }

    /// Union this pattern's own boundaries into a non-overlapping set.
    ///
    /// Not a binary boolean: ports survive. Use after `path` over a tight
    /// curve or after linking, before handing the boundaries to a consumer
    /// that assumes disjoint simple polygons.
    pub fn merged(&self) -> Pattern {
        let mut merged = MultiPolygon::new(vec![]);
        for polygon in &self.boundaries {
            merged = merged.union(&MultiPolygon::new(vec![polygon.clone()]));
        }
        Pattern {
            boundaries: merged,
            ports: self.ports.clone(),
        }
    }
}

impl TransformOps for Pattern {
    fn apply_affine(&mut self, transform: &AffineTransform<Real>) -> &mut Self {
        self.boundaries.affine_transform_mut(transform);
        for pose in self.ports.values_mut() {
            *pose = pose.apply_affine(transform);
        }
        self
    }

    fn bounds(&self) -> Option<Rect<Real>> {
        self.boundaries.bounding_rect()
    }
}

impl Ported for Pattern {
    fn ports(&self) -> &PortMap {
        &self.ports
    }

    fn ports_mut(&mut self) -> &mut PortMap {
        &mut self.ports
    }
}

impl Mate for Pattern {}
