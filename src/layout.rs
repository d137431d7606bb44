//! Layers, multilayer stacks, and hierarchical cells.
//!
//! This is the kernel's boundary with the export collaborators: a
//! [`Multilayer`] is an ordered `(pattern, layer)` stack whose transforms
//! keep every pattern and port consistent; a [`Cell`] is the hierarchical,
//! reference-based layout-exchange form (named cell, flat elements, posed
//! child placements); a [`LayerStack`] carries the per-layer z-ranges the
//! mesh collaborator needs to extrude correctly stacked solids.

use crate::errors::{GeometryError, Result};
use crate::float_types::Real;
use crate::pattern::Pattern;
use crate::pose::{PortMap, Pose};
use crate::traits::{Mate, Ported, TransformOps, union_rects};
use geo::{AffineOps, AffineTransform, MultiPolygon, Rect};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Process-layer identifier (`"ridge_si"`, `"metal_1"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Layer(pub String);

impl From<&str> for Layer {
    fn from(id: &str) -> Self {
        Layer(id.to_string())
    }
}

impl From<String> for Layer {
    fn from(id: String) -> Self {
        Layer(id)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered stack of patterns on named process layers, sharing one port
/// map.
///
/// Transforms act on every pattern (and its ports) and on the stack's own
/// merged port map together, so a multilayer device moves as one rigid
/// object.
#[derive(Debug, Clone, Default)]
pub struct Multilayer {
    /// `(pattern, layer)` pairs in insertion order.
    pub stack: Vec<(Pattern, Layer)>,
    /// Merged ports of the stacked patterns plus any added explicitly.
    pub ports: PortMap,
}

impl Multilayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-pattern multilayer; the pattern's ports seed the stack's.
    pub fn from_pattern(pattern: Pattern, layer: impl Into<Layer>) -> Self {
        let mut multilayer = Self::new();
        multilayer.add(pattern, layer);
        multilayer
    }

    /// Push a pattern onto the stack. Its ports are merged into the stack's
    /// map; on a name collision the newest insertion wins.
    pub fn add(&mut self, pattern: Pattern, layer: impl Into<Layer>) -> &mut Self {
        for (name, pose) in &pattern.ports {
            self.ports.insert(name.clone(), *pose);
        }
        self.stack.push((pattern, layer.into()));
        self
    }

    /// Boundaries grouped per layer, in first-use layer order. Boundaries
    /// are concatenated, not unioned; call [`Pattern::merged`] on the
    /// result's patterns when a consumer needs disjoint polygons.
    pub fn layer_boundaries(&self) -> IndexMap<Layer, MultiPolygon<Real>> {
        let mut merged: IndexMap<Layer, MultiPolygon<Real>> = IndexMap::new();
        for (pattern, layer) in &self.stack {
            merged
                .entry(layer.clone())
                .or_insert_with(|| MultiPolygon::new(Vec::new()))
                .0
                .extend(pattern.boundaries.0.iter().cloned());
        }
        merged
    }

    /// Per-layer extrusion records for the mesh collaborator, emitted in
    /// the stack's processing order with their z-ranges.
    ///
    /// Every layer used by this multilayer must have a z-range in `stack`;
    /// a missing or inverted range is an error.
    pub fn extrusion(&self, stack: &LayerStack) -> Result<Vec<ExtrudedLayer>> {
        let per_layer = self.layer_boundaries();
        let mut out = Vec::new();
        for (layer, (zmin, zmax)) in &stack.zranges {
            let Some(boundaries) = per_layer.get(layer) else {
                continue;
            };
            if zmax <= zmin {
                return Err(GeometryError::InvalidGeometry(format!(
                    "layer `{layer}` has inverted z-range [{zmin}, {zmax}]"
                )));
            }
            out.push(ExtrudedLayer {
                layer: layer.clone(),
                boundaries: boundaries.clone(),
                zmin: *zmin,
                zmax: *zmax,
            });
        }
        for layer in per_layer.keys() {
            if !stack.zranges.contains_key(layer) {
                tracing::warn!(%layer, "no z-range for layer");
                return Err(GeometryError::InvalidGeometry(format!(
                    "no z-range for layer `{layer}`"
                )));
            }
        }
        Ok(out)
    }

    /// Snapshot this multilayer as a named cell.
    pub fn to_cell(&self, name: impl Into<String>) -> Cell {
        let mut cell = Cell::new(name);
        for (pattern, layer) in &self.stack {
            cell.add(pattern, layer.clone());
        }
        cell.ports = self.ports.clone();
        cell
    }
}

impl TransformOps for Multilayer {
    fn apply_affine(&mut self, transform: &AffineTransform<Real>) -> &mut Self {
        for (pattern, _) in &mut self.stack {
            pattern.apply_affine(transform);
        }
        for pose in self.ports.values_mut() {
            *pose = pose.apply_affine(transform);
        }
        self
    }

    fn bounds(&self) -> Option<Rect<Real>> {
        self.stack
            .iter()
            .filter_map(|(pattern, _)| pattern.bounds())
            .reduce(union_rects)
    }
}

impl Ported for Multilayer {
    fn ports(&self) -> &PortMap {
        &self.ports
    }

    fn ports_mut(&mut self) -> &mut PortMap {
        &mut self.ports
    }
}

impl Mate for Multilayer {}

/// One extrusion record: a layer's boundaries and its z-range. The record
/// order of [`Multilayer::extrusion`] is the processing order.
#[derive(Debug, Clone)]
pub struct ExtrudedLayer {
    pub layer: Layer,
    pub boundaries: MultiPolygon<Real>,
    pub zmin: Real,
    pub zmax: Real,
}

impl ExtrudedLayer {
    pub fn height(&self) -> Real {
        self.zmax - self.zmin
    }
}

/// Ordered layer → z-range table describing a fabrication stack.
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    /// Layer → `(zmin, zmax)`, in processing order.
    pub zranges: IndexMap<Layer, (Real, Real)>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion in processing order.
    pub fn with_layer(mut self, layer: impl Into<Layer>, zmin: Real, zmax: Real) -> Self {
        self.zranges.insert(layer.into(), (zmin, zmax));
        self
    }

    pub fn zrange(&self, layer: &Layer) -> Option<(Real, Real)> {
        self.zranges.get(layer).copied()
    }
}

/// A named cell: flat `(boundaries, layer)` elements plus posed child-cell
/// placements. This is the reference-based (non-flattened) layout-exchange
/// form; [`Cell::flatten`] resolves the hierarchy when a flat view is
/// needed.
///
/// Cells are shared immutably via [`Arc`], so a placement can never alias
/// mutable geometry, and reference cycles cannot be constructed.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub name: String,
    /// Boundary sets per layer, in insertion order.
    pub elements: Vec<(MultiPolygon<Real>, Layer)>,
    /// Posed child placements.
    pub references: Vec<CellReference>,
    pub ports: PortMap,
}

/// A posed placement of a child cell inside a parent.
#[derive(Debug, Clone)]
pub struct CellReference {
    pub cell: Arc<Cell>,
    pub pose: Pose,
}

impl Cell {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Snapshot a pattern's boundaries onto a layer of this cell. The cell
    /// owns the copy; later mutation of `pattern` does not affect it.
    pub fn add(&mut self, pattern: &Pattern, layer: impl Into<Layer>) -> &mut Self {
        self.elements
            .push((pattern.boundaries.clone(), layer.into()));
        self
    }

    /// Place a child cell at `pose` (rotate by its angle, then translate to
    /// its position).
    pub fn place(&mut self, cell: Arc<Cell>, pose: Pose) -> &mut Self {
        self.references.push(CellReference { cell, pose });
        self
    }

    /// Resolve the reference hierarchy into a flat `(boundaries, layer)`
    /// list, child placements applied recursively.
    pub fn flatten(&self) -> Vec<(MultiPolygon<Real>, Layer)> {
        let mut out = self.elements.clone();
        for reference in &self.references {
            let transform = reference.pose.placement_transform();
            for (boundaries, layer) in reference.cell.flatten() {
                out.push((boundaries.affine_transform(&transform), layer));
            }
        }
        out
    }
}
