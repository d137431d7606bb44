//! A parametric-curve and polygon-composition engine for planar device
//! layouts (photonic and metal routing).
//!
//! Complex 2D shapes are built from piecewise parametric curves, carry named
//! reference poses ("ports"), and stay consistent through every transform:
//! whatever happens to the geometry happens to the ports, by construction.
//!
//! # The pieces
//! - [`Pose`](pose::Pose): an `(x, y, angle, width)` reference frame, the
//!   atomic unit ports and curve samples are expressed in
//! - [`Curve`](curve::Curve): open sampled point chains from the generators
//!   in [`curve::shapes`] (straight, circular/Euler turn, arc, Bezier and
//!   turn s-bends), with arc-length resampling and symmetrization
//! - [`Taper`](taper::Taper): polynomial width functions swept along a
//!   curve by [`Curve::path`](curve::Curve::path) to produce patterns
//! - [`Pattern`](pattern::Pattern): closed polygon boundary sets; boolean
//!   set operations are delegated to [`geo`]'s `BooleanOps`
//! - [`TransformOps`](traits::TransformOps) / [`Mate`](traits::Mate):
//!   translate/rotate/scale/skew, bounding-box alignment, and port mating
//! - [`link`](link::link): stitches curves or patterns end-to-end,
//!   entry port onto exit port
//! - [`layout`]: multilayer stacks, hierarchical cells, and the per-layer
//!   z-range records handed to mesh/export collaborators
//!
//! The kernel is single-threaded and synchronous: plain value objects, no
//! I/O, no locking. Clone per thread for parallel use.

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod curve;
pub mod errors;
pub mod float_types;
pub mod layout;
pub mod link;
pub mod pattern;
pub mod pose;
pub mod taper;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use curve::{Curve, DEFAULT_RESOLUTION, Parametric};
pub use errors::{GeometryError, Result};
pub use layout::{Cell, CellReference, ExtrudedLayer, Layer, LayerStack, Multilayer};
pub use link::{LinkItem, Linkable, link};
pub use pattern::Pattern;
pub use pose::{BACK_FACING, PORT_IN, PORT_OUT, PortMap, Pose};
pub use taper::Taper;
pub use traits::{Mate, Ported, TransformOps};
