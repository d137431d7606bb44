//! Sequential pose-mating composition.
//!
//! [`link`] walks a sequence of shapes and scalar spacings, rigid-moving
//! each successor so its entry port mates with the running exit port (the
//! same antiparallel convention as [`Mate::to`]), and absorbing its
//! geometry into the accumulated result.

use crate::curve::Curve;
use crate::errors::{GeometryError, Result};
use crate::float_types::Real;
use crate::pattern::Pattern;
use crate::pose::{PORT_IN, PORT_OUT, Pose};
use crate::taper::Taper;
use crate::traits::{Mate, Ported};

/// One element of a link sequence: a shape, or a scalar spacing meaning
/// "insert a straight run of this length".
#[derive(Debug, Clone)]
pub enum LinkItem<T> {
    Shape(T),
    Gap(Real),
}

/// A shape that can take part in sequence composition.
pub trait Linkable: Mate {
    /// A straight run of the given length. `width` is the running exit
    /// port's width; curve spacers ignore it, pattern spacers are swept
    /// with it.
    fn spacer(length: Real, width: Real) -> Result<Self>;

    /// Append `other`'s geometry. Port bookkeeping is the caller's job.
    fn absorb(&mut self, other: Self);
}

impl Linkable for Curve {
    fn spacer(length: Real, _width: Real) -> Result<Self> {
        Curve::straight(length)
    }

    fn absorb(&mut self, other: Self) {
        self.segments.extend(other.segments);
    }
}

impl Linkable for Pattern {
    fn spacer(length: Real, width: Real) -> Result<Self> {
        Curve::straight(length)?.path(&Taper::constant(width))
    }

    fn absorb(&mut self, other: Self) {
        self.boundaries.0.extend(other.boundaries.0);
    }
}

/// Compose shapes end-to-end.
///
/// Every shape element must carry both [`PORT_IN`] and [`PORT_OUT`]; each
/// successor is transformed so its entry port mates with the accumulated
/// exit port, then absorbed. Spacings become straight runs at the running
/// exit width. The result carries exactly two ports: the first element's
/// entry and the last element's exit; interior ports are discarded, so
/// callers wanting them re-read them from the inputs before linking.
///
/// Elements are taken by value; on error the partially built value is
/// dropped and the caller's other objects are untouched.
pub fn link<T, I>(items: I) -> Result<T>
where
    T: Linkable,
    I: IntoIterator<Item = LinkItem<T>>,
{
    let mut iter = items.into_iter();
    let mut accumulated = match iter.next() {
        Some(LinkItem::Shape(shape)) => shape,
        Some(LinkItem::Gap(_)) => {
            return Err(GeometryError::Link(
                "a spacing cannot lead the sequence".to_string(),
            ));
        },
        None => return Err(GeometryError::Link("empty sequence".to_string())),
    };
    let entry = require_port(&accumulated, PORT_IN)?;
    let mut exit = require_port(&accumulated, PORT_OUT)?;

    let mut absorbed = 0usize;
    for item in iter {
        let mut next = match item {
            LinkItem::Shape(shape) => shape,
            LinkItem::Gap(distance) => {
                if distance < 0.0 {
                    return Err(GeometryError::Link(format!(
                        "negative spacing {distance}"
                    )));
                }
                if distance == 0.0 {
                    continue;
                }
                T::spacer(distance, exit.width)
                    .map_err(|e| GeometryError::Link(format!("spacing: {e}")))?
            },
        };
        require_port(&next, PORT_IN)?;
        require_port(&next, PORT_OUT)?;
        next.to(exit, Some(PORT_IN))
            .map_err(|e| GeometryError::Link(e.to_string()))?;
        exit = require_port(&next, PORT_OUT)?;
        accumulated.absorb(next);
        absorbed += 1;
    }

    accumulated.ports_mut().clear();
    accumulated.set_port(PORT_IN, entry);
    accumulated.set_port(PORT_OUT, exit);
    tracing::debug!(elements = absorbed + 1, "linked sequence");
    Ok(accumulated)
}

fn require_port<T: Ported>(shape: &T, name: &str) -> Result<Pose> {
    shape
        .port(name)
        .map_err(|_| GeometryError::Link(format!("element lacks required port `{name}`")))
}
