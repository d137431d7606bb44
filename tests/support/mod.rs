//! Test support library
//! Provides various helper functions & utilities for tests.

use planarc::float_types::Real;
use planarc::traits::TransformOps;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Bounding box of any shape as `[min_x, min_y, max_x, max_y]`.
/// Panics if the shape is empty (tests always have geometry).
pub fn bounding_box<T: TransformOps>(shape: &T) -> [Real; 4] {
    let rect = shape.bounds().expect("shape has geometry");
    [rect.min().x, rect.min().y, rect.max().x, rect.max().y]
}
