//! Geometry helpers for range checks and movement.
//!
//! Contains helper functions for:
//! - Distance calculations (squared and Euclidean)
//! - Inclusive range tests used by the delivery pass
//! - Heading-to-vector conversion used by the drift and directed models

use super::types::{Displacement, Point};

/// Squared Euclidean distance in world units.
///
/// Cheaper than [`distance`] when only an ordering is needed, e.g. picking the
/// nearest landmark.
pub fn distance2(a: &Point, b: &Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Convert squared distance back to distance.
pub fn distance_from_d2(d2: f64) -> f64 {
    d2.sqrt()
}

/// Euclidean distance between two points.
pub fn distance(a: &Point, b: &Point) -> f64 {
    distance_from_d2(distance2(a, b))
}

/// Inclusive range test: a receiver exactly `range` away is reachable.
///
/// Compares the real distance rather than squared values so a boundary case
/// such as (0,0)-(3,4) with range 5 is decided on the same number the delivery
/// ratio is reported against.
pub fn in_range(a: &Point, b: &Point, range: f64) -> bool {
    distance(a, b) <= range
}

/// Unit-length heading vector scaled by `length`. `angle` is in radians.
pub fn polar(length: f64, angle: f64) -> Displacement {
    Displacement::new(length * angle.cos(), length * angle.sin())
}
