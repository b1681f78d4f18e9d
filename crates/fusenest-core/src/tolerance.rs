//! Approximate point equality used to stitch curves end to end.

use crate::Point2;

/// Relative tolerance used when no other value is configured.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Differences below this are equal regardless of magnitude.
const ABS_FLOOR: f64 = 1e-9;

fn close(a: f64, b: f64, tol: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= (tol * a.abs().max(b.abs())).max(ABS_FLOOR)
}

#[must_use]
pub fn points_equal(p1: Point2, p2: Point2, tol: f64) -> bool {
    close(p1.x, p2.x, tol) && close(p1.y, p2.y, tol)
}

#[must_use]
pub fn point_in_set(p: Point2, candidates: &[Point2], tol: f64) -> bool {
    candidates.iter().any(|c| points_equal(p, *c, tol))
}
