//! Traversal direction of each curve in a loop and of the loop as a whole.
//!
//! Windings are classified in the output frame, where y points down.

use fusenest_core::{CurvePrimitive, Loop, Point2, point_in_set};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    /// Winding a loop must have in the output frame.
    #[must_use]
    pub fn required(is_outer: bool) -> Self {
        if is_outer {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }
}

/// One curve together with the direction a loop walks it.
#[derive(Debug, Clone, Copy)]
pub struct Traversal<'a> {
    pub curve: &'a CurvePrimitive,
    pub flipped: bool,
}

impl<'a> Traversal<'a> {
    #[must_use]
    pub fn new(curve: &'a CurvePrimitive, flipped: bool) -> Self {
        Self { curve, flipped }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        Self {
            curve: self.curve,
            flipped: !self.flipped,
        }
    }

    /// Effective start, after the flip.
    #[must_use]
    pub fn start(&self) -> Option<Point2> {
        let [s, e] = self.curve.endpoints()?;
        Some(if self.flipped { e } else { s })
    }

    #[must_use]
    pub fn end(&self) -> Option<Point2> {
        let [s, e] = self.curve.endpoints()?;
        Some(if self.flipped { s } else { e })
    }

    /// Start, interior point for curved open primitives, end; in walking order.
    fn points(&self) -> Vec<Point2> {
        let Some(start) = self.start() else {
            return Vec::new();
        };
        let mut pts = vec![start];
        pts.extend(self.curve.interior_point());
        pts.extend(self.end());
        pts
    }
}

/// A loop with its curves in walking order and the flip of each.
#[derive(Debug, Clone)]
pub struct OrientedLoop<'a> {
    pub traversals: Vec<Traversal<'a>>,
    pub is_outer: bool,
    /// Set when the loop's natural winding was wrong for its role.
    pub reversed: bool,
}

/// Per-curve flip flags for a loop in natural order.
///
/// Curve 0 flips when its start touches curve 1; every later curve flips when its
/// start does not touch the previous curve. In a two-curve loop curve 1 flips when
/// its start is not where curve 0 ends. Curves without endpoints never touch.
#[must_use]
pub fn flip_flags(curves: &[CurvePrimitive], tol: f64) -> Vec<bool> {
    if curves.len() < 2 {
        return vec![false; curves.len()];
    }
    let touches = |curve: &CurvePrimitive, other: &CurvePrimitive| match (
        curve.start_point(),
        other.endpoints(),
    ) {
        (Some(p), Some(ends)) => point_in_set(p, &ends, tol),
        _ => false,
    };

    let first = touches(&curves[0], &curves[1]);
    if curves.len() == 2 {
        // Both endpoints are shared, so curve 1 must start where curve 0 ends.
        let end = Traversal::new(&curves[0], first).end();
        let second = match (curves[1].start_point(), end) {
            (Some(p), Some(end)) => !point_in_set(p, &[end], tol),
            _ => true,
        };
        return vec![first, second];
    }

    let mut flips = Vec::with_capacity(curves.len());
    flips.push(first);
    for pair in curves.windows(2) {
        flips.push(!touches(&pair[1], &pair[0]));
    }
    flips
}

fn traversals<'a>(curves: &'a [CurvePrimitive], flips: &[bool]) -> Vec<Traversal<'a>> {
    curves
        .iter()
        .zip(flips)
        .map(|(curve, &flipped)| Traversal::new(curve, flipped))
        .collect()
}

fn shoelace(traversals: &[Traversal<'_>]) -> f64 {
    let pts: Vec<Point2> = traversals
        .iter()
        .flat_map(Traversal::points)
        .map(|p| Point2::new(p.x, -p.y))
        .collect();
    if pts.len() < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, a) in pts.iter().enumerate() {
        let b = pts[(i + 1) % pts.len()];
        sum += (b.x - a.x) * (b.y + a.y);
    }
    sum
}

fn classify(traversals: &[Traversal<'_>]) -> Winding {
    if traversals.len() < 2 {
        return Winding::Clockwise;
    }
    if shoelace(traversals) < 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::Clockwise
    }
}

/// `Σ (end.x − start.x)(end.y + start.y)` over the walked points in the output frame.
#[must_use]
pub fn shoelace_sum(curves: &[CurvePrimitive], flips: &[bool]) -> f64 {
    shoelace(&traversals(curves, flips))
}

/// Positive and zero sums are clockwise, as is any single-curve loop.
#[must_use]
pub fn winding(curves: &[CurvePrimitive], flips: &[bool]) -> Winding {
    classify(&traversals(curves, flips))
}

/// Orders and flips a loop's curves so outer loops run clockwise and holes
/// counter-clockwise.
#[must_use]
pub fn resolve_loop(lp: &Loop, tol: f64) -> OrientedLoop<'_> {
    let flips = flip_flags(&lp.curves, tol);
    let mut walk = traversals(&lp.curves, &flips);

    let reversed = if lp.curves.len() == 1 {
        // A lone closed curve has no measurable winding; only holes turn around.
        !lp.is_outer
    } else {
        classify(&walk) != Winding::required(lp.is_outer)
    };
    if reversed {
        walk = walk.into_iter().rev().map(Traversal::flipped).collect();
    }

    OrientedLoop {
        traversals: walk,
        is_outer: lp.is_outer,
        reversed,
    }
}
