//! Adaptive polyline approximation of free-form curves.
//!
//! Parameter intervals live on an explicit worklist. An interval is accepted when the
//! tangents at its ends differ by less than `max_angle_deg` or its chord is shorter than
//! `min_length`; otherwise it is split at the parameter midpoint and both halves go back
//! on the list. The left half is pushed last so samples come out in parameter order.

use serde::{Deserialize, Serialize};

use crate::{CurveEvaluator, GeometryError, Point2, Vector2};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenOptions {
    pub max_angle_deg: f64,
    pub min_length: f64,
    pub max_samples: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            max_angle_deg: 10.0,
            min_length: 0.05,
            max_samples: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatSample {
    pub t: f64,
    pub point: Point2,
    pub tangent: Vector2,
}

impl FlatSample {
    fn at(curve: &dyn CurveEvaluator, t: f64) -> Self {
        Self {
            t,
            point: curve.point_at(t),
            tangent: curve.tangent_at(t),
        }
    }
}

fn accepts(a: &FlatSample, b: &FlatSample, max_angle: f64, min_length: f64) -> bool {
    a.tangent.angle_to(b.tangent) < max_angle || a.point.distance_to(b.point) < min_length
}

/// Samples in parameter order, first and last at the domain ends.
///
/// On `SubdivisionLimit` the error carries the polyline reached so far, with the
/// remaining intervals left unrefined.
pub fn flatten_samples(
    curve: &dyn CurveEvaluator,
    opts: &FlattenOptions,
) -> Result<Vec<FlatSample>, GeometryError> {
    let (start, end) = curve.domain();
    if !start.is_finite() || !end.is_finite() || end <= start {
        return Err(GeometryError::EmptyDomain { start, end });
    }

    let max_angle = opts.max_angle_deg.to_radians();
    let limit = opts.max_samples.max(3);

    let first = FlatSample::at(curve, start);
    let mid = FlatSample::at(curve, (start + end) / 2.0);
    let last = FlatSample::at(curve, end);
    let mut evaluated = 3usize;
    let mut capped = false;

    let mut out = vec![first];
    let mut work = vec![(mid, last), (first, mid)];

    while let Some((a, b)) = work.pop() {
        if capped || accepts(&a, &b, max_angle, opts.min_length) {
            out.push(b);
            continue;
        }
        if evaluated >= limit {
            capped = true;
            out.push(b);
            continue;
        }
        let m = FlatSample::at(curve, (a.t + b.t) / 2.0);
        evaluated += 1;
        work.push((m, b));
        work.push((a, m));
    }

    if capped {
        let partial = out.iter().map(|s| s.point).collect();
        return Err(GeometryError::SubdivisionLimit { limit, partial });
    }
    Ok(out)
}

pub fn flatten(
    curve: &dyn CurveEvaluator,
    opts: &FlattenOptions,
) -> Result<Vec<Point2>, GeometryError> {
    let samples = flatten_samples(curve, opts)?;
    Ok(samples.into_iter().map(|s| s.point).collect())
}
