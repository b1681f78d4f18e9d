//! Rational B-spline evaluation for free-form sketch curves.

use crate::{CurveEvaluator, GeometryError, Point2, Vector2};

const KNOT_EPS: f64 = 1e-12;

type Homogeneous = [f64; 3];

#[derive(Debug, Clone, PartialEq)]
pub struct NurbsCurve {
    degree: usize,
    control_points: Vec<Point2>,
    weights: Vec<f64>,
    knots: Vec<f64>,
    /// Homogeneous control points `(w·x, w·y, w)`.
    hpoints: Vec<Homogeneous>,
    /// Control points of the homogeneous derivative curve (degree - 1).
    dpoints: Vec<Homogeneous>,
}

fn invalid(reason: impl Into<String>) -> GeometryError {
    GeometryError::InvalidNurbs {
        reason: reason.into(),
    }
}

impl NurbsCurve {
    /// Weights default to 1 (non-rational); knots default to a clamped uniform vector.
    pub fn new(
        degree: usize,
        control_points: Vec<Point2>,
        weights: Option<Vec<f64>>,
        knots: Option<Vec<f64>>,
    ) -> Result<Self, GeometryError> {
        let n = control_points.len();
        if degree == 0 {
            return Err(invalid("degree must be at least 1"));
        }
        if n < degree + 1 {
            return Err(invalid(format!(
                "degree {degree} needs at least {} control points (got {n})",
                degree + 1
            )));
        }
        if control_points.iter().any(|p| !p.is_finite()) {
            return Err(invalid("control points must be finite"));
        }

        let weights = weights.unwrap_or_else(|| vec![1.0; n]);
        if weights.len() != n {
            return Err(invalid(format!(
                "expected {n} weights (got {})",
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(invalid("weights must be positive and finite"));
        }

        let knots = knots.unwrap_or_else(|| clamped_uniform_knots(n, degree));
        if knots.len() != n + degree + 1 {
            return Err(invalid(format!(
                "expected {} knots (got {})",
                n + degree + 1,
                knots.len()
            )));
        }
        if knots.iter().any(|k| !k.is_finite()) || knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(invalid("knots must be finite and non-decreasing"));
        }
        if knots[n] - knots[degree] <= KNOT_EPS {
            return Err(invalid("knot vector spans an empty domain"));
        }

        let hpoints: Vec<Homogeneous> = control_points
            .iter()
            .zip(&weights)
            .map(|(p, w)| [p.x * w, p.y * w, *w])
            .collect();

        let p = degree as f64;
        let dpoints = (0..n - 1)
            .map(|i| {
                let span = knots[i + degree + 1] - knots[i + 1];
                if span <= KNOT_EPS {
                    return [0.0; 3];
                }
                let s = p / span;
                [
                    s * (hpoints[i + 1][0] - hpoints[i][0]),
                    s * (hpoints[i + 1][1] - hpoints[i][1]),
                    s * (hpoints[i + 1][2] - hpoints[i][2]),
                ]
            })
            .collect();

        Ok(Self {
            degree,
            control_points,
            weights,
            knots,
            hpoints,
            dpoints,
        })
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        &self.control_points
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    fn clamp(&self, t: f64) -> f64 {
        let (t0, t1) = self.domain();
        t.clamp(t0, t1)
    }
}

impl CurveEvaluator for NurbsCurve {
    fn domain(&self) -> (f64, f64) {
        (self.knots[self.degree], self.knots[self.control_points.len()])
    }

    fn point_at(&self, t: f64) -> Point2 {
        let h = de_boor(self.degree, &self.knots, &self.hpoints, self.clamp(t));
        Point2::new(h[0] / h[2], h[1] / h[2])
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        let t = self.clamp(t);
        let h = de_boor(self.degree, &self.knots, &self.hpoints, t);
        let inner = &self.knots[1..self.knots.len() - 1];
        let d = de_boor(self.degree - 1, inner, &self.dpoints, t);
        let w = h[2];
        let (x, y) = (h[0] / w, h[1] / w);
        Vector2::new((d[0] - d[2] * x) / w, (d[1] - d[2] * y) / w)
    }
}

/// `n` control points, `degree + 1` repeated knots at each end, uniform interior.
#[must_use]
pub fn clamped_uniform_knots(n: usize, degree: usize) -> Vec<f64> {
    let segments = n.saturating_sub(degree).max(1);
    let mut knots = Vec::with_capacity(n + degree + 1);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));
    for j in 1..segments {
        knots.push(j as f64 / segments as f64);
    }
    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    knots
}

fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> usize {
    if t >= knots[n] {
        return n - 1;
    }
    if t <= knots[degree] {
        return degree;
    }
    let (mut lo, mut hi) = (degree, n);
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if t < knots[mid] {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

fn de_boor(degree: usize, knots: &[f64], ctrl: &[Homogeneous], t: f64) -> Homogeneous {
    let k = find_span(degree, knots, ctrl.len(), t);
    let mut d: Vec<Homogeneous> = (0..=degree).map(|j| ctrl[j + k - degree]).collect();
    for r in 1..=degree {
        for j in (r..=degree).rev() {
            let i = j + k - degree;
            let denom = knots[i + degree + 1 - r] - knots[i];
            let alpha = if denom.abs() <= KNOT_EPS {
                0.0
            } else {
                (t - knots[i]) / denom
            };
            let prev = d[j - 1];
            for c in 0..3 {
                d[j][c] = (1.0 - alpha) * prev[c] + alpha * d[j][c];
            }
        }
    }
    d[degree]
}
