//! Planar curve primitives as projected from a sketch.
//!
//! Arcs (circular and elliptical) run counter-clockwise from start to end in the
//! y-up source frame. Angles are radians.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::sync::Arc;

use crate::{Point2, Vector2};

/// Sampling capability of a free-form curve over its parameter domain.
pub trait CurveEvaluator: fmt::Debug + Send + Sync {
    fn domain(&self) -> (f64, f64);
    fn point_at(&self, t: f64) -> Point2;
    fn tangent_at(&self, t: f64) -> Vector2;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub start: Point2,
    pub end: Point2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Point2,
    pub major_axis: Vector2,
    pub major_radius: f64,
    pub minor_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc {
    pub center: Point2,
    pub major_axis: Vector2,
    pub major_radius: f64,
    pub minor_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub start: Point2,
    pub end: Point2,
}

#[derive(Debug, Clone)]
pub struct FreeformCurve {
    evaluator: Arc<dyn CurveEvaluator>,
}

/// A curve kind the encoder has no rule for.
#[derive(Debug, Clone, PartialEq)]
pub struct Unsupported {
    pub kind: String,
}

#[derive(Debug, Clone)]
pub enum CurvePrimitive {
    Line(Line),
    Arc(CircularArc),
    Circle(Circle),
    Ellipse(Ellipse),
    EllipticalArc(EllipticalArc),
    Freeform(FreeformCurve),
    Unsupported(Unsupported),
}

fn polar(center: Point2, radius: f64, angle: f64) -> Point2 {
    let (s, c) = angle.sin_cos();
    Point2::new(center.x + radius * c, center.y + radius * s)
}

/// Moves `end` into `(start, start + 2π]` so the sweep runs counter-clockwise.
fn ccw_end(start: f64, end: f64) -> f64 {
    let span = (end - start).rem_euclid(TAU);
    if span <= f64::EPSILON * start.abs().max(1.0) {
        start + TAU
    } else {
        start + span
    }
}

fn unit_or_x(v: Vector2) -> Vector2 {
    v.normalized().unwrap_or(Vector2::new(1.0, 0.0))
}

fn ellipse_point(center: Point2, u: Vector2, a: f64, b: f64, theta: f64) -> Point2 {
    let (s, c) = theta.sin_cos();
    center.translate(u.scale(a * c)).translate(u.perp().scale(b * s))
}

impl Line {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }
}

impl CircularArc {
    #[must_use]
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        let end_angle = ccw_end(start_angle, end_angle);
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            start: polar(center, radius, start_angle),
            end: polar(center, radius, end_angle),
        }
    }

    /// True when the arc spans more than half a turn. `end_angle` always lies in
    /// `(start_angle, start_angle + 2π]`.
    #[must_use]
    pub fn is_large(&self) -> bool {
        self.end_angle - self.start_angle > PI
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        polar(
            self.center,
            self.radius,
            (self.start_angle + self.end_angle) / 2.0,
        )
    }
}

impl Circle {
    #[must_use]
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Seam point where traversal starts and ends.
    #[must_use]
    pub fn seam(&self) -> Point2 {
        Point2::new(self.center.x + self.radius, self.center.y)
    }

    /// Point opposite the seam.
    #[must_use]
    pub fn antipode(&self) -> Point2 {
        Point2::new(self.center.x - self.radius, self.center.y)
    }
}

impl Ellipse {
    #[must_use]
    pub fn new(center: Point2, major_axis: Vector2, major_radius: f64, minor_radius: f64) -> Self {
        Self {
            center,
            major_axis,
            major_radius,
            minor_radius,
        }
    }

    #[must_use]
    pub fn major_direction(&self) -> Vector2 {
        unit_or_x(self.major_axis)
    }

    /// End of the major axis; the seam of the closed curve.
    #[must_use]
    pub fn major_vertex(&self) -> Point2 {
        self.center
            .translate(self.major_direction().scale(self.major_radius))
    }

    /// End of the minor axis a quarter turn clockwise from the major vertex.
    #[must_use]
    pub fn minor_vertex(&self) -> Point2 {
        self.center
            .translate(self.major_direction().perp().scale(-self.minor_radius))
    }
}

impl EllipticalArc {
    #[must_use]
    pub fn new(
        center: Point2,
        major_axis: Vector2,
        major_radius: f64,
        minor_radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        let u = unit_or_x(major_axis);
        let end_angle = ccw_end(start_angle, end_angle);
        Self {
            center,
            major_axis,
            major_radius,
            minor_radius,
            start_angle,
            end_angle,
            start: ellipse_point(center, u, major_radius, minor_radius, start_angle),
            end: ellipse_point(center, u, major_radius, minor_radius, end_angle),
        }
    }

    #[must_use]
    pub fn major_direction(&self) -> Vector2 {
        unit_or_x(self.major_axis)
    }

    #[must_use]
    pub fn is_large(&self) -> bool {
        self.end_angle - self.start_angle > PI
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        ellipse_point(
            self.center,
            self.major_direction(),
            self.major_radius,
            self.minor_radius,
            (self.start_angle + self.end_angle) / 2.0,
        )
    }
}

impl FreeformCurve {
    pub fn new(evaluator: impl CurveEvaluator + 'static) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
        }
    }

    #[must_use]
    pub fn from_shared(evaluator: Arc<dyn CurveEvaluator>) -> Self {
        Self { evaluator }
    }

    #[must_use]
    pub fn evaluator(&self) -> &dyn CurveEvaluator {
        self.evaluator.as_ref()
    }

    #[must_use]
    pub fn start_point(&self) -> Point2 {
        let (t0, _) = self.evaluator.domain();
        self.evaluator.point_at(t0)
    }

    #[must_use]
    pub fn end_point(&self) -> Point2 {
        let (_, t1) = self.evaluator.domain();
        self.evaluator.point_at(t1)
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        let (t0, t1) = self.evaluator.domain();
        self.evaluator.point_at((t0 + t1) / 2.0)
    }
}

impl CurvePrimitive {
    /// Stable lowercase name used in diagnostics and parts files.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            CurvePrimitive::Line(_) => "line",
            CurvePrimitive::Arc(_) => "arc",
            CurvePrimitive::Circle(_) => "circle",
            CurvePrimitive::Ellipse(_) => "ellipse",
            CurvePrimitive::EllipticalArc(_) => "elliptical_arc",
            CurvePrimitive::Freeform(_) => "nurbs",
            CurvePrimitive::Unsupported(u) => &u.kind,
        }
    }

    /// Natural start point, independent of how a loop traverses the curve.
    #[must_use]
    pub fn start_point(&self) -> Option<Point2> {
        match self {
            CurvePrimitive::Line(l) => Some(l.start),
            CurvePrimitive::Arc(a) => Some(a.start),
            CurvePrimitive::Circle(c) => Some(c.seam()),
            CurvePrimitive::Ellipse(e) => Some(e.major_vertex()),
            CurvePrimitive::EllipticalArc(a) => Some(a.start),
            CurvePrimitive::Freeform(f) => Some(f.start_point()),
            CurvePrimitive::Unsupported(_) => None,
        }
    }

    /// Natural end point; equal to the start for closed curves.
    #[must_use]
    pub fn end_point(&self) -> Option<Point2> {
        match self {
            CurvePrimitive::Line(l) => Some(l.end),
            CurvePrimitive::Arc(a) => Some(a.end),
            CurvePrimitive::Circle(c) => Some(c.seam()),
            CurvePrimitive::Ellipse(e) => Some(e.major_vertex()),
            CurvePrimitive::EllipticalArc(a) => Some(a.end),
            CurvePrimitive::Freeform(f) => Some(f.end_point()),
            CurvePrimitive::Unsupported(_) => None,
        }
    }

    #[must_use]
    pub fn endpoints(&self) -> Option<[Point2; 2]> {
        Some([self.start_point()?, self.end_point()?])
    }

    /// A point halfway along curved open primitives.
    #[must_use]
    pub fn interior_point(&self) -> Option<Point2> {
        match self {
            CurvePrimitive::Arc(a) => Some(a.midpoint()),
            CurvePrimitive::EllipticalArc(a) => Some(a.midpoint()),
            CurvePrimitive::Freeform(f) => Some(f.midpoint()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, CurvePrimitive::Circle(_) | CurvePrimitive::Ellipse(_))
    }
}

impl From<Line> for CurvePrimitive {
    fn from(v: Line) -> Self {
        CurvePrimitive::Line(v)
    }
}

impl From<CircularArc> for CurvePrimitive {
    fn from(v: CircularArc) -> Self {
        CurvePrimitive::Arc(v)
    }
}

impl From<Circle> for CurvePrimitive {
    fn from(v: Circle) -> Self {
        CurvePrimitive::Circle(v)
    }
}

impl From<Ellipse> for CurvePrimitive {
    fn from(v: Ellipse) -> Self {
        CurvePrimitive::Ellipse(v)
    }
}

impl From<EllipticalArc> for CurvePrimitive {
    fn from(v: EllipticalArc) -> Self {
        CurvePrimitive::EllipticalArc(v)
    }
}

impl From<FreeformCurve> for CurvePrimitive {
    fn from(v: FreeformCurve) -> Self {
        CurvePrimitive::Freeform(v)
    }
}
