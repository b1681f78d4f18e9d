//! Geometry model for nesting: planar curve primitives, loops and profiles, point
//! tolerance tests and adaptive flattening of free-form curves.

pub mod curve;
pub mod error;
pub mod flatten;
pub mod input;
pub mod nurbs;
pub mod point;
pub mod profile;
pub mod tolerance;

pub use curve::{
    Circle, CircularArc, CurveEvaluator, CurvePrimitive, Ellipse, EllipticalArc, FreeformCurve,
    Line, Unsupported,
};
pub use error::GeometryError;
pub use flatten::{FlatSample, FlattenOptions, flatten, flatten_samples};
pub use nurbs::NurbsCurve;
pub use point::{Point2, Transform2, Vector2};
pub use profile::{Loop, Part, Profile};
pub use tolerance::{DEFAULT_TOLERANCE, point_in_set, points_equal};

/// Document units per modeling unit.
pub const DEFAULT_SCALE_FACTOR: f64 = 100.0;
