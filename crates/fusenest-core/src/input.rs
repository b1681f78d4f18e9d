//! Serde model of a parts file: already-projected sketch curves grouped into loops,
//! profiles and parts.
//!
//! Curves are tagged by `type`. Unknown tags are kept as [`CurvePrimitive::Unsupported`]
//! so the encoder can report and skip them.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    Circle, CircularArc, CurvePrimitive, Ellipse, EllipticalArc, FreeformCurve, GeometryError,
    Line, Loop, NurbsCurve, Part, Point2, Profile, Unsupported, Vector2,
};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("curve {index} of loop {loop_index}: missing string field \"type\"")]
    MissingType { loop_index: usize, index: usize },

    #[error("curve {index} of loop {loop_index}: invalid {kind}: {message}")]
    InvalidCurve {
        loop_index: usize,
        index: usize,
        kind: String,
        message: String,
    },

    #[error("curve {index} of loop {loop_index}: {source}")]
    Geometry {
        loop_index: usize,
        index: usize,
        #[source]
        source: GeometryError,
    },
}

/// Either `parts:` (each with its own `profiles:`) or a bare `profiles:` list with one
/// part per profile. Both may be present; `parts` come first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartsFile {
    #[serde(default)]
    pub parts: Vec<PartSpec>,
    #[serde(default)]
    pub profiles: Vec<ProfileSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartSpec {
    #[serde(default)]
    pub profiles: Vec<ProfileSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSpec {
    #[serde(default)]
    pub loops: Vec<LoopSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoopSpec {
    #[serde(default)]
    pub outer: bool,
    #[serde(default)]
    pub curves: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CurveSpec {
    Line {
        start: Point2,
        end: Point2,
    },
    Arc {
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Circle {
        center: Point2,
        radius: f64,
    },
    Ellipse {
        center: Point2,
        major_axis: Vector2,
        major_radius: f64,
        minor_radius: f64,
    },
    EllipticalArc {
        center: Point2,
        major_axis: Vector2,
        major_radius: f64,
        minor_radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Nurbs {
        degree: usize,
        control_points: Vec<Point2>,
        #[serde(default)]
        weights: Option<Vec<f64>>,
        #[serde(default)]
        knots: Option<Vec<f64>>,
    },
}

const KNOWN_KINDS: &[&str] = &[
    "line",
    "arc",
    "circle",
    "ellipse",
    "elliptical_arc",
    "nurbs",
];

impl PartsFile {
    pub fn into_parts(self) -> Result<Vec<Part>, InputError> {
        let mut parts = Vec::with_capacity(self.parts.len() + self.profiles.len());
        for part in self.parts {
            let profiles = part
                .profiles
                .into_iter()
                .map(ProfileSpec::into_profile)
                .collect::<Result<Vec<_>, _>>()?;
            parts.push(Part::new(profiles));
        }
        for profile in self.profiles {
            parts.push(Part::from(profile.into_profile()?));
        }
        Ok(parts)
    }
}

impl ProfileSpec {
    pub fn into_profile(self) -> Result<Profile, InputError> {
        let loops = self
            .loops
            .into_iter()
            .enumerate()
            .map(|(loop_index, spec)| spec.into_loop(loop_index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Profile::new(loops))
    }
}

impl LoopSpec {
    fn into_loop(self, loop_index: usize) -> Result<Loop, InputError> {
        let curves = self
            .curves
            .into_iter()
            .enumerate()
            .map(|(index, raw)| curve_from_value(raw, loop_index, index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Loop::new(curves, self.outer))
    }
}

fn curve_from_value(
    raw: Value,
    loop_index: usize,
    index: usize,
) -> Result<CurvePrimitive, InputError> {
    let kind = raw
        .get("type")
        .and_then(Value::as_str)
        .ok_or(InputError::MissingType { loop_index, index })?
        .to_string();

    if !KNOWN_KINDS.contains(&kind.as_str()) {
        tracing::debug!(
            kind = %kind,
            loop_index,
            index,
            "keeping unrecognized curve as unsupported"
        );
        return Ok(CurvePrimitive::Unsupported(Unsupported { kind }));
    }

    let invalid = |message: String| InputError::InvalidCurve {
        loop_index,
        index,
        kind: kind.clone(),
        message,
    };

    let spec: CurveSpec = serde_json::from_value(raw).map_err(|e| invalid(e.to_string()))?;
    let curve = match spec {
        CurveSpec::Line { start, end } => Line::new(start, end).into(),
        CurveSpec::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        } => {
            check_radius(radius, "radius").map_err(invalid)?;
            CircularArc::new(center, radius, start_angle, end_angle).into()
        }
        CurveSpec::Circle { center, radius } => {
            check_radius(radius, "radius").map_err(invalid)?;
            Circle::new(center, radius).into()
        }
        CurveSpec::Ellipse {
            center,
            major_axis,
            major_radius,
            minor_radius,
        } => {
            check_ellipse(major_axis, major_radius, minor_radius).map_err(invalid)?;
            Ellipse::new(center, major_axis, major_radius, minor_radius).into()
        }
        CurveSpec::EllipticalArc {
            center,
            major_axis,
            major_radius,
            minor_radius,
            start_angle,
            end_angle,
        } => {
            check_ellipse(major_axis, major_radius, minor_radius).map_err(invalid)?;
            EllipticalArc::new(
                center,
                major_axis,
                major_radius,
                minor_radius,
                start_angle,
                end_angle,
            )
            .into()
        }
        CurveSpec::Nurbs {
            degree,
            control_points,
            weights,
            knots,
        } => {
            let nurbs = NurbsCurve::new(degree, control_points, weights, knots).map_err(
                |source| InputError::Geometry {
                    loop_index,
                    index,
                    source,
                },
            )?;
            FreeformCurve::new(nurbs).into()
        }
    };
    Ok(curve)
}

fn check_radius(value: f64, what: &str) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{what} must be positive (got {value})"))
    }
}

fn check_ellipse(major_axis: Vector2, major_radius: f64, minor_radius: f64) -> Result<(), String> {
    check_radius(major_radius, "major_radius")?;
    check_radius(minor_radius, "minor_radius")?;
    if major_axis.normalized().is_none() {
        return Err("major_axis must be a non-zero vector".to_string());
    }
    Ok(())
}
