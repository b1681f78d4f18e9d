//! Per-primitive path commands.
//!
//! Model coordinates are y-up; the document is y-down and `scale_factor` times
//! larger. Arcs run counter-clockwise in the model, which is sweep `0` in the
//! document, so a flipped arc gets sweep `1`.

use fusenest_core::{
    Circle, CircularArc, CurvePrimitive, Ellipse, EllipticalArc, FreeformCurve, GeometryError,
    Line, Point2, Vector2, flatten,
};

use crate::config::CodecConfig;
use crate::path::PathCommand;

fn to_doc(p: Point2, scale: f64) -> Point2 {
    Point2::new(p.x * scale, -p.y * scale)
}

/// x-axis rotation of an ellipse with major direction `u`, in document degrees.
fn doc_rotation(u: Vector2) -> f64 {
    -u.y.atan2(u.x).to_degrees()
}

fn oriented(start: Point2, end: Point2, flipped: bool) -> (Point2, Point2) {
    if flipped { (end, start) } else { (start, end) }
}

/// Commands for one curve. `move_to` starts a new subpath at the effective start.
/// Unsupported kinds log a warning and yield nothing.
pub fn encode_curve(
    curve: &CurvePrimitive,
    flipped: bool,
    move_to: bool,
    config: &CodecConfig,
) -> Vec<PathCommand> {
    let scale = config.scale_factor;
    match curve {
        CurvePrimitive::Line(line) => encode_line(line, flipped, move_to, scale),
        CurvePrimitive::Arc(arc) => encode_arc(arc, flipped, move_to, scale),
        CurvePrimitive::Circle(circle) => encode_circle(circle, flipped, move_to, scale),
        CurvePrimitive::Ellipse(ellipse) => encode_ellipse(ellipse, flipped, move_to, scale),
        CurvePrimitive::EllipticalArc(arc) => {
            encode_elliptical_arc(arc, flipped, move_to, scale)
        }
        CurvePrimitive::Freeform(curve) => encode_freeform(curve, flipped, move_to, config),
        CurvePrimitive::Unsupported(u) => {
            tracing::warn!(kind = %u.kind, "unsupported curve kind, skipping");
            Vec::new()
        }
    }
}

fn encode_line(line: &Line, flipped: bool, move_to: bool, scale: f64) -> Vec<PathCommand> {
    let (start, end) = oriented(line.start, line.end, flipped);
    let mut out = Vec::with_capacity(2);
    if move_to {
        out.push(PathCommand::MoveTo(to_doc(start, scale)));
    }
    out.push(PathCommand::LineTo(to_doc(end, scale)));
    out
}

fn encode_arc(arc: &CircularArc, flipped: bool, move_to: bool, scale: f64) -> Vec<PathCommand> {
    let (start, end) = oriented(arc.start, arc.end, flipped);
    let r = arc.radius * scale;
    let mut out = Vec::with_capacity(2);
    if move_to {
        out.push(PathCommand::MoveTo(to_doc(start, scale)));
    }
    out.push(PathCommand::ArcTo {
        rx: r,
        ry: r,
        x_axis_rotation: 0.0,
        large_arc: arc.is_large(),
        sweep: flipped,
        to: to_doc(end, scale),
    });
    out
}

/// Two semicircles from the seam through the antipode and back.
fn encode_circle(circle: &Circle, flipped: bool, move_to: bool, scale: f64) -> Vec<PathCommand> {
    let r = circle.radius * scale;
    let seam = to_doc(circle.seam(), scale);
    let half = |to: Point2| PathCommand::ArcTo {
        rx: r,
        ry: r,
        x_axis_rotation: 0.0,
        large_arc: false,
        sweep: flipped,
        to,
    };
    let mut out = Vec::with_capacity(3);
    if move_to {
        out.push(PathCommand::MoveTo(seam));
    }
    out.push(half(to_doc(circle.antipode(), scale)));
    out.push(half(seam));
    out
}

/// Major vertex to minor vertex, then back to the major vertex.
fn encode_ellipse(
    ellipse: &Ellipse,
    flipped: bool,
    move_to: bool,
    scale: f64,
) -> Vec<PathCommand> {
    let rx = ellipse.major_radius * scale;
    let ry = ellipse.minor_radius * scale;
    let rot = doc_rotation(ellipse.major_direction());
    let vertex = to_doc(ellipse.major_vertex(), scale);
    let minor = to_doc(ellipse.minor_vertex(), scale);
    let (first_large, second_large) = if flipped { (false, true) } else { (true, false) };

    let mut out = Vec::with_capacity(3);
    if move_to {
        out.push(PathCommand::MoveTo(vertex));
    }
    out.push(PathCommand::ArcTo {
        rx,
        ry,
        x_axis_rotation: rot,
        large_arc: first_large,
        sweep: flipped,
        to: minor,
    });
    out.push(PathCommand::ArcTo {
        rx,
        ry,
        x_axis_rotation: rot,
        large_arc: second_large,
        sweep: flipped,
        to: vertex,
    });
    out
}

fn encode_elliptical_arc(
    arc: &EllipticalArc,
    flipped: bool,
    move_to: bool,
    scale: f64,
) -> Vec<PathCommand> {
    let (start, end) = oriented(arc.start, arc.end, flipped);
    let mut out = Vec::with_capacity(2);
    if move_to {
        out.push(PathCommand::MoveTo(to_doc(start, scale)));
    }
    out.push(PathCommand::ArcTo {
        rx: arc.major_radius * scale,
        ry: arc.minor_radius * scale,
        x_axis_rotation: doc_rotation(arc.major_direction()),
        large_arc: arc.is_large(),
        sweep: flipped,
        to: to_doc(end, scale),
    });
    out
}

fn encode_freeform(
    curve: &FreeformCurve,
    flipped: bool,
    move_to: bool,
    config: &CodecConfig,
) -> Vec<PathCommand> {
    let mut points = match flatten(curve.evaluator(), &config.flatten) {
        Ok(points) => points,
        Err(GeometryError::SubdivisionLimit { limit, partial }) => {
            tracing::warn!(
                limit,
                samples = partial.len(),
                "free-form curve hit the sample cap, emitting partial polyline"
            );
            partial
        }
        Err(err) => {
            tracing::warn!(error = %err, "free-form curve could not be flattened, skipping");
            return Vec::new();
        }
    };
    if flipped {
        points.reverse();
    }

    let scale = config.scale_factor;
    let mut iter = points.into_iter();
    let mut out = Vec::new();
    let Some(first) = iter.next() else {
        return out;
    };
    if move_to {
        out.push(PathCommand::MoveTo(to_doc(first, scale)));
    }
    out.extend(iter.map(|p| PathCommand::LineTo(to_doc(p, scale))));
    out
}
