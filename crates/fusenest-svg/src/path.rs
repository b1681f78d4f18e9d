use std::fmt;

use fusenest_core::{Loop, Part, Point2};

use crate::config::{CodecConfig, LoopSelection};
use crate::orientation::resolve_loop;
use crate::segment::encode_curve;

/// One path command with coordinates already in the document frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2),
    LineTo(Point2),
    ArcTo {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point2,
    },
}

impl PathCommand {
    #[must_use]
    pub fn target(&self) -> Point2 {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::ArcTo { to, .. } => to,
        }
    }
}

/// Fixed six fractional digits; values that would round to zero print unsigned.
pub fn fmt_fixed(v: f64) -> String {
    let v = if v.abs() < 5e-7 { 0.0 } else { v };
    format!("{v:.6}")
}

fn flag(b: bool) -> char {
    if b { '1' } else { '0' }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::MoveTo(p) => write!(f, "M {} {}", fmt_fixed(p.x), fmt_fixed(p.y)),
            PathCommand::LineTo(p) => write!(f, "L {} {}", fmt_fixed(p.x), fmt_fixed(p.y)),
            PathCommand::ArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A {} {} {} {} {} {} {}",
                fmt_fixed(rx),
                fmt_fixed(ry),
                fmt_fixed(x_axis_rotation),
                flag(large_arc),
                flag(sweep),
                fmt_fixed(to.x),
                fmt_fixed(to.y)
            ),
        }
    }
}

/// The `d` attribute of one path element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData(pub Vec<PathCommand>);

impl PathData {
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}

/// Commands for one loop, oriented for its role.
pub fn loop_path(lp: &Loop, config: &CodecConfig) -> Vec<PathCommand> {
    let oriented = resolve_loop(lp, config.tolerance);
    let mut out = Vec::new();
    for t in &oriented.traversals {
        let move_to = out.is_empty();
        out.extend(encode_curve(t.curve, t.flipped, move_to, config));
    }
    out
}

/// Path data for a part's canonical profile. A part without profiles yields an
/// empty path.
pub fn part_path(part: &Part, config: &CodecConfig) -> PathData {
    let Some(profile) = part.canonical_profile() else {
        return PathData::default();
    };
    let mut commands = Vec::new();
    for lp in &profile.loops {
        if config.loops == LoopSelection::OuterOnly && !lp.is_outer {
            continue;
        }
        commands.extend(loop_path(lp, config));
    }
    PathData(commands)
}
