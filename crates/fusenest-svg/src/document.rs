use serde::{Deserialize, Serialize};

use crate::config::SheetSize;
use crate::path::PathData;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Sheet dimension in document units; whole numbers print without a fraction.
fn dimension(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        ryu::Buffer::new().format_finite(v).to_owned()
    }
}

/// A sheet rectangle plus one path element per part, ids `0..N` in input order.
pub fn build_document(paths: &[PathData], sheet: SheetSize, scale: f64) -> String {
    let mut out = format!(
        "<svg version=\"1.1\" xmlns=\"{SVG_NS}\"> <rect width=\"{w}\" height=\"{h}\" stroke=\"black\" stroke-width=\"2\" fill-opacity=\"0\"/>",
        w = dimension(sheet.width * scale),
        h = dimension(sheet.height * scale),
    );
    for (id, path) in paths.iter().enumerate() {
        out.push_str(&format!(
            " <path d=\"{path}\" id=\"{id}\" stroke=\"black\" fill=\"green\" stroke-width=\"2\" fill-opacity=\"0.5\"/>"
        ));
    }
    out.push_str(" </svg>");
    out
}

/// What the placement tool receives: the parts document and its packing knobs,
/// all in document units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestRequest {
    pub svg: String,
    pub spacing: f64,
    pub rotations: u32,
}

impl NestRequest {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
