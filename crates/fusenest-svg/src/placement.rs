//! Reads placements back out of a document returned by the placement tool.
//!
//! Each sheet is a `g` (or nested `svg`) child of the root; each placed part is a
//! `path` whose parent carries `transform="translate(tx ty) rotate(r)"` or any
//! other text whose first three numbers are `tx`, `ty` and `r`.

use std::sync::OnceLock;

use fusenest_core::{Part, Transform2, Vector2};
use indexmap::IndexMap;
use regex::Regex;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("document is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("path id {raw:?} is not an integer")]
    InvalidId { raw: String },
    #[error("path {id} has no parent transform")]
    MissingTransform { id: usize },
    #[error("path {id}: transform {transform:?} does not hold translate x, y and rotation")]
    MalformedTransform { id: usize, transform: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub part_index: usize,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    pub sheet_index: usize,
}

impl Placement {
    /// Rigid motion in the y-up model frame: rotate by `-rotation_deg` about the
    /// origin, then move to `(x, -y)`.
    #[must_use]
    pub fn model_transform(&self) -> Transform2 {
        Transform2::new(-self.rotation_deg, Vector2::new(self.x, -self.y))
    }

    /// `body` followed by this placement.
    #[must_use]
    pub fn apply_to(&self, body: &Transform2) -> Transform2 {
        body.then(&self.model_transform())
    }

    /// The part this placement refers to, if the index is in range.
    #[must_use]
    pub fn part<'a>(&self, parts: &'a [Part]) -> Option<&'a Part> {
        parts.get(self.part_index)
    }
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[(\s,](-?\d*\.?\d+)").expect("transform number regex"))
}

/// Numbers in a transform attribute, in order of appearance.
pub fn transform_numbers(transform: &str) -> Vec<f64> {
    number_pattern()
        .captures_iter(transform)
        .filter_map(|c| c.get(1)?.as_str().parse().ok())
        .collect()
}

fn parse_transform(id: usize, transform: &str) -> Result<(f64, f64, f64), DecodeError> {
    match transform_numbers(transform).as_slice() {
        [tx, ty, rot, ..] => Ok((*tx, *ty, *rot)),
        _ => Err(DecodeError::MalformedTransform {
            id,
            transform: transform.to_string(),
        }),
    }
}

fn sheets<'a, 'input>(doc: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
    let root = doc.root_element();
    let containers: Vec<_> = root
        .children()
        .filter(|n| n.is_element() && matches!(n.tag_name().name(), "g" | "svg"))
        .collect();
    if containers.is_empty() {
        vec![root]
    } else {
        containers
    }
}

/// One placement per distinct path id; the first occurrence in document order wins.
pub fn extract_placements(document: &str, scale: f64) -> Result<Vec<Placement>, DecodeError> {
    let doc = Document::parse(document)?;
    let mut found: IndexMap<usize, Placement> = IndexMap::new();

    for (sheet_index, sheet) in sheets(&doc).into_iter().enumerate() {
        let paths = sheet
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "path");
        for path in paths {
            let Some(raw) = path.attribute("id") else {
                tracing::debug!(sheet = sheet_index, "skipping path without id");
                continue;
            };
            let id: usize = raw.trim().parse().map_err(|_| DecodeError::InvalidId {
                raw: raw.to_string(),
            })?;
            if found.contains_key(&id) {
                tracing::debug!(id, sheet = sheet_index, "ignoring repeated part id");
                continue;
            }

            let transform = path
                .parent_element()
                .and_then(|p| p.attribute("transform"))
                .ok_or(DecodeError::MissingTransform { id })?;
            let (tx, ty, rotation_deg) = parse_transform(id, transform)?;

            found.insert(
                id,
                Placement {
                    part_index: id,
                    x: tx / scale,
                    y: ty / scale,
                    rotation_deg,
                    sheet_index,
                },
            );
        }
    }

    Ok(found.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fusenest_core::Point2;

    const TWO_SHEETS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <g id="sheet0">
    <g transform="translate(250, -150) rotate(90)"><path id="3" d="M 0 0"/></g>
    <g transform="translate(10 20) rotate(0)"><path id="1" d="M 0 0"/></g>
  </g>
  <g id="sheet1">
    <g transform="translate(999 999) rotate(180)"><path id="3" d="M 0 0"/></g>
    <g transform="translate(-5.5 0.25) rotate(-45)"><path id="0" d="M 0 0"/></g>
  </g>
</svg>"#;

    #[test]
    fn first_occurrence_of_an_id_wins() {
        let placements = extract_placements(TWO_SHEETS, 100.0).unwrap();
        assert_eq!(placements.len(), 3);
        let p3 = placements[0];
        assert_eq!(p3.part_index, 3);
        assert_abs_diff_eq!(p3.x, 2.5);
        assert_abs_diff_eq!(p3.y, -1.5);
        assert_abs_diff_eq!(p3.rotation_deg, 90.0);
        assert_eq!(p3.sheet_index, 0);

        let p0 = placements[2];
        assert_eq!(p0.part_index, 0);
        assert_eq!(p0.sheet_index, 1);
        assert_abs_diff_eq!(p0.x, -0.055, epsilon = 1e-12);
        assert_abs_diff_eq!(p0.y, 0.0025, epsilon = 1e-12);
        assert_abs_diff_eq!(p0.rotation_deg, -45.0);
    }

    #[test]
    fn transform_tokens_accept_commas_and_spaces() {
        assert_eq!(
            transform_numbers("translate(250, -150) rotate(90)"),
            vec![250.0, -150.0, 90.0]
        );
        assert_eq!(
            transform_numbers("translate(.5 -2.25)rotate(0)"),
            vec![0.5, -2.25, 0.0]
        );
        assert!(transform_numbers("matrix").is_empty());
    }

    #[test]
    fn missing_transform_names_the_part() {
        let doc = r#"<svg><g><g><path id="7"/></g></g></svg>"#;
        assert!(matches!(
            extract_placements(doc, 100.0),
            Err(DecodeError::MissingTransform { id: 7 })
        ));
    }

    #[test]
    fn short_transform_is_malformed() {
        let doc = r#"<svg><g><g transform="translate(1 2)"><path id="4"/></g></g></svg>"#;
        match extract_placements(doc, 100.0) {
            Err(DecodeError::MalformedTransform { id, transform }) => {
                assert_eq!(id, 4);
                assert_eq!(transform, "translate(1 2)");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn bad_ids_and_xml_are_rejected() {
        let doc = r#"<svg><g><g transform="translate(1 2) rotate(3)"><path id="part"/></g></g></svg>"#;
        assert!(matches!(
            extract_placements(doc, 100.0),
            Err(DecodeError::InvalidId { .. })
        ));
        assert!(matches!(
            extract_placements("<svg><g>", 100.0),
            Err(DecodeError::Xml(_))
        ));
    }

    #[test]
    fn paths_without_id_and_flat_documents() {
        let doc = r#"<svg><rect/><g transform="translate(100 0) rotate(0)"><path d="M 0 0"/><path id="2"/></g></svg>"#;
        let placements = extract_placements(doc, 100.0).unwrap();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].part_index, 2);

        let flat = r#"<svg transform="translate(100 200) rotate(30)"><path id="0"/></svg>"#;
        let placements = extract_placements(flat, 100.0).unwrap();
        assert_eq!(placements[0].sheet_index, 0);
        assert_abs_diff_eq!(placements[0].y, 2.0);
    }

    #[test]
    fn model_transform_undoes_the_y_flip() {
        let p = Placement {
            part_index: 0,
            x: 2.0,
            y: -3.0,
            rotation_deg: 90.0,
            sheet_index: 0,
        };
        // Clockwise on screen stays clockwise in the y-up model.
        let moved = p.model_transform().apply(Point2::new(1.0, 0.0));
        assert_abs_diff_eq!(moved.x, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(moved.y, 2.0, epsilon = 1e-9);

        let body = Transform2::new(0.0, Vector2::new(1.0, 0.0));
        let placed = p.apply_to(&body).apply(Point2::new(0.0, 0.0));
        assert_abs_diff_eq!(placed.x, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(placed.y, 2.0, epsilon = 1e-9);
    }
}
