//! SVG codec between sketch profiles and an external placement tool.
//!
//! Encoding turns each part's canonical profile into one path element inside a
//! sheet-sized document. Decoding reads back where the tool put each part.

pub mod config;
pub mod document;
pub mod orientation;
pub mod path;
pub mod placement;
pub mod segment;

use fusenest_core::{Part, Profile};

pub use config::{CodecConfig, ConfigError, LoopSelection, SheetSize};
pub use document::{NestRequest, build_document};
pub use orientation::{OrientedLoop, Traversal, Winding, flip_flags, resolve_loop, winding};
pub use path::{PathCommand, PathData, fmt_fixed, loop_path, part_path};
pub use placement::{DecodeError, Placement, extract_placements};
pub use segment::encode_curve;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Document with one path per part, ids following the order of `parts`.
pub fn encode(parts: &[Part], sheet: SheetSize, config: &CodecConfig) -> Result<String, EncodeError> {
    config.validate()?;
    sheet.validate()?;
    let paths: Vec<PathData> = parts.iter().map(|part| part_path(part, config)).collect();
    tracing::debug!(parts = paths.len(), "encoded parts");
    Ok(build_document(&paths, sheet, config.scale_factor))
}

/// One part per profile.
pub fn encode_profiles(
    profiles: &[Profile],
    sheet: SheetSize,
    config: &CodecConfig,
) -> Result<String, EncodeError> {
    let parts: Vec<Part> = profiles.iter().cloned().map(Part::from).collect();
    encode(&parts, sheet, config)
}

/// The document on the configured sheet, wrapped with spacing and rotation count.
pub fn encode_request(parts: &[Part], config: &CodecConfig) -> Result<NestRequest, EncodeError> {
    let svg = encode(parts, config.sheet, config)?;
    Ok(NestRequest {
        svg,
        spacing: config.spacing * config.scale_factor,
        rotations: config.rotations,
    })
}

pub fn decode(document: &str, config: &CodecConfig) -> Result<Vec<Placement>, DecodeError> {
    config.validate()?;
    let placements = extract_placements(document, config.scale_factor)?;
    tracing::debug!(placements = placements.len(), "decoded placements");
    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusenest_core::{Circle, Loop, Point2};

    fn disc(r: f64) -> Part {
        Part::from(Profile::new(vec![Loop::outer(vec![
            Circle::new(Point2::new(r, r), r).into(),
        ])]))
    }

    #[test]
    fn empty_input_is_just_the_sheet() {
        let doc = encode(&[], SheetSize::default(), &CodecConfig::default()).unwrap();
        assert!(doc.contains("<rect width=\"5000\" height=\"3000\""));
        assert!(!doc.contains("<path"));
    }

    #[test]
    fn zero_sheet_is_rejected() {
        let err = encode(&[disc(1.0)], SheetSize::new(0.0, 10.0), &CodecConfig::default());
        assert!(matches!(
            err,
            Err(EncodeError::Config(ConfigError::InvalidValue {
                field: "sheet.width",
                ..
            }))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CodecConfig {
            tolerance: -1.0,
            ..CodecConfig::default()
        };
        let err = encode(&[disc(1.0)], SheetSize::default(), &config);
        assert!(matches!(err, Err(EncodeError::Config(_))));
    }

    #[test]
    fn decode_rejects_invalid_scale() {
        let doc = r#"<svg><g><g transform="translate(100 50) rotate(90)"><path id="0"/></g></g></svg>"#;
        for scale_factor in [0.0, -10.0, f64::NAN] {
            let config = CodecConfig {
                scale_factor,
                ..CodecConfig::default()
            };
            assert!(matches!(
                decode(doc, &config),
                Err(DecodeError::Config(ConfigError::InvalidValue {
                    field: "scale_factor",
                    ..
                }))
            ));
        }
        let placements = decode(doc, &CodecConfig::default()).unwrap();
        assert_eq!(placements[0].x, 1.0);
    }

    #[test]
    fn profiles_become_parts_in_order() {
        let profiles: Vec<Profile> = [1.0, 2.0]
            .iter()
            .map(|&r| disc(r).profiles.remove(0))
            .collect();
        let doc = encode_profiles(&profiles, SheetSize::default(), &CodecConfig::default()).unwrap();
        let first = doc.find("id=\"0\"").unwrap();
        let second = doc.find("id=\"1\"").unwrap();
        assert!(first < second);
        assert!(doc.contains("A 100.000000 100.000000"));
        assert!(doc.contains("A 200.000000 200.000000"));
    }

    #[test]
    fn request_scales_spacing() {
        let config = CodecConfig {
            spacing: 0.5,
            rotations: 8,
            ..CodecConfig::default()
        };
        let req = encode_request(&[disc(1.0)], &config).unwrap();
        assert_eq!(req.spacing, 50.0);
        assert_eq!(req.rotations, 8);
        assert!(req.svg.starts_with("<svg"));
    }
}
