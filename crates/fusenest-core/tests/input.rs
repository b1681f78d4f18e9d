use approx::assert_abs_diff_eq;
use fusenest_core::input::{InputError, PartsFile};
use fusenest_core::{CurvePrimitive, CurveEvaluator};

const TRIANGLE_AND_SLOT: &str = r#"
parts:
  - profiles:
      - loops:
          - outer: true
            curves:
              - { type: line, start: { x: 0, y: 0 }, end: { x: 10, y: 0 } }
              - { type: line, start: { x: 10, y: 0 }, end: { x: 0, y: 10 } }
              - { type: line, start: { x: 0, y: 10 }, end: { x: 0, y: 0 } }
          - outer: false
            curves:
              - { type: circle, center: { x: 2, y: 2 }, radius: 1 }
profiles:
  - loops:
      - outer: true
        curves:
          - type: ellipse
            center: { x: 0, y: 0 }
            major_axis: { x: 1, y: 1 }
            major_radius: 4
            minor_radius: 2
"#;

#[test]
fn yaml_parts_file_builds_parts_in_order() {
    let file: PartsFile = serde_yaml::from_str(TRIANGLE_AND_SLOT).unwrap();
    let parts = file.into_parts().unwrap();
    assert_eq!(parts.len(), 2);

    let first = parts[0].canonical_profile().unwrap();
    assert_eq!(first.loops.len(), 2);
    assert!(first.loops[0].is_outer);
    assert_eq!(first.loops[0].curves.len(), 3);
    assert!(matches!(first.loops[1].curves[0], CurvePrimitive::Circle(_)));

    let second = parts[1].canonical_profile().unwrap();
    assert!(matches!(second.loops[0].curves[0], CurvePrimitive::Ellipse(_)));
}

#[test]
fn unknown_curve_type_is_kept_as_unsupported() {
    let json = r#"{"profiles":[{"loops":[{"outer":true,"curves":[
        {"type":"line","start":{"x":0,"y":0},"end":{"x":1,"y":0}},
        {"type":"clothoid","length":3}
    ]}]}]}"#;
    let file: PartsFile = serde_json::from_str(json).unwrap();
    let parts = file.into_parts().unwrap();
    let curves = &parts[0].profiles[0].loops[0].curves;
    assert_eq!(curves[1].kind(), "clothoid");
    assert!(matches!(curves[1], CurvePrimitive::Unsupported(_)));
}

#[test]
fn missing_type_is_an_error() {
    let json = r#"{"profiles":[{"loops":[{"curves":[{"radius":3}]}]}]}"#;
    let file: PartsFile = serde_json::from_str(json).unwrap();
    let err = file.into_parts().unwrap_err();
    assert!(matches!(err, InputError::MissingType { loop_index: 0, index: 0 }));
}

#[test]
fn invalid_known_curve_reports_kind() {
    let json = r#"{"profiles":[{"loops":[{"curves":[
        {"type":"circle","center":{"x":0,"y":0},"radius":-1}
    ]}]}]}"#;
    let file: PartsFile = serde_json::from_str(json).unwrap();
    match file.into_parts().unwrap_err() {
        InputError::InvalidCurve { kind, message, .. } => {
            assert_eq!(kind, "circle");
            assert!(message.contains("radius"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn nurbs_curve_is_built_as_freeform() {
    let json = r#"{"profiles":[{"loops":[{"outer":true,"curves":[
        {"type":"nurbs","degree":2,
         "control_points":[{"x":1,"y":0},{"x":1,"y":1},{"x":0,"y":1}],
         "weights":[1,0.7071067811865476,1]}
    ]}]}]}"#;
    let file: PartsFile = serde_json::from_str(json).unwrap();
    let parts = file.into_parts().unwrap();
    let CurvePrimitive::Freeform(curve) = &parts[0].profiles[0].loops[0].curves[0] else {
        panic!("expected a free-form curve");
    };
    assert_eq!(curve.evaluator().domain(), (0.0, 1.0));
    let end = curve.end_point();
    assert_abs_diff_eq!(end.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(end.y, 1.0, epsilon = 1e-12);
}

#[test]
fn malformed_nurbs_is_a_geometry_error() {
    let json = r#"{"profiles":[{"loops":[{"curves":[
        {"type":"nurbs","degree":3,"control_points":[{"x":0,"y":0},{"x":1,"y":0}]}
    ]}]}]}"#;
    let file: PartsFile = serde_json::from_str(json).unwrap();
    assert!(matches!(
        file.into_parts().unwrap_err(),
        InputError::Geometry { .. }
    ));
}
