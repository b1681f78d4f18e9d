use fusenest_core::{CurvePrimitive, DEFAULT_TOLERANCE, Line, Loop, Point2};
use fusenest_svg::orientation::shoelace_sum;
use fusenest_svg::{Winding, flip_flags, resolve_loop, winding};
use proptest::prelude::*;

/// Star-shaped polygon around the origin, vertices counter-clockwise in the model.
/// Every angular gap stays below half a turn.
fn polygon() -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec((0.6f64..1.0, 1.0f64..50.0), 3..10).prop_map(|steps| {
        let total: f64 = steps.iter().map(|(s, _)| s).sum();
        let mut angle = 0.0f64;
        steps
            .into_iter()
            .map(|(step, r)| {
                let p = Point2::new(r * angle.cos(), r * angle.sin());
                angle += step / total * std::f64::consts::TAU;
                p
            })
            .collect()
    })
}

fn edges(vertices: &[Point2]) -> Vec<CurvePrimitive> {
    (0..vertices.len())
        .map(|i| Line::new(vertices[i], vertices[(i + 1) % vertices.len()]).into())
        .collect()
}

fn reversed(vertices: &[Point2]) -> Vec<CurvePrimitive> {
    let mut rev = vertices.to_vec();
    rev.reverse();
    edges(&rev)
}

proptest! {
    #[test]
    fn winding_ignores_starting_curve(vertices in polygon(), shift in 0usize..10) {
        let curves = edges(&vertices);
        let flips = flip_flags(&curves, DEFAULT_TOLERANCE);
        let base = shoelace_sum(&curves, &flips);

        let mut rotated = curves.clone();
        rotated.rotate_left(shift % curves.len());
        let rotated_flips = flip_flags(&rotated, DEFAULT_TOLERANCE);

        prop_assert!((shoelace_sum(&rotated, &rotated_flips) - base).abs() <= 1e-6 * base.abs().max(1.0));
        prop_assert_eq!(winding(&rotated, &rotated_flips), winding(&curves, &flips));
    }

    #[test]
    fn reversing_traversal_flips_the_sign(vertices in polygon()) {
        let curves = edges(&vertices);
        let flips = flip_flags(&curves, DEFAULT_TOLERANCE);
        let back = reversed(&vertices);
        let back_flips = flip_flags(&back, DEFAULT_TOLERANCE);

        let forward = shoelace_sum(&curves, &flips);
        let backward = shoelace_sum(&back, &back_flips);
        prop_assert!(forward > 0.0);
        prop_assert!((forward + backward).abs() <= 1e-6 * forward);
        prop_assert_eq!(winding(&curves, &flips), Winding::Clockwise);
        prop_assert_eq!(winding(&back, &back_flips), Winding::CounterClockwise);
    }

    #[test]
    fn resolved_loops_match_their_role(vertices in polygon(), outer in any::<bool>(), backwards in any::<bool>()) {
        let curves = if backwards { reversed(&vertices) } else { edges(&vertices) };
        let lp = Loop::new(curves, outer);
        let oriented = resolve_loop(&lp, DEFAULT_TOLERANCE);

        let walked: Vec<CurvePrimitive> = oriented.traversals.iter().map(|t| t.curve.clone()).collect();
        let flips: Vec<bool> = oriented.traversals.iter().map(|t| t.flipped).collect();
        prop_assert_eq!(winding(&walked, &flips), Winding::required(outer));
    }
}
