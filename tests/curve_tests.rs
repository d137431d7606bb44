mod support;

use planarc::{
    Curve, DEFAULT_RESOLUTION, PORT_IN, PORT_OUT,
    float_types::Real,
    traits::{Ported, TransformOps},
};

use crate::support::{approx_eq, bounding_box};

#[test]
fn straight_is_exact() {
    let curve = Curve::straight(3.0).unwrap();
    assert_eq!(curve.segments.len(), 1);
    assert_eq!(curve.segments[0].0.len(), 2);
    assert!(approx_eq(curve.segments[0].0[1].x, 3.0, 1e-12));

    let entry = curve.port(PORT_IN).unwrap();
    let exit = curve.port(PORT_OUT).unwrap();
    assert!(approx_eq(entry.x, 0.0, 1e-12));
    assert!(approx_eq(entry.angle, 180.0, 1e-12));
    assert!(approx_eq(exit.x, 3.0, 1e-12));
    assert!(approx_eq(exit.angle, 0.0, 1e-12));
}

#[test]
fn straight_rejects_degenerate_length() {
    assert!(Curve::straight(0.0).is_err());
    assert!(Curve::straight(-2.0).is_err());
}

#[test]
fn turn_endpoint_and_ports() {
    let curve = Curve::turn(5.0, 90.0, 0.0, 100).unwrap();
    let exit = curve.port(PORT_OUT).unwrap();
    assert!(approx_eq(exit.x, 5.0, 1e-9));
    assert!(approx_eq(exit.y, 5.0, 1e-9));
    assert!(approx_eq(exit.angle, 90.0, 1e-6));

    // every sample sits on the circle about (0, 5)
    for point in &curve.segments[0].0 {
        let r = point.x.hypot(point.y - 5.0);
        assert!(approx_eq(r, 5.0, 1e-9));
    }

    // negative angle turns the other way
    let down = Curve::turn(5.0, -90.0, 0.0, 100).unwrap();
    let exit = down.port(PORT_OUT).unwrap();
    assert!(approx_eq(exit.y, -5.0, 1e-9));
    assert!(approx_eq(exit.angle, -90.0, 1e-6));
}

#[test]
fn turn_rejects_bad_parameters() {
    assert!(Curve::turn(0.0, 90.0, 0.0, 100).is_err());
    assert!(Curve::turn(-1.0, 90.0, 0.0, 100).is_err());
    assert!(Curve::turn(5.0, 0.0, 0.0, 100).is_err());
    assert!(Curve::turn(5.0, 90.0, 1.0, 100).is_err());
    assert!(Curve::turn(5.0, 90.0, -0.1, 100).is_err());
    assert!(Curve::turn(5.0, 90.0, 0.0, 1).is_err());
    // accepted parameters whose samples collapse within tolerance
    assert!(Curve::turn(1e-3, 1e-3, 0.0, 2).is_err());
}

#[test]
fn euler_turn_grows_in_length_but_not_displacement() {
    let baseline = Curve::turn(5.0, 90.0, 0.0, 801).unwrap();
    let base_exit = baseline.port(PORT_OUT).unwrap();
    let base_disp = base_exit.x.hypot(base_exit.y);

    let mut previous_length = baseline.length();
    for fraction in [0.1, 0.25, 0.4, 0.5] {
        let curve = Curve::turn(5.0, 90.0, fraction, 801).unwrap();
        let length = curve.length();
        assert!(
            length > previous_length,
            "arc length must grow with the euler fraction ({fraction})"
        );
        previous_length = length;

        let exit = curve.port(PORT_OUT).unwrap();
        let displacement = exit.x.hypot(exit.y);
        assert!(
            (displacement - base_disp).abs() / base_disp < 0.01,
            "displacement drifted at fraction {fraction}"
        );
        assert!(approx_eq(exit.angle, 90.0, 1e-6));
    }
}

#[test]
fn arc_is_centered_on_origin() {
    let curve = Curve::arc(4.0, 180.0, 101).unwrap();
    for point in &curve.segments[0].0 {
        assert!(approx_eq(point.x.hypot(point.y), 4.0, 1e-9));
    }
    let first = curve.segments[0].0[0];
    let last = *curve.segments[0].0.last().unwrap();
    assert!(approx_eq(first.x, 4.0, 1e-9));
    assert!(approx_eq(last.x, -4.0, 1e-9));
    assert!(approx_eq(last.y, 0.0, 1e-6));
}

#[test]
fn bezier_sbend_endpoints_and_headings() {
    let curve = Curve::bezier_sbend(40.0, 10.0, DEFAULT_RESOLUTION).unwrap();
    assert_eq!(curve.segments[0].0.len(), DEFAULT_RESOLUTION);
    let entry = curve.port(PORT_IN).unwrap();
    let exit = curve.port(PORT_OUT).unwrap();
    assert!(approx_eq(entry.x, 0.0, 1e-9));
    assert!(approx_eq(entry.y, 0.0, 1e-9));
    assert!(approx_eq(exit.x, 40.0, 1e-9));
    assert!(approx_eq(exit.y, 10.0, 1e-9));
    // horizontal tangents at both ends
    assert!(approx_eq(entry.angle, 180.0, 0.5));
    assert!(approx_eq(exit.angle, 0.0, 0.5));
}

#[test]
fn flat_bezier_sbend_is_an_exact_line() {
    let curve = Curve::bezier_sbend(40.0, 0.0, 100).unwrap();
    assert_eq!(curve.segments[0].0.len(), 2);
}

#[test]
fn turn_sbend_analytic_branch() {
    // radius == height: reachable with two 60-degree turns and no straight run
    let curve = Curve::turn_sbend(5.0, 5.0, 0.0, 200).unwrap();
    assert_eq!(curve.segments.len(), 2, "no straight segment expected");
    let exit = curve.port(PORT_OUT).unwrap();
    let expected_dx = 2.0 * 5.0 * (60.0 as Real).to_radians().sin();
    assert!(exit.x > 0.0);
    assert!(approx_eq(exit.x, expected_dx, 1e-9));
    assert!(approx_eq(exit.y, 5.0, 1e-9));
    assert!(approx_eq(exit.angle, 0.0, 1e-6));
}

#[test]
fn turn_sbend_falls_back_to_quarter_turns() {
    // two 90-degree turns only span 2*radius; the straight run absorbs the rest
    let curve = Curve::turn_sbend(2.0, 10.0, 0.0, 200).unwrap();
    assert_eq!(curve.segments.len(), 3, "straight segment expected");
    let exit = curve.port(PORT_OUT).unwrap();
    assert!(approx_eq(exit.x, 4.0, 1e-9));
    assert!(approx_eq(exit.y, 10.0, 1e-9));
    assert!(approx_eq(exit.angle, 0.0, 1e-6));
}

#[test]
fn turn_sbend_negative_height_mirrors() {
    let curve = Curve::turn_sbend(5.0, -5.0, 0.0, 200).unwrap();
    let exit = curve.port(PORT_OUT).unwrap();
    assert!(approx_eq(exit.y, -5.0, 1e-9));
}

#[test]
fn reverse_round_trips() {
    let original = Curve::turn(5.0, 90.0, 0.0, 50).unwrap();
    let mut curve = original.copied();
    curve.reverse();

    // reversed curve starts where the original ended
    let entry = curve.port(PORT_IN).unwrap();
    assert!(approx_eq(entry.x, 5.0, 1e-9));
    assert!(approx_eq(entry.y, 5.0, 1e-9));

    curve.reverse();
    assert_eq!(curve.segments.len(), original.segments.len());
    for (a, b) in curve.segments[0].0.iter().zip(&original.segments[0].0) {
        assert!(approx_eq(a.x, b.x, 1e-12));
        assert!(approx_eq(a.y, b.y, 1e-12));
    }
    for (name, pose) in curve.ports() {
        let other = original.port(name).unwrap();
        assert!(approx_eq(pose.x, other.x, 1e-12));
        assert!(approx_eq(pose.y, other.y, 1e-12));
        assert!(approx_eq(pose.angle, other.angle, 1e-12));
    }
}

#[test]
fn symmetrized_straight_doubles_out_and_back() {
    let curve = Curve::straight(2.0).unwrap().symmetrized();
    assert_eq!(curve.segments.len(), 2);
    assert_eq!(curve.sample_count(), 4);
    let exit = curve.port(PORT_OUT).unwrap();
    assert!(approx_eq(exit.x, 4.0, 1e-9));
    assert!(approx_eq(exit.y, 0.0, 1e-9));
    assert!(approx_eq(exit.angle, 0.0, 1e-9));
}

#[test]
fn symmetrized_turn_is_tangent_continuous() {
    let half = Curve::turn(5.0, 90.0, 0.0, 100).unwrap();
    let full = half.symmetrized();
    assert_eq!(full.sample_count(), 2 * half.sample_count());

    // the chords on either side of the junction straddle the analytic
    // terminal tangent (90°) symmetrically, so their mean is the tangent
    // and the residual kink is bounded by one sample step. A mere point
    // reflection would shift the mean off the tangent.
    let first_half = &full.segments[0].0;
    let second_half = &full.segments[1].0;
    let n = first_half.len();
    let h_in = (first_half[n - 1].y - first_half[n - 2].y)
        .atan2(first_half[n - 1].x - first_half[n - 2].x);
    let h_out = (second_half[1].y - second_half[0].y).atan2(second_half[1].x - second_half[0].x);
    let tangent = (90.0 as Real).to_radians();
    let step = tangent / 99.0;
    assert!(approx_eq((h_in + h_out) / 2.0, tangent, 1e-9));
    assert!((h_out - h_in).abs() < step + 1e-9);
}

#[test]
fn interpolated_evens_out_sample_spacing() {
    use planarc::{LinkItem, link};
    let dense_turn = Curve::turn(5.0, 90.0, 0.0, 100).unwrap();
    let linked = link(vec![LinkItem::Shape(dense_turn), LinkItem::Gap(1.0)]).unwrap();

    // the straight run has only 2 samples against the turn's 100
    let spacing_spread = |curve: &Curve| -> Real {
        let mut min = Real::MAX;
        let mut max: Real = 0.0;
        for segment in &curve.segments {
            for w in segment.0.windows(2) {
                let step = (w[1].x - w[0].x).hypot(w[1].y - w[0].y);
                min = min.min(step);
                max = max.max(step);
            }
        }
        max / min
    };
    assert!(spacing_spread(&linked) > 5.0);

    let evened = linked.interpolated();
    assert!(spacing_spread(&evened) < 1.5);
    assert!(approx_eq(evened.length(), linked.length(), 1e-2));
}

#[test]
fn closures_are_parametric_functions() {
    use planarc::float_types::PI;
    // half a sine period, swept as a closure
    let curve = Curve::from_parametric(
        &|t: Real| geo::coord! { x: 10.0 * t, y: (PI * t).sin() },
        200,
    )
    .unwrap();
    assert_eq!(curve.sample_count(), 200);
    let bb = bounding_box(&curve);
    assert!(approx_eq(bb[2], 10.0, 1e-9));
    assert!(approx_eq(bb[3], 1.0, 1e-4));
    assert!(curve.port(PORT_OUT).is_ok());
}

#[test]
fn curve_bounds_and_transform() {
    let mut curve = Curve::straight(3.0).unwrap();
    curve.translate(1.0, 2.0);
    let bb = bounding_box(&curve);
    assert!(approx_eq(bb[0], 1.0, 1e-12));
    assert!(approx_eq(bb[1], 2.0, 1e-12));
    assert!(approx_eq(bb[2], 4.0, 1e-12));
    let exit = curve.port(PORT_OUT).unwrap();
    assert!(approx_eq(exit.x, 4.0, 1e-12));
    assert!(approx_eq(exit.y, 2.0, 1e-12));
    assert!(approx_eq(exit.angle, 0.0, 1e-12));
}
