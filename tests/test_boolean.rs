use hedge::{
    boolean::{BooleanError, BooleanOp, ClipOptions, PolygonBoolean, PolygonRelation, clip, polygon_area, union_outline},
    geometry::{point::Point2, util::is_counter_clockwise},
};

fn p(x: f64, y: f64) -> Point2<f64> {
    Point2::new([x, y])
}

fn square(x0: f64, y0: f64, side: f64) -> Vec<Point2<f64>> {
    vec![p(x0, y0), p(x0 + side, y0), p(x0 + side, y0 + side), p(x0, y0 + side)]
}

fn run(a: &[Point2<f64>], b: &[Point2<f64>], op: BooleanOp) -> hedge::boolean::ClipOutcome<f64> {
    clip(a, b, op, &ClipOptions::default()).unwrap()
}

#[test]
fn test_offset_squares() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.5, 1.0);

    let inter = run(&a, &b, BooleanOp::Intersection);
    assert_eq!(inter.relation, PolygonRelation::Crossing);
    assert_eq!(inter.polygons.len(), 1);
    assert_eq!(inter.polygons[0].len(), 4);
    assert!((polygon_area(&inter.polygons[0]) - 0.25).abs() < 1e-9);
    assert!(is_counter_clockwise(&inter.polygons[0]));

    let diff = run(&a, &b, BooleanOp::Difference);
    assert_eq!(diff.polygons.len(), 1);
    assert!((diff.signed_area() - 0.75).abs() < 1e-9);

    let xor = run(&a, &b, BooleanOp::ExclusiveOr);
    assert_eq!(xor.polygons.len(), 2);
    assert!((xor.signed_area() - 1.5).abs() < 1e-9);

    let union = run(&a, &b, BooleanOp::Union);
    assert_eq!(union.polygons.len(), 3);
    assert!((union.signed_area() - 1.75).abs() < 1e-9);
    assert!(union.polygons.iter().all(|poly| is_counter_clockwise(poly)));
}

#[test]
fn test_union_outline() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(0.5, 0.5, 1.0);
    let outline = union_outline(&a, &b, &ClipOptions::default()).unwrap();

    assert_eq!(outline.polygons.len(), 1);
    assert_eq!(outline.polygons[0].len(), 8);
    assert!((outline.signed_area() - 1.75).abs() < 1e-9);
}

#[test]
fn test_cross_shape_gives_two_differences() {
    // a tall bar crossing a wide bar splits the wide bar in two
    let wide = vec![p(0.0, 1.0), p(3.0, 1.0), p(3.0, 2.0), p(0.0, 2.0)];
    let tall = vec![p(1.0, 0.0), p(2.0, 0.0), p(2.0, 3.0), p(1.0, 3.0)];

    let diff = run(&wide, &tall, BooleanOp::Difference);
    assert_eq!(diff.polygons.len(), 2);
    for poly in &diff.polygons {
        assert!((polygon_area(poly) - 1.0).abs() < 1e-9);
    }

    let inter = run(&wide, &tall, BooleanOp::Intersection);
    assert_eq!(inter.polygons.len(), 1);
    assert!((inter.signed_area() - 1.0).abs() < 1e-9);

    let union = run(&wide, &tall, BooleanOp::Union);
    assert!((union.signed_area() - 5.0).abs() < 1e-9);
}

#[test]
fn test_nested_polygons() {
    let outer = square(0.0, 0.0, 4.0);
    let inner = square(1.0, 1.0, 1.0);

    let inter = run(&outer, &inner, BooleanOp::Intersection);
    assert_eq!(inter.relation, PolygonRelation::BInsideA);
    assert_eq!(inter.polygons, vec![inner.clone()]);

    let diff = run(&outer, &inner, BooleanOp::Difference);
    assert_eq!(diff.polygons.len(), 2);
    assert!(!is_counter_clockwise(&diff.polygons[1]));
    assert!((diff.signed_area() - 15.0).abs() < 1e-9);

    let reversed = run(&inner, &outer, BooleanOp::Difference);
    assert_eq!(reversed.relation, PolygonRelation::AInsideB);
    assert!(reversed.polygons.is_empty());

    let union = run(&outer, &inner, BooleanOp::Union);
    assert!((union.signed_area() - 16.0).abs() < 1e-9);

    let outline = union_outline(&inner, &outer, &ClipOptions::default()).unwrap();
    assert_eq!(outline.polygons, vec![outer]);
}

#[test]
fn test_disjoint_polygons() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(3.0, 0.0, 1.0);

    let inter = run(&a, &b, BooleanOp::Intersection);
    assert_eq!(inter.relation, PolygonRelation::Disjoint);
    assert!(inter.polygons.is_empty());

    let union = run(&a, &b, BooleanOp::Union);
    assert_eq!(union.polygons.len(), 2);
    assert!((union.signed_area() - 2.0).abs() < 1e-9);
}

#[test]
fn test_shared_edge_is_degenerate() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(1.0, 0.0, 1.0);
    let err = clip(&a, &b, BooleanOp::Union, &ClipOptions::default()).unwrap_err();
    assert!(matches!(err, BooleanError::Degenerate { .. }));
}

#[test]
fn test_too_few_vertices() {
    let a = vec![p(0.0, 0.0), p(1.0, 0.0)];
    let b = square(0.0, 0.0, 1.0);
    let err = clip(&a, &b, BooleanOp::Intersection, &ClipOptions::default()).unwrap_err();
    assert!(matches!(err, BooleanError::TooFewVertices { polygon: 'A', count: 2 }));
}

#[test]
fn test_polygon_boolean_trait() {
    let a = square(0.0, 0.0, 2.0);
    let b = square(1.0, 1.0, 2.0);
    let out = a.as_slice().boolean(b.as_slice(), BooleanOp::Intersection).unwrap();
    assert!((out.signed_area() - 1.0).abs() < 1e-9);
}

fn star(cx: f64, cy: f64, points: usize, outer: f64, inner: f64, phase: f64) -> Vec<Point2<f64>> {
    (0..2 * points)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = phase + i as f64 * std::f64::consts::PI / points as f64;
            p(cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

#[test]
fn test_concave_intersection_splits_into_loops() {
    // a bar laid across both arms of a U
    let u = vec![
        p(0.0, 0.0),
        p(3.0, 0.0),
        p(3.0, 3.0),
        p(2.0, 3.0),
        p(2.0, 1.0),
        p(1.0, 1.0),
        p(1.0, 3.0),
        p(0.0, 3.0),
    ];
    let bar = vec![p(-0.5, 1.5), p(3.5, 1.5), p(3.5, 2.5), p(-0.5, 2.5)];

    let inter = run(&u, &bar, BooleanOp::Intersection);
    assert_eq!(inter.relation, PolygonRelation::Crossing);
    assert_eq!(inter.polygons.len(), 2);
    for poly in &inter.polygons {
        assert!(is_counter_clockwise(poly));
        assert!((polygon_area(poly) - 1.0).abs() < 1e-9);
    }

    assert!((run(&u, &bar, BooleanOp::Difference).signed_area() - 5.0).abs() < 1e-9);
    assert!((run(&bar, &u, BooleanOp::Difference).signed_area() - 2.0).abs() < 1e-9);
    assert!((run(&u, &bar, BooleanOp::Union).signed_area() - 9.0).abs() < 1e-9);
}

#[test]
fn test_star_booleans_tile_the_inputs() {
    let a = star(0.0, 0.0, 5, 1.0, 0.4, std::f64::consts::FRAC_PI_2);
    let b = star(0.13, 0.07, 6, 1.1, 0.45, 0.17);
    let (area_a, area_b) = (polygon_area(&a), polygon_area(&b));

    let inter = run(&a, &b, BooleanOp::Intersection).signed_area();
    let a_minus_b = run(&a, &b, BooleanOp::Difference).signed_area();
    let b_minus_a = run(&b, &a, BooleanOp::Difference).signed_area();
    let union = run(&a, &b, BooleanOp::Union).signed_area();
    let xor = run(&a, &b, BooleanOp::ExclusiveOr).signed_area();

    assert!(inter > 0.0);
    assert!((inter + a_minus_b - area_a).abs() < 1e-9);
    assert!((inter + b_minus_a - area_b).abs() < 1e-9);
    assert!((union - (area_a + area_b - inter)).abs() < 1e-9);
    assert!((xor - (area_a + area_b - 2.0 * inter)).abs() < 1e-9);
}
