use hedge::{
    error::StepBudget,
    geometry::{point::Point2, util::triangle_area},
    kernel::orient2d,
    operations::triangulation::{ear_clipping::triangulate_polygon_with_budget, triangulate_polygon},
};

fn p(x: f64, y: f64) -> Point2<f64> {
    Point2::new([x, y])
}

fn area(triangles: &[[Point2<f64>; 3]]) -> f64 {
    triangles.iter().map(|[a, b, c]| triangle_area(a, b, c)).sum()
}

#[test]
fn test_convex_polygon() {
    let hexagon: Vec<_> = (0..6)
        .map(|i| {
            let a = i as f64 * std::f64::consts::PI / 3.0;
            p(a.cos(), a.sin())
        })
        .collect();
    let triangles = triangulate_polygon(&hexagon, &[]).unwrap();
    assert_eq!(triangles.len(), 4);
    assert!((area(&triangles) - 1.5 * 3f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_concave_polygon() {
    let l_shape = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(1.0, 1.0), p(1.0, 2.0), p(0.0, 2.0)];
    let triangles = triangulate_polygon(&l_shape, &[]).unwrap();
    assert_eq!(triangles.len(), 4);
    assert!((area(&triangles) - 3.0).abs() < 1e-9);
    for [a, b, c] in &triangles {
        assert!(orient2d(a, b, c) > 0.0);
    }
}

#[test]
fn test_square_with_hole() {
    let outer = [p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
    // clockwise
    let hole = vec![p(1.0, 1.0), p(1.0, 2.0), p(2.0, 2.0), p(2.0, 1.0)];
    let triangles = triangulate_polygon(&outer, &[hole]).unwrap();
    assert_eq!(triangles.len(), 8);
    assert!((area(&triangles) - 15.0).abs() < 1e-9);
}

#[test]
fn test_budget_returns_partial() {
    let outer = [p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(2.0, 5.0), p(0.0, 4.0)];
    let err = triangulate_polygon_with_budget(&outer, &[], StepBudget::new(1)).unwrap_err();
    assert_eq!(err.cause.limit, 1);
    assert!(err.partial.len() <= 1);
}
