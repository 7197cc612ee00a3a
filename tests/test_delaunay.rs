use hedge::{
    BestEffort,
    geometry::point::Point2,
    kernel::orient2d,
    operations::triangulation::{Delaunay, DelaunayOptions, Triangulate2D},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn p(x: f64, y: f64) -> Point2<f64> {
    Point2::new([x, y])
}

fn random_points(n: usize, seed: u64) -> Vec<Point2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| p(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
        .collect()
}

#[test]
fn test_square_with_center() {
    let points = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(0.5, 0.5)];
    let dt = Delaunay::build(&points, &DelaunayOptions::default()).unwrap();

    let triangles = dt.triangles();
    assert_eq!(triangles.len(), 4);
    assert!(triangles.iter().all(|t| t.contains(&4)));
    assert!(dt.missed_points.is_empty());
    assert!(dt.is_delaunay());
    dt.mesh.validate_connectivity().unwrap();
}

#[test]
fn test_triangles_wind_ccw_and_use_input_handles() {
    let points = random_points(60, 7);
    let dt = Delaunay::build(&points, &DelaunayOptions::default()).unwrap();

    for [a, b, c] in dt.triangles() {
        assert!(a < points.len() && b < points.len() && c < points.len());
        assert!(orient2d(&points[a], &points[b], &points[c]) > 0.0);
    }
}

#[test]
fn test_random_points_are_delaunay() {
    for seed in [1, 2, 3] {
        let points = random_points(200, seed);
        let dt = Delaunay::build(&points, &DelaunayOptions::default()).unwrap();

        assert!(dt.missed_points.is_empty());
        assert!(dt.is_delaunay());
        dt.mesh.validate_connectivity().unwrap();

        // every input point ends up in the triangulation
        let mut used = vec![false; points.len()];
        for t in dt.triangles() {
            for v in t {
                used[v] = true;
            }
        }
        assert!(used.iter().all(|u| *u));
    }
}

#[test]
fn test_duplicate_point_is_missed() {
    let points = [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)];
    let dt = Delaunay::build(&points, &DelaunayOptions::default()).unwrap();
    assert_eq!(dt.missed_points, vec![3]);
    assert_eq!(dt.triangles().len(), 1);
}

#[test]
fn test_flip_budget_returns_partial() {
    let points = random_points(50, 11);
    let options = DelaunayOptions {
        flip_budget: 0,
        ..Default::default()
    };
    let result = Delaunay::build(&points, &options);
    assert!(result.is_err());

    let partial = result.best_effort();
    partial.mesh.validate_connectivity().unwrap();
    assert!(partial.mesh.face_count() > 0);
}

#[test]
fn test_triangulate_trait() {
    let points = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
    let tri = Delaunay::triangulate(&points);
    assert_eq!(tri.triangles.len(), 2);
    assert_eq!(tri.points.len(), 4);
    assert_eq!(tri.triangle_points().len(), 2);
}
