//! Integration tests for geosimplify-simplification
//!
//! These run whole simplifications over hand-built and generated shapes and
//! check the results with the brute-force self-intersection scans.

use geosimplify_core::{
    loop_self_intersects, polyline_self_intersects, Edge, Error, LatLng, Loop, Point,
};
use geosimplify_simplification::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

fn ll(lat: f64, lng: f64) -> Point {
    Point::from_latlng(LatLng::from_degrees(lat, lng))
}

fn points(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(lat, lng)| ll(lat, lng)).collect()
}

fn indices(input: &[Point], output: &[Point]) -> Vec<usize> {
    output
        .iter()
        .map(|p| input.iter().position(|q| q == p).expect("output point not in input"))
        .collect()
}

/// Five points where the cheapest vertex (1) would bridge 0 -> 2 across 3 -> 4
fn hook() -> Vec<Point> {
    points(&[(0.0, 0.0), (-0.4, 2.0), (0.0, 4.0), (3.0, 2.5), (-0.1, 2.5)])
}

/// Clockwise loop containing the hook; naive simplification makes it cross
fn hooked_loop() -> Loop {
    Loop::from_points(points(&[
        (0.0, 0.0),
        (-0.4, 2.0),
        (0.0, 4.0),
        (3.0, 2.5),
        (-0.1, 2.5),
        (-0.05, 1.0),
        (0.5, -1.0),
        (5.0, -1.0),
        (5.0, 6.0),
        (-3.0, 6.0),
        (-3.0, -1.0),
    ]))
}

/// A city block traced as a line; also a valid counter-clockwise loop
fn block() -> Vec<Point> {
    points(&[
        (45.034455200000004, -85.62582019999999),
        (45.03482089999999, -85.6263255),
        (45.036493099999994, -85.6278167),
        (45.036684699999995, -85.62817409999998),
        (45.036789199999994, -85.62888889999998),
        (45.036954699999995, -85.6302076),
        (45.03697210000001, -85.631403),
        (45.03682090000001, -85.6362185),
        (45.0352695, -85.6362673),
        (45.03524919999999, -85.62878779999997),
        (45.03406769999999, -85.62880649999998),
        (45.03408939999998, -85.62549969999999),
    ])
}

/// Clockwise loop around a small parcel
fn parcel() -> Loop {
    Loop::from_points(points(&[
        (43.023790000000005, -76.4486788),
        (43.0233744, -76.44862240000002),
        (43.022486900000004, -76.45023590000001),
        (43.02233710000001, -76.45022560000002),
        (43.02226590000001, -76.45063540000001),
        (43.022119900000014, -76.45087099999999),
        (43.022221, -76.4509325),
        (43.0218166, -76.45283279999998),
        (43.022172300000015, -76.4528584),
        (43.022603000000004, -76.4507891),
    ]))
}

fn circle(n: usize) -> Loop {
    Loop::from_points(
        (0..n)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                ll(theta.sin(), theta.cos())
            })
            .collect(),
    )
}

fn random_walk(rng: &mut StdRng, n: usize) -> Vec<Point> {
    let (mut lat, mut lng) = (0.0, 0.0);
    (0..n)
        .map(|_| {
            lat += rng.gen_range(-1.0..1.0);
            lng += rng.gen_range(-1.0..1.0);
            ll(lat, lng)
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Scenarios
// ----------------------------------------------------------------------------

#[test]
fn test_zero_threshold_keeps_everything() {
    init_tracing();
    let line = points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
    assert_eq!(simplify_line(&line, 0.0, 0, true).unwrap(), line);
    assert_eq!(simplify_line(&line, 0.0, 0, false).unwrap(), line);
}

#[test]
fn test_crossing_vertex_is_retained() {
    init_tracing();
    let line = hook();

    let naive = simplify_line(&line, 5e-4, 0, false).unwrap();
    assert_eq!(indices(&line, &naive), vec![0, 2, 3, 4]);
    assert!(polyline_self_intersects(&naive).unwrap().is_some());

    let careful = simplify_line(&line, 5e-4, 0, true).unwrap();
    assert_eq!(careful, line, "vertex 1 should survive");
    assert_eq!(polyline_self_intersects(&careful).unwrap(), None);
}

#[test]
fn test_predicate_reports_bridge_and_existing_edge() {
    init_tracing();
    let line = hook();
    let collection = VertexCollection::from_polyline(&line);
    let elimination = Elimination::new(collection, &SimplifyOptions::default()).unwrap();

    let crossing = creates_intersection(elimination.collection(), elimination.index(), 1);
    assert_eq!(
        crossing,
        Some((Edge::new(line[0], line[2]), Edge::new(line[3], line[4])))
    );
    assert_eq!(creates_intersection(elimination.collection(), elimination.index(), 3), None);
}

#[test]
fn test_predicate_on_survey_points() {
    init_tracing();
    let line = points(&[
        (40.264856517201856, -73.32550048828125),
        (40.319325896602095, -73.14971923828125),
        (40.32141999593439, -73.31451416015625),
        (40.2313150803688, -73.4271240234375),
        (40.24179856487036, -73.16619873046875),
    ]);
    let collection = VertexCollection::from_polyline(&line);
    let elimination = Elimination::new(collection, &SimplifyOptions::default()).unwrap();

    assert_eq!(
        creates_intersection(elimination.collection(), elimination.index(), 3),
        Some((Edge::new(line[2], line[4]), Edge::new(line[0], line[1])))
    );
    assert_eq!(creates_intersection(elimination.collection(), elimination.index(), 1), None);

    // Below the smallest interior area nothing is removed
    for threshold in [1e-9, 1e-7, 1e-6] {
        assert_eq!(simplify_line(&line, threshold, 0, true).unwrap(), line);
    }
    let collapsed = simplify_line(&line, 1e-5, 0, true).unwrap();
    assert_eq!(collapsed, vec![line[0], line[4]]);
}

#[test]
fn test_line_that_might_self_intersect() {
    init_tracing();
    let line = points(&[
        (45.03008967256179, -85.63249468803406),
        (45.02955889877115, -85.6320869922638),
        (45.02903570264613, -85.63207626342773),
        (45.02902053746971, -85.63342809677124),
        (45.02953615121298, -85.63219428062439),
        (45.02990011105872, -85.63337445259094),
    ]);
    assert_eq!(polyline_self_intersects(&line).unwrap(), None);

    let naive = simplify_line(&line, 5e-11, 0, false).unwrap();
    assert_eq!(indices(&line, &naive), vec![0, 2, 3, 4, 5]);
    assert!(polyline_self_intersects(&naive).unwrap().is_some());

    let careful = simplify_line(&line, 5e-11, 0, true).unwrap();
    assert_eq!(careful, line);
}

#[test]
fn test_min_points_to_keep_on_line() {
    init_tracing();
    let line = block();
    assert_eq!(simplify_line(&line, 1e-4, 0, false).unwrap().len(), 2);
    assert_eq!(simplify_line(&line, 1e-4, 3, false).unwrap().len(), 3);
    assert_eq!(simplify_line(&line, 1e-4, 12, false).unwrap(), line);
}

#[test]
fn test_naive_loop_simplification_crosses() {
    init_tracing();
    let lp = hooked_loop();
    assert!(lp.validate().is_ok());
    assert!(lp.turning_angle() < 0.0);

    for threshold in [3e-4, 5e-4, 6e-4] {
        let result = simplify_loop(&lp, threshold, 0, false).unwrap();
        assert_eq!(result.num_vertices(), 9);
        assert!(
            loop_self_intersects(result.vertices()).unwrap().is_some(),
            "threshold {} should produce a crossing",
            threshold
        );
    }
}

#[test]
fn test_careful_loop_simplification_stays_simple() {
    init_tracing();
    let lp = hooked_loop();

    for threshold in [3e-4, 5e-4, 6e-4] {
        let result = simplify_loop(&lp, threshold, 0, true).unwrap();
        assert_eq!(result.num_vertices(), 10);
        assert_eq!(loop_self_intersects(result.vertices()).unwrap(), None);
        assert!(result.validate().is_ok());
    }

    // Past the hook both runs agree
    for avoid in [false, true] {
        let result = simplify_loop(&lp, 1e-3, 0, avoid).unwrap();
        assert_eq!(result.num_vertices(), 4);
        assert_eq!(loop_self_intersects(result.vertices()).unwrap(), None);
    }
}

#[test]
fn test_loop_floor_of_four() {
    init_tracing();
    let lp = Loop::from_points(block());
    assert!(lp.validate().is_ok());

    let result = simplify_loop(&lp, 1e-4, 3, false).unwrap();
    assert_eq!(result.num_vertices(), 4);

    let large = circle(64);
    for (min, avoid) in [(3, false), (0, false), (3, true), (0, true)] {
        let result = simplify_loop(&large, 1.0, min, avoid).unwrap();
        assert_eq!(result.num_vertices(), 4);
    }
    assert_eq!(simplify_loop(&large, 1e-12, 0, true).unwrap().num_vertices(), 64);
}

#[test]
fn test_clockwise_loop_comes_back_inverted() {
    init_tracing();
    let lp = parcel();
    assert!(lp.turning_angle() < 0.0);

    for (threshold, expected) in [(1e-12, 10), (1e-11, 7), (5e-11, 6), (1e-10, 4)] {
        for avoid in [false, true] {
            let result = simplify_loop(&lp, threshold, 0, avoid).unwrap();
            assert_eq!(result.num_vertices(), expected, "threshold {}", threshold);
            assert!(result.turning_angle() > 0.0);
            assert_eq!(loop_self_intersects(result.vertices()).unwrap(), None);
            assert!(result.vertices().iter().all(|v| lp.vertices().contains(v)));
        }
    }
}

#[test]
fn test_invalid_loop_is_rejected() {
    init_tracing();
    let too_small = Loop::from_points(points(&[(0.0, 0.0), (1.0, 1.0)]));
    assert!(matches!(simplify_loop(&too_small, 1.0, 0, true), Err(Error::InvalidLoop(_))));

    let bow_tie = Loop::from_points(points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]));
    assert!(matches!(simplify_loop(&bow_tie, 1.0, 0, true), Err(Error::InvalidLoop(_))));
}

#[test]
fn test_coincident_points_are_degenerate() {
    init_tracing();
    let p = ll(10.0, 10.0);
    let line = vec![ll(9.0, 9.0), p, p, p, ll(11.0, 11.0)];
    assert!(matches!(
        simplify_line(&line, 1.0, 0, true),
        Err(Error::DegenerateGeometry(_))
    ));
}

// ----------------------------------------------------------------------------
// Properties over generated lines
// ----------------------------------------------------------------------------

const THRESHOLDS: [f64; 6] = [0.0, 1e-6, 1e-5, 1e-4, 1e-3, 1e-2];

#[test]
fn test_random_lines_properties() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..200 {
        let n = rng.gen_range(3..30);
        let line = random_walk(&mut rng, n);

        for avoid in [false, true] {
            let mut previous = usize::MAX;
            for threshold in THRESHOLDS {
                let out = simplify_line(&line, threshold, 0, avoid).unwrap();
                assert!(out.len() <= previous, "raising the threshold added vertices");
                assert_eq!(out.first(), line.first());
                assert_eq!(out.last(), line.last());
                if threshold == 0.0 {
                    assert_eq!(out, line);
                }
                previous = out.len();
            }
        }
    }
}

#[test]
fn test_random_lines_respect_minimum() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..100 {
        let n = rng.gen_range(3..30);
        let min = rng.gen_range(0..35);
        let line = random_walk(&mut rng, n);
        let out = simplify_line(&line, 1.0, min, false).unwrap();
        assert!(out.len() >= min.min(n));
        assert!(out.len() >= 2);
    }
}

#[test]
fn test_random_lines_removal_cost_never_decreases() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let n = rng.gen_range(4..40);
        let line = random_walk(&mut rng, n);
        for avoid in [false, true] {
            let simplifier = VisvalingamSimplifier::with_params(1e-3, 0, avoid);
            let result = simplifier.simplify_line_with_stats(&line).unwrap();
            let areas = &result.stats.removed_areas;
            assert!(areas.windows(2).all(|w| w[0] <= w[1]), "{:?}", areas);
            assert!(areas.iter().all(|&a| a < 1e-3));
            assert_eq!(result.output.len() + areas.len(), line.len());
        }
    }
}

#[test]
fn test_random_clean_lines_stay_clean() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(11);
    let mut checked = 0;

    for _ in 0..1500 {
        let n = rng.gen_range(4..40);
        let line = random_walk(&mut rng, n);
        if polyline_self_intersects(&line).unwrap().is_some() {
            continue;
        }
        checked += 1;
        for threshold in [1e-6, 1e-5, 1e-4, 1e-3, 1e-2, 1.0] {
            let out = simplify_line(&line, threshold, 0, true).unwrap();
            assert_eq!(
                polyline_self_intersects(&out).unwrap(),
                None,
                "threshold {} introduced a crossing",
                threshold
            );
        }
    }
    assert!(checked > 50);
}
