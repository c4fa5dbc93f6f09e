use crate::*;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use geo::{Distance, Haversine, Intersects, LineString, point, wkt};

#[test]
fn approximator_matches_haversine_nearby() {
    let center = point! { x: -77.0236, y: 38.9126 };
    let other = point! { x: -77.0216, y: 38.9136 };

    let approx = DistanceApproximator::new(center);
    let exact = Haversine.distance(center, other);

    // Within one percent at this scale
    assert_relative_eq!(approx.distance(&other), exact, max_relative = 0.01);
}

#[test]
fn project_onto_interior() {
    let shape: LineString = wkt! { LINESTRING(0.0 0.0, 0.001 0.0, 0.002 0.0) };
    let point = point! { x: 0.0005, y: 0.0001 };

    let projection = project(&point, &shape, &DistanceApproximator::new(point))
        .expect("shape is non-empty");

    assert_eq!(projection.segment, 0);
    assert_abs_diff_eq!(projection.point.x(), 0.0005, epsilon = 1e-9);
    assert_abs_diff_eq!(projection.point.y(), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(projection.offset, 0.25, epsilon = 1e-6);
    assert_relative_eq!(projection.sq_distance.sqrt(), 11.0567, max_relative = 1e-4);
}

#[test]
fn project_snaps_exactly_to_ends() {
    let shape: LineString = wkt! { LINESTRING(0.0 0.0, 0.001 0.0, 0.002 0.0) };

    let before = point! { x: -0.001, y: 0.0 };
    let start = project(&before, &shape, &DistanceApproximator::new(before)).expect("projects");
    assert_eq!(start.offset, 0.0);

    let after = point! { x: 0.004, y: 0.0002 };
    let end = project(&after, &shape, &DistanceApproximator::new(after)).expect("projects");
    assert_eq!(end.offset, 1.0);
    assert_eq!(end.segment, 1);
}

#[test]
fn project_degenerate_shapes() {
    let point = point! { x: 1.0, y: 1.0 };
    let approx = DistanceApproximator::new(point);

    assert!(project(&point, &LineString::new(vec![]), &approx).is_none());

    let single: LineString = wkt! { LINESTRING(1.0 1.001) };
    let projection = project(&point, &single, &approx).expect("single point projects");
    assert_eq!(projection.offset, 0.0);
    assert_eq!(projection.point, point! { x: 1.0, y: 1.001 });
}

#[test]
fn expand_contains_radius() {
    let center = point! { x: 13.4, y: 52.5 };
    let rect = expand_meters(&center, 100.0);

    let north = point! { x: 13.4, y: 52.5 + 99.0 / METERS_PER_DEGREE_LAT };
    let far = point! { x: 13.4, y: 52.5 + 101.0 / METERS_PER_DEGREE_LAT };

    assert!(rect.intersects(&north));
    assert!(!rect.intersects(&far));
    assert!(rect.width() > rect.height());
}

#[test]
fn clip_middle_section() {
    let line: LineString = wkt! { LINESTRING(0.0 0.0, 0.001 0.0, 0.002 0.0, 0.003 0.0, 0.004 0.0) };
    let clipped = clip_linestring(&line, 0.125, 0.625);

    let xs = clipped.points().map(|p| p.x()).collect::<Vec<_>>();
    assert_eq!(xs.len(), 4);
    assert_abs_diff_eq!(xs[0], 0.0005, epsilon = 1e-9);
    assert_abs_diff_eq!(xs[1], 0.001, epsilon = 1e-9);
    assert_abs_diff_eq!(xs[2], 0.002, epsilon = 1e-9);
    assert_abs_diff_eq!(xs[3], 0.0025, epsilon = 1e-9);
}

#[test]
fn clip_rejects_inverted_range() {
    let line: LineString = wkt! { LINESTRING(0.0 0.0, 0.001 0.0) };
    assert!(clip_linestring(&line, 0.7, 0.2).0.is_empty());
}

#[test]
fn clip_full_range_keeps_every_vertex() {
    let line: LineString = wkt! { LINESTRING(0.0 0.0, 0.001 0.001, 0.002 0.0) };
    let clipped = clip_linestring(&line, 0.0, 1.0);

    assert_eq!(clipped.0.len(), 3);
    assert_eq!(clipped.0.first(), line.0.first());
    assert_abs_diff_eq!(clipped.0[1].y, 0.001, epsilon = 1e-9);
    assert_abs_diff_eq!(clipped.0[2].x, 0.002, epsilon = 1e-9);
}

#[test]
fn headings() {
    let origin = point! { x: 0.0, y: 0.0 };

    assert_abs_diff_eq!(heading(&origin, &point! { x: 0.0, y: 1.0 }), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(heading(&origin, &point! { x: 1.0, y: 0.0 }), 90.0, epsilon = 1e-9);
    assert_abs_diff_eq!(heading(&origin, &point! { x: -1.0, y: 0.0 }), 270.0, epsilon = 1e-9);

    assert_eq!(clamp_heading(359.9), 359);
    assert_eq!(clamp_heading(-0.5), 0);
    assert_eq!(clamp_heading(f64::NAN), 0);

    assert_eq!(turn_degree180(0, 180), 180);
    assert_eq!(turn_degree180(350, 10), 20);
    assert_eq!(turn_degree180(45, 45), 0);
}
