use super::*;
use crate::core::FlatGround;
use glam::Vec3;

fn line_path() -> FencePath {
    FencePath::from_points(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(20.0, 0.0, 0.0),
        ],
        false,
    )
}

#[test]
fn test_segment_count_open_and_closed() {
    let mut path = line_path();
    assert_eq!(path.segment_count(), 2);
    assert_eq!(path.segments().count(), 2);

    path.closed_loop = true;
    assert_eq!(path.segment_count(), 3);

    let closing = path.segments().last().expect("Schließsegment erwartet");
    assert_eq!(closing, (Vec3::new(20.0, 0.0, 0.0), Vec3::ZERO));
}

#[test]
fn test_segment_count_degenerate_paths() {
    let mut path = FencePath::new();
    path.closed_loop = true;
    assert_eq!(path.segment_count(), 0);

    path.insert_at(0, Vec3::ONE).expect("Einfügen in leeren Pfad");
    assert_eq!(path.segment_count(), 0);
    assert_eq!(path.segments().count(), 0);
}

#[test]
fn test_insert_index_empty_and_single() {
    let mut path = FencePath::new();
    assert_eq!(path.insert_index_for(Vec3::new(5.0, 0.0, 5.0)), 0);

    path.insert_at(0, Vec3::ZERO).unwrap();
    assert_eq!(path.insert_index_for(Vec3::new(-5.0, 0.0, 0.0)), 1);
}

#[test]
fn test_insert_index_near_first_point() {
    let path = line_path();
    // Vor dem Startpunkt → neuer Anfang
    assert_eq!(path.insert_index_for(Vec3::new(-3.0, 0.0, 0.0)), 0);
    // Zwischen Punkt 0 und 1, näher an 0
    assert_eq!(path.insert_index_for(Vec3::new(2.0, 0.0, 1.0)), 1);
}

#[test]
fn test_insert_index_near_last_point() {
    let path = line_path();
    // Hinter dem Endpunkt → anhängen
    assert_eq!(path.insert_index_for(Vec3::new(25.0, 0.0, 0.0)), 3);
    // Vor dem Endpunkt → vor dem letzten Punkt einfügen
    assert_eq!(path.insert_index_for(Vec3::new(18.0, 0.0, -1.0)), 2);
}

#[test]
fn test_insert_index_interior_point_picks_side() {
    let path = line_path();
    // Nächster Punkt ist 1, Anfrage liegt Richtung Vorgänger
    assert_eq!(path.insert_index_for(Vec3::new(8.0, 0.0, 0.5)), 1);
    // Nächster Punkt ist 1, Anfrage liegt Richtung Nachfolger
    assert_eq!(path.insert_index_for(Vec3::new(12.0, 0.0, 0.5)), 2);
}

#[test]
fn test_insert_index_midpoint_goes_between_neighbors() {
    // Anfrage genau mittig zwischen Punkt 0 und 1
    let path = FencePath::from_points(
        vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 10.0)],
        false,
    );
    assert_eq!(path.insert_index_for(Vec3::new(5.0, 0.0, 0.0)), 1);
}

#[test]
fn test_nearest_within_radius() {
    let path = line_path();
    assert_eq!(
        path.nearest_point_index_within_radius(Vec3::new(9.0, 0.0, 1.0), 2.0),
        Some(1)
    );
    assert_eq!(
        path.nearest_point_index_within_radius(Vec3::new(5.0, 0.0, 5.0), 2.0),
        None
    );
    assert_eq!(
        FencePath::new().nearest_point_index_within_radius(Vec3::ZERO, 100.0),
        None
    );
}

#[test]
fn test_nearest_within_radius_is_strict_and_prefers_lowest_index() {
    let path = FencePath::from_points(
        vec![Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)],
        false,
    );
    assert_eq!(path.nearest_point_index_within_radius(Vec3::ZERO, 1.5), Some(0));
    // Distanz genau gleich Radius → kein Treffer
    assert_eq!(path.nearest_point_index_within_radius(Vec3::ZERO, 1.0), None);
}

#[test]
fn test_insert_and_remove_bounds() {
    let mut path = line_path();

    assert_eq!(
        path.insert_at(4, Vec3::ZERO),
        Err(LayoutError::IndexOutOfRange { index: 4, len: 3 })
    );
    path.insert_at(3, Vec3::new(30.0, 0.0, 0.0)).expect("Anhängen erlaubt");
    assert_eq!(path.len(), 4);

    let removed = path.remove_at(0).expect("Index 0 gültig");
    assert_eq!(removed, Vec3::ZERO);
    assert_eq!(
        path.remove_at(3),
        Err(LayoutError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert!(path.set_point(5, Vec3::ZERO).is_err());
}

#[test]
fn test_next_append_point() {
    let mut path = FencePath::new();
    assert_eq!(path.next_append_point(), Vec3::ZERO);

    path.insert_at(0, Vec3::new(1.0, 2.0, 3.0)).unwrap();
    assert_eq!(path.next_append_point(), Vec3::new(4.0, 2.0, 3.0));

    path.insert_at(1, Vec3::new(1.0, 2.0, 13.0)).unwrap();
    let next = path.next_append_point();
    assert!((next - Vec3::new(1.0, 2.0, 16.0)).length() < 1e-5);
}

#[test]
fn test_set_origin_snaps_points_to_ground() {
    let mut path = FencePath::from_points(
        vec![Vec3::new(0.0, 7.0, 0.0), Vec3::new(4.0, -3.0, 0.0)],
        false,
    );
    let ramp = |x: f32, _z: f32| x;

    path.set_origin(Vec3::new(10.0, 1.0, 0.0), &ramp);

    // Welthöhe = x_welt, lokal = Welthöhe - origin.y
    assert_eq!(path.points()[0].y, 9.0);
    assert_eq!(path.points()[1].y, 13.0);

    path.snap_to_ground(&FlatGround::new(1.0));
    assert!(path.points().iter().all(|p| p.y == 0.0));
}
