use crate::geometry::{Point, Segment};
use crate::session::{sorted_points, IntersectionIndex, SessionError};
use proptest::prelude::*;

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::new(Point::new(x1, y1), Point::new(x2, y2))
}

fn index_all(segments: &[Segment]) -> IntersectionIndex {
    let mut index = IntersectionIndex::new();
    for i in 0..segments.len() {
        index.insert_new_intersections(segments, i).unwrap();
    }
    index
}

#[test]
fn test_x_crossing_end_to_end() {
    let segments = vec![seg(0.0, 0.0, 10.0, 10.0), seg(0.0, 10.0, 10.0, 0.0)];
    let mut index = IntersectionIndex::new();

    assert!(index.insert_new_intersections(&segments[..1], 0).unwrap().is_empty());
    let found = index.insert_new_intersections(&segments, 1).unwrap();

    assert_eq!(found, vec![Point::new(5.0, 5.0)]);
    assert_eq!(index.len(), 1);
    assert_eq!(index.points(), &[Point::new(5.0, 5.0)]);
}

#[test]
fn test_single_segment_never_hits_itself() {
    let segments = vec![seg(0.0, 0.0, 10.0, 10.0)];
    let index = index_all(&segments);
    assert!(index.is_empty());
    assert_eq!(index.indexed(), 1);
}

#[test]
fn test_out_of_order_insert_rejected() {
    let segments = vec![seg(0.0, 0.0, 10.0, 10.0), seg(0.0, 10.0, 10.0, 0.0)];
    let mut index = IntersectionIndex::new();

    let err = index.insert_new_intersections(&segments, 1).unwrap_err();
    assert!(matches!(err, SessionError::InvalidState(_)));
    assert_eq!(index.indexed(), 0);
    assert!(index.is_empty());
}

#[test]
fn test_repeated_insert_rejected() {
    let segments = vec![seg(0.0, 0.0, 10.0, 10.0), seg(0.0, 10.0, 10.0, 0.0)];
    let mut index = index_all(&segments);

    assert!(index.insert_new_intersections(&segments, 1).is_err());
    assert_eq!(index.len(), 1);
}

#[test]
fn test_insert_past_end_rejected() {
    let segments = vec![seg(0.0, 0.0, 10.0, 10.0)];
    let mut index = index_all(&segments);

    assert!(index.insert_new_intersections(&segments, 1).is_err());
    assert_eq!(index.indexed(), 1);
}

#[test]
fn test_shared_point_counted_per_pair() {
    // Three strokes through (5, 5): one hit per pair, duplicates kept.
    let segments = vec![
        seg(0.0, 0.0, 10.0, 10.0),
        seg(0.0, 10.0, 10.0, 0.0),
        seg(5.0, 0.0, 5.0, 10.0),
    ];
    let index = index_all(&segments);
    assert_eq!(index.len(), 3);
    assert!(index.points().iter().all(|p| *p == Point::new(5.0, 5.0)));
}

#[test]
fn test_parallel_strokes_add_nothing() {
    let segments = vec![
        seg(0.0, 0.0, 10.0, 0.0),
        seg(0.0, 5.0, 10.0, 5.0),
        seg(0.0, 10.0, 10.0, 10.0),
    ];
    assert!(index_all(&segments).is_empty());
}

#[test]
fn test_recompute_matches_incremental() {
    let segments = vec![
        seg(0.0, 0.0, 100.0, 100.0),
        seg(0.0, 100.0, 100.0, 0.0),
        seg(50.0, -10.0, 50.0, 110.0),
        seg(-10.0, 30.0, 110.0, 30.0),
        seg(200.0, 200.0, 300.0, 210.0),
    ];
    let mut index = index_all(&segments);
    let incremental = sorted_points(index.points());
    let recomputed = sorted_points(index.recompute_all(&segments));
    assert_eq!(incremental, recomputed);
    assert_eq!(index.indexed(), segments.len());
}

#[test]
fn test_recompute_is_idempotent() {
    let segments = vec![
        seg(0.0, 0.0, 10.0, 10.0),
        seg(0.0, 10.0, 10.0, 0.0),
        seg(2.0, 0.0, 2.0, 10.0),
    ];
    let mut index = IntersectionIndex::new();
    let first = index.recompute_all(&segments).to_vec();
    let second = index.recompute_all(&segments).to_vec();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_recompute_then_continue_incrementally() {
    let mut segments = vec![seg(0.0, 0.0, 10.0, 10.0), seg(0.0, 10.0, 10.0, 0.0)];
    let mut index = IntersectionIndex::new();
    index.recompute_all(&segments);

    segments.push(seg(5.0, 0.0, 5.0, 10.0));
    let found = index.insert_new_intersections(&segments, 2).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(index.len(), 3);
}

fn arb_segment() -> impl Strategy<Value = Segment> {
    (-100i32..100, -100i32..100, -100i32..100, -100i32..100)
        .prop_filter("zero-length segment", |(x1, y1, x2, y2)| (x1, y1) != (x2, y2))
        .prop_map(|(x1, y1, x2, y2)| seg(x1 as f64, y1 as f64, x2 as f64, y2 as f64))
}

proptest! {
    #[test]
    fn incremental_equals_full_recompute(segments in prop::collection::vec(arb_segment(), 0..12)) {
        let mut index = index_all(&segments);
        let incremental = sorted_points(index.points());
        let recomputed = sorted_points(index.recompute_all(&segments));
        prop_assert_eq!(incremental, recomputed);
    }

    #[test]
    fn recompute_twice_is_stable(segments in prop::collection::vec(arb_segment(), 0..12)) {
        let mut index = IntersectionIndex::new();
        let first = index.recompute_all(&segments).to_vec();
        let second = index.recompute_all(&segments).to_vec();
        prop_assert_eq!(first, second);
    }
}
