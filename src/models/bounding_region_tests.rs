use crate::models::{Body, BoundingRegion, Quadrant, Vector2};
use crate::utils::BarnesHutError;

fn unit_region() -> BoundingRegion {
    BoundingRegion::new(Vector2::zero(), 1.0).expect("valid region")
}

#[test]
fn test_new_rejects_bad_extent() {
    assert_eq!(BoundingRegion::new(Vector2::zero(), 0.0), Err(BarnesHutError::InvalidRegion));
    assert_eq!(BoundingRegion::new(Vector2::zero(), -1.0), Err(BarnesHutError::InvalidRegion));
    assert!(BoundingRegion::new(Vector2::new(f64::NAN, 0.0), 1.0).is_err());
}

#[test]
fn test_contains_is_half_open() {
    let region = unit_region();
    assert!(region.contains(Vector2::new(0.0, 0.0)));
    // Lower bounds are inclusive.
    assert!(region.contains(Vector2::new(-1.0, -1.0)));
    // Upper bounds are exclusive on both axes.
    assert!(!region.contains(Vector2::new(1.0, 0.0)));
    assert!(!region.contains(Vector2::new(0.0, 1.0)));
    assert!(!region.contains(Vector2::new(1.0, 1.0)));
    assert!(!region.contains(Vector2::new(-2.0, 0.0)));
    assert!(!region.contains(Vector2::new(f64::NAN, 0.0)));
}

#[test]
fn test_contains_offset_center() {
    let region = BoundingRegion::new(Vector2::new(10.0, -5.0), 2.0).unwrap();
    assert!(region.contains(Vector2::new(8.0, -7.0)));
    assert!(!region.contains(Vector2::new(12.0, -5.0)));
    assert!(!region.contains(Vector2::new(10.0, -3.0)));
}

#[test]
fn test_intersects() {
    let world = BoundingRegion::new(Vector2::zero(), 10.0).unwrap();
    let overlapping = BoundingRegion::new(Vector2::new(15.0, 0.0), 6.0).unwrap();
    let touching = BoundingRegion::new(Vector2::new(20.0, 0.0), 10.0).unwrap();
    let apart = BoundingRegion::new(Vector2::new(25.0, 0.0), 6.0).unwrap();
    let inside = BoundingRegion::new(Vector2::new(1.0, 1.0), 0.5).unwrap();

    assert!(world.intersects(&overlapping));
    assert!(overlapping.intersects(&world));
    assert!(!world.intersects(&touching));
    assert!(!world.intersects(&apart));
    assert!(world.intersects(&inside));
}

#[test]
fn test_quadrant_of() {
    let region = unit_region();
    assert_eq!(region.quadrant_of(Vector2::new(-0.5, 0.5)), Quadrant::NorthWest);
    assert_eq!(region.quadrant_of(Vector2::new(0.5, 0.5)), Quadrant::NorthEast);
    assert_eq!(region.quadrant_of(Vector2::new(-0.5, -0.5)), Quadrant::SouthWest);
    assert_eq!(region.quadrant_of(Vector2::new(0.5, -0.5)), Quadrant::SouthEast);
}

#[test]
fn test_quadrant_ties_go_west_and_south() {
    let region = unit_region();
    assert_eq!(region.quadrant_of(Vector2::new(0.0, 0.0)), Quadrant::SouthWest);
    assert_eq!(region.quadrant_of(Vector2::new(0.0, 0.5)), Quadrant::NorthWest);
    assert_eq!(region.quadrant_of(Vector2::new(0.5, 0.0)), Quadrant::SouthEast);
}

#[test]
fn test_subdivide() {
    let region = BoundingRegion::new(Vector2::new(2.0, 2.0), 4.0).unwrap();
    let children = region.subdivide();
    for (quadrant, child) in Quadrant::ALL.iter().zip(children.iter()) {
        assert_eq!(child.half_extent, 2.0);
        assert_eq!(*child, region.child(*quadrant));
        // Each child's center is assigned back to that child.
        assert_eq!(region.quadrant_of(child.center), *quadrant);
    }
    assert_eq!(children[Quadrant::NorthWest.index()].center, Vector2::new(0.0, 4.0));
    assert_eq!(children[Quadrant::SouthEast.index()].center, Vector2::new(4.0, 0.0));
    assert_eq!(region.span(), 8.0);
}

#[test]
fn test_containing() {
    let bodies = vec![
        Body::new(0, Vector2::new(3.0, -7.0), 1.0).unwrap(),
        Body::new(1, Vector2::new(-2.0, 1.0), 1.0).unwrap(),
    ];
    let world = BoundingRegion::containing(&bodies, 1.5, 10.0).unwrap();
    assert_eq!(world.center, Vector2::zero());
    assert_eq!(world.half_extent, 20.5);

    // No bodies still yields a usable region.
    let empty = BoundingRegion::containing(&[], 1.5, 10.0).unwrap();
    assert_eq!(empty.half_extent, 10.0);
}
