use crate::models::{Body, Vector2};
use crate::utils::BarnesHutError;

#[test]
fn test_new_valid() {
    let body = Body::new(3, Vector2::new(1.0, -1.0), 2.5).expect("Failed to create body");
    assert_eq!(body.id, 3);
    assert_eq!(body.velocity, Vector2::zero());
    assert_eq!(body.charge, 0.0);
    assert!(!body.is_static);
    assert!(body.is_well_formed());
}

#[test]
fn test_new_invalid_mass() {
    assert_eq!(Body::new(0, Vector2::zero(), -1.0), Err(BarnesHutError::InvalidMass));
    assert_eq!(Body::new(0, Vector2::zero(), f64::NAN), Err(BarnesHutError::InvalidMass));
    // Massless bodies are allowed; they simply exert no force.
    assert!(Body::new(0, Vector2::zero(), 0.0).is_ok());
}

#[test]
fn test_builders() {
    let body = Body::new(1, Vector2::zero(), 1.0)
        .unwrap()
        .with_velocity(Vector2::new(1.0, 2.0))
        .with_charge(0.5)
        .as_static();
    assert_eq!(body.velocity, Vector2::new(1.0, 2.0));
    assert_eq!(body.charge, 0.5);
    assert!(body.is_static);
}

#[test]
fn test_well_formed() {
    let mut body = Body::new(1, Vector2::zero(), 1.0).unwrap();
    body.position.x = f64::INFINITY;
    assert!(!body.is_well_formed());
}
