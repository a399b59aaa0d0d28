use std::io::Cursor;

use crate::models::{Body, Vector2};
use crate::simulation::{format_frame, load_bodies, parse_bodies, write_bodies, write_frame};
use crate::utils::BarnesHutError;

#[test]
fn test_parse_three_and_five_columns() {
    let text = "1.5, -2, 10\n3e2,4.25,1e-3, 0.5, -0.25\n";
    let bodies = parse_bodies(Cursor::new(text)).unwrap();
    assert_eq!(bodies.len(), 2);

    assert_eq!(bodies[0].id, 0);
    assert_eq!(bodies[0].position, Vector2::new(1.5, -2.0));
    assert_eq!(bodies[0].mass, 10.0);
    assert_eq!(bodies[0].velocity, Vector2::zero());

    assert_eq!(bodies[1].id, 1);
    assert_eq!(bodies[1].position, Vector2::new(300.0, 4.25));
    assert_eq!(bodies[1].velocity, Vector2::new(0.5, -0.25));
    assert!(!bodies[1].is_static);
}

#[test]
fn test_headers_and_blank_lines_are_skipped() {
    let text = "# generated\nx, y, mass, vx, vy\n\n   \n1, 2, 3\n\n4, 5, 6\n";
    let bodies = parse_bodies(Cursor::new(text)).unwrap();
    let ids: Vec<usize> = bodies.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(bodies[1].position, Vector2::new(4.0, 5.0));
}

#[test]
fn test_wrong_field_count_reports_line() {
    let text = "x, y, mass\n1, 2, 3\n1, 2, 3, 4\n";
    match parse_bodies(Cursor::new(text)) {
        Err(BarnesHutError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("Expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_malformed_number_reports_line() {
    let text = "1, 2, 3\n1, 2..5, 3\n";
    assert!(matches!(parse_bodies(Cursor::new(text)), Err(BarnesHutError::Parse { line: 2, .. })));
}

#[test]
fn test_negative_mass_is_rejected() {
    let text = "1, 2, -3\n";
    assert!(matches!(parse_bodies(Cursor::new(text)), Err(BarnesHutError::Parse { line: 1, .. })));
}

#[test]
fn test_write_then_parse_preserves_bodies() {
    let bodies = vec![
        Body::new(0, Vector2::new(0.1, -7.25), 12.5).unwrap().with_velocity(Vector2::new(0.3, 0.0)),
        Body::new(1, Vector2::new(1e-7, 42.0), 9999.0).unwrap(),
    ];
    let mut buffer = Vec::new();
    write_bodies(&mut buffer, &bodies).unwrap();
    let parsed = parse_bodies(Cursor::new(buffer)).unwrap();
    assert_eq!(parsed, bodies);
}

#[test]
fn test_frame_format() {
    let bodies = vec![
        Body::new(0, Vector2::new(1.0, 2.0), 3.0).unwrap(),
        Body::new(1, Vector2::new(-0.5, 0.0), 1.0).unwrap(),
    ];
    assert_eq!(format_frame(&bodies), "1, 2, 3\n-0.5, 0, 1\n\n");

    let mut out = Vec::new();
    write_frame(&mut out, &bodies).unwrap();
    write_frame(&mut out, &bodies[..1]).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "1, 2, 3\n-0.5, 0, 1\n\n1, 2, 3\n\n");
}

#[test]
fn test_load_missing_file() {
    let result = load_bodies("/nonexistent/particles.txt");
    assert!(matches!(result, Err(BarnesHutError::Io(_))));
}

#[test]
fn test_load_from_disk() {
    let path = std::env::temp_dir().join(format!("rs_barnes_hut_particles_{}.txt", std::process::id()));
    std::fs::write(&path, "x,y,mass\n0,0,1\n2,2,5,1,1\n").unwrap();
    let bodies = load_bodies(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[1].mass, 5.0);
}
