//! Reading and writing particle files.
//!
//! A particle file holds one body per line as comma separated `x, y, mass` with an optional
//! `vx, vy` velocity. Blank lines and header lines are ignored. Frames written during a run use
//! the three-column form followed by a blank line.
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use log::{debug, info};

use crate::models::{Body, Vector2};
use crate::utils::BarnesHutError;

/// True for lines that can only be a column header or a comment.
fn is_header(line: &str) -> bool {
    line.chars().any(|c| {
        !(c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | ','))
    })
}

fn parse_record(line: &str, line_number: usize, id: usize) -> Result<Body, BarnesHutError> {
    let fields = line
        .split(',')
        .map(|field| {
            field.trim().parse::<f64>().map_err(|e| BarnesHutError::Parse {
                line: line_number,
                message: format!("'{}': {}", field.trim(), e),
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let (position, mass, velocity) = match fields.as_slice() {
        [x, y, mass] => (Vector2::new(*x, *y), *mass, Vector2::zero()),
        [x, y, mass, vx, vy] => (Vector2::new(*x, *y), *mass, Vector2::new(*vx, *vy)),
        _ => {
            return Err(BarnesHutError::Parse {
                line: line_number,
                message: format!("expected 3 or 5 fields, found {}", fields.len()),
            })
        }
    };

    Body::new(id, position, mass)
        .map(|body| body.with_velocity(velocity))
        .map_err(|e| BarnesHutError::Parse { line: line_number, message: e.to_string() })
}

/// Parses bodies from a particle file. Ids are assigned in file order starting at 0.
///
/// # Errors
///
/// Returns [`BarnesHutError::Parse`] with a 1-based line number for a malformed record, and
/// [`BarnesHutError::Io`] if the reader fails.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::simulation::parse_bodies;
///
/// let text = "x, y, mass\n1.0, 2.0, 3.0\n\n-4, 5, 6, 0.5, 0\n";
/// let bodies = parse_bodies(text.as_bytes()).unwrap();
///
/// assert_eq!(bodies.len(), 2);
/// assert_eq!(bodies[1].id, 1);
/// assert_eq!(bodies[1].velocity.x, 0.5);
/// ```
pub fn parse_bodies<R: BufRead>(reader: R) -> Result<Vec<Body>, BarnesHutError> {
    let mut bodies = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if is_header(trimmed) {
            debug!("Skipping header line {}: {}", index + 1, trimmed);
            continue;
        }
        bodies.push(parse_record(trimmed, index + 1, bodies.len())?);
    }
    Ok(bodies)
}

/// Loads bodies from the particle file at `path`.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<Body>, BarnesHutError> {
    let file = File::open(path.as_ref())?;
    let bodies = parse_bodies(BufReader::new(file))?;
    info!("Loaded {} bodies from {}", bodies.len(), path.as_ref().display());
    Ok(bodies)
}

/// Writes bodies as five-column records that [`parse_bodies`] reads back.
pub fn write_bodies<W: Write>(writer: &mut W, bodies: &[Body]) -> Result<(), BarnesHutError> {
    for body in bodies {
        writeln!(
            writer,
            "{}, {}, {}, {}, {}",
            body.position.x, body.position.y, body.mass, body.velocity.x, body.velocity.y
        )?;
    }
    Ok(())
}

/// Formats one output frame: `x, y, mass` per body, then a blank line.
pub fn format_frame(bodies: &[Body]) -> String {
    let mut frame = String::with_capacity(bodies.len() * 32 + 1);
    for body in bodies {
        frame.push_str(&format!("{}, {}, {}\n", body.position.x, body.position.y, body.mass));
    }
    frame.push('\n');
    frame
}

/// Appends one output frame to `writer`.
pub fn write_frame<W: Write>(writer: &mut W, bodies: &[Body]) -> Result<(), BarnesHutError> {
    writer.write_all(format_frame(bodies).as_bytes())?;
    Ok(())
}
