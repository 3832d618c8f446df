//! Wire file parser for line-oriented geometry records
//!
//! One record per line, keyword first, numbers free-form. Blank lines and
//! `#` comments are ignored.
//!
//! ```text
//! # drafting demo
//! line 0 0 0  10 0 0
//! polyline closed 0 0 0  4 0 0  4 3 0
//! box -2 -2 0  2 2 0.1
//! sphere 0 1 -4  2.5
//! ```
use nom::{
    bytes::complete::tag,
    character::complete::{alpha1, multispace0, multispace1},
    combinator::{all_consuming, opt},
    multi::many1,
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::error::ImportError;
use crate::geometry::Geometry;
use nalgebra::Point3;

/// Parse a wire-format geometry blob.
///
/// The blob must be UTF-8 text; anything else is rejected rather than
/// guessed at. Records come back in file order.
pub fn parse_wire(data: &[u8]) -> Result<Vec<Geometry>, ImportError> {
    let text = std::str::from_utf8(data).map_err(|_| ImportError::InvalidEncoding)?;
    let mut geometries = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        geometries.push(parse_record_at(line, index + 1)?);
    }
    Ok(geometries)
}

/// Parse a single record, without its line terminator.
pub fn parse_record(line: &str) -> Result<Geometry, ImportError> {
    parse_record_at(line.trim(), 1)
}

fn parse_record_at(line: &str, line_no: usize) -> Result<Geometry, ImportError> {
    let (rest, keyword) = record_keyword(line).map_err(|_| ImportError::Malformed {
        line: line_no,
        reason: "expected a record keyword".to_string(),
    })?;
    let parsed = match keyword {
        "line" => all_consuming(line_record)(rest),
        "polyline" => all_consuming(polyline_record)(rest),
        "box" => all_consuming(box_record)(rest),
        "sphere" => all_consuming(sphere_record)(rest),
        other => return Err(ImportError::UnrecognizedGeometry(other.to_string())),
    };
    match parsed {
        Ok((_, geometry)) => Ok(geometry),
        Err(e) => Err(ImportError::Malformed {
            line: line_no,
            reason: format!("{:?}", e),
        }),
    }
}

fn record_keyword(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alpha1)(input)
}

fn line_record(input: &str) -> IResult<&str, Geometry> {
    let (input, from) = parse_point(input)?;
    let (input, to) = parse_point(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, Geometry::LineCurve { from, to }))
}

fn polyline_record(input: &str) -> IResult<&str, Geometry> {
    let (input, closed) = opt(preceded(multispace1, tag("closed")))(input)?;
    let (input, points) = many1(parse_point)(input)?;
    let (input, _) = multispace0(input)?;
    Ok((
        input,
        Geometry::Polyline {
            points,
            closed: closed.is_some(),
        },
    ))
}

fn box_record(input: &str) -> IResult<&str, Geometry> {
    let (input, min) = parse_point(input)?;
    let (input, max) = parse_point(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, Geometry::Box { min, max }))
}

fn sphere_record(input: &str) -> IResult<&str, Geometry> {
    let (input, center) = parse_point(input)?;
    let (input, _) = multispace1(input)?;
    let (input, radius) = double(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, Geometry::Sphere { center, radius }))
}

fn parse_point(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, _) = multispace0(input)?;
    let (input, x) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = double(input)?;
    Ok((input, Point3::new(x, y, z)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_record() {
        let geometry = parse_record("line 0 0 0  10 0 0").unwrap();
        assert_eq!(
            geometry,
            Geometry::LineCurve {
                from: Point3::origin(),
                to: Point3::new(10.0, 0.0, 0.0),
            }
        );
    }

    #[test]
    fn test_parse_polyline_records() {
        let open = parse_record("polyline 0 0 0  1 0 0  1 1 0").unwrap();
        match open {
            Geometry::Polyline { points, closed } => {
                assert_eq!(points.len(), 3);
                assert!(!closed);
            }
            other => panic!("unexpected geometry {:?}", other),
        }

        let closed = parse_record("polyline closed 0 0 0  4 0 0  4 3 0").unwrap();
        match closed {
            Geometry::Polyline { points, closed } => {
                assert_eq!(points.len(), 3);
                assert!(closed);
                assert_eq!(points[2], Point3::new(4.0, 3.0, 0.0));
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_parse_box_and_sphere_records() {
        let boxed = parse_record("box -2 -2 0  2 2 0.1").unwrap();
        assert_eq!(
            boxed,
            Geometry::Box {
                min: Point3::new(-2.0, -2.0, 0.0),
                max: Point3::new(2.0, 2.0, 0.1),
            }
        );

        let sphere = parse_record("sphere 0 1 -4  2.5").unwrap();
        assert_eq!(
            sphere,
            Geometry::Sphere {
                center: Point3::new(0.0, 1.0, -4.0),
                radius: 2.5,
            }
        );
    }

    #[test]
    fn test_parse_wire_skips_comments_and_blanks() {
        let data = b"# demo scene\n\nline 0 0 0  1 0 0\n  # indented comment\nsphere 0 0 -4  2\n";
        let geometries = parse_wire(data).unwrap();
        assert_eq!(geometries.len(), 2);
        assert!(matches!(geometries[0], Geometry::LineCurve { .. }));
        assert!(matches!(geometries[1], Geometry::Sphere { .. }));
    }

    #[test]
    fn test_unrecognized_geometry_type() {
        let err = parse_record("mesh 0 0 0").unwrap_err();
        assert_eq!(err, ImportError::UnrecognizedGeometry("mesh".to_string()));
    }

    #[test]
    fn test_malformed_record_reports_line() {
        let data = b"line 0 0 0  1 0 0\nbox 1 2\n";
        let err = parse_wire(data).unwrap_err();
        match err {
            ImportError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_trailing_garbage_is_malformed() {
        let err = parse_record("line 0 0 0  1 0 0 extra").unwrap_err();
        assert!(matches!(err, ImportError::Malformed { .. }));
    }

    #[test]
    fn test_non_utf8_is_rejected() {
        let err = parse_wire(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert_eq!(err, ImportError::InvalidEncoding);
    }

    #[test]
    fn test_scientific_notation_coordinates() {
        let geometry = parse_record("sphere 1.5e1 0 -2.25e0  5e-1").unwrap();
        assert_eq!(
            geometry,
            Geometry::Sphere {
                center: Point3::new(15.0, 0.0, -2.25),
                radius: 0.5,
            }
        );
    }
}
