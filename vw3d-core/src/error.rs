//! Error types for tessellation and geometry import

use thiserror::Error;

/// Failure to tessellate a single primitive.
///
/// A failing element is skipped by the render pass and reported alongside
/// the output; it never aborts the rest of the scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The two box corners agree on no axis, so there is no orthogonal
    /// face to draw.
    #[error("no orthogonal face within tolerance {tolerance}")]
    DegenerateBox { tolerance: f64 },
}

/// Failure to decode a wire-format geometry blob.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    /// A record keyword outside the supported primitive set.
    #[error("unrecognized geometry type `{0}`")]
    UnrecognizedGeometry(String),
    /// A record that names a known kind but does not parse.
    #[error("malformed record on line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    /// The blob is not UTF-8 text.
    #[error("wire data is not valid UTF-8 text")]
    InvalidEncoding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GeometryError::DegenerateBox { tolerance: 1.0 };
        assert_eq!(err.to_string(), "no orthogonal face within tolerance 1");

        let err = ImportError::UnrecognizedGeometry("mesh".to_string());
        assert_eq!(err.to_string(), "unrecognized geometry type `mesh`");

        let err = ImportError::Malformed {
            line: 3,
            reason: "expected a number".to_string(),
        };
        assert!(err.to_string().contains("line 3"));
    }
}
