//! The error type shared by everything in the crate.

/// Error in setting up or querying a reference cell.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    /// One of the [`CellSuppliers`][crate::CellSuppliers] methods
    /// was not implemented for the cell in use.
    #[error("Reference cell supplier `{supplier}` is not implemented")]
    NotImplemented {
        /// Name of the missing supplier method.
        supplier: &'static str,
    },
    /// Two pieces of data that must agree in size do not.
    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Which quantity was being checked.
        what: &'static str,
        /// The size implied by the rest of the cell.
        expected: usize,
        /// The size actually found.
        actual: usize,
    },
    /// A table was queried by a name that doesn't exist.
    #[error("Unknown field `{0}`")]
    UnknownField(String),
    /// A reference shape tag that doesn't name any supported shape.
    #[error("Unknown reference shape `{0}`")]
    UnknownShape(String),
    /// Lagrange bases need at least linear polynomials.
    #[error("Invalid polynomial degree {degree}, must be at least 1")]
    InvalidDegree {
        /// The degree that was requested.
        degree: usize,
    },
    /// Quadrature rules need at least one point per direction.
    #[error("Invalid quadrature order {order}, must be at least 1")]
    InvalidQuadratureOrder {
        /// The number of points per direction that was requested.
        order: usize,
    },
    /// The nodal basis could not be constructed
    /// because the Vandermonde matrix at the nodes is singular.
    #[error("Vandermonde matrix of the nodal basis is singular")]
    SingularVandermonde,
}

impl CellError {
    /// Return `Ok(())` if the sizes agree and a [`ShapeMismatch`][Self::ShapeMismatch] otherwise.
    pub(crate) fn check_size(
        what: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<(), CellError> {
        if expected == actual {
            Ok(())
        } else {
            Err(CellError::ShapeMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_check() {
        assert_eq!(CellError::check_size("corners", 3, 3), Ok(()));
        assert_eq!(
            CellError::check_size("corners", 3, 4),
            Err(CellError::ShapeMismatch {
                what: "corners",
                expected: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn messages_name_the_culprit() {
        let err = CellError::UnknownField("basisVrt".to_string());
        assert_eq!(err.to_string(), "Unknown field `basisVrt`");
        let err = CellError::NotImplemented {
            supplier: "setup_quadrature",
        };
        assert!(err.to_string().contains("setup_quadrature"));
    }
}
