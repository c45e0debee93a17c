//! The canonical shapes that physical mesh elements are mapped onto.
//!
//! Every reference shape lives in the box `[-1, 1]^dim`.
//! Simplices have their right angle corner at `(-1, ..., -1)`,
//! tensor-product cells fill the whole box.

use nalgebra as na;

use crate::CellError;

/// A reference cell shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceShape {
    /// The segment `[-1, 1]`.
    Line,
    /// The triangle with corners `(-1,-1)`, `(1,-1)`, `(-1,1)`.
    Triangle,
    /// The square `[-1, 1]^2`.
    Quadrilateral,
    /// The tetrahedron with corners `(-1,-1,-1)`, `(1,-1,-1)`, `(-1,1,-1)`, `(-1,-1,1)`.
    Tetrahedron,
    /// The cube `[-1, 1]^3`.
    Hexahedron,
}

#[rustfmt::skip]
const LINE_CORNERS: [f64; 2] = [
    -1.,
     1.,
];
#[rustfmt::skip]
const TRIANGLE_CORNERS: [f64; 6] = [
    -1., -1.,
     1., -1.,
    -1.,  1.,
];
#[rustfmt::skip]
const QUADRILATERAL_CORNERS: [f64; 8] = [
    -1., -1.,
     1., -1.,
     1.,  1.,
    -1.,  1.,
];
#[rustfmt::skip]
const TETRAHEDRON_CORNERS: [f64; 12] = [
    -1., -1., -1.,
     1., -1., -1.,
    -1.,  1., -1.,
    -1., -1.,  1.,
];
#[rustfmt::skip]
const HEXAHEDRON_CORNERS: [f64; 24] = [
    -1., -1., -1.,
     1., -1., -1.,
     1.,  1., -1.,
    -1.,  1., -1.,
    -1., -1.,  1.,
     1., -1.,  1.,
     1.,  1.,  1.,
    -1.,  1.,  1.,
];

impl ReferenceShape {
    /// All supported shapes, in order of increasing dimension.
    pub const ALL: [ReferenceShape; 5] = [
        ReferenceShape::Line,
        ReferenceShape::Triangle,
        ReferenceShape::Quadrilateral,
        ReferenceShape::Tetrahedron,
        ReferenceShape::Hexahedron,
    ];

    /// Spatial dimension of the shape.
    ///
    /// The order of the axes is the order in which
    /// derivative tables are stacked.
    #[inline]
    pub fn dimension(self) -> usize {
        match self {
            Self::Line => 1,
            Self::Triangle | Self::Quadrilateral => 2,
            Self::Tetrahedron | Self::Hexahedron => 3,
        }
    }

    /// Whether the shape is a simplex (as opposed to a tensor-product cell).
    #[inline]
    pub fn is_simplex(self) -> bool {
        matches!(self, Self::Line | Self::Triangle | Self::Tetrahedron)
    }

    /// Number of corner vertices.
    #[inline]
    pub fn num_corners(self) -> usize {
        self.corner_data().len() / self.dimension()
    }

    /// Corner coordinates, one row per corner.
    pub fn corners(self) -> na::DMatrix<f64> {
        na::DMatrix::from_row_slice(self.num_corners(), self.dimension(), self.corner_data())
    }

    /// Length, area or volume of the shape.
    pub fn volume(self) -> f64 {
        match self {
            Self::Line => 2.,
            Self::Triangle => 2.,
            Self::Quadrilateral => 4.,
            Self::Tetrahedron => 4. / 3.,
            Self::Hexahedron => 8.,
        }
    }

    /// The tag this shape is parsed from.
    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Triangle => "triangle",
            Self::Quadrilateral => "quadrilateral",
            Self::Tetrahedron => "tetrahedron",
            Self::Hexahedron => "hexahedron",
        }
    }

    fn corner_data(self) -> &'static [f64] {
        match self {
            Self::Line => &LINE_CORNERS,
            Self::Triangle => &TRIANGLE_CORNERS,
            Self::Quadrilateral => &QUADRILATERAL_CORNERS,
            Self::Tetrahedron => &TETRAHEDRON_CORNERS,
            Self::Hexahedron => &HEXAHEDRON_CORNERS,
        }
    }
}

impl std::fmt::Display for ReferenceShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ReferenceShape {
    type Err = CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "triangle" | "tri" => Ok(Self::Triangle),
            "quadrilateral" | "quad" => Ok(Self::Quadrilateral),
            "tetrahedron" | "tet" => Ok(Self::Tetrahedron),
            "hexahedron" | "hex" => Ok(Self::Hexahedron),
            _ => Err(CellError::UnknownShape(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_tables_are_consistent() {
        let expected_counts = [2, 3, 4, 4, 8];
        for (shape, count) in ReferenceShape::ALL.iter().zip(expected_counts) {
            let corners = shape.corners();
            assert_eq!(corners.nrows(), count, "wrong corner count for {shape}");
            assert_eq!(corners.ncols(), shape.dimension());
            assert!(
                corners.iter().all(|&c| c == -1. || c == 1.),
                "{shape} corners must lie on the reference box"
            );
        }
    }

    #[test]
    fn parse_tags() {
        for shape in ReferenceShape::ALL {
            assert_eq!(shape.name().parse::<ReferenceShape>(), Ok(shape));
        }
        assert_eq!("Hex".parse(), Ok(ReferenceShape::Hexahedron));
        assert_eq!(
            "pyramid".parse::<ReferenceShape>(),
            Err(CellError::UnknownShape("pyramid".to_string()))
        );
    }
}
