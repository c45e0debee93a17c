//! Dense tables of basis function values and derivatives,
//! and the normalization of raw tabulations into them.
//!
//! All tables are indexed point first:
//! values as `(num_points, num_fns)`
//! and derivatives as `(num_points, num_fns, cell_dim)`.
//! Assembly code relies on this layout,
//! so raw tabulations are always brought into it
//! regardless of the orientation the basis functions produce them in.

use nalgebra as na;

use crate::{
    basis::{Layout, Tabulation},
    CellError,
};

/// Derivatives of every basis function along every axis at a set of points.
///
/// Stored densely in row-major order with shape `(num_points, num_fns, dim)`,
/// so that the last index varies fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivativeTable {
    shape: (usize, usize, usize),
    data: Vec<f64>,
}

impl DerivativeTable {
    /// A table of zeros with the given `(num_points, num_fns, dim)` shape.
    pub fn zeros(num_points: usize, num_fns: usize, dim: usize) -> Self {
        Self {
            shape: (num_points, num_fns, dim),
            data: vec![0.; num_points * num_fns * dim],
        }
    }

    /// The `(num_points, num_fns, dim)` shape of the table.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        self.shape
    }

    /// Number of points the derivatives were evaluated at.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.shape.0
    }

    /// Number of basis functions.
    #[inline]
    pub fn num_fns(&self) -> usize {
        self.shape.1
    }

    /// Number of derivative directions.
    #[inline]
    pub fn dim(&self) -> usize {
        self.shape.2
    }

    /// Derivative of function `func` along axis `dir` at point `point`.
    ///
    /// Panics if any index is out of range for its axis.
    #[inline]
    pub fn get(&self, point: usize, func: usize, dir: usize) -> f64 {
        assert!(
            point < self.shape.0 && func < self.shape.1 && dir < self.shape.2,
            "Derivative table index ({point}, {func}, {dir}) out of bounds for shape {:?}",
            self.shape
        );
        self.data[self.flat_index(point, func, dir)]
    }

    /// The underlying row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Gradients of all basis functions at one point
    /// as a `(num_fns, dim)` matrix.
    pub fn at_point(&self, point: usize) -> na::DMatrix<f64> {
        let block = self.shape.1 * self.shape.2;
        let start = point * block;
        na::DMatrix::from_row_slice(
            self.shape.1,
            self.shape.2,
            &self.data[start..start + block],
        )
    }

    #[inline]
    fn flat_index(&self, point: usize, func: usize, dir: usize) -> usize {
        (point * self.shape.1 + func) * self.shape.2 + dir
    }
}

impl std::fmt::Display for DerivativeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for point in 0..self.num_points() {
            write!(f, "point {point}:{}", self.at_point(point))?;
        }
        Ok(())
    }
}

/// Bring a raw tabulation of `num_fns` functions at `num_points` points
/// into the point-major `(num_points, num_fns)` layout.
pub fn normalize_values(
    raw: Tabulation,
    num_fns: usize,
    num_points: usize,
) -> Result<na::DMatrix<f64>, CellError> {
    check_tabulation(&raw, num_fns, num_points)?;
    Ok(match raw.layout {
        Layout::FunctionMajor => raw.values.transpose(),
        Layout::PointMajor => raw.values,
    })
}

/// Stack raw tabulations of the derivatives along each axis
/// into a `(num_points, num_fns, dim)` table.
///
/// `raw[d]` must hold the derivatives along axis `d`,
/// and the axes end up in the last index in the same order.
pub fn normalize_derivatives(
    raw: &[Tabulation],
    num_fns: usize,
    num_points: usize,
) -> Result<DerivativeTable, CellError> {
    let mut table = DerivativeTable::zeros(num_points, num_fns, raw.len());
    for (dir, tab) in raw.iter().enumerate() {
        check_tabulation(tab, num_fns, num_points)?;
        for point in 0..num_points {
            for func in 0..num_fns {
                let value = match tab.layout {
                    Layout::FunctionMajor => tab.values[(func, point)],
                    Layout::PointMajor => tab.values[(point, func)],
                };
                let idx = table.flat_index(point, func, dir);
                table.data[idx] = value;
            }
        }
    }
    Ok(table)
}

fn check_tabulation(raw: &Tabulation, num_fns: usize, num_points: usize) -> Result<(), CellError> {
    let (fn_axis, point_axis) = match raw.layout {
        Layout::FunctionMajor => (raw.values.nrows(), raw.values.ncols()),
        Layout::PointMajor => (raw.values.ncols(), raw.values.nrows()),
    };
    CellError::check_size("tabulated basis functions", num_fns, fn_axis)?;
    CellError::check_size("tabulated points", num_points, point_axis)
}

/// Names of the tables a reference cell exposes after initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableName {
    /// Basis function values at the vertices.
    BasisAtVertices,
    /// Basis function derivatives at the vertices.
    BasisDerivAtVertices,
    /// Basis function values at the quadrature points.
    BasisAtQuadPts,
    /// Basis function derivatives at the quadrature points.
    BasisDerivAtQuadPts,
    /// Quadrature point coordinates.
    QuadPts,
    /// Quadrature weights.
    QuadWts,
}

impl TableName {
    /// Every table, in the order they appear in diagnostic dumps.
    pub const ALL: [TableName; 6] = [
        TableName::BasisAtVertices,
        TableName::BasisDerivAtVertices,
        TableName::BasisAtQuadPts,
        TableName::BasisDerivAtQuadPts,
        TableName::QuadPts,
        TableName::QuadWts,
    ];

    /// The canonical name of the table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BasisAtVertices => "basis_at_vertices",
            Self::BasisDerivAtVertices => "basis_deriv_at_vertices",
            Self::BasisAtQuadPts => "basis_at_quad_pts",
            Self::BasisDerivAtQuadPts => "basis_deriv_at_quad_pts",
            Self::QuadPts => "quad_pts",
            Self::QuadWts => "quad_wts",
        }
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TableName {
    type Err = CellError;

    /// Parse a table name.
    /// The short camelCase names used in older input files are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basis_at_vertices" | "basisVert" => Ok(Self::BasisAtVertices),
            "basis_deriv_at_vertices" | "basisDerivVert" => Ok(Self::BasisDerivAtVertices),
            "basis_at_quad_pts" | "basisQuad" => Ok(Self::BasisAtQuadPts),
            "basis_deriv_at_quad_pts" | "basisDerivQuad" => Ok(Self::BasisDerivAtQuadPts),
            "quad_pts" | "quadPts" => Ok(Self::QuadPts),
            "quad_wts" | "quadWts" => Ok(Self::QuadWts),
            _ => Err(CellError::UnknownField(s.to_string())),
        }
    }
}

/// A borrowed view of one of the tables of an initialized cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TableRef<'a> {
    /// A `(num_points, num_fns)` table of values,
    /// or a `(num_points, dim)` table of point coordinates.
    Matrix(&'a na::DMatrix<f64>),
    /// A `(num_points, num_fns, dim)` table of derivatives.
    Derivatives(&'a DerivativeTable),
    /// A sequence of scalars.
    Scalars(&'a [f64]),
}

impl<'a> TableRef<'a> {
    /// Shape of the table, one entry per axis.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Matrix(m) => vec![m.nrows(), m.ncols()],
            Self::Derivatives(d) => {
                let (p, f, dim) = d.shape();
                vec![p, f, dim]
            }
            Self::Scalars(s) => vec![s.len()],
        }
    }

    /// The table's entries flattened in row-major order.
    pub fn to_row_major(&self) -> Vec<f64> {
        match self {
            Self::Matrix(m) => m.transpose().as_slice().to_vec(),
            Self::Derivatives(d) => d.as_slice().to_vec(),
            Self::Scalars(s) => s.to_vec(),
        }
    }
}
