//! The reference cell evaluator.
//!
//! A [`ReferenceCell`] gets its quadrature rule, basis functions and vertices
//! from a [`CellSuppliers`] implementation,
//! tabulates the basis functions and their derivatives
//! at the vertices and at the quadrature points,
//! and keeps the resulting [`CellTables`] for element assembly.
//!
//! # Examples
//!
//! ```
//! # use fecell::{info::InfoRecord, LagrangeCell, ReferenceCell, ReferenceShape};
//! let mut cell = ReferenceCell::new("line2", LagrangeCell::new(ReferenceShape::Line, 1));
//! let mut info = InfoRecord::default();
//! cell.initialize(&mut info).unwrap();
//!
//! let tables = cell.tables().unwrap();
//! assert_eq!(tables.num_corners(), 2);
//! assert_eq!(tables.quad_wts(), &[2.]);
//! assert_eq!(info.records, 1);
//! ```

use nalgebra as na;

use crate::{
    basis::{BasisFunctionSet, Tabulation},
    info::InfoSink,
    quadrature::QuadratureRule,
    table::{normalize_derivatives, normalize_values, DerivativeTable, TableName, TableRef},
    CellError,
};

/// The three things a reference cell needs to be set up.
///
/// Each method has a default implementation that fails with
/// [`CellError::NotImplemented`],
/// so a cell type that doesn't provide everything
/// fails cleanly on initialization.
pub trait CellSuppliers {
    /// The basis function family used by the cell.
    type Basis: BasisFunctionSet;

    /// The quadrature rule on the reference cell.
    /// Its points must have the dimension of the basis functions' shape.
    fn setup_quadrature(&self) -> Result<QuadratureRule, CellError> {
        Err(CellError::NotImplemented {
            supplier: "setup_quadrature",
        })
    }

    /// The basis functions of the cell.
    fn setup_basis_fns(&self) -> Result<Self::Basis, CellError> {
        Err(CellError::NotImplemented {
            supplier: "setup_basis_fns",
        })
    }

    /// Vertex coordinates, one row per vertex.
    /// There must be exactly one vertex per basis function.
    fn setup_vertices(&self) -> Result<na::DMatrix<f64>, CellError> {
        Err(CellError::NotImplemented {
            supplier: "setup_vertices",
        })
    }
}

/// A named reference cell which is either uninitialized
/// or holds a complete set of [`CellTables`].
#[derive(Clone, Debug)]
pub struct ReferenceCell<S> {
    name: String,
    suppliers: S,
    tables: Option<CellTables>,
}

impl<S: CellSuppliers> ReferenceCell<S> {
    /// Create an uninitialized cell.
    pub fn new(name: impl Into<String>, suppliers: S) -> Self {
        Self {
            name: name.into(),
            suppliers,
            tables: None,
        }
    }

    /// Compute all tables and write them to `info` as one record.
    ///
    /// Each supplier is called exactly once.
    /// On error the cell is left exactly as it was
    /// and nothing is written to `info`.
    ///
    /// Initializing an already initialized cell recomputes and replaces its tables.
    /// Nothing should rely on that; cells are meant to be initialized once.
    pub fn initialize(&mut self, info: &mut impl InfoSink) -> Result<(), CellError> {
        let tables = self.evaluate()?;

        for (heading, text) in tables.dump_sections() {
            info.line(heading);
            info.line(&text);
        }
        info.log();

        log::debug!(
            "initialized reference cell `{}`: cell_dim {}, num_corners {}, num_quad_pts {}",
            self.name,
            tables.cell_dim,
            tables.num_corners,
            tables.num_quad_pts,
        );
        self.tables = Some(tables);
        Ok(())
    }

    fn evaluate(&self) -> Result<CellTables, CellError> {
        let quadrature = self.suppliers.setup_quadrature()?;
        let basis_fns = self.suppliers.setup_basis_fns()?;
        let vertices = self.suppliers.setup_vertices()?;

        CellError::check_size("vertices", basis_fns.len(), vertices.nrows())?;
        CellError::check_size(
            "quadrature weights",
            quadrature.get_points().nrows(),
            quadrature.get_weights().len(),
        )?;

        // derived once from the basis shape;
        // `tabulate_at` checks both point sets against it
        let cell_dim = basis_fns.reference_shape().dimension();
        let (basis_vert, basis_deriv_vert) = tabulate_at(&basis_fns, &vertices, cell_dim)?;
        let (basis_quad, basis_deriv_quad) =
            tabulate_at(&basis_fns, quadrature.get_points(), cell_dim)?;

        Ok(CellTables {
            cell_dim,
            num_corners: basis_vert.ncols(),
            num_quad_pts: quadrature.len(),
            basis_vert,
            basis_deriv_vert,
            basis_quad,
            basis_deriv_quad,
            quad_pts: quadrature.get_points().clone(),
            quad_wts: quadrature.get_weights().to_vec(),
        })
    }
}

impl<S> ReferenceCell<S> {
    /// The name given on construction.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The suppliers the cell was constructed with.
    #[inline]
    pub fn suppliers(&self) -> &S {
        &self.suppliers
    }

    /// Whether [`initialize`][Self::initialize] has succeeded.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.tables.is_some()
    }

    /// The computed tables, or `None` if the cell is not initialized.
    #[inline]
    pub fn tables(&self) -> Option<&CellTables> {
        self.tables.as_ref()
    }

    /// Take ownership of the computed tables.
    pub fn into_tables(self) -> Option<CellTables> {
        self.tables
    }
}

/// Tabulate values and derivatives of a basis at a set of points (one per row),
/// taking derivatives along the first `dim` axes.
fn tabulate_at<B: BasisFunctionSet>(
    basis_fns: &B,
    points: &na::DMatrix<f64>,
    dim: usize,
) -> Result<(na::DMatrix<f64>, DerivativeTable), CellError> {
    CellError::check_size("point dimension", dim, points.ncols())?;

    let num_fns = basis_fns.len();
    let num_points = points.nrows();
    let values = normalize_values(basis_fns.tabulate(points), num_fns, num_points)?;
    // derivative directions in the axis order of the reference shape
    let raw_derivs: Vec<Tabulation> = (0..dim)
        .map(|d| basis_fns.deriv_all(d).tabulate(points))
        .collect();
    let derivs = normalize_derivatives(&raw_derivs, num_fns, num_points)?;

    Ok((values, derivs))
}

/// Basis function tables and quadrature data of an initialized reference cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellTables {
    cell_dim: usize,
    num_corners: usize,
    num_quad_pts: usize,
    basis_vert: na::DMatrix<f64>,
    basis_deriv_vert: DerivativeTable,
    basis_quad: na::DMatrix<f64>,
    basis_deriv_quad: DerivativeTable,
    quad_pts: na::DMatrix<f64>,
    quad_wts: Vec<f64>,
}

impl CellTables {
    /// Spatial dimension of the reference cell.
    #[inline]
    pub fn cell_dim(&self) -> usize {
        self.cell_dim
    }

    /// Number of vertices, which is also the number of basis functions.
    #[inline]
    pub fn num_corners(&self) -> usize {
        self.num_corners
    }

    /// Number of quadrature points.
    #[inline]
    pub fn num_quad_pts(&self) -> usize {
        self.num_quad_pts
    }

    /// Basis function values at the vertices, shape `(num_corners, num_corners)`.
    /// Row `i` holds the value of every basis function at vertex `i`.
    #[inline]
    pub fn basis_at_vertices(&self) -> &na::DMatrix<f64> {
        &self.basis_vert
    }

    /// Basis function derivatives at the vertices,
    /// shape `(num_corners, num_corners, cell_dim)`.
    #[inline]
    pub fn basis_deriv_at_vertices(&self) -> &DerivativeTable {
        &self.basis_deriv_vert
    }

    /// Basis function values at the quadrature points, shape `(num_quad_pts, num_corners)`.
    #[inline]
    pub fn basis_at_quad_pts(&self) -> &na::DMatrix<f64> {
        &self.basis_quad
    }

    /// Basis function derivatives at the quadrature points,
    /// shape `(num_quad_pts, num_corners, cell_dim)`.
    #[inline]
    pub fn basis_deriv_at_quad_pts(&self) -> &DerivativeTable {
        &self.basis_deriv_quad
    }

    /// Quadrature point coordinates, shape `(num_quad_pts, cell_dim)`.
    #[inline]
    pub fn quad_pts(&self) -> &na::DMatrix<f64> {
        &self.quad_pts
    }

    /// Quadrature weights.
    #[inline]
    pub fn quad_wts(&self) -> &[f64] {
        &self.quad_wts
    }

    /// Look up a table by name.
    pub fn table(&self, name: TableName) -> TableRef<'_> {
        match name {
            TableName::BasisAtVertices => TableRef::Matrix(&self.basis_vert),
            TableName::BasisDerivAtVertices => TableRef::Derivatives(&self.basis_deriv_vert),
            TableName::BasisAtQuadPts => TableRef::Matrix(&self.basis_quad),
            TableName::BasisDerivAtQuadPts => TableRef::Derivatives(&self.basis_deriv_quad),
            TableName::QuadPts => TableRef::Matrix(&self.quad_pts),
            TableName::QuadWts => TableRef::Scalars(&self.quad_wts),
        }
    }

    /// Look up a table by its string name,
    /// failing with [`CellError::UnknownField`] if there is no such table.
    pub fn field(&self, name: &str) -> Result<TableRef<'_>, CellError> {
        Ok(self.table(name.parse()?))
    }

    /// Headings and formatted contents of the diagnostic dump, in order.
    fn dump_sections(&self) -> [(&'static str, String); 6] {
        [
            ("Basis (vertices):", self.basis_vert.to_string()),
            ("Basis derivatives (vertices):", self.basis_deriv_vert.to_string()),
            ("Basis (quad pts):", self.basis_quad.to_string()),
            ("Basis derivatives (quad pts):", self.basis_deriv_quad.to_string()),
            ("Quad pts:", self.quad_pts.to_string()),
            ("Quad wts:", format!("{:?}", self.quad_wts)),
        ]
    }
}

impl std::fmt::Display for CellTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (heading, text) in self.dump_sections() {
            writeln!(f, "{heading}")?;
            writeln!(f, "{text}")?;
        }
        Ok(())
    }
}
