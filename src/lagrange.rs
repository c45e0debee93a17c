//! Concrete suppliers for Lagrange elements on every supported shape.

use nalgebra as na;

use crate::{
    basis::{lagrange_nodes, LagrangeBasis},
    quadrature::QuadratureRule,
    CellError, CellSuppliers, ReferenceCell, ReferenceShape,
};

/// Lagrange element of a given degree on one of the reference shapes.
///
/// The shape tag selects the corner layout, the polynomial space
/// and the quadrature family, see [`ReferenceShape`].
/// The vertices of the cell are the nodes of the basis,
/// so e.g. a quadratic triangle has six vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LagrangeCell {
    shape: ReferenceShape,
    degree: usize,
    quad_order: Option<usize>,
}

impl LagrangeCell {
    /// A cell with the default quadrature of `degree` points per direction.
    pub fn new(shape: ReferenceShape, degree: usize) -> Self {
        Self {
            shape,
            degree,
            quad_order: None,
        }
    }

    /// Use `points_per_dir` quadrature points along each direction instead of the default.
    pub fn with_quad_order(mut self, points_per_dir: usize) -> Self {
        self.quad_order = Some(points_per_dir);
        self
    }

    /// The reference shape of the cell.
    #[inline]
    pub fn shape(&self) -> ReferenceShape {
        self.shape
    }

    /// Polynomial degree of the basis functions.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of quadrature points per direction.
    #[inline]
    pub fn quad_order(&self) -> usize {
        self.quad_order.unwrap_or(self.degree)
    }
}

impl CellSuppliers for LagrangeCell {
    type Basis = LagrangeBasis;

    fn setup_quadrature(&self) -> Result<QuadratureRule, CellError> {
        QuadratureRule::for_shape(self.shape, self.quad_order())
    }

    fn setup_basis_fns(&self) -> Result<LagrangeBasis, CellError> {
        LagrangeBasis::new(self.shape, self.degree)
    }

    fn setup_vertices(&self) -> Result<na::DMatrix<f64>, CellError> {
        lagrange_nodes(self.shape, self.degree)
    }
}

/// Create an uninitialized Lagrange reference cell.
///
/// ```
/// # use fecell::{reference_cell, info::NoInfo, ReferenceShape};
/// let mut cell = reference_cell("tri3", ReferenceShape::Triangle, 1);
/// cell.initialize(&mut NoInfo).unwrap();
/// assert_eq!(cell.tables().unwrap().num_corners(), 3);
/// ```
pub fn reference_cell(
    name: impl Into<String>,
    shape: ReferenceShape,
    degree: usize,
) -> ReferenceCell<LagrangeCell> {
    ReferenceCell::new(name, LagrangeCell::new(shape, degree))
}
