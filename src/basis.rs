//! Polynomial basis functions on reference cells.
//!
//! The evaluator in [`cell`][crate::cell] only talks to basis functions
//! through the [`BasisFunctionSet`] trait,
//! so any polynomial family can be plugged in
//! as long as it can tabulate itself and produce its derivatives.
//! The crate ships nodal Lagrange bases ([`LagrangeBasis`]) of arbitrary degree.

use itertools::Itertools;
use nalgebra as na;

use crate::{CellError, ReferenceShape};

/// Orientation of the matrix returned by [`BasisFunctionSet::tabulate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// One row per basis function, one column per point.
    FunctionMajor,
    /// One row per point, one column per basis function.
    PointMajor,
}

/// Raw output of tabulating a set of functions at a set of points.
#[derive(Clone, Debug, PartialEq)]
pub struct Tabulation {
    /// The tabulated values, oriented as given by `layout`.
    pub values: na::DMatrix<f64>,
    /// Which axis of `values` corresponds to basis functions.
    pub layout: Layout,
}

/// A finite set of functions on a reference shape.
pub trait BasisFunctionSet: Sized {
    /// The shape the functions are defined on.
    /// Its dimension determines the number of derivative directions.
    fn reference_shape(&self) -> ReferenceShape;

    /// Number of functions in the set.
    fn len(&self) -> usize;

    /// Whether the set contains no functions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate every function at every point.
    ///
    /// `points` contains one point per row.
    fn tabulate(&self, points: &na::DMatrix<f64>) -> Tabulation;

    /// The set of first derivatives of every function
    /// along the coordinate axis `direction`.
    fn deriv_all(&self, direction: usize) -> Self;
}

/// Exponents of a monomial `x^e[0] y^e[1] z^e[2]`.
/// Unused dimensions are always zero.
type Exponents = [u32; 3];

/// Nodal Lagrange basis functions of a given degree.
///
/// On simplices the functions span the complete polynomials of the degree (`P_k`),
/// on tensor-product cells the polynomials of that degree in each variable (`Q_k`).
/// The nodes are the equispaced lattice points of the cell,
/// with the corners first (in the order of [`ReferenceShape::corners`])
/// followed by the remaining lattice points.
/// Function `i` is one at node `i` and zero at all other nodes.
#[derive(Clone, Debug)]
pub struct LagrangeBasis {
    shape: ReferenceShape,
    degree: usize,
    monomials: Vec<Exponents>,
    /// matrix where the rows correspond to basis functions
    /// and the columns to monomials
    coefficients: na::DMatrix<f64>,
    /// one row per node
    nodes: na::DMatrix<f64>,
}

impl LagrangeBasis {
    /// Construct the nodal basis of the given degree on a shape.
    pub fn new(shape: ReferenceShape, degree: usize) -> Result<Self, CellError> {
        let nodes = lagrange_nodes(shape, degree)?;

        // the node lattice doubles as the set of monomial exponents
        let monomials = lattice_indices(shape, degree);
        let vandermonde = eval_monomials(&monomials, &nodes);
        let coefficients = vandermonde
            .try_inverse()
            .ok_or(CellError::SingularVandermonde)?;

        Ok(Self {
            shape,
            degree,
            monomials,
            coefficients,
            nodes,
        })
    }

    /// Polynomial degree of the basis.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Coordinates of the nodes, one row per node.
    ///
    /// For derivative sets obtained with [`deriv_all`][BasisFunctionSet::deriv_all]
    /// these are the nodes of the original basis.
    #[inline]
    pub fn nodes(&self) -> &na::DMatrix<f64> {
        &self.nodes
    }
}

impl BasisFunctionSet for LagrangeBasis {
    #[inline]
    fn reference_shape(&self) -> ReferenceShape {
        self.shape
    }

    #[inline]
    fn len(&self) -> usize {
        self.coefficients.nrows()
    }

    fn tabulate(&self, points: &na::DMatrix<f64>) -> Tabulation {
        assert_eq!(
            points.ncols(),
            self.shape.dimension(),
            "Mismatched point dimension"
        );
        Tabulation {
            values: &self.coefficients * eval_monomials(&self.monomials, points),
            layout: Layout::FunctionMajor,
        }
    }

    fn deriv_all(&self, direction: usize) -> Self {
        assert!(
            direction < self.shape.dimension(),
            "Derivative direction out of range"
        );
        // d/dx x^e = e x^(e-1), which stays in the monomial set
        // because both P_k and Q_k are closed under differentiation
        let mut coefficients = na::DMatrix::zeros(self.len(), self.monomials.len());
        for (j, exps) in self.monomials.iter().enumerate() {
            let power = exps[direction];
            if power == 0 {
                continue;
            }
            let mut lowered = *exps;
            lowered[direction] -= 1;
            let Some(target) = self.monomials.iter().position(|m| *m == lowered) else {
                continue;
            };
            for i in 0..self.len() {
                coefficients[(i, target)] += power as f64 * self.coefficients[(i, j)];
            }
        }

        Self {
            coefficients,
            ..self.clone()
        }
    }
}

/// Node coordinates of the degree `degree` Lagrange basis on a shape,
/// one row per node, ordered as described in [`LagrangeBasis`].
pub fn lagrange_nodes(
    shape: ReferenceShape,
    degree: usize,
) -> Result<na::DMatrix<f64>, CellError> {
    if degree == 0 {
        return Err(CellError::InvalidDegree { degree });
    }
    let lattice = lattice_indices(shape, degree);

    // corners first, then everything else in lattice order
    let corners: Vec<Exponents> = shape
        .corners()
        .row_iter()
        .map(|corner| {
            let mut idx = [0; 3];
            for (i, &c) in corner.iter().enumerate() {
                idx[i] = if c > 0. { degree as u32 } else { 0 };
            }
            idx
        })
        .collect();
    let node_indices = corners
        .iter()
        .copied()
        .chain(lattice.into_iter().filter(|i| !corners.contains(i)))
        .collect_vec();

    Ok(na::DMatrix::from_fn(
        node_indices.len(),
        shape.dimension(),
        |row, col| -1. + 2. * node_indices[row][col] as f64 / degree as f64,
    ))
}

/// Multi-indices of the degree `degree` lattice of a shape,
/// in lexicographic order.
fn lattice_indices(shape: ReferenceShape, degree: usize) -> Vec<Exponents> {
    let k = degree as u32;
    (0..shape.dimension())
        .map(|_| 0..=k)
        .multi_cartesian_product()
        .filter(|idx| !shape.is_simplex() || idx.iter().sum::<u32>() <= k)
        .map(|idx| {
            let mut exps = [0; 3];
            exps[..idx.len()].copy_from_slice(&idx);
            exps
        })
        .collect()
}

/// Matrix where the rows correspond to monomials
/// and the columns to points.
fn eval_monomials(monomials: &[Exponents], points: &na::DMatrix<f64>) -> na::DMatrix<f64> {
    na::DMatrix::from_fn(monomials.len(), points.nrows(), |m, p| {
        points
            .row(p)
            .iter()
            .zip(&monomials[m])
            .map(|(x, &e)| x.powi(e as i32))
            .product()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{abs_diff_eq, assert_abs_diff_eq, relative_eq};

    #[test]
    fn node_counts() {
        let expected = [
            (ReferenceShape::Line, 1, 2),
            (ReferenceShape::Line, 3, 4),
            (ReferenceShape::Triangle, 1, 3),
            (ReferenceShape::Triangle, 2, 6),
            (ReferenceShape::Quadrilateral, 2, 9),
            (ReferenceShape::Tetrahedron, 1, 4),
            (ReferenceShape::Tetrahedron, 2, 10),
            (ReferenceShape::Hexahedron, 1, 8),
            (ReferenceShape::Hexahedron, 2, 27),
        ];
        for (shape, degree, count) in expected {
            let basis = LagrangeBasis::new(shape, degree).unwrap();
            assert_eq!(basis.len(), count, "wrong node count for {shape} degree {degree}");
            assert_eq!(basis.nodes().nrows(), count);
        }
    }

    #[test]
    fn corners_come_first() {
        for shape in ReferenceShape::ALL {
            let basis = LagrangeBasis::new(shape, 2).unwrap();
            let corners = shape.corners();
            assert_eq!(basis.nodes().rows(0, shape.num_corners()), corners);
        }
    }

    /// Basis functions are one at their own node and zero at the others.
    #[test]
    fn nodal_property() {
        for shape in ReferenceShape::ALL {
            for degree in 1..=2 {
                let basis = LagrangeBasis::new(shape, degree).unwrap();
                let tab = basis.tabulate(basis.nodes());
                assert_eq!(tab.layout, Layout::FunctionMajor);
                let identity = na::DMatrix::<f64>::identity(basis.len(), basis.len());
                assert!(
                    abs_diff_eq!(tab.values, identity, epsilon = 1e-12),
                    "{shape} degree {degree} is not nodal: {}",
                    tab.values
                );
            }
        }
    }

    #[test]
    fn quadratic_line() {
        let basis = LagrangeBasis::new(ReferenceShape::Line, 2).unwrap();
        itertools::assert_equal(basis.nodes().iter().copied(), [-1., 1., 0.]);

        let points = na::DMatrix::from_row_slice(1, 1, &[0.5]);
        let values = basis.tabulate(&points).values;
        // x(x-1)/2, x(x+1)/2, 1-x^2
        let expected = [-0.125, 0.375, 0.75];
        for (v, e) in values.iter().zip(expected) {
            assert_abs_diff_eq!(*v, e, epsilon = 1e-14);
        }

        let derivs = basis.deriv_all(0).tabulate(&points).values;
        // x - 1/2, x + 1/2, -2x
        let expected = [0., 1., -1.];
        for (v, e) in derivs.iter().zip(expected) {
            assert_abs_diff_eq!(*v, e, epsilon = 1e-13);
        }
    }

    /// Derivatives of the whole set sum to zero
    /// since the functions themselves sum to one.
    #[test]
    fn derivatives_sum_to_zero() {
        let points = na::DMatrix::from_row_slice(2, 3, &[-0.7, -0.2, -0.4, 0.1, 0.3, -0.9]);
        for shape in [ReferenceShape::Tetrahedron, ReferenceShape::Hexahedron] {
            let basis = LagrangeBasis::new(shape, 2).unwrap();
            for d in 0..3 {
                let derivs = basis.deriv_all(d).tabulate(&points).values;
                for col in derivs.column_iter() {
                    assert!(relative_eq!(col.sum(), 0., epsilon = 1e-11));
                }
            }
        }
    }

    #[test]
    fn zero_degree_is_rejected() {
        assert_eq!(
            LagrangeBasis::new(ReferenceShape::Triangle, 0).unwrap_err(),
            CellError::InvalidDegree { degree: 0 }
        );
    }
}
