//! Quadrature rules for integrating functions over reference cells.
//!
//! Line, quadrilateral and hexahedron rules are tensor products
//! of Gauss-Legendre rules.
//! Triangle and tetrahedron rules are collapsed (Duffy) products
//! where the collapsed directions use Gauss-Jacobi rules
//! whose weight function absorbs the Jacobian of the collapse.
//! Either way, a rule with `n` points per direction
//! integrates polynomials of degree `2n - 1` exactly.
//!
//! # Examples
//!
//! ```
//! # use fecell::{quadrature::QuadratureRule, ReferenceShape};
//! let rule = QuadratureRule::for_shape(ReferenceShape::Triangle, 2).unwrap();
//! // integrate x^2 over the reference triangle
//! let integral = rule.integrate(|p| p[0] * p[0]);
//! assert!((integral - 2. / 3.).abs() < 1e-12);
//! ```

use itertools::iproduct;
use nalgebra as na;

use crate::{CellError, ReferenceShape};

/// A set of points in a reference cell paired with integration weights.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadratureRule {
    /// One row per point.
    points: na::DMatrix<f64>,
    weights: Vec<f64>,
}

impl QuadratureRule {
    /// Bring your own quadrature rule.
    ///
    /// The points are given as rows of a matrix,
    /// and there must be exactly one weight per point.
    pub fn new(points: na::DMatrix<f64>, weights: Vec<f64>) -> Result<Self, CellError> {
        CellError::check_size("quadrature weights", points.nrows(), weights.len())?;
        Ok(Self { points, weights })
    }

    /// Construct the standard rule for a reference shape
    /// with `points_per_dir` points along each coordinate direction.
    pub fn for_shape(shape: ReferenceShape, points_per_dir: usize) -> Result<Self, CellError> {
        if points_per_dir == 0 {
            return Err(CellError::InvalidQuadratureOrder {
                order: points_per_dir,
            });
        }
        let n = points_per_dir;
        let legendre = gauss_legendre(n);

        // coordinates collected row-major, one row per point
        let mut coords: Vec<f64> = Vec::new();
        let mut weights: Vec<f64> = Vec::new();
        match shape {
            ReferenceShape::Line => {
                coords.extend(legendre.iter().map(|p| p.abscissa));
                weights.extend(legendre.iter().map(|p| p.weight));
            }
            ReferenceShape::Quadrilateral => {
                for (y, x) in iproduct!(&legendre, &legendre) {
                    coords.extend([x.abscissa, y.abscissa]);
                    weights.push(x.weight * y.weight);
                }
            }
            ReferenceShape::Hexahedron => {
                for (z, y, x) in iproduct!(&legendre, &legendre, &legendre) {
                    coords.extend([x.abscissa, y.abscissa, z.abscissa]);
                    weights.push(x.weight * y.weight * z.weight);
                }
            }
            ReferenceShape::Triangle => {
                let jacobi_1 = gauss_jacobi(n, 1, 0);
                for (eta, xi) in iproduct!(&jacobi_1, &legendre) {
                    let x = (1. + xi.abscissa) * (1. - eta.abscissa) / 2. - 1.;
                    coords.extend([x, eta.abscissa]);
                    weights.push(xi.weight * eta.weight / 2.);
                }
            }
            ReferenceShape::Tetrahedron => {
                let jacobi_1 = gauss_jacobi(n, 1, 0);
                let jacobi_2 = gauss_jacobi(n, 2, 0);
                for (zeta, eta, xi) in iproduct!(&jacobi_2, &jacobi_1, &legendre) {
                    let x =
                        (1. + xi.abscissa) * (1. - eta.abscissa) * (1. - zeta.abscissa) / 4. - 1.;
                    let y = (1. + eta.abscissa) * (1. - zeta.abscissa) / 2. - 1.;
                    coords.extend([x, y, zeta.abscissa]);
                    weights.push(xi.weight * eta.weight * zeta.weight / 8.);
                }
            }
        }

        let points = na::DMatrix::from_row_slice(weights.len(), shape.dimension(), &coords);
        Self::new(points, weights)
    }

    /// Quadrature point coordinates, one row per point.
    #[inline]
    pub fn get_points(&self) -> &na::DMatrix<f64> {
        &self.points
    }

    /// Quadrature weights in the same order as the points.
    #[inline]
    pub fn get_weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of quadrature points.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the rule has no points at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Spatial dimension of the quadrature points.
    #[inline]
    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    /// Approximate the integral of a function over the reference cell.
    pub fn integrate(&self, f: impl Fn(na::DVector<f64>) -> f64) -> f64 {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, w)| w * f(self.points.row(i).transpose()))
            .sum()
    }
}

/// A single point of a one-dimensional rule on `[-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussPoint {
    /// Integration weight.
    pub weight: f64,
    /// Position in `[-1, 1]`.
    pub abscissa: f64,
}

/// Gauss-Legendre rule with `n` points on `[-1, 1]`,
/// exact for polynomials up to degree `2n - 1`.
pub fn gauss_legendre(n: usize) -> Vec<GaussPoint> {
    gauss_jacobi(n, 0, 0)
}

/// Gauss-Jacobi rule with `n` points on `[-1, 1]`
/// for the weight function `(1 - x)^alpha (1 + x)^beta`.
///
/// Computed with the Golub-Welsch algorithm,
/// i.e. as the eigendecomposition of the symmetric tridiagonal Jacobi matrix
/// of the three-term recurrence of the Jacobi polynomials.
/// Points are returned in ascending order.
pub fn gauss_jacobi(n: usize, alpha: u32, beta: u32) -> Vec<GaussPoint> {
    if n == 0 {
        return Vec::new();
    }

    let a = alpha as f64;
    let b = beta as f64;
    let ab = a + b;
    // integral of the weight function over [-1, 1]
    let mu_0 = 2f64.powi((alpha + beta + 1) as i32) * factorial(alpha) * factorial(beta)
        / factorial(alpha + beta + 1);

    if n == 1 {
        return vec![GaussPoint {
            weight: mu_0,
            abscissa: (b - a) / (ab + 2.),
        }];
    }

    let mut jacobi = na::DMatrix::<f64>::zeros(n, n);
    for k in 0..n {
        let kf = k as f64;
        jacobi[(k, k)] = if k == 0 {
            (b - a) / (ab + 2.)
        } else {
            (b * b - a * a) / ((2. * kf + ab) * (2. * kf + ab + 2.))
        };
        if k + 1 < n {
            let m = kf + 1.;
            let s = 2. * m + ab;
            let off_diag_sq = 4. * m * (m + a) * (m + b) * (m + ab) / (s * s * (s + 1.) * (s - 1.));
            jacobi[(k, k + 1)] = off_diag_sq.sqrt();
            jacobi[(k + 1, k)] = off_diag_sq.sqrt();
        }
    }

    let eigen = na::SymmetricEigen::new(jacobi);
    let mut points: Vec<GaussPoint> = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .map(|(i, &abscissa)| GaussPoint {
            weight: mu_0 * eigen.eigenvectors[(0, i)].powi(2),
            abscissa,
        })
        .collect();
    points.sort_by(|l, r| l.abscissa.total_cmp(&r.abscissa));
    points
}

fn factorial(n: u32) -> f64 {
    (1..=n).map(|i| i as f64).product()
}
