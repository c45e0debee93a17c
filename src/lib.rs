//! Reference finite-element cells.
//!
//! A reference cell is the canonical shape (line, triangle, quadrilateral,
//! tetrahedron or hexahedron) that every physical mesh element of that type
//! is mapped onto for integration.
//! This crate tabulates the basis functions of a reference cell
//! and their derivatives at the cell's vertices and at quadrature points,
//! producing the tables that element stiffness and mass assembly is built on.
//!
//! The central type is [`ReferenceCell`],
//! which gets its quadrature rule, basis functions and vertices
//! from an implementation of [`CellSuppliers`].
//! [`LagrangeCell`] supplies nodal Lagrange elements of any degree
//! on all the supported shapes.
//!
//! ```
//! use fecell::{info::LogInfo, reference_cell, ReferenceShape};
//!
//! let mut cell = reference_cell("tet4", ReferenceShape::Tetrahedron, 1);
//! cell.initialize(&mut LogInfo::default())?;
//!
//! let tables = cell.tables().unwrap();
//! assert_eq!(tables.cell_dim(), 3);
//! assert_eq!(tables.num_corners(), 4);
//! // gradients of all four basis functions at the first quadrature point
//! let grads = tables.basis_deriv_at_quad_pts().at_point(0);
//! assert_eq!(grads.shape(), (4, 3));
//! # Ok::<(), fecell::CellError>(())
//! ```

#![warn(missing_docs)]

pub mod error;
#[doc(inline)]
pub use error::CellError;

pub mod shape;
#[doc(inline)]
pub use shape::ReferenceShape;

pub mod basis;
#[doc(inline)]
pub use basis::{BasisFunctionSet, LagrangeBasis};

pub mod quadrature;
#[doc(inline)]
pub use quadrature::QuadratureRule;

pub mod table;
#[doc(inline)]
pub use table::{DerivativeTable, TableName, TableRef};

pub mod cell;
#[doc(inline)]
pub use cell::{CellSuppliers, CellTables, ReferenceCell};

mod lagrange;
pub use lagrange::{reference_cell, LagrangeCell};

pub mod info;

pub use nalgebra as na;
