//! Linear (P1) finite elements for the Poisson equation on 2D triangle meshes.
//!
//! The pipeline runs strictly downstream:
//! quadrature and shape functions on the reference element,
//! the affine map to each physical element,
//! elementary stiffness matrices and load vectors,
//! the scatter into the global sparse system
//! and finally the penalty enforcement of Dirichlet data.

extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod assemble;
pub mod error;
pub mod fe;
pub mod lse;
pub mod mapping;
pub mod mesh;
pub mod problems;
pub mod quadrature;
pub mod refelem;
pub mod shape;
pub mod sparse;

pub use error::{FemError, FemResult};

pub type Dim = usize;
pub type VertexIdx = usize;
pub type Attribute = usize;

/// A point of the physical domain.
pub type Vertex = na::Point2<f64>;
/// A point of a reference element. Segments only use the first coordinate.
pub type RefPoint = na::Point2<f64>;
