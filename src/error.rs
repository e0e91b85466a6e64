use crate::{refelem::RefElement, Dim};

use thiserror::Error;

pub type FemResult<T> = Result<T, FemError>;

#[derive(Debug, Error)]
pub enum FemError {
  #[error("no quadrature rule of order {order} on the reference {element}")]
  UnsupportedQuadrature { order: usize, element: RefElement },

  #[error("shape functions of order {order} in dimension {dim} are not implemented")]
  UnsupportedShapeFunctions { dim: Dim, order: usize },

  #[error("degenerate element with jacobian determinant {det}")]
  DegenerateElement { det: f64 },

  #[error("incompatible reference elements: {0}")]
  IncompatibleElements(String),

  #[error("invalid mesh: {0}")]
  InvalidMesh(String),

  #[error("linear solver failed: {0}")]
  SolverFailure(String),
}
