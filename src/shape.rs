//! Linear Lagrange basis on the reference elements.
//!
//! The basis functions are the reference barycentric coordinates
//! $lambda_0 = 1 - sum_i x_i$ and $lambda_i = x_i$.

use crate::{
  error::{FemError, FemResult},
  refelem::RefElement,
  Dim, RefPoint,
};

/// The constant reference gradients of the barycentric coordinates.
const SEGMENT_GRADS: [[f64; 2]; 2] = [[-1.0, 0.0], [1.0, 0.0]];
const TRIANGLE_GRADS: [[f64; 2]; 3] = [[-1.0, -1.0], [1.0, 0.0], [0.0, 1.0]];

/// Evaluator of the P1 shape functions of one reference element.
///
/// Stateless, so one instance serves all elements of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeFunctions {
  element: RefElement,
}

impl ShapeFunctions {
  pub fn new(dim: Dim, order: usize) -> FemResult<Self> {
    let element = RefElement::from_dim(dim)
      .filter(|_| order == 1)
      .ok_or(FemError::UnsupportedShapeFunctions { dim, order })?;
    Ok(Self { element })
  }

  pub fn on(element: RefElement) -> Self {
    Self { element }
  }

  pub fn element(&self) -> RefElement {
    self.element
  }
  pub fn dim(&self) -> Dim {
    self.element.dim()
  }

  pub fn nb_functions(&self) -> usize {
    self.element.nvertices()
  }

  pub fn evaluate(&self, i: usize, x: RefPoint) -> f64 {
    self.check_index(i);
    match (self.element, i) {
      (RefElement::Segment, 0) => 1.0 - x.x,
      (RefElement::Triangle, 0) => 1.0 - x.x - x.y,
      (_, 1) => x.x,
      (_, _) => x.y,
    }
  }

  /// Reference gradient of basis function `i`.
  ///
  /// The functions are affine, so this doesn't depend on `_x`.
  /// For the segment the second component is zero.
  pub fn evaluate_grad(&self, i: usize, _x: RefPoint) -> na::Vector2<f64> {
    self.check_index(i);
    let [gx, gy] = match self.element {
      RefElement::Segment => SEGMENT_GRADS[i],
      RefElement::Triangle => TRIANGLE_GRADS[i],
    };
    na::Vector2::new(gx, gy)
  }

  fn check_index(&self, i: usize) {
    assert!(
      i < self.nb_functions(),
      "shape function {i} out of range for the reference {}",
      self.element
    );
  }
}
