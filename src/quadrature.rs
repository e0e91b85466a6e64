//! Fixed quadrature rules on the reference triangle and the reference segment.
//!
//! Every rule is a static table of `(weight, point)` pairs,
//! the weights summing up to the measure of the reference element.

use crate::{
  error::{FemError, FemResult},
  refelem::RefElement,
  RefPoint,
};

type QuadTable = &'static [(f64, [f64; 2])];

const TRIANGLE_P0: QuadTable = &[(0.5, [0.333333333333333, 0.333333333333333])];

const TRIANGLE_P2: QuadTable = &[
  (0.166666666666667, [0.166666666666667, 0.166666666666667]),
  (0.166666666666667, [0.166666666666667, 0.666666666666667]),
  (0.166666666666667, [0.666666666666667, 0.166666666666667]),
];

const TRIANGLE_P4: QuadTable = &[
  (0.0549758718276609, [0.0915762135097707, 0.0915762135097707]),
  (0.0549758718276609, [0.0915762135097707, 0.816847572980459]),
  (0.0549758718276609, [0.816847572980459, 0.0915762135097707]),
  (0.111690794839006, [0.445948490915965, 0.445948490915965]),
  (0.111690794839006, [0.445948490915965, 0.10810301816807]),
  (0.111690794839006, [0.10810301816807, 0.445948490915965]),
];

const TRIANGLE_P6: QuadTable = &[
  (0.0254224531851034, [0.0630890144915022, 0.0630890144915022]),
  (0.0254224531851034, [0.0630890144915022, 0.873821971016996]),
  (0.0254224531851034, [0.873821971016996, 0.0630890144915022]),
  (0.0583931378631897, [0.24928674517091, 0.24928674517091]),
  (0.0583931378631897, [0.24928674517091, 0.501426509658179]),
  (0.0583931378631897, [0.501426509658179, 0.24928674517091]),
  (0.0414255378091868, [0.0531450498448169, 0.310352451033784]),
  (0.0414255378091868, [0.310352451033784, 0.0531450498448169]),
  (0.0414255378091868, [0.0531450498448169, 0.636502499121399]),
  (0.0414255378091868, [0.636502499121399, 0.0531450498448169]),
  (0.0414255378091868, [0.310352451033784, 0.636502499121399]),
  (0.0414255378091868, [0.636502499121399, 0.310352451033784]),
];

const SEGMENT_P0: QuadTable = &[(1.0, [0.5, 0.0])];

const SEGMENT_P2: QuadTable = &[
  (0.5, [0.21132486540518708, 0.0]),
  (0.5, [0.7886751345948129, 0.0]),
];

/// A quadrature rule defined on a reference element.
#[derive(Debug, Clone, Copy)]
pub struct QuadRule {
  element: RefElement,
  order: usize,
  table: QuadTable,
}

/// Selects the rule of the given exactness order,
/// on the reference segment if `is_boundary` and on the reference triangle otherwise.
pub fn get_quadrature(order: usize, is_boundary: bool) -> FemResult<QuadRule> {
  let element = if is_boundary {
    RefElement::Segment
  } else {
    RefElement::Triangle
  };
  QuadRule::new(element, order)
}

impl QuadRule {
  pub fn new(element: RefElement, order: usize) -> FemResult<Self> {
    let table = match (element, order) {
      (RefElement::Triangle, 0) => TRIANGLE_P0,
      (RefElement::Triangle, 2) => TRIANGLE_P2,
      (RefElement::Triangle, 4) => TRIANGLE_P4,
      (RefElement::Triangle, 6) => TRIANGLE_P6,
      (RefElement::Segment, 0) => SEGMENT_P0,
      (RefElement::Segment, 2) => SEGMENT_P2,
      _ => return Err(FemError::UnsupportedQuadrature { order, element }),
    };
    Ok(Self {
      element,
      order,
      table,
    })
  }

  pub fn element(&self) -> RefElement {
    self.element
  }
  pub fn order(&self) -> usize {
    self.order
  }
  pub fn nb_points(&self) -> usize {
    self.table.len()
  }

  pub fn point(&self, i: usize) -> RefPoint {
    assert!(i < self.nb_points(), "quadrature point {i} out of range");
    let [x, y] = self.table[i].1;
    RefPoint::new(x, y)
  }

  pub fn weight(&self, i: usize) -> f64 {
    assert!(i < self.nb_points(), "quadrature weight {i} out of range");
    self.table[i].0
  }

  /// Iterator over `(weight, point)` pairs.
  pub fn iter(&self) -> impl Iterator<Item = (f64, RefPoint)> + '_ {
    self
      .table
      .iter()
      .map(|&(w, [x, y])| (w, RefPoint::new(x, y)))
  }

  /// Approximates the integral of `f` over the reference element.
  pub fn integrate<F>(&self, f: F) -> f64
  where
    F: Fn(RefPoint) -> f64,
  {
    self.iter().map(|(w, p)| w * f(p)).sum()
  }
}
