//! Elementary matrices and vectors, computed by quadrature on the reference element.

use crate::{
  error::{FemError, FemResult},
  mapping::ElementMapping,
  mesh::ElementKind,
  quadrature::QuadRule,
  refelem::RefElement,
  shape::ShapeFunctions,
  Vertex,
};

pub trait ElmatProvider {
  fn eval(&self, mapping: &ElementMapping) -> FemResult<na::DMatrix<f64>>;
}
impl<F> ElmatProvider for F
where
  F: Fn(&ElementMapping) -> FemResult<na::DMatrix<f64>>,
{
  fn eval(&self, mapping: &ElementMapping) -> FemResult<na::DMatrix<f64>> {
    self(mapping)
  }
}

pub trait ElvecProvider {
  fn eval(&self, mapping: &ElementMapping) -> FemResult<na::DVector<f64>>;

  /// The mesh entities the element vectors live on.
  fn kind(&self) -> ElementKind {
    ElementKind::Triangle
  }
}
impl<F> ElvecProvider for F
where
  F: Fn(&ElementMapping) -> FemResult<na::DVector<f64>>,
{
  fn eval(&self, mapping: &ElementMapping) -> FemResult<na::DVector<f64>> {
    self(mapping)
  }
}

fn check_compatible(
  mapping: &ElementMapping,
  shape: &ShapeFunctions,
  quadrature: &QuadRule,
) -> FemResult<()> {
  let element = mapping.element();
  if shape.element() != element || quadrature.element() != element {
    return Err(FemError::IncompatibleElements(format!(
      "{element} mapping, {} shape functions, {} quadrature",
      shape.element(),
      quadrature.element()
    )));
  }
  Ok(())
}

/// Element matrix of the diffusion bilinear form
/// $a(u, v) = integral_K c(x) grad u dot grad v$.
///
/// The reference gradients are pulled back by $J^(-T)$.
/// Only defined on triangles and fails for a singular jacobian.
pub fn assemble_elementary_matrix<F>(
  mapping: &ElementMapping,
  shape: &ShapeFunctions,
  quadrature: &QuadRule,
  coefficient: F,
) -> FemResult<na::DMatrix<f64>>
where
  F: Fn(Vertex) -> f64,
{
  check_compatible(mapping, shape, quadrature)?;
  let jacobian = mapping.jacobian_matrix_2x2().ok_or_else(|| {
    FemError::IncompatibleElements("stiffness matrices need a triangle mapping".into())
  })?;
  // relative to the edge lengths, collinear vertices rarely give an exact zero
  let det = jacobian.determinant();
  let scale = jacobian.column(0).norm() * jacobian.column(1).norm();
  if det.abs() <= f64::EPSILON * scale {
    return Err(FemError::DegenerateElement { det });
  }
  if det < 0.0 {
    tracing::warn!("negatively oriented triangle {:?}", mapping.vertices());
  }
  let inv_jacobian_t = jacobian
    .try_inverse()
    .ok_or(FemError::DegenerateElement { det })?
    .transpose();

  let ndofs = shape.nb_functions();
  let mut elmat = na::DMatrix::zeros(ndofs, ndofs);
  for (w, p) in quadrature.iter() {
    let grads: Vec<_> = (0..ndofs)
      .map(|i| inv_jacobian_t * shape.evaluate_grad(i, p))
      .collect();
    let factor = w * coefficient(mapping.transform(p)) * mapping.jacobian(p).abs();
    for i in 0..ndofs {
      for j in 0..ndofs {
        elmat[(i, j)] += factor * grads[i].dot(&grads[j]);
      }
    }
  }
  Ok(elmat)
}

/// Element vector of the load functional $l(v) = integral_K f(x) v$.
///
/// Works on triangles and on boundary edges alike,
/// the latter giving boundary loads.
pub fn assemble_elementary_vector<F>(
  mapping: &ElementMapping,
  shape: &ShapeFunctions,
  quadrature: &QuadRule,
  source: F,
) -> FemResult<na::DVector<f64>>
where
  F: Fn(Vertex) -> f64,
{
  check_compatible(mapping, shape, quadrature)?;

  let ndofs = shape.nb_functions();
  let mut elvec = na::DVector::zeros(ndofs);
  for (w, p) in quadrature.iter() {
    let factor = w * source(mapping.transform(p)) * mapping.jacobian(p).abs();
    for i in 0..ndofs {
      elvec[i] += factor * shape.evaluate(i, p);
    }
  }
  Ok(elvec)
}

/// Element Matrix Provider for the diffusion operator $-div(c grad u)$.
pub struct StiffnessElmat<C> {
  quadrature: QuadRule,
  coefficient: C,
}
impl<C> StiffnessElmat<C>
where
  C: Fn(Vertex) -> f64,
{
  pub fn new(quad_order: usize, coefficient: C) -> FemResult<Self> {
    let quadrature = QuadRule::new(RefElement::Triangle, quad_order)?;
    Ok(Self {
      quadrature,
      coefficient,
    })
  }
}
impl<C> ElmatProvider for StiffnessElmat<C>
where
  C: Fn(Vertex) -> f64,
{
  fn eval(&self, mapping: &ElementMapping) -> FemResult<na::DMatrix<f64>> {
    let shape = ShapeFunctions::on(RefElement::Triangle);
    assemble_elementary_matrix(mapping, &shape, &self.quadrature, &self.coefficient)
  }
}

/// Element Vector Provider for a scalar source function,
/// either on the triangles or on the boundary edges.
pub struct LoadElvec<S> {
  kind: ElementKind,
  quadrature: QuadRule,
  source: S,
}
impl<S> LoadElvec<S>
where
  S: Fn(Vertex) -> f64,
{
  pub fn new(quad_order: usize, source: S) -> FemResult<Self> {
    Self::on(ElementKind::Triangle, quad_order, source)
  }

  /// Load on the boundary edges of the mesh.
  pub fn boundary(quad_order: usize, source: S) -> FemResult<Self> {
    Self::on(ElementKind::Edge, quad_order, source)
  }

  fn on(kind: ElementKind, quad_order: usize, source: S) -> FemResult<Self> {
    let quadrature = QuadRule::new(kind.ref_element(), quad_order)?;
    Ok(Self {
      kind,
      quadrature,
      source,
    })
  }
}
impl<S> ElvecProvider for LoadElvec<S>
where
  S: Fn(Vertex) -> f64,
{
  fn eval(&self, mapping: &ElementMapping) -> FemResult<na::DVector<f64>> {
    let shape = ShapeFunctions::on(self.kind.ref_element());
    assemble_elementary_vector(mapping, &shape, &self.quadrature, &self.source)
  }

  fn kind(&self) -> ElementKind {
    self.kind
  }
}
