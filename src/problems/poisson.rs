//! Module for the Poisson Equation, the prototypical ellipitic PDE.
//!
//! $-div(c grad u) = f$ in the domain, $u = g$ on the Dirichlet boundary.

use crate::{
  assemble,
  error::FemResult,
  fe::{LoadElvec, StiffnessElmat},
  lse::{self, LinearSolver, DIRICHLET_PENALTY},
  mesh::Mesh,
  Vertex,
};

/// Knobs of the Poisson pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonConfig {
  /// Exactness order of the triangle quadrature, one of 0, 2, 4, 6.
  pub quadrature_order: usize,
  /// Diagonal weight of the Dirichlet penalty.
  pub penalty: f64,
  pub solver: LinearSolver,
  /// Compute element contributions on the rayon pool.
  pub parallel: bool,
}
impl Default for PoissonConfig {
  fn default() -> Self {
    Self {
      quadrature_order: 2,
      penalty: DIRICHLET_PENALTY,
      solver: LinearSolver::default(),
      parallel: true,
    }
  }
}
impl PoissonConfig {
  pub fn with_quadrature_order(mut self, order: usize) -> Self {
    self.quadrature_order = order;
    self
  }
  pub fn with_penalty(mut self, penalty: f64) -> Self {
    self.penalty = penalty;
    self
  }
  pub fn with_solver(mut self, solver: LinearSolver) -> Self {
    self.solver = solver;
    self
  }
  pub fn with_parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }
}

/// Solves the Poisson problem and returns the nodal values of the P1 solution.
///
/// Dirichlet data `dirichlet` is imposed on every vertex of an edge
/// whose attribute is flagged in `attribute_is_dirichlet`.
/// Without any Dirichlet edge the system is singular.
pub fn solve_poisson<M, D, S, G>(
  mesh: &M,
  diffusion: D,
  source: S,
  dirichlet: G,
  attribute_is_dirichlet: &[bool],
  config: &PoissonConfig,
) -> FemResult<na::DVector<f64>>
where
  M: Mesh + Sync + ?Sized,
  D: Fn(Vertex) -> f64 + Sync,
  S: Fn(Vertex) -> f64 + Sync,
  G: Fn(Vertex) -> f64,
{
  tracing::info!(
    "solving poisson problem on {} vertices, {} triangles",
    mesh.nb_vertices(),
    mesh.nb_triangles()
  );

  let elmat = StiffnessElmat::new(config.quadrature_order, diffusion)?;
  let mut galmat = assemble::assemble_galmat(mesh, elmat, config.parallel)?;

  let elvec = LoadElvec::new(config.quadrature_order, source)?;
  let mut galvec = assemble::assemble_galvec(mesh, elvec, config.parallel)?;

  let values: Vec<_> = (0..mesh.nb_vertices())
    .map(|i| dirichlet(mesh.get_vertex(i)))
    .collect();
  lse::apply_dirichlet_boundary_conditions_with_penalty(
    mesh,
    attribute_is_dirichlet,
    &values,
    config.penalty,
    &mut galmat,
    &mut galvec,
  );

  lse::solve(&galmat, &galvec, config.solver)
}
