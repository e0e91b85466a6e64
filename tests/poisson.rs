//! End-to-end solutions of the Poisson equation on the unit square.

extern crate nalgebra as na;

use p1fem::{
  assemble,
  fe::{LoadElvec, StiffnessElmat},
  lse::{self, LinearSolver, DIRICHLET_PENALTY},
  mesh::{Mesh, TriangleMesh, BOUNDARY_ATTRIBUTE},
  problems::poisson::{solve_poisson, PoissonConfig},
  Vertex,
};

use approx::assert_abs_diff_eq;
use std::f64::consts::PI;

fn init_tracing() {
  let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn dirichlet_flags() -> Vec<bool> {
  let mut flags = vec![false; BOUNDARY_ATTRIBUTE + 1];
  flags[BOUNDARY_ATTRIBUTE] = true;
  flags
}

fn max_nodal_error<F>(mesh: &TriangleMesh, sol: &na::DVector<f64>, exact: F) -> f64
where
  F: Fn(Vertex) -> f64,
{
  mesh
    .nodal_values(exact)
    .iter()
    .zip(sol.iter())
    .map(|(e, s)| (e - s).abs())
    .fold(0.0, f64::max)
}

/// $u = x + y$ is harmonic and affine, hence reproduced by P1 elements.
/// The penalty only perturbs it by $O(1/p)$.
#[test]
fn pure_dirichlet_affine() {
  init_tracing();
  let mesh = TriangleMesh::unit_square(8);
  let xy = |v: Vertex| v.x + v.y;

  let config = PoissonConfig::default();
  let sol = solve_poisson(&mesh, |_| 1.0, |_| 0.0, xy, &dirichlet_flags(), &config).unwrap();
  assert!(max_nodal_error(&mesh, &sol, xy) < 1e-3);

  let config = PoissonConfig::default()
    .with_penalty(1e8)
    .with_solver(LinearSolver::Lu)
    .with_parallel(false);
  let sol = solve_poisson(&mesh, |_| 2.0, |_| 0.0, xy, &dirichlet_flags(), &config).unwrap();
  assert!(max_nodal_error(&mesh, &sol, xy) < 1e-5);
}

/// The same problem, wired up step by step.
#[test]
fn pure_dirichlet_affine_pipeline() {
  init_tracing();
  let mesh = TriangleMesh::unit_square(6);
  let xy = |v: Vertex| v.x + v.y;

  let mut galmat =
    assemble::assemble_galmat(&mesh, StiffnessElmat::new(2, |_| 1.0).unwrap(), true).unwrap();
  let mut galvec =
    assemble::assemble_galvec(&mesh, LoadElvec::new(2, |_| 0.0).unwrap(), true).unwrap();

  let values = mesh.nodal_values(xy);
  let flags = dirichlet_flags();
  lse::apply_dirichlet_boundary_conditions(&mesh, &flags, &values, &mut galmat, &mut galvec);
  // every boundary vertex is shared by two dirichlet edges, but penalised once
  for i in 0..mesh.nb_vertices() {
    let diag = galmat.get(i, i);
    if mesh.get_vertex_attribute(i) == BOUNDARY_ATTRIBUTE {
      assert!(diag > DIRICHLET_PENALTY && diag < DIRICHLET_PENALTY + 4.0);
    } else {
      assert_abs_diff_eq!(diag, 4.0, epsilon = 1e-12);
    }
  }

  let sol = lse::solve(&galmat, &galvec, LinearSolver::Cholesky).unwrap();
  assert!(max_nodal_error(&mesh, &sol, xy) < 1e-3);
}

/// Dirichlet data only on the left and right sides,
/// natural (zero flux) conditions on top and bottom.
#[test]
fn mixed_boundary_linear_in_x() {
  init_tracing();
  let mut mesh = TriangleMesh::unit_square(6);
  let tagged = mesh.set_edge_attribute(|m| m.y == 0.0 || m.y == 1.0, 2);
  assert_eq!(tagged, 12);

  let config = PoissonConfig::default().with_penalty(1e8);
  let flags = [false, true, false];
  let sol = solve_poisson(&mesh, |_| 1.0, |_| 0.0, |v| 3.0 * v.x, &flags, &config).unwrap();
  assert!(max_nodal_error(&mesh, &sol, |v| 3.0 * v.x) < 1e-5);
}

/// $u = sin(pi x) sin(pi y)$ with $f = 2 pi^2 u$.
/// The nodal error decays quadratically in the mesh width.
#[test]
fn manufactured_solution_converges() {
  init_tracing();
  let exact = |v: Vertex| (PI * v.x).sin() * (PI * v.y).sin();
  let source = move |v: Vertex| 2.0 * PI * PI * exact(v);
  let config = PoissonConfig::default()
    .with_quadrature_order(4)
    .with_penalty(1e10);

  let errors: Vec<_> = [8, 16]
    .into_iter()
    .map(|n| {
      let mesh = TriangleMesh::unit_square(n);
      let flags = dirichlet_flags();
      let sol = solve_poisson(&mesh, |_| 1.0, source, |_| 0.0, &flags, &config).unwrap();
      max_nodal_error(&mesh, &sol, exact)
    })
    .collect();

  println!("errors: {errors:?}");
  assert!(errors[0] < 1e-1);
  assert!(errors[0] / errors[1] > 3.0);
}
