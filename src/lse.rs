//! Enforcement of Dirichlet data on the assembled system and its solution.

use crate::{
  assemble::{GalMat, GalVec},
  error::{FemError, FemResult},
  mesh::Mesh,
  VertexIdx,
};

use faer::solvers::SpSolver;

/// Diagonal weight added for every Dirichlet dof.
pub const DIRICHLET_PENALTY: f64 = 10000.0;

/// The vertices lying on an edge whose attribute is flagged Dirichlet.
///
/// Every vertex is listed once, in order of first appearance.
/// Attributes beyond the end of `attribute_is_dirichlet` count as not Dirichlet.
pub fn dirichlet_vertices<M: Mesh + ?Sized>(
  mesh: &M,
  attribute_is_dirichlet: &[bool],
) -> Vec<VertexIdx> {
  let mut processed = vec![false; mesh.nb_vertices()];
  let mut vertices = Vec::new();
  for e in 0..mesh.nb_edges() {
    let attribute = mesh.get_edge_attribute(e);
    let Some(&is_dirichlet) = attribute_is_dirichlet.get(attribute) else {
      tracing::warn!("edge {e} has attribute {attribute} without a dirichlet flag");
      continue;
    };
    if !is_dirichlet {
      continue;
    }
    for local in 0..2 {
      let ivertex = mesh.get_edge_vertex_index(e, local);
      if !processed[ivertex] {
        processed[ivertex] = true;
        vertices.push(ivertex);
      }
    }
  }
  vertices
}

/// Imposes `values` on the Dirichlet vertices by the penalty method,
/// with the default [`DIRICHLET_PENALTY`].
///
/// `values` holds one prescribed value per vertex; only the Dirichlet ones are read.
pub fn apply_dirichlet_boundary_conditions<M: Mesh + ?Sized>(
  mesh: &M,
  attribute_is_dirichlet: &[bool],
  values: &[f64],
  galmat: &mut GalMat,
  galvec: &mut GalVec,
) {
  apply_dirichlet_boundary_conditions_with_penalty(
    mesh,
    attribute_is_dirichlet,
    values,
    DIRICHLET_PENALTY,
    galmat,
    galvec,
  )
}

/// Penalty method: $A_(i i) += p$ and $phi_i += p g_i$ for every Dirichlet vertex $i$.
///
/// A vertex shared by several Dirichlet edges is penalised once.
/// The system size is left unchanged.
pub fn apply_dirichlet_boundary_conditions_with_penalty<M: Mesh + ?Sized>(
  mesh: &M,
  attribute_is_dirichlet: &[bool],
  values: &[f64],
  penalty: f64,
  galmat: &mut GalMat,
  galvec: &mut GalVec,
) {
  assert_eq!(values.len(), mesh.nb_vertices(), "one value per vertex");
  assert!(penalty > 0.0);

  let vertices = dirichlet_vertices(mesh, attribute_is_dirichlet);
  for &ivertex in &vertices {
    galmat.add(ivertex, ivertex, penalty);
    galvec[ivertex] += penalty * values[ivertex];
  }
  tracing::debug!(
    "penalised {} dirichlet vertices with p={penalty}",
    vertices.len()
  );
}

/// Sparse direct solvers for the Galerkin system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinearSolver {
  /// Needs a symmetric positive definite matrix.
  #[default]
  Cholesky,
  Lu,
}

pub fn solve(galmat: &GalMat, galvec: &GalVec, solver: LinearSolver) -> FemResult<GalVec> {
  assert_eq!(galmat.nrows(), galvec.len());
  let galmat = galmat.to_nalgebra_csc();
  tracing::debug!("solving {0}x{0} system with {solver:?}", galmat.nrows());
  match solver {
    LinearSolver::Cholesky => Ok(FaerCholesky::new(galmat)?.solve(galvec)),
    LinearSolver::Lu => Ok(FaerLu::new(galmat)?.solve(galvec)),
  }
}

type SparseMatrixFaer = faer::sparse::SparseColMat<usize, f64>;

pub fn nalgebra2faer(m: nas::CscMatrix<f64>) -> SparseMatrixFaer {
  let nrows = m.nrows();
  let ncols = m.ncols();
  let (col_ptrs, row_indices, values) = m.disassemble();

  let symbolic =
    faer::sparse::SymbolicSparseColMat::new_checked(nrows, ncols, col_ptrs, None, row_indices);
  faer::sparse::SparseColMat::new(symbolic, values)
}

pub struct FaerLu {
  raw: faer::sparse::linalg::solvers::Lu<usize, f64>,
}
impl FaerLu {
  pub fn new(a: nas::CscMatrix<f64>) -> FemResult<Self> {
    let raw = nalgebra2faer(a)
      .sp_lu()
      .map_err(|err| FemError::SolverFailure(format!("{err:?}")))?;
    Ok(Self { raw })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> na::DVector<f64> {
    let b = faer::col::from_slice(b.as_slice());
    na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec())
  }
}

pub struct FaerCholesky {
  raw: faer::sparse::linalg::solvers::Cholesky<usize, f64>,
}
impl FaerCholesky {
  pub fn new(a: nas::CscMatrix<f64>) -> FemResult<Self> {
    let raw = nalgebra2faer(a)
      .sp_cholesky(faer::Side::Upper)
      .map_err(|err| FemError::SolverFailure(format!("{err:?}")))?;
    Ok(Self { raw })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> na::DVector<f64> {
    let b = faer::col::from_slice(b.as_slice());
    na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec())
  }
}
