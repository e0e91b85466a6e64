//! Scatter of elementary contributions into the global Galerkin system.

use crate::{
  error::FemResult,
  fe::{ElmatProvider, ElvecProvider},
  mapping::ElementMapping,
  mesh::{ElementKind, Mesh},
  sparse::SparseMatrix,
};

use rayon::prelude::*;

pub type GalMat = SparseMatrix;
pub type GalVec = na::DVector<f64>;

/// Adds the element matrix of triangle `t` onto the global matrix.
///
/// Local row/column `i` corresponds to the `i`-th vertex of the triangle.
pub fn local_to_global_matrix<M: Mesh + ?Sized>(
  mesh: &M,
  t: usize,
  elmat: &na::DMatrix<f64>,
  galmat: &mut GalMat,
) {
  let nlocal = ElementKind::Triangle.nvertices();
  assert_eq!(elmat.shape(), (nlocal, nlocal), "triangle element matrix must be 3x3");
  for ilocal in 0..nlocal {
    let iglobal = mesh.get_triangle_vertex_index(t, ilocal);
    for jlocal in 0..nlocal {
      let jglobal = mesh.get_triangle_vertex_index(t, jlocal);
      galmat.add(iglobal, jglobal, elmat[(ilocal, jlocal)]);
    }
  }
}

/// Adds the element vector of element `i` onto the global vector.
///
/// The element is a triangle or a boundary edge, depending on `kind`.
pub fn local_to_global_vector<M: Mesh + ?Sized>(
  mesh: &M,
  kind: ElementKind,
  i: usize,
  elvec: &na::DVector<f64>,
  galvec: &mut GalVec,
) {
  assert_eq!(elvec.len(), kind.nvertices(), "element vector size mismatch");
  for (ilocal, &v) in elvec.iter().enumerate() {
    let iglobal = mesh.element_vertex_index(kind, i, ilocal);
    assert!(iglobal < galvec.len(), "dof {iglobal} out of range");
    galvec[iglobal] += v;
  }
}

/// Assembly algorithm for the Galerkin Matrix.
///
/// With `parallel` the element matrices are computed on the rayon pool,
/// the scatter itself always runs sequentially.
pub fn assemble_galmat<M, E>(mesh: &M, elmat: E, parallel: bool) -> FemResult<GalMat>
where
  M: Mesh + Sync + ?Sized,
  E: ElmatProvider + Sync,
{
  let ntriangles = mesh.nb_triangles();
  let compute = |t: usize| {
    let mapping = ElementMapping::triangle(mesh, t);
    tracing::trace!("element matrix of triangle {t}, volume {}", mapping.vol());
    ElmatProvider::eval(&elmat, &mapping)
      .inspect_err(|err| tracing::error!("element matrix of triangle {t}: {err}"))
  };

  let elmats: Vec<_> = if parallel {
    (0..ntriangles)
      .into_par_iter()
      .map(compute)
      .collect::<FemResult<Vec<_>>>()?
  } else {
    (0..ntriangles).map(compute).collect::<FemResult<Vec<_>>>()?
  };

  let nvertices = mesh.nb_vertices();
  let mut galmat = GalMat::square(nvertices);
  for (t, elmat) in elmats.iter().enumerate() {
    local_to_global_matrix(mesh, t, elmat, &mut galmat);
  }
  tracing::debug!(
    "assembled galmat of {ntriangles} triangles: {nvertices} dofs, {} triplets",
    galmat.ntriplets()
  );
  Ok(galmat)
}

/// Assembly algorithm for the Galerkin Vector.
///
/// Loops over the triangles or the boundary edges, as chosen by the provider.
pub fn assemble_galvec<M, E>(mesh: &M, elvec: E, parallel: bool) -> FemResult<GalVec>
where
  M: Mesh + Sync + ?Sized,
  E: ElvecProvider + Sync,
{
  let kind = ElvecProvider::kind(&elvec);
  let nelements = mesh.nb_elements(kind);
  let compute = |i: usize| {
    let mapping = ElementMapping::new(mesh, kind, i);
    tracing::trace!("element vector of {kind:?} {i}");
    ElvecProvider::eval(&elvec, &mapping)
      .inspect_err(|err| tracing::error!("element vector of {kind:?} {i}: {err}"))
  };

  let elvecs: Vec<_> = if parallel {
    (0..nelements)
      .into_par_iter()
      .map(compute)
      .collect::<FemResult<Vec<_>>>()?
  } else {
    (0..nelements).map(compute).collect::<FemResult<Vec<_>>>()?
  };

  let mut galvec = GalVec::zeros(mesh.nb_vertices());
  for (i, elvec) in elvecs.iter().enumerate() {
    local_to_global_vector(mesh, kind, i, elvec, &mut galvec);
  }
  tracing::debug!("assembled galvec of {nelements} {kind:?} elements");
  Ok(galvec)
}
