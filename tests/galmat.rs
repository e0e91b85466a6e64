//! Verify the global Galerkin system on small meshes
//! against hand-checked matrices.

extern crate nalgebra as na;

use p1fem::{
  assemble::{self, GalMat},
  fe::{ElmatProvider, StiffnessElmat},
  mapping::ElementMapping,
  mesh::{Mesh, TriangleMesh},
  Vertex,
};

use approx::assert_abs_diff_eq;

fn unit_stiffness() -> StiffnessElmat<impl Fn(Vertex) -> f64> {
  StiffnessElmat::new(2, |_| 1.0).unwrap()
}

/// On the structured right-triangle mesh the P1 Laplacian of an interior
/// vertex is the famous 5-point stencil.
#[test]
fn interior_rows_are_five_point_stencil() {
  let n = 4;
  let mesh = TriangleMesh::unit_square(n);
  let galmat = assemble::assemble_galmat(&mesh, unit_stiffness(), true).unwrap();
  let dense = galmat.to_nalgebra_dense();

  let nvertices_axis = n + 1;
  let idx = |ix: usize, iy: usize| ix + iy * nvertices_axis;
  for iy in 1..n {
    for ix in 1..n {
      let i = idx(ix, iy);
      let mut expected = na::DVector::zeros(mesh.nb_vertices());
      expected[i] = 4.0;
      for j in [idx(ix - 1, iy), idx(ix + 1, iy), idx(ix, iy - 1), idx(ix, iy + 1)] {
        expected[j] = -1.0;
      }
      assert_abs_diff_eq!(dense.row(i).transpose(), expected, epsilon = 1e-12);
    }
  }
}

/// One square split into two triangles along the diagonal from vertex 0 to vertex 3.
#[rustfmt::skip]
#[test]
fn one_square_galmat() {
  let mesh = TriangleMesh::unit_square(1);
  let galmat = assemble::assemble_galmat(&mesh, unit_stiffness(), false).unwrap();
  let expected = na::DMatrix::from_row_slice(4, 4, &[
     1.0, -0.5, -0.5,  0.0,
    -0.5,  1.0,  0.0, -0.5,
    -0.5,  0.0,  1.0, -0.5,
     0.0, -0.5, -0.5,  1.0,
  ]);
  assert_abs_diff_eq!(galmat.to_nalgebra_dense(), expected, epsilon = 1e-12);
}

#[test]
fn assembling_twice_doubles() {
  let mesh = TriangleMesh::new(
    vec![
      (Vertex::new(0.0, 0.0), 0),
      (Vertex::new(2.0, 0.5), 0),
      (Vertex::new(0.5, 1.5), 0),
    ],
    vec![],
    vec![([0, 1, 2], 0)],
  )
  .unwrap();

  let once = assemble::assemble_galmat(&mesh, unit_stiffness(), false).unwrap();
  let mut twice = once.clone();
  twice.merge(assemble::assemble_galmat(&mesh, unit_stiffness(), false).unwrap());

  let mut doubled = once.clone();
  doubled.scale(2.0);
  assert_abs_diff_eq!(
    twice.to_nalgebra_dense(),
    doubled.to_nalgebra_dense(),
    epsilon = 1e-14
  );

  let elmat = ElmatProvider::eval(&unit_stiffness(), &ElementMapping::triangle(&mesh, 0)).unwrap();
  let mut scattered = GalMat::square(3);
  assemble::local_to_global_matrix(&mesh, 0, &elmat, &mut scattered);
  assemble::local_to_global_matrix(&mesh, 0, &elmat, &mut scattered);
  assert_abs_diff_eq!(
    scattered.to_nalgebra_dense(),
    doubled.to_nalgebra_dense(),
    epsilon = 1e-14
  );
}

/// Element order does not matter for the accumulated matrix.
#[test]
fn scatter_order_independent() {
  let mesh = TriangleMesh::unit_square(3);
  let elmats: Vec<_> = (0..mesh.nb_triangles())
    .map(|t| ElmatProvider::eval(&unit_stiffness(), &ElementMapping::triangle(&mesh, t)).unwrap())
    .collect();

  let mut forward = GalMat::square(mesh.nb_vertices());
  for (t, elmat) in elmats.iter().enumerate() {
    assemble::local_to_global_matrix(&mesh, t, elmat, &mut forward);
  }
  let mut backward = GalMat::square(mesh.nb_vertices());
  for (t, elmat) in elmats.iter().enumerate().rev() {
    assemble::local_to_global_matrix(&mesh, t, elmat, &mut backward);
  }
  assert_abs_diff_eq!(
    forward.to_nalgebra_dense(),
    backward.to_nalgebra_dense(),
    epsilon = 1e-13
  );
}
