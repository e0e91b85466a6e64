extern crate nalgebra as na;

use p1fem::{
  fe::assemble_elementary_matrix, mapping::ElementMapping, quadrature::get_quadrature,
  shape::ShapeFunctions, RefPoint, Vertex,
};

use approx::assert_abs_diff_eq;

fn ref_triangle() -> ElementMapping {
  ElementMapping::Triangle([
    Vertex::new(0.0, 0.0),
    Vertex::new(1.0, 0.0),
    Vertex::new(0.0, 1.0),
  ])
}

/// Analytic P1 stiffness matrix of the reference triangle.
#[rustfmt::skip]
fn ref_elmat() -> na::DMatrix<f64> {
  na::DMatrix::from_row_slice(3, 3, &[
     1.0, -0.5, -0.5,
    -0.5,  0.5,  0.0,
    -0.5,  0.0,  0.5,
  ])
}

#[test]
fn elmat_reftriangle() {
  let map = ref_triangle();
  for x in [RefPoint::new(0.1, 0.1), RefPoint::new(0.5, 0.25), RefPoint::new(0.0, 1.0)] {
    assert_eq!(map.jacobian(x), 1.0);
  }

  let shape = ShapeFunctions::new(2, 1).unwrap();
  for order in [0, 2, 4, 6] {
    let quad = get_quadrature(order, false).unwrap();
    let computed = assemble_elementary_matrix(&map, &shape, &quad, |_| 1.0).unwrap();
    let expected = ref_elmat();
    let diff = &computed - &expected;
    println!("Computed:\n{computed:.3}");
    println!("Difference:\n{diff:.3}");
    assert!(diff.norm() < 1e-12, "wrong reference elmat for order {order}");
  }
}

/// Translating, rotating and uniformly scaling a triangle leaves
/// the 2D stiffness matrix unchanged.
#[test]
fn elmat_similarity_invariant() {
  let (s, c) = 0.7f64.sin_cos();
  let scale = 3.5;
  let similar = |v: Vertex| {
    Vertex::new(
      scale * (c * v.x - s * v.y) + 2.0,
      scale * (s * v.x + c * v.y) - 1.0,
    )
  };
  let ElementMapping::Triangle(verts) = ref_triangle() else {
    unreachable!()
  };
  let map = ElementMapping::Triangle(verts.map(similar));

  let shape = ShapeFunctions::new(2, 1).unwrap();
  let quad = get_quadrature(2, false).unwrap();
  let computed = assemble_elementary_matrix(&map, &shape, &quad, |_| 1.0).unwrap();
  assert_abs_diff_eq!(computed, ref_elmat(), epsilon = 1e-12);
}

/// A linear coefficient is integrated exactly from order 2 on.
#[test]
fn elmat_linear_coefficient() {
  let map = ref_triangle();
  let shape = ShapeFunctions::new(2, 1).unwrap();
  let coeff = |x: Vertex| 1.0 + 3.0 * x.x + x.y;
  // The gradients are constant, so the matrix is the reference one
  // scaled by the mean value of the coefficient, 1 + 3/3 + 1/3.
  let expected = ref_elmat() * (1.0 + 1.0 + 1.0 / 3.0);
  for order in [2, 4, 6] {
    let quad = get_quadrature(order, false).unwrap();
    let computed = assemble_elementary_matrix(&map, &shape, &quad, coeff).unwrap();
    assert_abs_diff_eq!(computed, expected, epsilon = 1e-12);
  }
}
