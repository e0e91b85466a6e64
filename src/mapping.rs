//! Affine maps from the reference elements onto the physical mesh elements.

use crate::{
  mesh::{ElementKind, Mesh},
  refelem::RefElement,
  shape::ShapeFunctions,
  RefPoint, Vertex,
};

/// The affine map $Phi(x) = sum_i lambda_i (x) v_i$ of one mesh element.
///
/// Captures the physical vertices at construction, everything after is a pure function
/// of the reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementMapping {
  Edge([Vertex; 2]),
  Triangle([Vertex; 3]),
}

// constructors
impl ElementMapping {
  pub fn new<M: Mesh + ?Sized>(mesh: &M, kind: ElementKind, i: usize) -> Self {
    match kind {
      ElementKind::Edge => Self::edge(mesh, i),
      ElementKind::Triangle => Self::triangle(mesh, i),
    }
  }

  pub fn triangle<M: Mesh + ?Sized>(mesh: &M, t: usize) -> Self {
    assert!(t < mesh.nb_triangles(), "triangle {t} out of range");
    Self::Triangle([0, 1, 2].map(|l| mesh.get_triangle_vertex(t, l)))
  }

  pub fn edge<M: Mesh + ?Sized>(mesh: &M, e: usize) -> Self {
    assert!(e < mesh.nb_edges(), "edge {e} out of range");
    Self::Edge([0, 1].map(|l| mesh.get_edge_vertex(e, l)))
  }
}

impl ElementMapping {
  pub fn kind(&self) -> ElementKind {
    match self {
      Self::Edge(_) => ElementKind::Edge,
      Self::Triangle(_) => ElementKind::Triangle,
    }
  }
  pub fn element(&self) -> RefElement {
    self.kind().ref_element()
  }
  pub fn vertices(&self) -> &[Vertex] {
    match self {
      Self::Edge(v) => v,
      Self::Triangle(v) => v,
    }
  }

  pub fn transform(&self, x: RefPoint) -> Vertex {
    let barys = ShapeFunctions::on(self.element());
    let coords: na::Vector2<f64> = self
      .vertices()
      .iter()
      .enumerate()
      .map(|(i, v)| barys.evaluate(i, x) * v.coords)
      .sum();
    Vertex::from(coords)
  }

  /// The spanning vectors $v_i - v_0$ of the element.
  fn tangents(&self) -> impl Iterator<Item = na::Vector2<f64>> + '_ {
    let v = self.vertices();
    v[1..].iter().map(move |vi| vi - v[0])
  }

  /// The derivative of [`Self::transform`].
  ///
  /// 2x1 for edges, 2x2 for triangles.
  /// Constant, since the map is affine.
  pub fn jacobian_matrix(&self, _x: RefPoint) -> na::DMatrix<f64> {
    let tangents: Vec<_> = self.tangents().collect();
    na::DMatrix::from_fn(2, tangents.len(), |r, c| tangents[c][r])
  }

  /// The square jacobian of a triangle map, `None` for edges.
  pub fn jacobian_matrix_2x2(&self) -> Option<na::Matrix2<f64>> {
    match self {
      Self::Edge(_) => None,
      Self::Triangle(v) => Some(na::Matrix2::from_columns(&[v[1] - v[0], v[2] - v[0]])),
    }
  }

  /// The integration measure factor of the change of variables.
  ///
  /// For triangles the signed determinant of the jacobian,
  /// negative for clockwise vertex order.
  /// For edges the length of the tangent.
  pub fn jacobian(&self, _x: RefPoint) -> f64 {
    match self {
      Self::Edge([v0, v1]) => (v1 - v0).norm(),
      Self::Triangle([v0, v1, v2]) => {
        let (e1, e2) = (v1 - v0, v2 - v0);
        e1.x * e2.y - e1.y * e2.x
      }
    }
  }

  /// Measure of the physical element.
  pub fn vol(&self) -> f64 {
    self.element().vol() * self.jacobian(RefPoint::origin()).abs()
  }
}
