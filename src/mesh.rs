//! The mesh interface consumed by the assembly pipeline,
//! together with a simple in-memory triangle mesh.
//!
//! A mesh stores vertices, boundary edges and triangles.
//! Each entity carries an integer attribute, which drivers use to
//! tag e.g. the parts of the boundary carrying Dirichlet data.

use crate::{
  error::{FemError, FemResult},
  refelem::RefElement,
  Attribute, Vertex, VertexIdx,
};

use itertools::Itertools;

/// The two kinds of mesh entities an element can live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
  /// A boundary edge, mapped from the reference segment.
  Edge,
  /// A cell, mapped from the reference triangle.
  Triangle,
}
impl ElementKind {
  pub fn ref_element(self) -> RefElement {
    match self {
      Self::Edge => RefElement::Segment,
      Self::Triangle => RefElement::Triangle,
    }
  }
  pub fn nvertices(self) -> usize {
    self.ref_element().nvertices()
  }
}

pub trait Mesh {
  fn nb_vertices(&self) -> usize;
  fn nb_triangles(&self) -> usize;
  fn nb_edges(&self) -> usize;

  fn get_vertex(&self, i: VertexIdx) -> Vertex;
  fn get_vertex_attribute(&self, i: VertexIdx) -> Attribute;

  fn get_triangle_vertex_index(&self, t: usize, local: usize) -> VertexIdx;
  fn get_triangle_attribute(&self, t: usize) -> Attribute;

  fn get_edge_vertex_index(&self, e: usize, local: usize) -> VertexIdx;
  fn get_edge_attribute(&self, e: usize) -> Attribute;

  fn get_triangle_vertex(&self, t: usize, local: usize) -> Vertex {
    self.get_vertex(self.get_triangle_vertex_index(t, local))
  }
  fn get_edge_vertex(&self, e: usize, local: usize) -> Vertex {
    self.get_vertex(self.get_edge_vertex_index(e, local))
  }

  fn nb_elements(&self, kind: ElementKind) -> usize {
    match kind {
      ElementKind::Edge => self.nb_edges(),
      ElementKind::Triangle => self.nb_triangles(),
    }
  }

  /// Global vertex index of local vertex `local` of element `i`.
  fn element_vertex_index(&self, kind: ElementKind, i: usize, local: usize) -> VertexIdx {
    match kind {
      ElementKind::Edge => self.get_edge_vertex_index(i, local),
      ElementKind::Triangle => self.get_triangle_vertex_index(i, local),
    }
  }
}

/// Attribute given to the boundary edges and vertices of generated meshes.
pub const BOUNDARY_ATTRIBUTE: Attribute = 1;

#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
  vertices: Vec<Vertex>,
  vertex_attributes: Vec<Attribute>,
  edges: Vec<[VertexIdx; 2]>,
  edge_attributes: Vec<Attribute>,
  triangles: Vec<[VertexIdx; 3]>,
  triangle_attributes: Vec<Attribute>,
}

// constructors
impl TriangleMesh {
  pub fn new(
    vertices: Vec<(Vertex, Attribute)>,
    edges: Vec<([VertexIdx; 2], Attribute)>,
    triangles: Vec<([VertexIdx; 3], Attribute)>,
  ) -> FemResult<Self> {
    let nvertices = vertices.len();
    check_connectivity("edge", nvertices, edges.iter().map(|(e, _)| &e[..]))?;
    check_connectivity("triangle", nvertices, triangles.iter().map(|(t, _)| &t[..]))?;

    let (vertices, vertex_attributes) = vertices.into_iter().unzip();
    let (edges, edge_attributes) = edges.into_iter().unzip();
    let (triangles, triangle_attributes) = triangles.into_iter().unzip();
    Ok(Self {
      vertices,
      vertex_attributes,
      edges,
      edge_attributes,
      triangles,
      triangle_attributes,
    })
  }

  /// Structured triangulation of $[0,1]^2$ with `ncells_axis` squares per axis.
  pub fn unit_square(ncells_axis: usize) -> Self {
    Self::rectangle(Vertex::new(0.0, 0.0), Vertex::new(1.0, 1.0), ncells_axis)
  }

  /// Structured triangulation of the axis-aligned rectangle spanned by `min` and `max`.
  ///
  /// Vertices are numbered lexicographically (x fastest).
  /// Every square is split along its diagonal into two positively oriented triangles.
  /// The boundary edges and boundary vertices carry [`BOUNDARY_ATTRIBUTE`],
  /// everything else attribute 0.
  pub fn rectangle(min: Vertex, max: Vertex, ncells_axis: usize) -> Self {
    assert!(ncells_axis > 0);
    let nvertices_axis = ncells_axis + 1;
    let idx = |ix: usize, iy: usize| ix + iy * nvertices_axis;
    let side = max - min;

    let mut vertices = Vec::with_capacity(nvertices_axis.pow(2));
    let mut vertex_attributes = Vec::with_capacity(nvertices_axis.pow(2));
    for iy in 0..nvertices_axis {
      for ix in 0..nvertices_axis {
        let t = na::Vector2::new(ix as f64, iy as f64) / ncells_axis as f64;
        vertices.push(min + side.component_mul(&t));
        let on_boundary = ix == 0 || iy == 0 || ix == ncells_axis || iy == ncells_axis;
        vertex_attributes.push(if on_boundary { BOUNDARY_ATTRIBUTE } else { 0 });
      }
    }

    let mut triangles = Vec::with_capacity(2 * ncells_axis.pow(2));
    for iy in 0..ncells_axis {
      for ix in 0..ncells_axis {
        triangles.push([idx(ix, iy), idx(ix + 1, iy), idx(ix + 1, iy + 1)]);
        triangles.push([idx(ix + 1, iy + 1), idx(ix, iy + 1), idx(ix, iy)]);
      }
    }
    let triangle_attributes = vec![0; triangles.len()];

    // Counter-clockwise walk along the boundary.
    let mut edges = Vec::with_capacity(4 * ncells_axis);
    for i in 0..ncells_axis {
      edges.push([idx(i, 0), idx(i + 1, 0)]);
    }
    for i in 0..ncells_axis {
      edges.push([idx(ncells_axis, i), idx(ncells_axis, i + 1)]);
    }
    for i in (0..ncells_axis).rev() {
      edges.push([idx(i + 1, ncells_axis), idx(i, ncells_axis)]);
    }
    for i in (0..ncells_axis).rev() {
      edges.push([idx(0, i + 1), idx(0, i)]);
    }
    let edge_attributes = vec![BOUNDARY_ATTRIBUTE; edges.len()];

    Self {
      vertices,
      vertex_attributes,
      edges,
      edge_attributes,
      triangles,
      triangle_attributes,
    }
  }
}

// attribute tagging
impl TriangleMesh {
  /// Sets `attribute` on all edges whose midpoint satisfies `predicate`.
  ///
  /// Returns the number of tagged edges.
  pub fn set_edge_attribute<F>(&mut self, predicate: F, attribute: Attribute) -> usize
  where
    F: Fn(Vertex) -> bool,
  {
    let mut count = 0;
    for (edge, attr) in self.edges.iter().zip(self.edge_attributes.iter_mut()) {
      let midpoint = na::center(&self.vertices[edge[0]], &self.vertices[edge[1]]);
      if predicate(midpoint) {
        *attr = attribute;
        count += 1;
      }
    }
    tracing::debug!("tagged {count} edges with attribute {attribute}");
    count
  }

  /// Sets `attribute` on all vertices satisfying `predicate`.
  pub fn set_vertex_attribute<F>(&mut self, predicate: F, attribute: Attribute) -> usize
  where
    F: Fn(Vertex) -> bool,
  {
    let mut count = 0;
    for (v, attr) in self.vertices.iter().zip(self.vertex_attributes.iter_mut()) {
      if predicate(*v) {
        *attr = attribute;
        count += 1;
      }
    }
    tracing::debug!("tagged {count} vertices with attribute {attribute}");
    count
  }
}

impl TriangleMesh {
  /// Interpolates `f` on the vertices.
  pub fn nodal_values<F>(&self, f: F) -> Vec<f64>
  where
    F: Fn(Vertex) -> f64,
  {
    self.vertices.iter().copied().map(f).collect()
  }
}

impl Mesh for TriangleMesh {
  fn nb_vertices(&self) -> usize {
    self.vertices.len()
  }
  fn nb_triangles(&self) -> usize {
    self.triangles.len()
  }
  fn nb_edges(&self) -> usize {
    self.edges.len()
  }

  fn get_vertex(&self, i: VertexIdx) -> Vertex {
    self.vertices[i]
  }
  fn get_vertex_attribute(&self, i: VertexIdx) -> Attribute {
    self.vertex_attributes[i]
  }

  fn get_triangle_vertex_index(&self, t: usize, local: usize) -> VertexIdx {
    self.triangles[t][local]
  }
  fn get_triangle_attribute(&self, t: usize) -> Attribute {
    self.triangle_attributes[t]
  }

  fn get_edge_vertex_index(&self, e: usize, local: usize) -> VertexIdx {
    self.edges[e][local]
  }
  fn get_edge_attribute(&self, e: usize) -> Attribute {
    self.edge_attributes[e]
  }
}

fn check_connectivity<'a>(
  entity: &str,
  nvertices: usize,
  entities: impl Iterator<Item = &'a [VertexIdx]>,
) -> FemResult<()> {
  for (i, verts) in entities.enumerate() {
    if let Some(&v) = verts.iter().find(|&&v| v >= nvertices) {
      return Err(FemError::InvalidMesh(format!(
        "{entity} {i} references vertex {v}, but there are only {nvertices} vertices"
      )));
    }
    if !verts.iter().all_unique() {
      return Err(FemError::InvalidMesh(format!(
        "{entity} {i} has repeated vertices {verts:?}"
      )));
    }
  }
  Ok(())
}
