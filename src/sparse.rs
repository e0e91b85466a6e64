//! Global sparse matrix in triplet form.
//!
//! Entries are only ever accumulated. Several triplets may share a position,
//! their values are summed when the matrix is read or converted.

#[derive(Default, Debug, Clone, PartialEq)]
pub struct SparseMatrix {
  nrows: usize,
  ncols: usize,
  triplets: Vec<(usize, usize, f64)>,
}

impl SparseMatrix {
  pub fn zeros(nrows: usize, ncols: usize) -> Self {
    Self::new(nrows, ncols, Vec::new())
  }
  /// Square matrix with one row and column per vertex.
  pub fn square(n: usize) -> Self {
    Self::zeros(n, n)
  }
  pub fn new(nrows: usize, ncols: usize, triplets: Vec<(usize, usize, f64)>) -> Self {
    assert!(triplets.iter().all(|&(r, c, _)| r < nrows && c < ncols));
    Self {
      nrows,
      ncols,
      triplets,
    }
  }

  pub fn nrows(&self) -> usize {
    self.nrows
  }
  pub fn ncols(&self) -> usize {
    self.ncols
  }
  pub fn ntriplets(&self) -> usize {
    self.triplets.len()
  }

  /// Accumulates `v` onto entry `(r, c)`.
  pub fn add(&mut self, r: usize, c: usize, v: f64) {
    assert!(
      r < self.nrows && c < self.ncols,
      "entry ({r},{c}) out of range for {}x{} matrix",
      self.nrows,
      self.ncols
    );
    if v != 0.0 {
      self.triplets.push((r, c, v));
    }
  }

  /// The accumulated value of entry `(r, c)`.
  pub fn get(&self, r: usize, c: usize) -> f64 {
    self
      .triplets
      .iter()
      .filter(|t| t.0 == r && t.1 == c)
      .map(|t| t.2)
      .sum()
  }

  /// Accumulates all entries of `other`.
  pub fn merge(&mut self, other: SparseMatrix) {
    assert_eq!((self.nrows, self.ncols), (other.nrows, other.ncols));
    self.triplets.extend(other.triplets);
  }

  pub fn scale(&mut self, factor: f64) {
    self.triplets.iter_mut().for_each(|t| t.2 *= factor);
  }

  pub fn to_nalgebra_coo(&self) -> nas::CooMatrix<f64> {
    let rows = self.triplets.iter().map(|t| t.0).collect();
    let cols = self.triplets.iter().map(|t| t.1).collect();
    let vals = self.triplets.iter().map(|t| t.2).collect();
    // Indices are checked on insertion.
    nas::CooMatrix::try_from_triplets(self.nrows, self.ncols, rows, cols, vals)
      .expect("triplets are in range")
  }

  pub fn to_nalgebra_csc(&self) -> nas::CscMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }

  pub fn to_nalgebra_dense(&self) -> na::DMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }
}
