use crate::Dim;

use std::fmt;

/// The canonical reference elements of a 2D P1 discretization.
///
/// The unit segment $[0,1]$ carries boundary edges,
/// the unit triangle $conv{(0,0),(1,0),(0,1)}$ carries cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefElement {
  Segment,
  Triangle,
}

impl RefElement {
  pub fn from_dim(dim: Dim) -> Option<Self> {
    match dim {
      1 => Some(Self::Segment),
      2 => Some(Self::Triangle),
      _ => None,
    }
  }

  pub fn dim(self) -> Dim {
    match self {
      Self::Segment => 1,
      Self::Triangle => 2,
    }
  }

  pub fn nvertices(self) -> usize {
    self.dim() + 1
  }

  /// The measure (length or area) of the reference element.
  pub fn vol(self) -> f64 {
    ref_vol(self.dim())
  }
}

impl fmt::Display for RefElement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Segment => write!(f, "segment"),
      Self::Triangle => write!(f, "triangle"),
    }
  }
}

pub fn ref_vol(dim: Dim) -> f64 {
  ((1..=dim).product::<usize>() as f64).recip()
}
