use std::fmt;

use crate::error::ShapeError;


/// The shape of a [Matrix](crate::Matrix).
///
/// A shape without rows or without columns has neither, so every
/// empty matrix shares the shape `[0x0]`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
  pub rows: usize,
  pub cols: usize,
}

impl Shape {
  pub fn new(rows: usize, cols: usize) -> Self {
    if rows == 0 || cols == 0 {
      Self { rows: 0, cols: 0 }
    } else {
      Self { rows, cols }
    }
  }

  pub fn size(&self) -> usize {
    self.rows * self.cols
  }

  pub fn is_empty(&self) -> bool {
    self.size() == 0
  }

  pub fn transpose(&self) -> Self {
    Self::new(self.cols, self.rows)
  }

  pub(crate) fn index(&self, row: usize, col: usize) -> usize {
    debug_assert!(row < self.rows && col < self.cols, "[{row},{col}] is out of bounds for {self}");
    row * self.cols + col
  }

  /// Element-wise operations require identical shapes.

  pub fn check_same(&self, other: &Self, op: &'static str) -> Result<(), ShapeError> {
    if self != other {
      return Err(ShapeError::Mismatch { op, lhs: *self, rhs: *other });
    }
    Ok(())
  }

  /// Shape of the product `self · other`, if the inner dimensions agree.

  pub fn dot(&self, other: &Self) -> Result<Self, ShapeError> {
    if self.cols != other.rows {
      return Err(ShapeError::Inner { lhs: *self, rhs: *other });
    }
    Ok(Self::new(self.rows, other.cols))
  }
}

impl fmt::Display for Shape {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "[{}x{}]", self.rows, self.cols)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty() {
    assert_eq!(Shape::new(0, 5), Shape::new(0, 0));
    assert_eq!(Shape::new(3, 0), Shape::new(0, 0));
    assert!(Shape::new(3, 0).is_empty());
    assert_eq!(Shape::new(3, 0).transpose().transpose(), Shape::new(3, 0));
  }

  #[test]
  fn transpose() {
    let shape = Shape::new(2, 3).transpose();
    assert_eq!(shape, Shape::new(3, 2));
    assert_eq!(shape.index(1, 0), 2);
    assert_eq!(shape.index(2, 1), 5);
  }

  #[test]
  fn dot() {
    assert_eq!(Shape::new(4, 3).dot(&Shape::new(3, 2)), Ok(Shape::new(4, 2)));
    assert_eq!(Shape::new(4, 3).dot(&Shape::new(2, 3)), Err(ShapeError::Inner {
      lhs: Shape::new(4, 3),
      rhs: Shape::new(2, 3),
    }));
  }

  #[test]
  fn check_same() {
    assert!(Shape::new(2, 2).check_same(&Shape::new(2, 2), "add").is_ok());
    assert!(Shape::new(2, 2).check_same(&Shape::new(2, 1), "add").is_err());
  }

  #[test]
  fn display() {
    assert_eq!(Shape::new(6, 4).to_string(), "[6x4]");
  }
}
