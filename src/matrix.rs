use itertools::Itertools;

mod cops;
mod lops;

use crate::{
  shape::Shape,
  scalar::{ Inner, Real },
  error::{ ShapeError, SizeMismatch },
  ops::Hops,
};


/// Dense two-dimensional array, stored row-major.
///
/// Matrices may contain any type that satisfies [Inner], but
/// arithmetic is only available for [Real] inner types.
///
/// Every constructor checks that the data forms a proper rectangle,
/// so a `Matrix` never holds ragged rows. Operations return fresh
/// matrices and leave their operands untouched. The only exceptions
/// are [fill](Matrix::fill) and [assign](Matrix::assign).

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Inner> {
  shape: Shape,
  data: Vec<T>,
}

impl<T: Real> Hops<T> for Matrix<T> {}

impl<T: Inner> Matrix<T> {
  pub(crate) fn from_shape(shape: Shape, data: Vec<T>) -> Self {
    debug_assert_eq!(shape.size(), data.len(),
      "{} doesn't match data length {}", shape, data.len());
    Self { shape, data }
  }

  /// Builds a `rows × cols` matrix from row-major `data`.

  pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ShapeError> {
    let shape = Shape::new(rows, cols);
    if shape.size() != data.len() {
      return Err(ShapeError::Length {
        shape,
        mismatch: SizeMismatch { expected: rows * cols, got: data.len() },
      });
    }
    Ok(Self::from_shape(shape, data))
  }

  /// Builds a matrix from a slice of rows, which must all have the same length.

  pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, ShapeError> {
    let cols = rows.first().map(|row| row.len() ).unwrap_or(0);
    for (i, row) in rows.iter().enumerate() {
      if row.len() != cols {
        return Err(ShapeError::Ragged {
          row: i,
          mismatch: SizeMismatch { expected: cols, got: row.len() },
        });
      }
    }
    Ok(Self::from_shape(Shape::new(rows.len(), cols), rows.concat()))
  }

  /// Builds a matrix from a slice of columns, which must all have the same length.

  pub fn from_columns(columns: &[Vec<T>]) -> Result<Self, ShapeError> {
    let rows = columns.first().map(|column| column.len() ).unwrap_or(0);
    for (j, column) in columns.iter().enumerate() {
      if column.len() != rows {
        return Err(ShapeError::Ragged {
          row: j,
          mismatch: SizeMismatch { expected: rows, got: column.len() },
        });
      }
    }
    let data = (0..rows)
      .flat_map(|i| columns.iter().map(move |column| column[i] ) )
      .collect();
    Ok(Self::from_shape(Shape::new(rows, columns.len()), data))
  }

  /// Single column matrix.

  pub fn column_vec(values: &[T]) -> Self {
    Self::from_shape(Shape::new(values.len(), 1), values.to_vec())
  }

  pub fn raw(&self) -> &[T] {
    &self.data
  }

  pub fn into_raw(self) -> Vec<T> {
    self.data
  }

  pub fn rows(&self) -> usize {
    self.shape.rows
  }

  pub fn cols(&self) -> usize {
    self.shape.cols
  }

  pub fn size(&self) -> usize {
    self.shape.size()
  }

  pub fn is_empty(&self) -> bool {
    self.shape.is_empty()
  }

  pub fn get(&self, row: usize, col: usize) -> Option<T> {
    if row < self.rows() && col < self.cols() {
      Some(self.data[self.shape.index(row, col)])
    } else {
      None
    }
  }

  pub fn row(&self, i: usize) -> &[T] {
    let cols = self.cols();
    &self.data[i * cols .. (i + 1) * cols]
  }

  pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
    (0..self.rows()).map(move |i| self.row(i) )
  }

  pub fn column(&self, j: usize) -> Vec<T> {
    self.iter_rows().map(|row| row[j] ).collect()
  }

  /// Copy of the rows in `start..end`.

  pub fn slice_rows(&self, start: usize, end: usize) -> Self {
    let end = end.min(self.rows());
    let start = start.min(end);
    let cols = self.cols();
    Self::from_shape(Shape::new(end - start, cols), self.data[start * cols .. end * cols].to_vec())
  }

  /// Places the columns of `rhs` to the right of `self`.

  pub fn concat(&self, rhs: &Self) -> Result<Self, ShapeError> {
    if self.is_empty() { return Ok(rhs.clone()) }
    if rhs.is_empty() { return Ok(self.clone()) }
    if self.rows() != rhs.rows() {
      return Err(ShapeError::Mismatch { op: "concat", lhs: self.shape, rhs: rhs.shape });
    }
    let data = self.iter_rows()
      .zip(rhs.iter_rows())
      .flat_map(|(a, b)| a.iter().chain(b.iter()).copied() )
      .collect();
    Ok(Self::from_shape(Shape::new(self.rows(), self.cols() + rhs.cols()), data))
  }

  /// Overwrites every element in place.

  pub fn fill(&mut self, value: T) {
    for item in self.data.iter_mut() {
      *item = value;
    }
  }

  /// Replaces the contents in place with those of an equally shaped matrix.

  pub fn assign(&mut self, other: &Self) -> Result<(), ShapeError> {
    self.shape.check_same(&other.shape, "assign")?;
    self.data.copy_from_slice(&other.data);
    Ok(())
  }

  pub fn zip<O,F>(&self, rhs: &Self, op: &'static str, cb: F) -> Result<Matrix<O>, ShapeError>
  where
    O: Inner,
    F: Fn((T, T)) -> O,
  {
    self.shape.check_same(&rhs.shape, op)?;
    let data = self.data.iter().copied()
      .zip(rhs.data.iter().copied())
      .map(cb)
      .collect();
    Ok(Matrix::from_shape(self.shape, data))
  }

  pub fn map<O,F>(&self, cb: F) -> Matrix<O>
  where
    O: Inner,
    F: FnMut(T) -> O,
  {
    let data = self.data.iter().copied().map(cb).collect();
    Matrix::from_shape(self.shape, data)
  }
}

impl<T: Real> Matrix<T> {
  /// Whether any element is `NaN` or infinite.

  pub fn has_non_finite(&self) -> bool {
    self.data.iter().any(|a| !a.is_finite() )
  }
}

impl<T: Inner> std::fmt::Display for Matrix<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "Matrix{} ", self.shape)?;
    if self.is_empty() { return write!(f, "[]") }
    write!(f, "[\n")?;
    for row in self.iter_rows() {
      write!(f, "  [{}]\n", row.iter().map(|a| format!("{:?}", a) ).join(", "))?;
    }
    write!(f, "]")
  }
}
