use std::fmt;

use crate::Shape;


/// Error structure for collections size mismatch

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMismatch {
  pub expected: usize,
  pub got: usize,
}

impl fmt::Display for SizeMismatch {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "expected {} values, but got {}", self.expected, self.got)
  }
}


/// Violated shape precondition of a matrix operation.
///
/// These are never recoverable: the operation refuses to run instead of
/// truncating, padding or broadcasting its operands.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
  /// A row whose length differs from the first row.
  Ragged { row: usize, mismatch: SizeMismatch },
  /// Flat data that doesn't fill the requested shape.
  Length { shape: Shape, mismatch: SizeMismatch },
  /// Element-wise operation on differently shaped operands.
  Mismatch { op: &'static str, lhs: Shape, rhs: Shape },
  /// Matrix product with disagreeing inner dimensions.
  Inner { lhs: Shape, rhs: Shape },
  /// Features and targets with differing numbers of examples.
  Rows { x: usize, y: usize },
  /// An operation that needs at least one element got none.
  Empty,
}

impl fmt::Display for ShapeError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ShapeError::Ragged { row, mismatch } => write!(f,
        "Row {} is ragged: {}", row, mismatch),
      ShapeError::Length { shape, mismatch } => write!(f,
        "Data doesn't fit {} matrix: {}", shape, mismatch),
      ShapeError::Mismatch { op, lhs, rhs } => write!(f,
        "Cannot {} {} & {} matrices", op, lhs, rhs),
      ShapeError::Inner { lhs, rhs } => write!(f,
        "Cannot multiply {} & {} matrices: inner dimensions differ", lhs, rhs),
      ShapeError::Rows { x, y } => write!(f,
        "Got {} feature rows, but {} target rows", x, y),
      ShapeError::Empty => write!(f, "Operation needs at least one element"),
    }
  }
}

impl std::error::Error for ShapeError {}


/// Failure while turning tabular input into matrices.

#[derive(Debug)]
pub enum DataError {
  Io(std::io::Error),
  Csv(csv::Error),
  /// Field that isn't a number. Lines are counted from 1, including any header.
  Parse { line: u64, column: usize, value: String },
  /// Field that parsed to `NaN` or an infinity.
  NonFinite { line: u64, column: usize },
  /// Value that cannot be one-hot encoded: not a whole number
  /// between 1 and [MAX_CATEGORIES](crate::data::MAX_CATEGORIES).
  Category { row: usize, value: f64 },
  /// Column index beyond the table's width.
  Column { column: usize, width: usize },
  /// Split fraction outside of `[0, 1]`.
  Fraction(f64),
  Empty,
  Shape(ShapeError),
}

impl fmt::Display for DataError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DataError::Io(err) => write!(f, "I/O error: {}", err),
      DataError::Csv(err) => write!(f, "CSV error: {}", err),
      DataError::Parse { line, column, value } => write!(f,
        "Line {}, column {}: {:?} is not a number", line, column, value),
      DataError::NonFinite { line, column } => write!(f,
        "Line {}, column {}: value is not finite", line, column),
      DataError::Category { row, value } => write!(f,
        "Row {}: {} is not a category between 1 and {}", row, value, crate::data::MAX_CATEGORIES),
      DataError::Column { column, width } => write!(f,
        "Column {} doesn't exist in a table of width {}", column, width),
      DataError::Fraction(fraction) => write!(f,
        "Split fraction {} is outside of [0, 1]", fraction),
      DataError::Empty => write!(f, "Input contains no records"),
      DataError::Shape(err) => write!(f, "{}", err),
    }
  }
}

impl std::error::Error for DataError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      DataError::Io(err) => Some(err),
      DataError::Csv(err) => Some(err),
      DataError::Shape(err) => Some(err),
      _ => None,
    }
  }
}

impl From<std::io::Error> for DataError {
  fn from(err: std::io::Error) -> Self {
    DataError::Io(err)
  }
}

impl From<csv::Error> for DataError {
  fn from(err: csv::Error) -> Self {
    DataError::Csv(err)
  }
}

impl From<ShapeError> for DataError {
  fn from(err: ShapeError) -> Self {
    DataError::Shape(err)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display() {
    let err = ShapeError::Inner { lhs: Shape::new(3, 2), rhs: Shape::new(3, 2) };
    assert_eq!(err.to_string(), "Cannot multiply [3x2] & [3x2] matrices: inner dimensions differ");

    let err = ShapeError::Ragged { row: 1, mismatch: SizeMismatch { expected: 3, got: 2 } };
    assert_eq!(err.to_string(), "Row 1 is ragged: expected 3 values, but got 2");

    let err = DataError::Parse { line: 4, column: 2, value: "z".to_string() };
    assert_eq!(err.to_string(), "Line 4, column 2: \"z\" is not a number");
  }

  #[test]
  fn shape_errors_stay_distinct() {
    let err: DataError = ShapeError::Empty.into();
    assert!(matches!(err, DataError::Shape(ShapeError::Empty)));
  }
}
