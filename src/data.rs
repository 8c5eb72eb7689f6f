//! Turning delimited text into the matrices the trainers consume.
//!
//! Nothing in here knows about training. These helpers parse, encode,
//! standardize and split tables, and hand the results over as
//! fully materialized matrices.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{ debug, warn };

use crate::{
  internal::*,
  matrix::Matrix,
  regression::Point,
  error::{ DataError, ShapeError },
  scalar::Real,
};


/// Parses comma-separated records into a matrix, skipping the first
/// line when `has_header` is set.
///
/// Every field must be a finite number and every record must have
/// the same number of fields.

pub fn parse_table<R: Real, Rd: Read>(reader: Rd, has_header: bool) -> Result<Matrix<R>, DataError> {
  let mut rdr = ReaderBuilder::new()
    .has_headers(has_header)
    .trim(csv::Trim::All)
    .from_reader(reader);
  let mut rows = vec![];
  for result in rdr.records() {
    let record = result?;
    let line = record.position().map_or(0, |pos| pos.line() );
    let row = record.iter()
      .enumerate()
      .map(|(column, field)| parse_field(field, line, column + 1) )
      .collect::<Result<Vec<R>, _>>()?;
    rows.push(row);
  }
  if rows.is_empty() {
    return Err(DataError::Empty);
  }
  debug!(records = rows.len(), "Parsed table");
  Ok(Matrix::from_rows(&rows)?)
}

fn parse_field<R: Real>(field: &str, line: u64, column: usize) -> Result<R, DataError> {
  let value: f64 = field.parse().map_err(|_| DataError::Parse {
    line,
    column,
    value: field.to_string(),
  })?;
  if !value.is_finite() {
    return Err(DataError::NonFinite { line, column });
  }
  Ok(cast(value))
}

/// Reads a CSV file with [parse_table].

pub fn read_table<R: Real>(path: impl AsRef<Path>, has_header: bool) -> Result<Matrix<R>, DataError> {
  let file = File::open(path)?;
  parse_table(file, has_header)
}

/// Reads a headerless two column CSV file of `x,y` observations.

pub fn read_points<R: Real>(path: impl AsRef<Path>) -> Result<Vec<Point<R>>, DataError> {
  let table = read_table(path, false)?;
  table_to_points(&table)
}

pub fn table_to_points<R: Real>(table: &Matrix<R>) -> Result<Vec<Point<R>>, DataError> {
  if table.cols() < 2 {
    return Err(DataError::Column { column: 1, width: table.cols() });
  }
  Ok(table.iter_rows().map(|row| Point::new(row[0], row[1]) ).collect())
}


/// Upper bound on the number of categories [one_hot] accepts.

pub const MAX_CATEGORIES: usize = 1024;

/// Expands a column of categories `1, 2, ..., k` into `k` indicator columns.
///
/// The number of categories is the largest value present, at most
/// [MAX_CATEGORIES].

pub fn one_hot<R: Real>(values: &[R]) -> Result<Matrix<R>, DataError> {
  let mut categories = Vec::with_capacity(values.len());
  for (row, &value) in values.iter().enumerate() {
    let category = value.to_usize()
      .filter(|&c| c >= 1 && c <= MAX_CATEGORIES && value.fract() == R::zero() )
      .ok_or_else(|| DataError::Category { row, value: value.to_f64().unwrap_or(f64::NAN) })?;
    categories.push(category);
  }
  let width = categories.iter().copied().max().unwrap_or(0);
  let data = categories.iter()
    .flat_map(|&c| (1..=width).map(move |i| if i == c { R::one() } else { R::zero() }) )
    .collect();
  Ok(Matrix::new(values.len(), width, data)?)
}


/// Rescales `values` to zero mean and unit population standard deviation.
///
/// A constant column has no deviation to divide by and comes back as `NaN`.

pub fn standardize<R: Real>(values: &[R]) -> Vec<R> {
  let n = cast::<R>(values.len() as f64);
  let mean = values.iter().copied().sum::<R>() / n;
  let variance = values.iter()
    .map(|&x| (x - mean) * (x - mean) )
    .sum::<R>() / n;
  let std = variance.sqrt();
  if std == R::zero() {
    warn!(values = values.len(), "Standardizing a column without variance");
  }
  values.iter().map(|&x| (x - mean) / std ).collect()
}


/// Splits off the leading `fraction` of rows.

pub fn split_rows<R: Real>(matrix: &Matrix<R>, fraction: f64) -> Result<(Matrix<R>, Matrix<R>), DataError> {
  if !(0.0..=1.0).contains(&fraction) {
    return Err(DataError::Fraction(fraction));
  }
  let split = (matrix.rows() as f64 * fraction) as usize;
  Ok((matrix.slice_rows(0, split), matrix.slice_rows(split, matrix.rows())))
}


/// Which columns of a raw table play which role.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
  /// The column to predict.
  pub target: usize,
  /// Columns to standardize.
  pub standardize: Vec<usize>,
  /// A column of categories `1..=k` to one-hot encode.
  pub categorical: Option<usize>,
}


/// Features and targets, one row per example.

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<R: Real> {
  pub x: Matrix<R>,
  pub y: Matrix<R>,
}

impl<R: Real> Dataset<R> {
  pub fn new(x: Matrix<R>, y: Matrix<R>) -> Result<Self, ShapeError> {
    if x.rows() != y.rows() {
      return Err(ShapeError::Rows { x: x.rows(), y: y.rows() });
    }
    Ok(Self { x, y })
  }

  /// Builds features and targets from a parsed table.
  ///
  /// Features are all remaining columns in their original order,
  /// followed by the indicator columns of the categorical one.

  pub fn from_table(table: &Matrix<R>, layout: &Layout) -> Result<Self, DataError> {
    let width = table.cols();
    let used = std::iter::once(layout.target)
      .chain(layout.standardize.iter().copied())
      .chain(layout.categorical);
    for column in used {
      if column >= width {
        return Err(DataError::Column { column, width });
      }
    }

    let columns: Vec<Vec<R>> = (0..width)
      .filter(|&j| j != layout.target && Some(j) != layout.categorical )
      .map(|j| if layout.standardize.contains(&j) {
        standardize(&table.column(j))
      } else {
        table.column(j)
      })
      .collect();
    let mut x = Matrix::from_columns(&columns)?;
    if let Some(j) = layout.categorical {
      x = x.concat(&one_hot(&table.column(j))?)?;
    }
    let y = Matrix::column_vec(&table.column(layout.target));
    Ok(Self::new(x, y)?)
  }

  pub fn records(&self) -> usize {
    self.x.rows()
  }

  /// Leading `fraction` of examples for training, the rest for testing.

  pub fn split(&self, fraction: f64) -> Result<(Self, Self), DataError> {
    let (x_train, x_test) = split_rows(&self.x, fraction)?;
    let (y_train, y_test) = split_rows(&self.y, fraction)?;
    Ok((Self::new(x_train, y_train)?, Self::new(x_test, y_test)?))
  }
}
