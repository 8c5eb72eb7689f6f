use crate::Shape;
use crate::error::ShapeError;
use crate::scalar::{ Inner, Real };


/// Logistic function `1 / (1 + e^-x)`.

pub fn sigmoid<I: Real>(x: I) -> I {
  I::one() / (I::one() + (-x).exp())
}

/// Derivative of [sigmoid], evaluated at the pre-activation `x`.

pub fn sigmoid_prime<I: Real>(x: I) -> I {
  let s = sigmoid(x);
  s * (I::one() - s)
}


/// Low-level compute operations.

pub trait Cops<I: Real> {
  fn matmul(&self, rhs: &Self) -> Vec<I>;
}


/// Structural operations that are also implemented
/// for non-numeric [Inner] types.

pub trait BaseOps<I: Inner>: Sized {
  fn filled(rows: usize, cols: usize, value: I) -> Self;
  fn shape(&self) -> Shape;
  fn transpose(&self) -> Self;
}


/// Element-wise arithmetic, products and reductions.
///
/// Binary operations never broadcast. Operands of the wrong shape
/// yield a [ShapeError].

pub trait NumericOps<I: Real>: Sized {
  fn add(&self, rhs: &Self) -> Result<Self, ShapeError>;
  fn sub(&self, rhs: &Self) -> Result<Self, ShapeError>;
  fn mul(&self, rhs: &Self) -> Result<Self, ShapeError>;
  fn scale(&self, k: I) -> Self;
  fn dot(&self, rhs: &Self) -> Result<Self, ShapeError>;
  fn sum(&self) -> I;
  /// Collapse every row into its sum, giving a column.
  fn sum_rows(&self) -> Self;
  /// Collapse every column into its sum, giving a row.
  fn sum_cols(&self) -> Self;
}


/// Element-wise non-linear operations.

pub trait RealOps<I: Real>: Sized {
  fn sigmoid(&self) -> Self;
  fn sigmoid_prime(&self) -> Self;
  fn sqr(&self) -> Self;
  /// One where an element is strictly greater than `midpoint`, zero elsewhere.
  fn binary_squash(&self, midpoint: I) -> Self;
  /// One where both operands hold equal elements, zero elsewhere.
  fn binary_match(&self, rhs: &Self) -> Result<Self, ShapeError>;
}


/// High-level operations, implemented exclusively on top of
/// the lower level traits.

pub trait Hops<I: Real>: BaseOps<I> + NumericOps<I> + RealOps<I> {
  fn zeros(rows: usize, cols: usize) -> Self {
    Self::filled(rows, cols, I::zero())
  }

  /// Arithmetic mean over all elements. `NaN` for empty matrices.
  fn mean(&self) -> I {
    let n = I::from(self.shape().size()).unwrap_or_else(I::nan);
    self.sum() / n
  }

  fn mean_rows(&self) -> Self {
    let n = I::from(self.shape().cols).unwrap_or_else(I::nan);
    self.sum_rows().scale(I::one() / n)
  }

  fn mean_cols(&self) -> Self {
    let n = I::from(self.shape().rows).unwrap_or_else(I::nan);
    self.sum_cols().scale(I::one() / n)
  }

  /// Mean squared difference between `self` and `target`.
  fn mse(&self, target: &Self) -> Result<I, ShapeError> {
    Ok(target.sub(self)?.sqr().mean())
  }
}
