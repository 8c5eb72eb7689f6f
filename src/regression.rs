use tracing::{ debug, info };

use crate::{
  internal::*,
  error::ShapeError,
  scalar::Real,
};


/// A single `(x, y)` observation.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<R> {
  pub x: R,
  pub y: R,
}

impl<R> Point<R> {
  pub fn new(x: R, y: R) -> Self {
    Self { x, y }
  }
}


/// Line `y = m * x + b`, fit by batch gradient descent on the mean
/// squared residual.
///
/// This is the single-feature, single-layer case of the network
/// trainer without an activation, so it offers no convergence
/// guarantee either: too large a learning rate makes it diverge.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearModel<R> {
  /// Intercept.
  pub b: R,
  /// Slope.
  pub m: R,
}

/// Outcome of [LinearModel::fit].

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit<R> {
  pub model: LinearModel<R>,
  pub initial_error: R,
  pub final_error: R,
}

impl<R: Real> LinearModel<R> {
  pub fn new(b: R, m: R) -> Self {
    Self { b, m }
  }

  pub fn predict(&self, x: R) -> R {
    self.m * x + self.b
  }

  fn count(points: &[Point<R>]) -> Result<R, ShapeError> {
    if points.is_empty() {
      return Err(ShapeError::Empty);
    }
    Ok(cast(points.len() as f64))
  }

  /// Mean squared residual over `points`.

  pub fn error(&self, points: &[Point<R>]) -> Result<R, ShapeError> {
    let n = Self::count(points)?;
    let sum: R = points.iter()
      .map(|p| { let r = p.y - self.predict(p.x); r * r })
      .sum();
    Ok(sum / n)
  }

  /// Partial derivatives of [error](Self::error) with respect to `b` and `m`.

  pub fn gradient(&self, points: &[Point<R>]) -> Result<(R, R), ShapeError> {
    let n = Self::count(points)?;
    let two = cast::<R>(2.0);
    let (mut gradient_b, mut gradient_m) = (R::zero(), R::zero());
    for p in points {
      let residual = p.y - self.predict(p.x);
      gradient_b += -two * residual;
      gradient_m += -two * p.x * residual;
    }
    Ok((gradient_b / n, gradient_m / n))
  }

  /// One descent step on both parameters.

  pub fn step(&mut self, points: &[Point<R>], learning_rate: R) -> Result<(), ShapeError> {
    let (gradient_b, gradient_m) = self.gradient(points)?;
    self.b -= learning_rate * gradient_b;
    self.m -= learning_rate * gradient_m;
    Ok(())
  }

  /// Runs `iterations` steps starting from the current parameters.

  pub fn gradient_descent(&mut self, points: &[Point<R>], learning_rate: R, iterations: usize) -> Result<(), ShapeError> {
    for i in 0..iterations {
      self.step(points, learning_rate)?;
      debug!(iteration = i, b = ?self.b, m = ?self.m, "Stepped");
    }
    Ok(())
  }

  /// Gradient descent from this model, reporting the error before and after.

  pub fn fit(self, points: &[Point<R>], learning_rate: R, iterations: usize) -> Result<Fit<R>, ShapeError> {
    let initial_error = self.error(points)?;
    info!(b = ?self.b, m = ?self.m, error = ?initial_error, "Starting gradient descent");
    let mut model = self;
    model.gradient_descent(points, learning_rate, iterations)?;
    let final_error = model.error(points)?;
    info!(b = ?model.b, m = ?model.m, error = ?final_error, iterations, "Finished gradient descent");
    Ok(Fit { model, initial_error, final_error })
  }
}
