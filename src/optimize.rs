use serde::{ Serialize, Deserialize };

use crate::{
  internal::*,
  matrix::Matrix,
  network::{ Network, Gradients },
  error::ShapeError,
  scalar::Real,
  ops::*,
};


/// Turns a raw batch gradient into the change applied to a weight matrix.

pub trait Strategy<R: Real> {
  fn update(&mut self, grad: &Matrix<R>, rate: R, records: usize) -> Matrix<R>;
}


/// Plain full-batch gradient descent, with the two ways of scaling
/// the summed gradient found in practice.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
  /// Apply the gradient summed over all records, scaled by the learning rate only.
  #[default]
  Summed,
  /// Divide the summed gradient by the number of records first.
  Averaged,
}

impl<R: Real> Strategy<R> for Normalization {
  fn update(&mut self, grad: &Matrix<R>, rate: R, records: usize) -> Matrix<R> {
    match self {
      Normalization::Summed => grad.scale(rate),
      Normalization::Averaged => grad.scale(rate / cast::<R>(records as f64)),
    }
  }
}


/// Generic optimizer that allows for several optimization [strategies](Strategy) to be used.

#[derive(Debug)]
pub struct Optimizer<R: Real, S: Strategy<R>> {
  strategy: S,
  pub learning_rate: R,
  step: usize,
}

impl<R: Real, S: Strategy<R>> Optimizer<R, S> {
  pub fn new(learning_rate: R, strategy: S) -> Self {
    Self { strategy, learning_rate, step: 0 }
  }

  /// Number of updates applied so far.

  pub fn steps(&self) -> usize {
    self.step
  }

  /// Adds the strategy's change to both weight matrices in place.

  pub fn apply(&mut self, network: &mut Network<R>, grads: &Gradients<R>, records: usize) -> Result<(), ShapeError> {
    let change = self.strategy.update(&grads.w1, self.learning_rate, records);
    let w1 = network.w1.add(&change)?;

    let change = self.strategy.update(&grads.w2, self.learning_rate, records);
    let w2 = network.w2.add(&change)?;

    // Both shapes were checked, so the assignment cannot fail half way
    network.w1.assign(&w1)?;
    network.w2.assign(&w2)?;

    self.step += 1;
    Ok(())
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::network::Init;

  #[test]
  fn summed() {
    let grad = Matrix::filled(2, 2, 4.0);
    let change = Normalization::Summed.update(&grad, 0.5, 8);
    assert_eq!(change, Matrix::filled(2, 2, 2.0));
  }

  #[test]
  fn averaged() {
    let grad = Matrix::filled(2, 2, 4.0);
    let change = Normalization::Averaged.update(&grad, 0.5, 8);
    assert_eq!(change, Matrix::filled(2, 2, 0.25));
  }

  #[test]
  fn apply() {
    let mut net = Network::<f64>::new(2, 2, 1, Init::Zeros);
    let grads = Gradients {
      w1: Matrix::filled(2, 2, 1.0),
      w2: Matrix::filled(2, 1, -2.0),
    };
    let mut optimizer = Optimizer::new(0.25, Normalization::Summed);
    optimizer.apply(&mut net, &grads, 10).unwrap();
    optimizer.apply(&mut net, &grads, 10).unwrap();
    assert_eq!(net.w1(), &Matrix::filled(2, 2, 0.5));
    assert_eq!(net.w2(), &Matrix::filled(2, 1, -1.0));
    assert_eq!(optimizer.steps(), 2);
  }

  #[test]
  fn apply_rejects_wrong_gradients() {
    let mut net = Network::<f64>::new(2, 2, 1, Init::Zeros);
    let grads = Gradients {
      w1: Matrix::filled(2, 2, 1.0),
      w2: Matrix::filled(1, 2, 1.0),
    };
    let mut optimizer = Optimizer::new(0.25, Normalization::Summed);
    assert!(optimizer.apply(&mut net, &grads, 10).is_err());
    assert_eq!(net.w1(), &Matrix::zeros(2, 2));
    assert_eq!(optimizer.steps(), 0);
  }
}
