use rand::{ SeedableRng, rngs::StdRng };
use serde::{ Serialize, Deserialize };

use crate::{
  internal::*,
  matrix::Matrix,
  error::ShapeError,
  scalar::Real,
  ops::*,
};


/// How the weights of a fresh [Network] are chosen.

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Init {
  /// Every weight starts at zero.
  #[default]
  Zeros,
  /// Normally distributed weights with a standard deviation of
  /// `1 / sqrt(features)`, drawn from a generator seeded with `seed`.
  Normal { seed: u64 },
}


/// Two-layer sigmoid network without bias terms.
///
/// `w1` maps `features` inputs onto `hidden` units and `w2` maps
/// those onto `outputs` units.

#[derive(Debug, Clone, PartialEq)]
pub struct Network<R: Real> {
  pub(crate) w1: Matrix<R>,
  pub(crate) w2: Matrix<R>,
}

/// Intermediate results of [Network::forward].

#[derive(Debug, Clone)]
pub struct Forward<R: Real> {
  /// Hidden pre-activation, `n × hidden`.
  pub z2: Matrix<R>,
  /// Hidden activation.
  pub a2: Matrix<R>,
  /// Output pre-activation, `n × outputs`.
  pub z3: Matrix<R>,
  /// Output activation, the prediction.
  pub y_hat: Matrix<R>,
}

/// Loss gradients of both weight matrices, summed over the batch.
///
/// These point downhill: adding them to the weights reduces the
/// squared error.

#[derive(Debug, Clone, PartialEq)]
pub struct Gradients<R: Real> {
  pub w1: Matrix<R>,
  pub w2: Matrix<R>,
}

impl<R: Real> Network<R> {
  pub fn new(features: usize, hidden: usize, outputs: usize, init: Init) -> Self {
    match init {
      Init::Zeros => Self {
        w1: Matrix::zeros(features, hidden),
        w2: Matrix::zeros(hidden, outputs),
      },
      Init::Normal { seed } => {
        let mut rng = StdRng::seed_from_u64(seed);
        let scale = R::one() / cast::<R>(features as f64).sqrt();
        let mut normal = |rows: usize, cols: usize| {
          let data = (0..rows * cols)
            .map(|_| randn::<R, _>(&mut rng).0 * scale )
            .collect();
          Matrix::from_shape(crate::Shape::new(rows, cols), data)
        };
        let w1 = normal(features, hidden);
        let w2 = normal(hidden, outputs);
        Self { w1, w2 }
      },
    }
  }

  /// Wraps existing weights, checking that they chain together.

  pub fn from_weights(w1: Matrix<R>, w2: Matrix<R>) -> Result<Self, ShapeError> {
    w1.shape().dot(&w2.shape())?;
    Ok(Self { w1, w2 })
  }

  pub fn w1(&self) -> &Matrix<R> {
    &self.w1
  }

  pub fn w2(&self) -> &Matrix<R> {
    &self.w2
  }

  pub fn into_weights(self) -> (Matrix<R>, Matrix<R>) {
    (self.w1, self.w2)
  }

  pub fn features(&self) -> usize {
    self.w1.rows()
  }

  pub fn hidden(&self) -> usize {
    self.w1.cols()
  }

  pub fn outputs(&self) -> usize {
    self.w2.cols()
  }

  pub fn forward(&self, x: &Matrix<R>) -> Result<Forward<R>, ShapeError> {
    let z2 = x.dot(&self.w1)?;
    let a2 = z2.sigmoid();
    let z3 = a2.dot(&self.w2)?;
    let y_hat = z3.sigmoid();
    Ok(Forward { z2, a2, z3, y_hat })
  }

  /// Output activations only.

  pub fn predict(&self, x: &Matrix<R>) -> Result<Matrix<R>, ShapeError> {
    Ok(self.forward(x)?.y_hat)
  }

  /// Chain rule through both sigmoid layers for the squared error.
  /// Sigmoid derivatives are taken at the pre-activations.

  pub fn backward(&self, x: &Matrix<R>, y: &Matrix<R>, fwd: &Forward<R>) -> Result<Gradients<R>, ShapeError> {
    let error = y.sub(&fwd.y_hat)?;
    let delta3 = error.mul(&fwd.z3.sigmoid_prime())?;
    let grad_w2 = fwd.a2.transpose().dot(&delta3)?;
    let delta2 = delta3.dot(&self.w2.transpose())?.mul(&fwd.z2.sigmoid_prime())?;
    let grad_w1 = x.transpose().dot(&delta2)?;
    Ok(Gradients { w1: grad_w1, w2: grad_w2 })
  }

  /// Mean squared error of the predictions for `x` against `y`.

  pub fn loss(&self, x: &Matrix<R>, y: &Matrix<R>) -> Result<R, ShapeError> {
    self.predict(x)?.mse(y)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  fn xor() -> (Matrix<f64>, Matrix<f64>) {
    let x = Matrix::from_rows(&[
      vec![0., 0., 1.],
      vec![0., 1., 1.],
      vec![1., 0., 1.],
      vec![1., 1., 1.],
    ]).unwrap();
    let y = Matrix::column_vec(&[0., 1., 1., 0.]);
    (x, y)
  }

  #[test]
  fn shapes() {
    let (x, y) = xor();
    let net = Network::new(3, 4, 1, Init::Normal { seed: 1 });
    let fwd = net.forward(&x).unwrap();
    assert_eq!(fwd.z2.shape(), crate::Shape::new(4, 4));
    assert_eq!(fwd.a2.shape(), crate::Shape::new(4, 4));
    assert_eq!(fwd.z3.shape(), crate::Shape::new(4, 1));
    assert_eq!(fwd.y_hat.shape(), crate::Shape::new(4, 1));
    let grads = net.backward(&x, &y, &fwd).unwrap();
    assert_eq!(grads.w1.shape(), net.w1().shape());
    assert_eq!(grads.w2.shape(), net.w2().shape());
  }

  #[test]
  fn zero_weights_predict_half() {
    let (x, _) = xor();
    let net = Network::<f64>::new(3, 4, 1, Init::Zeros);
    assert_eq!(net.predict(&x).unwrap(), Matrix::filled(4, 1, 0.5));
  }

  #[test]
  fn zero_weights_gradients() {
    // With all-zero weights the hidden units are 0.5 and delta2 vanishes
    let (x, y) = xor();
    let net = Network::<f64>::new(3, 2, 1, Init::Zeros);
    let fwd = net.forward(&x).unwrap();
    let grads = net.backward(&x, &y, &fwd).unwrap();
    assert_eq!(grads.w1, Matrix::zeros(3, 2));
    // error = [-0.5, 0.5, 0.5, -0.5] sums to zero
    assert_eq!(grads.w2, Matrix::zeros(2, 1));
  }

  #[test]
  fn gradients_match_finite_differences() {
    let (x, y) = xor();
    let net = Network::<f64>::new(3, 3, 1, Init::Normal { seed: 42 });
    let fwd = net.forward(&x).unwrap();
    let grads = net.backward(&x, &y, &fwd).unwrap();

    // The summed gradient is -1/2 d/dW sum((y - y_hat)^2)
    let half_sse = |net: &Network<f64>| net.loss(&x, &y).unwrap() * x.rows() as f64 / 2.0;
    let eps = 1e-6;
    for (i, j) in [(0, 0), (1, 2), (2, 1)] {
      let mut w1 = net.w1().raw().to_vec();
      w1[i * 3 + j] += eps;
      let bumped = Network::from_weights(Matrix::new(3, 3, w1).unwrap(), net.w2().clone()).unwrap();
      let numeric = -(half_sse(&bumped) - half_sse(&net)) / eps;
      assert!((numeric - grads.w1.get(i, j).unwrap()).abs() < 1e-4);
    }
    for i in 0..3 {
      let mut w2 = net.w2().raw().to_vec();
      w2[i] += eps;
      let bumped = Network::from_weights(net.w1().clone(), Matrix::new(3, 1, w2).unwrap()).unwrap();
      let numeric = -(half_sse(&bumped) - half_sse(&net)) / eps;
      assert!((numeric - grads.w2.get(i, 0).unwrap()).abs() < 1e-4);
    }
  }

  #[test]
  fn wrong_feature_count() {
    let (x, _) = xor();
    let net = Network::<f64>::new(2, 4, 1, Init::Zeros);
    assert!(matches!(net.forward(&x), Err(ShapeError::Inner { .. })));
  }

  #[test]
  fn from_weights_checks_chain() {
    assert!(Network::from_weights(Matrix::<f64>::zeros(3, 4), Matrix::zeros(4, 1)).is_ok());
    assert!(Network::from_weights(Matrix::<f64>::zeros(3, 4), Matrix::zeros(3, 1)).is_err());
  }

  #[test]
  fn normal_init_is_deterministic() {
    let a = Network::<f64>::new(6, 4, 1, Init::Normal { seed: 21 });
    let b = Network::<f64>::new(6, 4, 1, Init::Normal { seed: 21 });
    let c = Network::<f64>::new(6, 4, 1, Init::Normal { seed: 22 });
    assert_eq!(a, b);
    assert_ne!(a, c);
  }
}
