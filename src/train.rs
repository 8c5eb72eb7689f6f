use serde::{ Serialize, Deserialize };
use tracing::{ debug, info, warn, instrument };

use crate::{
  internal::*,
  matrix::Matrix,
  network::{ Network, Init },
  optimize::{ Optimizer, Strategy, Normalization },
  error::ShapeError,
  scalar::Real,
  ops::*,
};


/// Fixed training configuration. There is no scheduling of any kind.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "R: Real + Deserialize<'de>"))]
pub struct Hyperparams<R> {
  pub learning_rate: R,
  pub hidden: usize,
  pub epochs: usize,
  pub normalization: Normalization,
  pub init: Init,
}

impl<R: Real> Default for Hyperparams<R> {
  fn default() -> Self {
    Self {
      learning_rate: cast(0.005),
      hidden: 4,
      epochs: 10_000,
      normalization: Normalization::Summed,
      init: Init::Zeros,
    }
  }
}

impl<R> Hyperparams<R> {
  /// Epochs between two loss reports. Every run reports about ten times.

  pub fn report_interval(&self) -> usize {
    (self.epochs / 10).max(1)
  }
}


/// Lifecycle of a [Trainer].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Initialized,
  /// Epochs completed so far.
  Training(usize),
  Stopped,
}


/// Training set loss, recorded at the reporting cadence.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossReport<R> {
  pub epoch: usize,
  pub loss: R,
  /// Set when the loss rose since the previous report.
  pub diverging: bool,
}


/// Full-batch gradient descent session.
///
/// The trainer exclusively owns the weights it updates. Every epoch runs
/// the forward pass, the backward pass and one update on the entire
/// training set and then drops all intermediate matrices. Training always
/// runs for the configured number of epochs; a rising loss is reported
/// but never stops it.

#[derive(Debug)]
pub struct Trainer<'a, R: Real, S: Strategy<R> = Normalization> {
  x: &'a Matrix<R>,
  y: &'a Matrix<R>,
  network: Network<R>,
  optimizer: Optimizer<R, S>,
  epochs: usize,
  report_interval: usize,
  state: State,
  history: Vec<LossReport<R>>,
}

impl<'a, R: Real> Trainer<'a, R> {
  pub fn new(x: &'a Matrix<R>, y: &'a Matrix<R>, params: &Hyperparams<R>) -> Result<Self, ShapeError> {
    Self::with_strategy(x, y, params, params.normalization)
  }
}

impl<'a, R: Real, S: Strategy<R>> Trainer<'a, R, S> {
  pub fn with_strategy(x: &'a Matrix<R>, y: &'a Matrix<R>, params: &Hyperparams<R>, strategy: S) -> Result<Self, ShapeError> {
    let network = Network::new(x.cols(), params.hidden, y.cols(), params.init);
    Self::resume(x, y, network, params, strategy)
  }

  /// Continues training an existing network.
  ///
  /// A network without any hidden units, inputs or outputs has
  /// nothing to train and is rejected.

  pub fn resume(x: &'a Matrix<R>, y: &'a Matrix<R>, network: Network<R>, params: &Hyperparams<R>, strategy: S) -> Result<Self, ShapeError> {
    if x.rows() != y.rows() {
      return Err(ShapeError::Rows { x: x.rows(), y: y.rows() });
    }
    if network.w1().is_empty() || network.w2().is_empty() {
      return Err(ShapeError::Empty);
    }
    if x.has_non_finite() {
      warn!("Training features contain NaN or infinite values");
    }
    if x.cols() != network.features() {
      return Err(ShapeError::Inner { lhs: x.shape(), rhs: network.w1().shape() });
    }
    if y.cols() != network.outputs() {
      return Err(ShapeError::Mismatch { op: "fit", lhs: y.shape(), rhs: network.w2().shape() });
    }
    Ok(Self {
      x,
      y,
      network,
      optimizer: Optimizer::new(params.learning_rate, strategy),
      epochs: params.epochs,
      report_interval: params.report_interval(),
      state: State::Initialized,
      history: vec![],
    })
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn network(&self) -> &Network<R> {
    &self.network
  }

  pub fn into_network(self) -> Network<R> {
    self.network
  }

  pub fn history(&self) -> &[LossReport<R>] {
    &self.history
  }

  /// Runs a single epoch. Returns the loss report if this epoch was
  /// on the reporting cadence.

  pub fn step(&mut self) -> Result<Option<LossReport<R>>, ShapeError> {
    let epoch = match self.state {
      State::Initialized => 0,
      State::Training(done) => done,
      State::Stopped => return Ok(None),
    };
    if epoch >= self.epochs {
      self.state = State::Stopped;
      return Ok(None);
    }

    let fwd = self.network.forward(self.x)?;
    let grads = self.network.backward(self.x, self.y, &fwd)?;
    self.optimizer.apply(&mut self.network, &grads, self.x.rows())?;
    debug!(epoch, "Updated weights");

    let report = if epoch % self.report_interval == 0 {
      Some(self.report(epoch)?)
    } else {
      None
    };

    self.state = if epoch + 1 == self.epochs {
      State::Stopped
    } else {
      State::Training(epoch + 1)
    };
    Ok(report)
  }

  /// Runs all remaining epochs.

  #[instrument(skip_all)]
  pub fn run(&mut self) -> Result<(), ShapeError> {
    info!(epochs = self.epochs, records = self.x.rows(), "Training started");
    while self.state != State::Stopped {
      self.step()?;
    }
    info!(steps = self.optimizer.steps(), "Training finished");
    Ok(())
  }

  fn report(&mut self, epoch: usize) -> Result<LossReport<R>, ShapeError> {
    let loss = self.network.loss(self.x, self.y)?;
    let diverging = self.history.last()
      .map_or(false, |last| loss > last.loss );
    let report = LossReport { epoch, loss, diverging };
    if diverging {
      warn!(epoch, loss = ?loss, "Train loss increasing");
    } else {
      info!(epoch, loss = ?loss, "Train loss");
    }
    self.history.push(report);
    Ok(report)
  }
}


/// Trains a fresh network on `x` and `y` and returns it.

pub fn train<R: Real>(x: &Matrix<R>, y: &Matrix<R>, params: &Hyperparams<R>) -> Result<Network<R>, ShapeError> {
  let mut trainer = Trainer::new(x, y, params)?;
  trainer.run()?;
  Ok(trainer.into_network())
}


/// Fraction of held-out targets the network classifies correctly,
/// thresholding outputs strictly above one half.

pub fn evaluate<R: Real>(x_test: &Matrix<R>, y_test: &Matrix<R>, network: &Network<R>) -> Result<R, ShapeError> {
  if x_test.rows() != y_test.rows() {
    return Err(ShapeError::Rows { x: x_test.rows(), y: y_test.rows() });
  }
  if y_test.is_empty() {
    return Err(ShapeError::Empty);
  }
  if x_test.has_non_finite() {
    warn!("Test features contain NaN or infinite values");
  }
  let predictions = network.predict(x_test)?.binary_squash(cast(0.5));
  let accuracy = predictions.binary_match(y_test)?.mean();
  info!(accuracy = ?accuracy, records = y_test.rows(), "Evaluated");
  Ok(accuracy)
}
