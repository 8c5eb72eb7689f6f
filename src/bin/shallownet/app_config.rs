use std::path::Path;

use serde::{ Deserialize, Deserializer };

use shallownet::{ Hyperparams, Init, Layout, Normalization };


/// Settings shared by both subcommands.
/// Also defines the config file format (Option fields can be omitted).

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
  /// Network learning rate
  pub learning_rate: Option<f64>,
  /// Number of hidden units
  pub hidden: Option<usize>,
  pub epochs: Option<usize>,
  pub normalization: Option<Normalization>,
  pub init: Option<Init>,
  /// Fraction of records used for training, the rest is held out
  pub split: Option<f64>,
  /// Column holding the class label
  pub target: Option<usize>,
  /// Columns rescaled to zero mean and unit variance
  pub standardize: Option<Vec<usize>>,
  /// Column of categories to one-hot encode, `null` for none
  #[serde(default, deserialize_with = "explicit")]
  pub categorical: Option<Option<usize>>,
  /// Regression learning rate
  pub regression_rate: Option<f64>,
  pub iterations: Option<usize>,
  /// Inputs to print regression predictions for
  pub probes: Option<Vec<f64>>,
}

// Tells a missing key apart from an explicit null
fn explicit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<usize>>, D::Error> {
  Option::<usize>::deserialize(deserializer).map(Some)
}

impl AppConfig {
  pub fn from_file(path: &Path) -> anyhow::Result<Self> {
    let file = std::fs::File::open(path)?;
    Ok(serde_yaml::from_reader(file)?)
  }

  // merge configs where the second overwrites the first
  pub fn merge(self, other: Self) -> Self {
    Self {
      learning_rate: other.learning_rate.or(self.learning_rate),
      hidden: other.hidden.or(self.hidden),
      epochs: other.epochs.or(self.epochs),
      normalization: other.normalization.or(self.normalization),
      init: other.init.or(self.init),
      split: other.split.or(self.split),
      target: other.target.or(self.target),
      standardize: other.standardize.or(self.standardize),
      categorical: other.categorical.or(self.categorical),
      regression_rate: other.regression_rate.or(self.regression_rate),
      iterations: other.iterations.or(self.iterations),
      probes: other.probes.or(self.probes),
    }
  }

  pub fn hyperparams(&self) -> Hyperparams<f64> {
    let defaults = Hyperparams::<f64>::default();
    Hyperparams {
      learning_rate: self.learning_rate.unwrap_or(defaults.learning_rate),
      hidden: self.hidden.unwrap_or(defaults.hidden),
      epochs: self.epochs.unwrap_or(defaults.epochs),
      normalization: self.normalization.unwrap_or(defaults.normalization),
      init: self.init.unwrap_or(defaults.init),
    }
  }

  /// Column roles of the admissions table unless configured otherwise.

  pub fn layout(&self) -> Layout {
    Layout {
      target: self.target.unwrap_or(0),
      standardize: self.standardize.clone().unwrap_or_else(|| vec![1, 2] ),
      categorical: self.categorical.unwrap_or(Some(3)),
    }
  }

  pub fn split(&self) -> f64 {
    self.split.unwrap_or(0.9)
  }

  pub fn regression_rate(&self) -> f64 {
    self.regression_rate.unwrap_or(0.0001)
  }

  pub fn iterations(&self) -> usize {
    self.iterations.unwrap_or(1000)
  }

  pub fn probes(&self) -> Vec<f64> {
    self.probes.clone()
      .unwrap_or_else(|| vec![2., 10., 20., 30., 50., 60., 80., 100., 200.] )
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn merge_prefers_later() {
    let file: AppConfig = serde_yaml::from_str("epochs: 50\nhidden: 3\nnormalization: averaged\n").unwrap();
    let cli = AppConfig { epochs: Some(7), ..Default::default() };
    let config = file.merge(cli);
    let params = config.hyperparams();
    assert_eq!(params.epochs, 7);
    assert_eq!(params.hidden, 3);
    assert_eq!(params.normalization, Normalization::Averaged);
    assert_eq!(params.learning_rate, 0.005);
  }

  #[test]
  fn default_layout() {
    let layout = AppConfig::default().layout();
    assert_eq!(layout, Layout { target: 0, standardize: vec![1, 2], categorical: Some(3) });
  }

  #[test]
  fn categorical_opt_out() {
    let config: AppConfig = serde_yaml::from_str("categorical: null\n").unwrap();
    assert_eq!(config.layout().categorical, None);

    let config: AppConfig = serde_yaml::from_str("categorical: 2\n").unwrap();
    assert_eq!(config.layout().categorical, Some(2));

    let config: AppConfig = serde_yaml::from_str("epochs: 3\n").unwrap();
    assert_eq!(config.layout().categorical, Some(3));

    let cli = AppConfig { categorical: Some(None), ..Default::default() };
    assert_eq!(config.merge(cli).layout().categorical, None);
  }

  #[test]
  fn rejects_unknown_keys() {
    assert!(serde_yaml::from_str::<AppConfig>("epoch: 5\n").is_err());
  }
}
