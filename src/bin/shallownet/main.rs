mod app_config;
mod logging;

use std::path::{ Path, PathBuf };

use anyhow::Context;
use clap::{ Parser, Subcommand };

use shallownet::{
  data::{ read_table, read_points },
  Dataset, Init, LinearModel, Matrix,
  train, evaluate,
};

use app_config::AppConfig;


#[derive(Parser)]
#[command(version, about = "Trains a two-layer sigmoid network or a straight line from CSV data")]
struct Cli {
  /// YAML file with settings, overridden by flags
  #[arg(short, long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,
  /// Log every epoch
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Binary classification on a CSV table with a header row
  Network {
    #[arg(short, long, value_name = "PATH")]
    data: PathBuf,
    #[arg(short, long, value_name = "INT")]
    epochs: Option<usize>,
    #[arg(short, long, value_name = "FLOAT")]
    learning_rate: Option<f64>,
    #[arg(long, value_name = "INT")]
    hidden: Option<usize>,
    /// Draw initial weights from a seeded normal distribution
    #[arg(long, value_name = "INT")]
    seed: Option<u64>,
    /// Fraction of records to train on
    #[arg(long, value_name = "FLOAT")]
    split: Option<f64>,
    /// Use every non-target column as a plain feature
    #[arg(long)]
    no_categorical: bool,
  },
  /// Line fit on a headerless CSV of x,y points
  Regression {
    #[arg(short, long, value_name = "PATH")]
    data: PathBuf,
    #[arg(short, long, value_name = "FLOAT")]
    learning_rate: Option<f64>,
    #[arg(short, long, value_name = "INT")]
    iterations: Option<usize>,
  },
}


fn run_network(data: &Path, config: &AppConfig) -> anyhow::Result<()> {
  let table: Matrix<f64> = read_table(data, true)
    .with_context(|| format!("Failed to read {}", data.display()))?;
  let dataset = Dataset::from_table(&table, &config.layout())?;
  let (train_set, test_set) = dataset.split(config.split())?;

  let params = config.hyperparams();
  let network = train(&train_set.x, &train_set.y, &params)?;
  let accuracy = evaluate(&test_set.x, &test_set.y, &network)?;
  println!("Prediction accuracy: {:.3}", accuracy);
  Ok(())
}

fn run_regression(data: &Path, config: &AppConfig) -> anyhow::Result<()> {
  let points = read_points::<f64>(data)
    .with_context(|| format!("Failed to read {}", data.display()))?;

  let start = LinearModel::default();
  let fit = start.fit(&points, config.regression_rate(), config.iterations())?;
  println!("starting gradient descent at b={} m={} error={}", start.b, start.m, fit.initial_error);
  println!(
    "ending point at b={} m={} error={} after {} iterations",
    fit.model.b, fit.model.m, fit.final_error, config.iterations(),
  );

  for x in config.probes() {
    println!("{} => {}", x, fit.model.predict(x));
  }
  Ok(())
}


fn main() -> anyhow::Result<()> {
  let args = Cli::parse();
  logging::init_logging(args.verbose)?;

  let file_config = match &args.config {
    Some(path) => AppConfig::from_file(path)
      .with_context(|| format!("Failed to load config {}", path.display()))?,
    None => AppConfig::default(),
  };

  match args.command {
    Command::Network { data, epochs, learning_rate, hidden, seed, split, no_categorical } => {
      let cli_config = AppConfig {
        epochs,
        learning_rate,
        hidden,
        split,
        init: seed.map(|seed| Init::Normal { seed } ),
        categorical: no_categorical.then_some(None),
        ..Default::default()
      };
      run_network(&data, &file_config.merge(cli_config))
    },
    Command::Regression { data, learning_rate, iterations } => {
      let cli_config = AppConfig {
        regression_rate: learning_rate,
        iterations,
        ..Default::default()
      };
      run_regression(&data, &file_config.merge(cli_config))
    },
  }
}
