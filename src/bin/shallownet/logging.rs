extern crate better_panic;

use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;


fn install_logger(verbose: bool) -> Result<(), SetGlobalDefaultError> {
  let level = if verbose { Level::DEBUG } else { Level::INFO };
  let subscriber = tracing_subscriber::fmt()
    .compact()
    .with_max_level(level)
    .finish();
  tracing::subscriber::set_global_default(subscriber)
}

pub fn init_logging(verbose: bool) -> Result<(), SetGlobalDefaultError> {
  // Readable backtraces for debug builds
  if cfg!(debug_assertions) {
    better_panic::Settings::debug()
      .most_recent_first(false)
      .lineno_suffix(true)
      .verbosity(better_panic::Verbosity::Full)
      .install();
  }

  install_logger(verbose)
}
