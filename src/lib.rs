//! A small dense matrix engine and the two models trained on it.
//! Few dependencies. CPU only. Runs on stable Rust.
//!
//! # Features
//!
//! - **Checked algebra**: Every binary matrix operation validates the shapes
//! of its operands and returns a [ShapeError] instead of panicking.
//!
//! - **Two-layer network**: A bias-free sigmoid [Network] with hand-derived
//! back-propagation, trained by full-batch gradient descent.
//!
//! - **Linear regression**: Univariate [LinearModel] fit by gradient descent
//! on the mean squared residual.
//!
//! - **Data preparation**: CSV parsing, one-hot encoding, standardization and
//! train/test splitting in [data].
//!
//! # Examples
//!
//! Training a network and measuring its accuracy:
//! ```
//! use shallownet::{ Matrix, Hyperparams, Init, train, evaluate };
//!
//! let x = Matrix::from_rows(&[
//!   vec![ 1.0, 0.2],
//!   vec![-1.0, 0.4],
//!   vec![ 0.8, 0.9],
//!   vec![-0.6, 0.1],
//! ]).unwrap();
//! let y = Matrix::column_vec(&[1.0, 0.0, 1.0, 0.0]);
//!
//! let params = Hyperparams {
//!   learning_rate: 0.5,
//!   epochs: 500,
//!   init: Init::Normal { seed: 7 },
//!   ..Default::default()
//! };
//! let network = train(&x, &y, &params).unwrap();
//! let accuracy = evaluate(&x, &y, &network).unwrap();
//! assert!(accuracy >= 0.0 && accuracy <= 1.0);
//! ```
//!
//! Fitting a line:
//! ```
//! use shallownet::{ LinearModel, Point };
//!
//! let points: Vec<_> = (0..10).map(|i| Point::new(i as f64, 3.0 * i as f64)).collect();
//! let fit = LinearModel::default().fit(&points, 0.01, 1000).unwrap();
//! assert!(fit.final_error < fit.initial_error);
//! ```
//!
//! # Optional features
//!
//! Some features can be toggled in your `Cargo.toml`.
//!
//! - `unsafe` *(default)*: Accelerated matrix products using the [matrixmultiply] crate.

mod internal;
mod shape;
mod matrix;

pub mod ops;
pub mod scalar;
pub mod error;
pub mod network;
pub mod optimize;
pub mod train;
pub mod regression;
pub mod data;

pub use shape::Shape;
pub use matrix::Matrix;
pub use error::{ ShapeError, DataError };
pub use network::{ Network, Init, Forward, Gradients };
pub use optimize::{ Optimizer, Strategy, Normalization };
pub use train::{ Hyperparams, Trainer, State, LossReport, train, evaluate };
pub use regression::{ LinearModel, Point, Fit };
pub use data::{ Dataset, Layout };
