use rand::distributions::uniform::SampleUniform;
use num_traits::{ Float, NumAssignOps };


/// All types that may be stored in a [Matrix](crate::Matrix).
///
/// This trait gets implemented automatically for all types
/// that satisfy its dependent traits.

pub trait Inner: PartialEq + Clone + Copy + Send + Sync + std::fmt::Debug {}
impl<T: PartialEq + Clone + Copy + Send + Sync + std::fmt::Debug> Inner for T {}


/// Low-level matrix product kernel for a scalar type.
///
/// Multiplies the row-major `m × k` matrix `a` with the row-major
/// `k × n` matrix `b` and returns the row-major `m × n` result.

pub trait Kernel: Sized {
  fn gemm(m: usize, k: usize, n: usize, a: &[Self], b: &[Self]) -> Vec<Self>;
}


/// All continuous numeric types the algebra and the trainers operate on.
///
/// Implemented for `f32` and `f64`.

pub trait Real: Inner + Float + NumAssignOps + std::iter::Sum + SampleUniform + Kernel {}
impl<T: Inner + Float + NumAssignOps + std::iter::Sum + SampleUniform + Kernel> Real for T {}


#[cfg_attr(feature = "unsafe", allow(dead_code))]
pub(crate) fn naive_gemm<T: Float + NumAssignOps>(m: usize, k: usize, n: usize, a: &[T], b: &[T]) -> Vec<T> {
  let mut data = vec![T::zero(); m * n];
  for i in 0..m {
    for j in 0..n {
      for l in 0..k {
        data[i * n + j] += a[i * k + l] * b[l * n + j];
      }
    }
  }
  data
}

#[cfg(not(feature = "unsafe"))]
impl Kernel for f32 {
  fn gemm(m: usize, k: usize, n: usize, a: &[Self], b: &[Self]) -> Vec<Self> {
    naive_gemm(m, k, n, a, b)
  }
}

#[cfg(not(feature = "unsafe"))]
impl Kernel for f64 {
  fn gemm(m: usize, k: usize, n: usize, a: &[Self], b: &[Self]) -> Vec<Self> {
    naive_gemm(m, k, n, a, b)
  }
}

#[cfg(feature = "unsafe")]
impl Kernel for f32 {
  fn gemm(m: usize, k: usize, n: usize, a: &[Self], b: &[Self]) -> Vec<Self> {
    let mut data = vec![0.0; m * n];
    if data.is_empty() || k == 0 { return data }
    debug_assert!(a.len() == m * k && b.len() == k * n);

    unsafe {
      matrixmultiply::sgemm(
        m,
        k,
        n,
        1.0,
        a.as_ptr(),
        k as isize,
        1,
        b.as_ptr(),
        n as isize,
        1,
        0.0,
        data.as_mut_ptr(),
        n as isize,
        1,
      );
    };

    data
  }
}

#[cfg(feature = "unsafe")]
impl Kernel for f64 {
  fn gemm(m: usize, k: usize, n: usize, a: &[Self], b: &[Self]) -> Vec<Self> {
    let mut data = vec![0.0; m * n];
    if data.is_empty() || k == 0 { return data }
    debug_assert!(a.len() == m * k && b.len() == k * n);

    unsafe {
      matrixmultiply::dgemm(
        m,
        k,
        n,
        1.0,
        a.as_ptr(),
        k as isize,
        1,
        b.as_ptr(),
        n as isize,
        1,
        0.0,
        data.as_mut_ptr(),
        n as isize,
        1,
      );
    };

    data
  }
}
