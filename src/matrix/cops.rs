use crate::{
  matrix::Matrix,
  scalar::Real,
  ops::Cops,
};


impl<T: Real> Cops<T> for Matrix<T> {
  fn matmul(&self, rhs: &Self) -> Vec<T> {
    debug_assert_eq!(self.cols(), rhs.rows());
    T::gemm(self.rows(), self.cols(), rhs.cols(), self.raw(), rhs.raw())
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::ops::NumericOps;

  #[test]
  fn matmul() {
    let x = Matrix::new(2, 3, vec![1., 2., 3., 4., 5., 6.]).unwrap();
    let y = Matrix::new(3, 2, vec![1., 2., 3., 4., 5., 6.]).unwrap();
    assert_eq!(x.dot(&y).unwrap(), Matrix::new(2, 2, vec![22., 28., 49., 64.]).unwrap());
  }

  #[test]
  fn matmul_vector() {
    let x = Matrix::new(2, 3, vec![1., 2., 3., 4., 5., 6.]).unwrap();
    let y = Matrix::column_vec(&[1., 2., 3.]);
    assert_eq!(x.matmul(&y), vec![14., 32.]);
  }

  #[test]
  fn matmul_f32() {
    let x = Matrix::new(1, 2, vec![0.5_f32, 2.0]).unwrap();
    let y = Matrix::new(2, 1, vec![4.0_f32, 0.25]).unwrap();
    assert_eq!(x.matmul(&y), vec![2.5]);
  }
}
