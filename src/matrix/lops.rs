use crate::{
  shape::Shape,
  matrix::Matrix,
  error::ShapeError,
  scalar::{ Inner, Real },
  ops::{ self, Cops, BaseOps, NumericOps, RealOps },
};


impl<T: Inner> BaseOps<T> for Matrix<T> {
  fn filled(rows: usize, cols: usize, value: T) -> Self {
    let shape = Shape::new(rows, cols);
    Self::from_shape(shape, vec![value; shape.size()])
  }

  fn shape(&self) -> Shape {
    self.shape
  }

  fn transpose(&self) -> Self {
    let shape = self.shape.transpose();
    let data = (0..shape.rows)
      .flat_map(|j| self.iter_rows().map(move |row| row[j] ) )
      .collect();
    Self::from_shape(shape, data)
  }
}

impl<T: Real> NumericOps<T> for Matrix<T> {
  fn add(&self, rhs: &Self) -> Result<Self, ShapeError> {
    self.zip(rhs, "add", |(a, b)| a + b )
  }

  fn sub(&self, rhs: &Self) -> Result<Self, ShapeError> {
    self.zip(rhs, "subtract", |(a, b)| a - b )
  }

  fn mul(&self, rhs: &Self) -> Result<Self, ShapeError> {
    self.zip(rhs, "multiply", |(a, b)| a * b )
  }

  fn scale(&self, k: T) -> Self {
    self.map(|a| a * k )
  }

  fn dot(&self, rhs: &Self) -> Result<Self, ShapeError> {
    let shape = self.shape.dot(&rhs.shape)?;
    Ok(Self::from_shape(shape, self.matmul(rhs)))
  }

  fn sum(&self) -> T {
    self.raw().iter().copied().sum()
  }

  fn sum_rows(&self) -> Self {
    let data = self.iter_rows()
      .map(|row| row.iter().copied().sum() )
      .collect();
    Self::from_shape(Shape::new(self.rows(), 1), data)
  }

  fn sum_cols(&self) -> Self {
    let mut data = vec![T::zero(); self.cols()];
    for row in self.iter_rows() {
      for (acc, &a) in data.iter_mut().zip(row) {
        *acc += a;
      }
    }
    Self::from_shape(Shape::new(1, self.cols()), data)
  }
}

impl<T: Real> RealOps<T> for Matrix<T> {
  fn sigmoid(&self) -> Self {
    self.map(ops::sigmoid)
  }

  fn sigmoid_prime(&self) -> Self {
    self.map(ops::sigmoid_prime)
  }

  fn sqr(&self) -> Self {
    self.map(|a| a * a )
  }

  fn binary_squash(&self, midpoint: T) -> Self {
    self.map(|a| if a > midpoint { T::one() } else { T::zero() })
  }

  fn binary_match(&self, rhs: &Self) -> Result<Self, ShapeError> {
    self.zip(rhs, "match", |(a, b)| if a == b { T::one() } else { T::zero() })
  }
}

impl<T: Real> std::ops::Neg for &Matrix<T> {
  type Output = Matrix<T>;

  fn neg(self) -> Matrix<T> {
    self.map(|a| -a )
  }
}

impl<T: Real> std::ops::Mul<T> for &Matrix<T> {
  type Output = Matrix<T>;

  fn mul(self, rhs: T) -> Matrix<T> {
    self.scale(rhs)
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::ops::Hops;
  use proptest::prelude::*;

  fn m(rows: &[Vec<f64>]) -> Matrix<f64> {
    Matrix::from_rows(rows).unwrap()
  }

  #[test]
  fn transpose() {
    let a = m(&[vec![1., 2., 3.], vec![4., 5., 6.]]);
    assert_eq!(a.transpose(), m(&[vec![1., 4.], vec![2., 5.], vec![3., 6.]]));
    assert_eq!(a.transpose().transpose(), a);
  }

  #[test]
  fn transpose_empty() {
    assert_eq!(Matrix::<f64>::zeros(0, 3).transpose(), Matrix::zeros(0, 0));
  }

  #[test]
  fn dot() {
    let a = m(&[vec![1., 1., -1.], vec![4., 0., 2.], vec![1., 0., 0.]]);
    let b = m(&[vec![2., -1.], vec![3., -2.], vec![0., 1.]]);
    let c = a.dot(&b).unwrap();
    assert_eq!(c.shape(), Shape::new(3, 2));
    assert_eq!(c, m(&[vec![5., -4.], vec![8., -2.], vec![2., -1.]]));
  }

  #[test]
  fn dot_mismatch() {
    let a = Matrix::<f64>::zeros(3, 2);
    assert_eq!(a.dot(&a), Err(ShapeError::Inner { lhs: a.shape(), rhs: a.shape() }));
  }

  #[test]
  fn elementwise() {
    let a = m(&[vec![1., 2.], vec![3., 4.]]);
    let b = m(&[vec![5., 6.], vec![7., 8.]]);
    assert_eq!(a.add(&b).unwrap(), m(&[vec![6., 8.], vec![10., 12.]]));
    assert_eq!(b.sub(&a).unwrap(), m(&[vec![4., 4.], vec![4., 4.]]));
    assert_eq!(a.mul(&b).unwrap(), m(&[vec![5., 12.], vec![21., 32.]]));
    assert_eq!(a.scale(0.5), m(&[vec![0.5, 1.], vec![1.5, 2.]]));
    assert_eq!(&a * 2.0, a.add(&a).unwrap());
    assert_eq!(-&a, a.scale(-1.0));
  }

  #[test]
  fn elementwise_mismatch() {
    let a = Matrix::<f64>::zeros(2, 2);
    let b = Matrix::<f64>::zeros(2, 1);
    assert_eq!(a.add(&b), Err(ShapeError::Mismatch { op: "add", lhs: a.shape(), rhs: b.shape() }));
    assert!(a.sub(&b).is_err());
    assert!(a.mul(&b).is_err());
    assert!(a.binary_match(&b).is_err());
  }

  #[test]
  fn sums() {
    let a = m(&[vec![1., 2., 3.], vec![4., 5., 6.]]);
    assert_eq!(a.sum(), 21.);
    assert_eq!(a.sum_rows(), Matrix::column_vec(&[6., 15.]));
    assert_eq!(a.sum_cols(), m(&[vec![5., 7., 9.]]));
  }

  #[test]
  fn sigmoid() {
    let z = m(&[vec![0., 0.], vec![0., 0.]]);
    assert_eq!(z.sigmoid(), Matrix::filled(2, 2, 0.5));
    assert_eq!(z.sigmoid_prime(), Matrix::filled(2, 2, 0.25));
  }

  #[test]
  fn binary_squash() {
    let a = m(&[vec![0.2, 0.5], vec![0.51, 0.9]]);
    assert_eq!(a.binary_squash(0.5), m(&[vec![0., 0.], vec![1., 1.]]));
  }

  #[test]
  fn binary_match() {
    let a = m(&[vec![1., 0.], vec![1., 1.]]);
    let b = m(&[vec![1., 1.], vec![0., 1.]]);
    assert_eq!(a.binary_match(&b).unwrap(), m(&[vec![1., 0.], vec![0., 1.]]));
    assert_eq!(a.binary_match(&b).unwrap().mean(), 0.5);
  }

  proptest! {
    #[test]
    fn transpose_involution(rows in 0..8_usize, cols in 0..8_usize, seed in -100..100_i32) {
      let data = (0..rows * cols).map(|i| (i as i32 * seed) as f64 ).collect();
      let a = Matrix::new(rows, cols, data).unwrap();
      prop_assert_eq!(a.transpose().shape(), Shape::new(cols, rows));
      prop_assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn dot_shape(n in 1..6_usize, k in 1..6_usize, p in 1..6_usize) {
      let a = Matrix::<f64>::filled(n, k, 1.0);
      let b = Matrix::<f64>::filled(k, p, 2.0);
      let c = a.dot(&b).unwrap();
      prop_assert_eq!(c.shape(), Shape::new(n, p));
      prop_assert_eq!(c, Matrix::filled(n, p, 2.0 * k as f64));
    }
  }
}
