use rand::Rng;

use crate::scalar::Real;


/// Converts an `f64` constant into any [Real] type.

#[inline]
pub fn cast<T: Real>(x: f64) -> T {
  T::from(x).unwrap_or_else(T::nan)
}


// Polar Box-Muller transformation

pub fn randn<T: Real, G: Rng>(rng: &mut G) -> (T, T) {
  loop {
    let u = rng.gen_range(-T::one(), T::one());
    let v = rng.gen_range(-T::one(), T::one());
    let r = u * u + v * v;
    // Try again if outside interval
    if r == T::zero() || r >= T::one() { continue }
    let c = (cast::<T>(-2.0) * r.ln() / r).sqrt();
    return (u * c, v * c)
  }
}
