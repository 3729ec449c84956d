use std::ops::{Add, Sub};

use num_traits::Zero;

/// Element types usable in the additive structures
///
/// Implemented for every copyable type with a zero and closed addition and subtraction,
/// which covers all primitive integers and floats.
pub trait Additive: Copy + Zero + Add<Output = Self> + Sub<Output = Self> {}

impl<T> Additive for T where T: Copy + Zero + Add<Output = T> + Sub<Output = T> {}

/// Ring arithmetic that never panics on overflow
///
/// Integers wrap around their width, so overflow in an intermediate value cancels out
/// whenever the final result fits in the type. Floats use their ordinary operators.
pub trait WrappingRing: Additive {
    fn ring_add(self, rhs: Self) -> Self;
    fn ring_sub(self, rhs: Self) -> Self;
    fn ring_mul(self, rhs: Self) -> Self;

    /// A position as an element, reduced modulo the width for integers
    fn from_index(index: usize) -> Self;
}

/// A value that no other value exceeds, used as the identity of `min`
pub trait Infinity {
    fn infinity() -> Self;
}

/// A value that exceeds no other value, used as the identity of `max`
pub trait NegativeInfinity {
    fn neg_infinity() -> Self;
}

macro_rules! impl_bounds_int {
    ($($t:ty),*) => {
        $(
            impl Infinity for $t {
                fn infinity() -> Self {
                    <$t>::MAX
                }
            }

            impl NegativeInfinity for $t {
                fn neg_infinity() -> Self {
                    <$t>::MIN
                }
            }
        )*
    };
}

macro_rules! impl_bounds_float {
    ($($t:ty),*) => {
        $(
            impl Infinity for $t {
                fn infinity() -> Self {
                    <$t>::INFINITY
                }
            }

            impl NegativeInfinity for $t {
                fn neg_infinity() -> Self {
                    <$t>::NEG_INFINITY
                }
            }
        )*
    };
}

macro_rules! impl_ring_int {
    ($($t:ty),*) => {
        $(
            impl WrappingRing for $t {
                fn ring_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                fn ring_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                fn ring_mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }

                fn from_index(index: usize) -> Self {
                    index as $t
                }
            }
        )*
    };
}

macro_rules! impl_ring_float {
    ($($t:ty),*) => {
        $(
            impl WrappingRing for $t {
                fn ring_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                fn ring_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                fn ring_mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                fn from_index(index: usize) -> Self {
                    index as $t
                }
            }
        )*
    };
}

impl_ring_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_ring_float!(f32, f64);

impl_bounds_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_bounds_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(i32::infinity(), i32::MAX);
        assert_eq!(u8::neg_infinity(), 0);
        assert!(f64::infinity().is_infinite() && f64::infinity() > 0.0);
        assert_eq!(f32::neg_infinity(), f32::NEG_INFINITY);
    }

    #[test]
    fn ring_wraps_integers() {
        assert_eq!(i32::MAX.ring_add(1), i32::MIN, "addition wraps");
        assert_eq!(0u8.ring_sub(1), u8::MAX, "subtraction wraps");
        assert_eq!((1i32 << 30).ring_mul(4), 0, "multiplication wraps");
        assert_eq!(i8::from_index(200), -56, "index reduced modulo the width");
        assert_eq!(f64::from_index(3).ring_mul(0.5), 1.5);
    }
}
