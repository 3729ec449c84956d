#![allow(clippy::len_without_is_empty)]
use std::ops::{Add, Mul, RangeBounds, Sub};

use log::debug;
use num_traits::Zero;

use crate::{
    error::{Error, Result},
    traits::WrappingRing,
    util::{check_range, normalize_index, normalize_range},
};

use super::FenwickTree;

/// An element whose arithmetic goes through [`WrappingRing`]
///
/// The weighted sums in `b2` outgrow the elements they describe. Wrapping keeps them exact
/// modulo the type width, which is all the final subtraction needs.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wrapped<T>(T);

impl<T: WrappingRing> Add for Wrapped<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Wrapped(self.0.ring_add(rhs.0))
    }
}

impl<T: WrappingRing> Sub for Wrapped<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Wrapped(self.0.ring_sub(rhs.0))
    }
}

impl<T: WrappingRing> Mul for Wrapped<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Wrapped(self.0.ring_mul(rhs.0))
    }
}

impl<T: WrappingRing> Zero for Wrapped<T> {
    fn zero() -> Self {
        Wrapped(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// A pair of Fenwick trees supporting additive range updates and range sums
///
/// A range add of `v` over `[l, r)` is stored as a difference: `+v` at `l` and `-v` at `r`
/// in `b1`, and the same deltas weighted by their position in `b2`. The sum of the first
/// `r` elements is then `b1.prefix(r) * r - b2.prefix(r)`.
///
/// Integer elements may be signed or unsigned. Internal sums wrap, so every element, prefix
/// and range sum is exact as long as the value itself fits in `T`.
///
/// ### Example
/// ```
/// use segee::ds::RangeAddFenwickTree;
///
/// let mut tree = RangeAddFenwickTree::from_values([1, 2, 3, 4, 5])?;
/// tree.add(1..4, 10)?;
/// assert_eq!(tree.to_vec(), [1, 12, 13, 14, 5]);
/// assert_eq!(tree.sum(..)?, 45);
/// # Ok::<(), segee::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAddFenwickTree<T> {
    b1: FenwickTree<Wrapped<T>>,
    b2: FenwickTree<Wrapped<T>>,
}

impl<T: WrappingRing> RangeAddFenwickTree<T> {
    /// Initialize a new `RangeAddFenwickTree` of `n` zeros
    pub fn new(n: usize) -> Result<Self> {
        Ok(Self {
            b1: FenwickTree::new(n)?,
            b2: FenwickTree::new(n)?,
        })
    }

    /// Build a `RangeAddFenwickTree` holding `values` in O(n)
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut diffs = Vec::new();
        let mut weighted = Vec::new();
        let mut prev = T::zero();
        for (i, value) in values.into_iter().enumerate() {
            let d = value.ring_sub(prev);
            diffs.push(Wrapped(d));
            weighted.push(Wrapped(d.ring_mul(T::from_index(i))));
            prev = value;
        }

        let n = diffs.len();
        if n == 0 {
            return Err(Error::Initialization { size: n });
        }

        debug!("range add fenwick tree of size {n} built from values");
        Ok(Self {
            b1: FenwickTree::from_values(diffs)?,
            b2: FenwickTree::from_values(weighted)?,
        })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.b1.len()
    }

    /// Add `value` to every element of a half-open range
    pub fn add<R: RangeBounds<isize>>(&mut self, range: R, value: T) -> Result<()> {
        let n = self.len();
        let (left, right) = normalize_range(range, n)?;
        if left == right {
            return Ok(());
        }

        let value = Wrapped(value);
        let left_weight = Wrapped(T::from_index(left));
        let right_weight = Wrapped(T::from_index(right));

        // position `n` lies past every prefix, so its half of the update is dropped
        self.b1.add_at(left, value);
        if right < n {
            self.b1.add_at(right, Wrapped::zero() - value);
        }
        self.b2.add_at(left, value * left_weight);
        if right < n {
            self.b2.add_at(right, Wrapped::zero() - value * right_weight);
        }
        Ok(())
    }

    /// Overwrite the element at `index`
    pub fn set(&mut self, index: isize, value: T) -> Result<()> {
        let index = normalize_index(index, self.len())?;
        let delta = value.ring_sub(self.get_at(index));
        let index = index as isize;
        self.add(index..index + 1, delta)
    }

    /// Get the element at `index`, negative indices counting from the end
    pub fn get(&self, index: isize) -> Result<T> {
        let index = normalize_index(index, self.len())?;
        Ok(self.get_at(index))
    }

    /// `b1` holds the difference array, so its prefix is the element itself
    fn get_at(&self, index: usize) -> T {
        self.b1.prefix_at(index + 1).0
    }

    /// Sum of the first `right` elements
    pub fn prefix_sum(&self, right: isize) -> Result<T> {
        let (_, right) = check_range(0, right, self.len())?;
        Ok(self.prefix_at(right))
    }

    fn prefix_at(&self, right: usize) -> T {
        let weight = Wrapped(T::from_index(right));
        (self.b1.prefix_at(right) * weight - self.b2.prefix_at(right)).0
    }

    /// Sum of a half-open range
    pub fn sum<R: RangeBounds<isize>>(&self, range: R) -> Result<T> {
        let (left, right) = normalize_range(range, self.len())?;
        Ok(self.prefix_at(right).ring_sub(self.prefix_at(left)))
    }

    /// Sum of every element
    pub fn total(&self) -> T {
        self.prefix_at(self.len())
    }

    pub fn to_vec(&self) -> Vec<T> {
        (0..self.len()).map(|i| self.get_at(i)).collect()
    }
}
