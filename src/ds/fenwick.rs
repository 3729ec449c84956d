#![allow(clippy::len_without_is_empty)]
use std::ops::RangeBounds;

use log::trace;

use crate::{
    error::{Error, Result},
    traits::Additive,
    util::{check_range, normalize_index, normalize_range},
};

/// Lowest set bit of `i`
#[inline]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

/// A Fenwick tree (binary indexed tree) supporting additive point updates and prefix sums
///
/// `tree` is 1-indexed with `tree[0]` unused: `tree[p]` holds the sum of the `lowbit(p)`
/// elements ending at element `p - 1`.
///
/// ### Example
/// ```
/// use segee::ds::FenwickTree;
///
/// let mut fenwick = FenwickTree::from_values([1, 2, 3, 4])?;
/// fenwick.add(2, 10)?;
/// assert_eq!(fenwick.sum(1..3)?, 15);
/// assert_eq!(fenwick.total(), 20);
/// # Ok::<(), segee::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FenwickTree<T> {
    tree: Vec<T>,
    n: usize,
}

impl<T: Additive> FenwickTree<T> {
    /// Initialize a new `FenwickTree` of `n` zeros
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::Initialization { size: n });
        }

        trace!("fenwick tree of size {n}");
        Ok(Self {
            tree: vec![T::zero(); n + 1],
            n,
        })
    }

    /// Build a `FenwickTree` holding `values` in O(n)
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = vec![T::zero()];
        tree.extend(values);
        let n = tree.len() - 1;
        if n == 0 {
            return Err(Error::Initialization { size: n });
        }

        // push each partial sum into the next node that covers it
        for p in 1..=n {
            let parent = p + lowbit(p);
            if parent <= n {
                tree[parent] = tree[parent] + tree[p];
            }
        }

        trace!("fenwick tree of size {n} built from values");
        Ok(Self { tree, n })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.n
    }

    /// Add `delta` to the element at `index`, negative indices counting from the end
    pub fn add(&mut self, index: isize, delta: T) -> Result<()> {
        let index = normalize_index(index, self.n)?;
        self.add_at(index, delta);
        Ok(())
    }

    /// Point update on an index that is already known to be in bounds
    pub(crate) fn add_at(&mut self, index: usize, delta: T) {
        let mut p = index + 1;
        while p <= self.n {
            self.tree[p] = self.tree[p] + delta;
            p += lowbit(p);
        }
    }

    /// Point decrease, the twin of `add_at` for element types without negative deltas
    fn sub_at(&mut self, index: usize, delta: T) {
        let mut p = index + 1;
        while p <= self.n {
            self.tree[p] = self.tree[p] - delta;
            p += lowbit(p);
        }
    }

    /// Overwrite the element at `index`
    ///
    /// The change is applied as an increase or a decrease, so unsigned elements can be
    /// lowered without going through a negative delta.
    pub fn set(&mut self, index: isize, value: T) -> Result<()>
    where
        T: PartialOrd,
    {
        let index = normalize_index(index, self.n)?;
        let current = self.get_at(index);
        if value >= current {
            self.add_at(index, value - current);
        } else {
            self.sub_at(index, current - value);
        }
        Ok(())
    }

    /// Get the element at `index` in a single O(log n) pass
    pub fn get(&self, index: isize) -> Result<T> {
        let index = normalize_index(index, self.n)?;
        Ok(self.get_at(index))
    }

    fn get_at(&self, index: usize) -> T {
        // prefix(p) and prefix(p - 1) share every node below `lowbit(p)`
        let p = index + 1;
        let stop = p - lowbit(p);
        let mut value = self.tree[p];
        let mut q = p - 1;
        while q > stop {
            value = value - self.tree[q];
            q -= lowbit(q);
        }
        value
    }

    /// Sum of the first `right` elements
    pub fn prefix_sum(&self, right: isize) -> Result<T> {
        let (_, right) = check_range(0, right, self.n)?;
        Ok(self.prefix_at(right))
    }

    pub(crate) fn prefix_at(&self, right: usize) -> T {
        let mut p = right;
        let mut total = T::zero();
        while p > 0 {
            total = total + self.tree[p];
            p -= lowbit(p);
        }
        total
    }

    /// Sum of a half-open range
    pub fn sum<R: RangeBounds<isize>>(&self, range: R) -> Result<T> {
        let (left, right) = normalize_range(range, self.n)?;
        Ok(self.prefix_at(right) - self.prefix_at(left))
    }

    /// Sum of every element
    pub fn total(&self) -> T {
        self.prefix_at(self.n)
    }

    /// Find the smallest `r` such that the first `r` elements sum to at least `target`
    ///
    /// Only meaningful when every element is non-negative.
    ///
    /// ### Returns
    /// - `None` if even the total falls short of `target`
    /// - `Some(r)` with `r` in `[0, len()]` otherwise
    pub fn lower_bound(&self, target: T) -> Option<usize>
    where
        T: PartialOrd,
    {
        if target <= T::zero() {
            return Some(0);
        }

        let mut p = 0;
        let mut remaining = target;
        let mut step = self.n.next_power_of_two();
        while step > 0 {
            let next = p + step;
            if next <= self.n && self.tree[next] < remaining {
                p = next;
                remaining = remaining - self.tree[next];
            }
            step >>= 1;
        }

        // `p` is the longest prefix that still falls short
        (p < self.n).then_some(p + 1)
    }

    pub fn to_vec(&self) -> Vec<T> {
        (0..self.n).map(|i| self.get_at(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn fenwick_functional() {
        let mut fenwick = FenwickTree::<i64>::new(5).unwrap();
        fenwick.set(0, 10).unwrap();
        fenwick.set(1, 20).unwrap();
        fenwick.set(2, 30).unwrap();

        assert_eq!(fenwick.sum(0..2).unwrap(), 30, "sum of the first two");
        assert_eq!(fenwick.sum(0..3).unwrap(), 60, "sum of the first three");
        assert_eq!(fenwick.total(), 60, "total of all elements");
        assert_eq!(fenwick.get(-4).unwrap(), 20, "negative index");
    }

    #[test]
    fn bulk_build_matches_incremental() {
        let values = [5, -3, 8, 0, 2, 7, -1, 4, 6, 9, -2];
        let bulk = FenwickTree::from_values(values).unwrap();

        let mut incremental = FenwickTree::new(values.len()).unwrap();
        for (i, v) in values.iter().enumerate() {
            incremental.add(i as isize, *v).unwrap();
        }

        assert_eq!(bulk, incremental, "identical internal arrays");
        assert_eq!(bulk.to_vec(), values, "elements read back in order");
    }

    #[test]
    fn sum_matches_naive() {
        let mut rng = StdRng::seed_from_u64(17);
        let n = 29;
        let mut naive = vec![0i64; n];
        let mut fenwick = FenwickTree::new(n).unwrap();

        for _ in 0..500 {
            let i = rng.gen_range(0..n);
            let v = rng.gen_range(-50..50);
            if rng.gen_bool(0.5) {
                naive[i] += v;
                fenwick.add(i as isize, v).unwrap();
            } else {
                naive[i] = v;
                fenwick.set(i as isize, v).unwrap();
            }

            let l = rng.gen_range(0..=n);
            let r = rng.gen_range(l..=n);
            assert_eq!(
                fenwick.sum(l as isize..r as isize).unwrap(),
                naive[l..r].iter().sum::<i64>()
            );
            assert_eq!(fenwick.get(i as isize).unwrap(), naive[i]);
            assert_eq!(
                fenwick.sum(l as isize..l as isize).unwrap(),
                0,
                "empty range sums to zero"
            );
        }
    }

    #[test]
    fn unsigned_set_lowers_values() {
        let mut fenwick = FenwickTree::from_values([5u32, 1, 2]).unwrap();
        fenwick.set(0, 3).unwrap();
        assert_eq!(fenwick.get(0).unwrap(), 3, "set below the current value");
        assert_eq!(fenwick.total(), 6);

        fenwick.set(-1, 0).unwrap();
        fenwick.set(1, 9).unwrap();
        assert_eq!(fenwick.to_vec(), [3, 9, 0]);
        assert_eq!(fenwick.sum(1..).unwrap(), 9);

        let mut rng = StdRng::seed_from_u64(29);
        let mut naive = vec![0u32; 12];
        let mut fenwick = FenwickTree::new(12).unwrap();
        for _ in 0..200 {
            let i = rng.gen_range(0..12);
            let v = rng.gen_range(0..100);
            naive[i] = v;
            fenwick.set(i as isize, v).unwrap();
            assert_eq!(fenwick.get(i as isize).unwrap(), v, "set then get");
            assert_eq!(fenwick.total(), naive.iter().sum::<u32>());
        }
    }

    #[test]
    fn lower_bound_finds_prefix() {
        let fenwick = FenwickTree::from_values([3u32, 0, 2, 5, 1]).unwrap();

        assert_eq!(fenwick.lower_bound(0), Some(0));
        assert_eq!(fenwick.lower_bound(1), Some(1));
        assert_eq!(fenwick.lower_bound(3), Some(1));
        assert_eq!(fenwick.lower_bound(4), Some(3), "skips the zero element");
        assert_eq!(fenwick.lower_bound(10), Some(4));
        assert_eq!(fenwick.lower_bound(11), Some(5));
        assert_eq!(fenwick.lower_bound(12), None, "target beyond total");
    }

    #[test]
    fn floats() {
        let mut fenwick = FenwickTree::from_values([0.5, 1.5, 2.0]).unwrap();
        fenwick.add(1, 0.25).unwrap();
        assert_eq!(fenwick.total(), 4.25);
        assert_eq!(fenwick.get(1).unwrap(), 1.75);
    }

    #[test]
    fn errors() {
        assert_eq!(
            FenwickTree::<i32>::new(0),
            Err(Error::Initialization { size: 0 })
        );
        assert!(FenwickTree::<i32>::from_values([]).is_err());

        let mut fenwick = FenwickTree::<i32>::new(5).unwrap();
        assert_eq!(fenwick.get(5), Err(Error::Index { index: 5, size: 5 }));
        assert_eq!(fenwick.add(7, 1), Err(Error::Index { index: 7, size: 5 }));
        assert_eq!(
            fenwick.sum(3..1),
            Err(Error::Range {
                left: 3,
                right: 1,
                size: 5
            })
        );
        assert!(fenwick.prefix_sum(6).is_err());
        assert!(fenwick.prefix_sum(-1).is_err(), "prefix bounds are not wrapped");
        assert_eq!(fenwick.prefix_sum(5), Ok(0));
    }
}
