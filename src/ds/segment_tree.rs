#![allow(clippy::len_without_is_empty)]
use std::{fmt, ops::Index, ops::RangeBounds};

use log::trace;

use crate::{
    error::{Error, Result},
    util::{check_range, normalize_index, normalize_range, wrap},
};

/// A binary tree stored in an array where each parent node is the combination of its child nodes
///
/// The combining operation must be associative and `identity` must be its two-sided identity.
/// Neither is checked. The operation does not need to be commutative: every query combines
/// elements strictly left to right.
///
/// Node `1` is the root, node `k` has children `2k` and `2k + 1`, and element `i` lives in
/// leaf `capacity + i`. Leaves past `len()` hold `identity` forever.
///
/// ### Example
/// ```
/// use segee::ds::SegmentTree;
///
/// let mut tree = SegmentTree::new(4, 0, |a: &i32, b: &i32| a + b)?;
/// tree.set(1, 5)?;
/// tree.set(-1, 2)?;
/// assert_eq!(tree.prod(..)?, 7);
/// assert_eq!(tree.max_right(0, |&s| s < 7)?, 3);
/// # Ok::<(), segee::Error>(())
/// ```
#[derive(Clone)]
pub struct SegmentTree<T, F> {
    tree: Vec<T>,
    size: usize,
    capacity: usize,
    identity: T,
    op: F,
}

impl<T, F> SegmentTree<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Initialize a new `SegmentTree` of `size` elements, all equal to `identity`
    pub fn new(size: usize, identity: T, op: F) -> Result<Self> {
        if size == 0 {
            return Err(Error::Initialization { size });
        }

        let capacity = size.next_power_of_two();
        trace!("segment tree of size {size} with capacity {capacity}");
        Ok(Self {
            tree: vec![identity.clone(); 2 * capacity],
            size,
            capacity,
            identity,
            op,
        })
    }

    /// Build a `SegmentTree` holding `values` in O(n)
    pub fn from_values<I>(values: I, identity: T, op: F) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let mut tree = Self::new(values.len(), identity, op)?;

        let capacity = tree.capacity;
        for (leaf, value) in tree.tree[capacity..].iter_mut().zip(values) {
            *leaf = value;
        }
        for k in (1..capacity).rev() {
            tree.pull(k);
        }

        Ok(tree)
    }

    /// Recompute node `k` from its children
    fn pull(&mut self, k: usize) {
        self.tree[k] = (self.op)(&self.tree[2 * k], &self.tree[2 * k + 1]);
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.size
    }

    /// Number of leaves, the smallest power of two not below `len()`
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn identity(&self) -> &T {
        &self.identity
    }

    /// Update the value at a provided index, negative indices counting from the end
    pub fn set(&mut self, index: isize, value: T) -> Result<()> {
        let index = normalize_index(index, self.size)?;
        let mut k = index + self.capacity;
        self.tree[k] = value;

        while k > 1 {
            k >>= 1;
            self.pull(k);
        }
        Ok(())
    }

    /// Get the value at a provided index, negative indices counting from the end
    pub fn get(&self, index: isize) -> Result<&T> {
        let index = normalize_index(index, self.size)?;
        Ok(&self.tree[index + self.capacity])
    }

    /// Replace the value at `index` with `f` applied to it
    pub fn update<U>(&mut self, index: isize, f: U) -> Result<()>
    where
        U: FnOnce(&T) -> T,
    {
        let value = f(self.get(index)?);
        self.set(index, value)
    }

    /// Combine the elements of a half-open range, left to right
    ///
    /// An empty range yields the identity.
    pub fn prod<R: RangeBounds<isize>>(&self, range: R) -> Result<T> {
        let (left, right) = normalize_range(range, self.size)?;

        let mut l = left + self.capacity;
        let mut r = right + self.capacity;
        let mut left_acc = self.identity.clone();
        let mut right_acc = self.identity.clone();

        while l < r {
            if l & 1 == 1 {
                left_acc = (self.op)(&left_acc, &self.tree[l]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                right_acc = (self.op)(&self.tree[r], &right_acc);
            }
            l >>= 1;
            r >>= 1;
        }

        Ok((self.op)(&left_acc, &right_acc))
    }

    /// Combination of every element
    pub fn all_prod(&self) -> &T {
        &self.tree[1]
    }

    /// Find the largest `r` in `[left, len()]` such that `pred(prod(left..r))` holds
    ///
    /// `pred` must hold for the identity and, once false, must stay false as the range grows.
    /// The result for any other predicate is unspecified.
    pub fn max_right<P>(&self, left: isize, mut pred: P) -> Result<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let (left, _) = check_range(wrap(left, self.size), self.size as isize, self.size)?;
        if left == self.size {
            return Ok(self.size);
        }

        let mut l = left + self.capacity;
        let mut acc = self.identity.clone();
        loop {
            while l % 2 == 0 {
                l >>= 1;
            }

            let next = (self.op)(&acc, &self.tree[l]);
            if !pred(&next) {
                // the boundary is inside node `l`
                while l < self.capacity {
                    l *= 2;
                    let next = (self.op)(&acc, &self.tree[l]);
                    if pred(&next) {
                        acc = next;
                        l += 1;
                    }
                }
                return Ok(l - self.capacity);
            }

            acc = next;
            l += 1;
            if l.is_power_of_two() {
                break;
            }
        }

        Ok(self.size)
    }

    /// Find the smallest `l` in `[0, right]` such that `pred(prod(l..right))` holds
    ///
    /// `pred` must hold for the identity and, once false, must stay false as the range grows
    /// leftward. The result for any other predicate is unspecified.
    pub fn min_left<P>(&self, right: isize, mut pred: P) -> Result<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let (_, right) = check_range(0, wrap(right, self.size), self.size)?;
        if right == 0 {
            return Ok(0);
        }

        let mut r = right + self.capacity;
        let mut acc = self.identity.clone();
        loop {
            r -= 1;
            while r > 1 && r % 2 == 1 {
                r >>= 1;
            }

            let next = (self.op)(&self.tree[r], &acc);
            if !pred(&next) {
                while r < self.capacity {
                    r = 2 * r + 1;
                    let next = (self.op)(&self.tree[r], &acc);
                    if pred(&next) {
                        acc = next;
                        r -= 1;
                    }
                }
                return Ok(r + 1 - self.capacity);
            }

            acc = next;
            if r.is_power_of_two() {
                break;
            }
        }

        Ok(0)
    }

    /// Copy out the elements of a half-open range
    pub fn get_range<R: RangeBounds<isize>>(&self, range: R) -> Result<Vec<T>> {
        let (left, right) = normalize_range(range, self.size)?;
        Ok(self.tree[self.capacity + left..self.capacity + right].to_vec())
    }

    /// Overwrite consecutive elements starting at `start`
    ///
    /// The whole target range is validated before anything is written, and every affected
    /// ancestor is recomputed once.
    pub fn set_range<I>(&mut self, start: isize, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let start = wrap(start, self.size);
        let end = start.saturating_add(values.len() as isize);
        let (left, right) = check_range(start, end, self.size)?;
        if left == right {
            return Ok(());
        }
        trace!("writing {} elements at [{left}, {right})", values.len());

        let capacity = self.capacity;
        for (leaf, value) in self.tree[capacity + left..capacity + right].iter_mut().zip(values) {
            *leaf = value;
        }

        let mut lo = (capacity + left) >> 1;
        let mut hi = (capacity + right - 1) >> 1;
        while lo > 0 {
            for k in lo..=hi {
                self.pull(k);
            }
            lo >>= 1;
            hi >>= 1;
        }
        Ok(())
    }

    /// Iterate over the elements in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.tree[self.capacity..self.capacity + self.size].iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Check whether any element equals `value`
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }
}

impl<T, F> Index<usize> for SegmentTree<T, F> {
    type Output = T;

    /// **Panics** if `index >= len()`
    fn index(&self, index: usize) -> &Self::Output {
        assert!(
            index < self.size,
            "index {index} is out of range for size {}",
            self.size
        );
        &self.tree[self.capacity + index]
    }
}

impl<T: fmt::Debug, F> fmt::Debug for SegmentTree<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(&self.tree[self.capacity..self.capacity + self.size])
            .finish()
    }
}
