use std::ops::{Deref, DerefMut, RangeBounds};

use crate::{
    error::Result,
    traits::{Additive, Infinity, NegativeInfinity},
};

use super::SegmentTree;

/// Combining function stored by the specialized trees
pub type Combine<T> = fn(&T, &T) -> T;

fn add<T: Additive>(a: &T, b: &T) -> T {
    *a + *b
}

fn min<T: PartialOrd + Copy>(a: &T, b: &T) -> T {
    if b < a {
        *b
    } else {
        *a
    }
}

fn max<T: PartialOrd + Copy>(a: &T, b: &T) -> T {
    if b > a {
        *b
    } else {
        *a
    }
}

/// Derefs a specialized tree to the `SegmentTree` it wraps
macro_rules! deref_segment_tree {
    ($name:ident) => {
        impl<T> Deref for $name<T> {
            type Target = SegmentTree<T, Combine<T>>;

            fn deref(&self) -> &Self::Target {
                &self.tree
            }
        }

        impl<T> DerefMut for $name<T> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.tree
            }
        }
    };
}

/// A `SegmentTree` over `+` with identity zero
///
/// ### Example
/// ```
/// use segee::ds::SumSegmentTree;
///
/// let mut tree = SumSegmentTree::new(5)?;
/// tree.set(0, 10)?;
/// tree.set(1, 20)?;
/// assert_eq!(tree.sum(0..2)?, 30);
/// assert_eq!(tree.total(), 30);
/// # Ok::<(), segee::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SumSegmentTree<T> {
    tree: SegmentTree<T, Combine<T>>,
}

impl<T: Additive> SumSegmentTree<T> {
    pub fn new(size: usize) -> Result<Self> {
        let tree = SegmentTree::new(size, T::zero(), add::<T> as Combine<T>)?;
        Ok(Self { tree })
    }

    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Result<Self> {
        let tree = SegmentTree::from_values(values, T::zero(), add::<T> as Combine<T>)?;
        Ok(Self { tree })
    }

    /// Sum of a half-open range
    pub fn sum<R: RangeBounds<isize>>(&self, range: R) -> Result<T> {
        self.tree.prod(range)
    }

    /// Sum of every element
    pub fn total(&self) -> T {
        *self.tree.all_prod()
    }
}

deref_segment_tree!(SumSegmentTree);

/// A `SegmentTree` over `min`, with an infinite identity
#[derive(Debug, Clone)]
pub struct MinSegmentTree<T> {
    tree: SegmentTree<T, Combine<T>>,
}

impl<T: PartialOrd + Copy + Infinity> MinSegmentTree<T> {
    pub fn new(size: usize) -> Result<Self> {
        let tree = SegmentTree::new(size, T::infinity(), min::<T> as Combine<T>)?;
        Ok(Self { tree })
    }

    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Result<Self> {
        let tree = SegmentTree::from_values(values, T::infinity(), min::<T> as Combine<T>)?;
        Ok(Self { tree })
    }

    /// Smallest element of a half-open range, or the identity if it is empty
    pub fn minimum<R: RangeBounds<isize>>(&self, range: R) -> Result<T> {
        self.tree.prod(range)
    }

    pub fn min_all(&self) -> T {
        *self.tree.all_prod()
    }
}

deref_segment_tree!(MinSegmentTree);

/// A `SegmentTree` over `max`, with a negative infinite identity
#[derive(Debug, Clone)]
pub struct MaxSegmentTree<T> {
    tree: SegmentTree<T, Combine<T>>,
}

impl<T: PartialOrd + Copy + NegativeInfinity> MaxSegmentTree<T> {
    pub fn new(size: usize) -> Result<Self> {
        let tree = SegmentTree::new(size, T::neg_infinity(), max::<T> as Combine<T>)?;
        Ok(Self { tree })
    }

    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Result<Self> {
        let tree = SegmentTree::from_values(values, T::neg_infinity(), max::<T> as Combine<T>)?;
        Ok(Self { tree })
    }

    /// Largest element of a half-open range, or the identity if it is empty
    pub fn maximum<R: RangeBounds<isize>>(&self, range: R) -> Result<T> {
        self.tree.prod(range)
    }

    pub fn max_all(&self) -> T {
        *self.tree.all_prod()
    }
}

deref_segment_tree!(MaxSegmentTree);
