//! Array-backed trees for O(log n) range aggregation under mutation
//!
//! - [`SegmentTree`](ds::SegmentTree): any associative operation with an identity, with
//!   point updates, range products and monotonic boundary search
//! - [`FenwickTree`](ds::FenwickTree): additive point updates and range sums
//! - [`RangeAddFenwickTree`](ds::RangeAddFenwickTree): additive range updates and range sums
//!
//! Indices may be negative, counting from the end, and ranges are half-open.
//!
//! ```
//! use segee::ds::{MinSegmentTree, RangeAddFenwickTree};
//!
//! let mut tree = MinSegmentTree::from_values([10, 5, 20, 7, 9])?;
//! assert_eq!(tree.minimum(0..2)?, 5);
//! tree.set(-1, 1)?;
//! assert_eq!(tree.minimum(2..)?, 1);
//!
//! let mut fenwick = RangeAddFenwickTree::new(4)?;
//! fenwick.add(1..3, 2)?;
//! assert_eq!(fenwick.sum(..)?, 4);
//! # Ok::<(), segee::Error>(())
//! ```

/// Data structures
pub mod ds;

/// Error types
pub mod error;

/// Capabilities required of element types
pub mod traits;

mod util;

pub use error::{Error, Result};
