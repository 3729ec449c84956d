mod fenwick;
mod range_add;
mod segment_tree;
mod specialized;

pub use fenwick::FenwickTree;
pub use range_add::RangeAddFenwickTree;
pub use segment_tree::SegmentTree;
pub use specialized::{Combine, MaxSegmentTree, MinSegmentTree, SumSegmentTree};
