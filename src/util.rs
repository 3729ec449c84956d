use std::ops::{Bound, RangeBounds};

use crate::error::{Error, Result};

/// Wraps a negative position so that `-1` is the last element
pub(crate) fn wrap(index: isize, size: usize) -> isize {
    if index < 0 {
        index.saturating_add(size as isize)
    } else {
        index
    }
}

/// Normalizes a single element index into `[0, size)`
///
/// ### Example
/// ```ignore
/// assert_eq!(normalize_index(-1, 4), Ok(3));
/// ```
pub(crate) fn normalize_index(index: isize, size: usize) -> Result<usize> {
    let index = wrap(index, size);
    if index >= 0 && (index as usize) < size {
        Ok(index as usize)
    } else {
        Err(Error::Index { index, size })
    }
}

/// Normalizes a half-open range into `(left, right)` with `0 <= left <= right <= size`
///
/// Omitted bounds default to `0` and `size`. Negative bounds are wrapped before an
/// inclusive end is turned into an exclusive one, so `..=-1` covers the whole sequence.
pub(crate) fn normalize_range<R: RangeBounds<isize>>(
    range: R,
    size: usize,
) -> Result<(usize, usize)> {
    let left = match range.start_bound() {
        Bound::Included(&l) => wrap(l, size),
        Bound::Excluded(&l) => wrap(l, size).saturating_add(1),
        Bound::Unbounded => 0,
    };
    let right = match range.end_bound() {
        Bound::Included(&r) => wrap(r, size).saturating_add(1),
        Bound::Excluded(&r) => wrap(r, size),
        Bound::Unbounded => size as isize,
    };
    check_range(left, right, size)
}

/// Validates already-normalized bounds
pub(crate) fn check_range(left: isize, right: isize, size: usize) -> Result<(usize, usize)> {
    if 0 <= left && left <= right && right <= size as isize {
        Ok((left as usize, right as usize))
    } else {
        Err(Error::Range { left, right, size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_normalization() {
        assert_eq!(normalize_index(0, 4), Ok(0));
        assert_eq!(normalize_index(-1, 4), Ok(3), "negative index wraps");
        assert_eq!(normalize_index(-4, 4), Ok(0));
        assert_eq!(
            normalize_index(4, 4),
            Err(Error::Index { index: 4, size: 4 }),
            "index equal to size is rejected"
        );
        assert_eq!(
            normalize_index(-5, 4),
            Err(Error::Index { index: -1, size: 4 }),
            "error carries the normalized index"
        );
    }

    #[test]
    fn range_normalization() {
        assert_eq!(normalize_range(.., 5), Ok((0, 5)), "full range");
        assert_eq!(normalize_range(2.., 5), Ok((2, 5)));
        assert_eq!(normalize_range(..3, 5), Ok((0, 3)));
        assert_eq!(normalize_range(1..=3, 5), Ok((1, 4)), "inclusive end");
        assert_eq!(normalize_range(-2.., 5), Ok((3, 5)), "negative start wraps");
        assert_eq!(normalize_range(..=-1, 5), Ok((0, 5)), "inclusive negative end");
        assert_eq!(normalize_range(2..2, 5), Ok((2, 2)), "empty range is valid");
        assert_eq!(
            normalize_range(3..1, 5),
            Err(Error::Range {
                left: 3,
                right: 1,
                size: 5
            })
        );
        assert!(normalize_range(0..6, 5).is_err(), "right past the end");
        assert!(normalize_range(-6..2, 5).is_err(), "left before the start");
    }

    #[test]
    fn wrap_keeps_out_of_range_values() {
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(-6, 5), -1, "still negative after one wrap");
        assert_eq!(wrap(7, 5), 7, "positive values are untouched");
    }
}
