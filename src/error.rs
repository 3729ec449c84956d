/// Errors returned by the range query structures
///
/// All three kinds describe a misuse by the caller. They are reported before any
/// mutation takes place, so a failed call leaves the structure untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The structure could not be built with the requested size
    #[error("cannot initialize a structure of size {size}")]
    Initialization { size: usize },

    /// A single index fell outside `[0, size)` after normalization
    #[error("index {index} is out of range for size {size}")]
    Index { index: isize, size: usize },

    /// A range violated `0 <= left <= right <= size` after normalization
    #[error("range [{left}, {right}) is invalid for size {size}")]
    Range {
        left: isize,
        right: isize,
        size: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
