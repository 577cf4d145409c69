//! Errors shared by the buffer, run array, and sort modules.

/// Error returned by fallible buffer and run array operations.
///
/// Every operation checks its indices before touching any storage, so an
/// error always means nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A single index was outside `0..len`.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A range violated `begin <= end <= len`.
    #[error("invalid range {begin}..{end} for length {len}")]
    InvalidRange { begin: usize, end: usize, len: usize },

    /// A buffer configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check that `index` lies in `0..len`.
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(Error::IndexOutOfBounds { index, len });
    }
    return Ok(());
}

/// Check that `begin..end` lies in `0..=len`.
#[inline]
pub(crate) fn check_range(begin: usize, end: usize, len: usize) -> Result<()> {
    if begin > end || end > len {
        return Err(Error::InvalidRange { begin, end, len });
    }
    return Ok(());
}

/// Compute `offset + size` as a range end, rejecting overflow.
#[inline]
pub(crate) fn range_end(offset: usize, size: usize, len: usize) -> Result<usize> {
    let end = offset.checked_add(size).ok_or(Error::InvalidRange {
        begin: offset,
        end: usize::MAX,
        len,
    })?;
    check_range(offset, end, len)?;
    return Ok(end);
}
