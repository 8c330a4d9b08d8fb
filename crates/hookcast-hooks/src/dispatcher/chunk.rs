//! Splitting hook lists into fixed-size groups

use std::num::NonZeroUsize;

use crate::error::{HooksError, Result};

/// Split `items` into consecutive groups of `size`
///
/// The last group holds the remainder. Order is preserved within and across
/// groups, and an empty input yields no groups at all.
///
/// # Errors
///
/// Returns `HooksError::InvalidArgument` when `size` is zero.
///
/// # Examples
///
/// ```ignore
/// let groups = chunk(vec![1, 2, 3, 4, 5], 2)?;
/// assert_eq!(groups, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn chunk<T>(items: Vec<T>, size: usize) -> Result<Vec<Vec<T>>> {
    let size = NonZeroUsize::new(size).ok_or_else(|| {
        HooksError::InvalidArgument("chunk size must be at least 1".to_string())
    })?;
    Ok(chunk_by(items, size))
}

/// Infallible form of [`chunk`] for an already validated size
pub(crate) fn chunk_by<T>(items: Vec<T>, size: NonZeroUsize) -> Vec<Vec<T>> {
    let size = size.get();
    let mut groups = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter().peekable();

    while iter.peek().is_some() {
        groups.push(iter.by_ref().take(size).collect());
    }

    groups
}
