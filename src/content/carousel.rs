//! Index arithmetic for carousels over a collection that may shrink.

/// A usable index for a collection of `len` items.
///
/// An index that fell off the end (because items were deleted) snaps back to
/// the first item. Empty collections have no index.
pub fn clamp_index(index: usize, len: usize) -> Option<usize> {
    match len {
        0 => None,
        _ if index >= len => Some(0),
        _ => Some(index),
    }
}

/// Index after advancing one step, wrapping to the start.
pub fn next_index(index: usize, len: usize) -> Option<usize> {
    clamp_index(index, len).map(|i| (i + 1) % len)
}

/// Index after stepping back once, wrapping to the end.
pub fn prev_index(index: usize, len: usize) -> Option<usize> {
    clamp_index(index, len).map(|i| (i + len - 1) % len)
}
