//! Manual section reordering (drag-and-drop, keyboard moves, API calls).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("index {index} is out of range for {len} sections")]
    OutOfRange { index: usize, len: usize },
}

/// Moves the element at `from` so it ends up at position `to`.
///
/// Returns a new list; the input is left untouched so a half-applied move is never
/// observable. Only the position changes, never the membership.
pub fn reorder<T: Clone>(list: &[T], from: usize, to: usize) -> Result<Vec<T>, ReorderError> {
    let len = list.len();
    for index in [from, to] {
        if index >= len {
            return Err(ReorderError::OutOfRange { index, len });
        }
    }

    let mut out = list.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    Ok(out)
}
