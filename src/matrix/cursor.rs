//! Single-pass element cursor
//!
//! An explicit state machine over the column-major element sequence:
//! `BeforeStart -> At(0) -> ... -> At(count - 1) -> Exhausted`. Reading the
//! current element outside the `At` states is an invalid-state error, and
//! `reset` returns to `BeforeStart`. The cursor holds no resource beyond
//! the borrow of its matrix.

use super::core::Matrix;
use crate::error::{Error, Result};
use crate::scalar::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    BeforeStart,
    At(usize),
    Exhausted,
}

/// A stateful cursor over a matrix's elements in column-major order
#[derive(Debug, Clone)]
pub struct ElementCursor<'a, T: Scalar> {
    matrix: &'a Matrix<T>,
    state: CursorState,
}

impl<'a, T: Scalar> ElementCursor<'a, T> {
    pub(crate) fn new(matrix: &'a Matrix<T>) -> Self {
        Self {
            matrix,
            state: CursorState::BeforeStart,
        }
    }

    /// Advance to the next element; returns false once past the last one
    pub fn move_next(&mut self) -> bool {
        let count = self.matrix.count();
        self.state = match self.state {
            CursorState::BeforeStart => {
                if count == 0 {
                    CursorState::Exhausted
                } else {
                    CursorState::At(0)
                }
            }
            CursorState::At(i) => {
                if i + 1 < count {
                    CursorState::At(i + 1)
                } else {
                    CursorState::Exhausted
                }
            }
            CursorState::Exhausted => CursorState::Exhausted,
        };
        matches!(self.state, CursorState::At(_))
    }

    /// The element under the cursor
    ///
    /// # Errors
    ///
    /// Fails with an invalid-state error before the first successful
    /// `move_next` or after the cursor is exhausted.
    pub fn current(&self) -> Result<T> {
        match self.state {
            CursorState::At(i) => {
                let r = i % self.matrix.nrows();
                let c = i / self.matrix.nrows();
                Ok(self.matrix.at(r, c))
            }
            _ => Err(Error::InvalidCursorState),
        }
    }

    /// Return to the before-first-element state
    pub fn reset(&mut self) {
        self.state = CursorState::BeforeStart;
    }
}

/// Plain iterator adapter over a matrix's elements in column-major order
#[derive(Debug, Clone)]
pub struct Elements<'a, T: Scalar> {
    matrix: &'a Matrix<T>,
    next: usize,
}

impl<T: Scalar> Iterator for Elements<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.next >= self.matrix.count() {
            return None;
        }
        let r = self.next % self.matrix.nrows();
        let c = self.next / self.matrix.nrows();
        self.next += 1;
        Some(self.matrix.at(r, c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.matrix.count() - self.next;
        (remaining, Some(remaining))
    }
}

impl<T: Scalar> ExactSizeIterator for Elements<'_, T> {}

impl<T: Scalar> Matrix<T> {
    /// A cursor over the elements in column-major order
    pub fn cursor(&self) -> ElementCursor<'_, T> {
        ElementCursor::new(self)
    }

    /// An iterator over the elements in column-major order
    pub fn iter(&self) -> Elements<'_, T> {
        Elements {
            matrix: self,
            next: 0,
        }
    }
}
