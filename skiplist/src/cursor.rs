//! Forward-only traversal with removal of the element last yielded.

use crate::error::SkipListError;
use crate::level_generator::LevelGenerator;
use crate::ordered_skiplist::OrderedSkipList;
use crate::skipnode::{NodeId, HEAD, TAIL};

/// Where a cursor stands in its traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing has been yielded yet.
    Fresh,
    /// At least one element has been yielded.
    Advanced,
    /// An `advance` found nothing left to yield.
    Exhausted,
}

/// A cursor over an `OrderedSkipList`, obtained through `OrderedSkipList::cursor`.
///
/// Unlike an iterator, the cursor borrows the list mutably, so that the element it last yielded
/// can be removed with `remove_current` without invalidating the traversal.
pub struct Cursor<'a, T, G> {
    list: &'a mut OrderedSkipList<T, G>,
    current: NodeId,
    state: CursorState,
    removable: bool,
}

impl<'a, T, G> Cursor<'a, T, G>
where
    G: LevelGenerator,
{
    pub(crate) fn new(list: &'a mut OrderedSkipList<T, G>) -> Self {
        Cursor {
            list,
            current: HEAD,
            state: CursorState::Fresh,
            removable: false,
        }
    }

    #[inline]
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Whether `advance` would yield another element.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.list.nodes[self.current].links[0] != TAIL
    }

    /// Moves to the next element and returns it.
    ///
    /// Returns `Ok(None)` the first time there is nothing left, which exhausts the cursor;
    /// advancing an exhausted cursor is an `EndOfSequence` error.
    pub fn advance(&mut self) -> Result<Option<&T>, SkipListError> {
        if self.state == CursorState::Exhausted {
            return Err(SkipListError::EndOfSequence);
        }
        let next = self.list.nodes[self.current].links[0];
        if next == TAIL {
            self.state = CursorState::Exhausted;
            self.removable = false;
            return Ok(None);
        }

        self.current = next;
        self.removable = true;
        self.state = CursorState::Advanced;
        Ok(self.list.value(next))
    }

    /// Removes the element returned by the last call to `advance` and returns it.  The cursor
    /// steps back onto the previous element so the next `advance` yields the removed element's
    /// successor.
    ///
    /// Only one removal is allowed per successful `advance`; any other call is an
    /// `IllegalCursorState` error and leaves the list untouched.
    pub fn remove_current(&mut self) -> Result<T, SkipListError> {
        if !self.removable {
            return Err(SkipListError::IllegalCursorState);
        }
        let (path, prev) = {
            let node = &self.list.nodes[self.current];
            let value = node
                .value
                .as_ref()
                .ok_or(SkipListError::IllegalCursorState)?;
            (self.list.locate(value), node.prev.unwrap_or(HEAD))
        };
        let id = self.current;
        let removed = self
            .list
            .unlink(path, id)
            .ok_or(SkipListError::IllegalCursorState)?;

        self.current = prev;
        self.removable = false;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::CursorState;
    use crate::error::SkipListError;
    use crate::ordered_skiplist::OrderedSkipList;

    #[test]
    fn walk() {
        let mut sl = OrderedSkipList::seeded(1);
        sl.extend(0..5);
        let mut cursor = sl.cursor();
        assert_eq!(cursor.state(), CursorState::Fresh);
        for i in 0..5 {
            assert!(cursor.has_next());
            assert_eq!(cursor.advance(), Ok(Some(&i)));
        }
        assert_eq!(cursor.state(), CursorState::Advanced);
        assert!(!cursor.has_next());
        assert_eq!(cursor.advance(), Ok(None));
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert_eq!(cursor.advance(), Err(SkipListError::EndOfSequence));
    }

    #[test]
    fn empty() {
        let mut sl: OrderedSkipList<i32> = OrderedSkipList::seeded(2);
        let mut cursor = sl.cursor();
        assert!(!cursor.has_next());
        assert_eq!(cursor.advance(), Ok(None));
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert_eq!(cursor.advance(), Err(SkipListError::EndOfSequence));
        assert_eq!(cursor.remove_current(), Err(SkipListError::IllegalCursorState));
    }

    #[test]
    fn remove_even_positions() {
        let mut sl = OrderedSkipList::seeded(3);
        sl.extend(1..=20);
        {
            let mut cursor = sl.cursor();
            let mut position = 0;
            while cursor.has_next() {
                cursor.advance().unwrap();
                position += 1;
                if position % 2 == 0 {
                    cursor.remove_current().unwrap();
                }
            }
        }
        sl.check();
        assert_eq!(
            sl.iter().cloned().collect::<Vec<_>>(),
            (1..=20).filter(|i| i % 2 == 1).collect::<Vec<_>>()
        );
    }

    #[test]
    fn remove_requires_advance() {
        let mut sl = OrderedSkipList::seeded(4);
        sl.extend(0..3);
        let mut cursor = sl.cursor();
        assert_eq!(cursor.remove_current(), Err(SkipListError::IllegalCursorState));
        cursor.advance().unwrap();
        assert_eq!(cursor.remove_current(), Ok(0));
        assert_eq!(cursor.remove_current(), Err(SkipListError::IllegalCursorState));
        assert_eq!(cursor.advance(), Ok(Some(&1)));
    }

    #[test]
    fn remove_last() {
        let mut sl = OrderedSkipList::seeded(5);
        sl.extend(0..3);
        {
            let mut cursor = sl.cursor();
            while let Ok(Some(_)) = cursor.advance() {}
            // The final element was yielded by the advance before the one returning `None`.
            assert_eq!(cursor.remove_current(), Err(SkipListError::IllegalCursorState));
        }
        {
            let mut cursor = sl.cursor();
            for _ in 0..3 {
                cursor.advance().unwrap();
            }
            assert_eq!(cursor.state(), CursorState::Advanced);
            assert_eq!(cursor.remove_current(), Ok(2));
            assert_eq!(cursor.advance(), Ok(None));
        }
        sl.check();
        assert_eq!(sl.last(), Some(&1));
    }

    #[test]
    fn drain_everything() {
        let mut sl = OrderedSkipList::seeded(6);
        sl.extend(0..200);
        {
            let mut cursor = sl.cursor();
            while cursor.has_next() {
                cursor.advance().unwrap();
                cursor.remove_current().unwrap();
            }
        }
        sl.check();
        assert!(sl.is_empty());
        assert_eq!(sl.first(), None);
    }
}
