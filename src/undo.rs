// Bounded undo history: full canvas copies, newest on top.
// When full, the oldest copy falls off the bottom.

use std::collections::VecDeque;

use crate::types::PixelBuffer;

pub const DEFAULT_UNDO_CAPACITY: usize = 20;

pub struct UndoStack {
    snapshots: VecDeque<PixelBuffer>, // front = oldest, back = most recent
    capacity: usize,
}

impl UndoStack {
    pub fn new(capacity: usize) -> Self {
        Self { snapshots: VecDeque::with_capacity(capacity.min(64)), capacity }
    }

    /// Copy `buffer` before it gets mutated.
    pub fn push_snapshot(&mut self, buffer: &PixelBuffer) {
        self.push(buffer.clone());
    }

    /// Take ownership of a copy made earlier (e.g. before a fill we weren't
    /// sure would change anything).
    pub fn push(&mut self, snapshot: PixelBuffer) {
        if self.capacity == 0 {
            return;
        }
        while self.snapshots.len() >= self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
        tracing::debug!(depth = self.snapshots.len(), "undo snapshot pushed");
    }

    /// Put the most recent snapshot back into `buffer`.
    /// Returns false (and leaves `buffer` alone) when there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut PixelBuffer) -> bool {
        match self.snapshots.pop_back() {
            Some(snapshot) => {
                *buffer = snapshot;
                tracing::debug!(depth = self.snapshots.len(), "undo restored snapshot");
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1x1 buffer whose red channel records which push it was.
    fn marked(n: u8) -> PixelBuffer {
        PixelBuffer::from_pixel(1, 1, image::Rgba([n, 0, 0, 255]))
    }

    fn mark(buf: &PixelBuffer) -> u8 {
        buf.get_pixel(0, 0).0[0]
    }

    #[test]
    fn undo_restores_previous_state_exactly() {
        let mut stack = UndoStack::default();
        let mut buf = PixelBuffer::from_fn(3, 2, |x, y| image::Rgba([x as u8, y as u8, 7, 255]));
        let before = buf.clone();

        stack.push_snapshot(&buf);
        buf.put_pixel(1, 1, image::Rgba([9, 9, 9, 9]));
        assert_ne!(buf, before);

        assert!(stack.undo(&mut buf));
        assert_eq!(buf.as_raw(), before.as_raw());
        assert!(stack.is_empty());
    }

    #[test]
    fn undo_on_empty_is_a_no_op() {
        let mut stack = UndoStack::new(5);
        let mut buf = marked(42);
        assert!(!stack.undo(&mut buf));
        assert_eq!(mark(&buf), 42);
    }

    #[test]
    fn twenty_five_pushes_leave_twenty_undos() {
        let mut stack = UndoStack::new(20);
        for n in 0..25 {
            stack.push_snapshot(&marked(n));
        }
        assert_eq!(stack.len(), 20);

        let mut buf = marked(255);
        for expected in (5..25).rev() {
            assert!(stack.undo(&mut buf));
            assert_eq!(mark(&buf), expected);
        }
        // Pushes 0..5 were evicted.
        assert!(!stack.undo(&mut buf));
        assert_eq!(mark(&buf), 5);
    }

    #[test]
    fn length_tracks_min_of_capacity_and_pushes() {
        let mut stack = UndoStack::new(3);
        for n in 0..6u8 {
            stack.push_snapshot(&marked(n));
            assert_eq!(stack.len(), (n as usize + 1).min(3));
        }
        stack.clear();
        assert!(stack.is_empty());
        stack.push_snapshot(&marked(1));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut stack = UndoStack::new(0);
        stack.push_snapshot(&marked(1));
        assert_eq!(stack.len(), 0);
        assert!(!stack.undo(&mut marked(2)));
    }

    #[test]
    fn undo_restores_a_different_size() {
        let mut stack = UndoStack::default();
        let mut buf = PixelBuffer::new(4, 4);
        stack.push_snapshot(&buf);
        buf = PixelBuffer::new(8, 2);
        assert!(stack.undo(&mut buf));
        assert_eq!(buf.dimensions(), (4, 4));
    }
}
