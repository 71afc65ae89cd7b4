//! Insertion-ordered, unique-membership sequence used for sibling layers.
//!
//! Paint and traversal order is exactly collection order, so reordering is a
//! positional move over a plain `Vec` rather than a priority field.

use thiserror::Error;

/// A reorder index fell outside `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for collection of {len}")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// An ordered set of `Copy` handles. Membership is tested by equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSet<T> {
    items: Vec<T>,
}

impl<T: Copy + PartialEq> OrderedSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append `item`. Returns `false` (and leaves the order alone) if it is
    /// already present.
    pub fn add(&mut self, item: T) -> bool {
        if self.contains(item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove `item`, keeping the order of the remainder. Returns whether it
    /// was present.
    pub fn delete(&mut self, item: T) -> bool {
        match self.index_of(item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Position of `item`, if present.
    pub fn index_of(&self, item: T) -> Option<usize> {
        self.items.iter().position(|&candidate| candidate == item)
    }

    /// Whether `item` is a member.
    pub fn contains(&self, item: T) -> bool {
        self.items.contains(&item)
    }

    /// Relocate the element at `old_index` to `new_index`, shifting the
    /// elements in between.
    pub fn move_item(&mut self, old_index: usize, new_index: usize) -> Result<(), IndexOutOfRange> {
        let len = self.items.len();
        for index in [old_index, new_index] {
            if index >= len {
                return Err(IndexOutOfRange { index, len });
            }
        }
        let item = self.items.remove(old_index);
        self.items.insert(new_index, item);
        Ok(())
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).copied()
    }

    /// The members in order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate members in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = T> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every member, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Copy + PartialEq> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.add(item);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(items: &[u32]) -> OrderedSet<u32> {
        items.iter().copied().collect()
    }

    #[test]
    fn add_preserves_insertion_order() {
        let set = set_of(&[3, 1, 2]);
        assert_eq!(set.as_slice(), &[3, 1, 2]);
    }

    #[test]
    fn add_duplicate_is_noop() {
        let mut set = set_of(&[1, 2]);
        assert!(!set.add(1));
        assert_eq!(set.as_slice(), &[1, 2]);
    }

    #[test]
    fn delete_keeps_remaining_order() {
        let mut set = set_of(&[1, 2, 3, 4]);
        assert!(set.delete(2));
        assert_eq!(set.as_slice(), &[1, 3, 4]);
        assert!(!set.delete(2));
    }

    #[test]
    fn index_of_absent_is_none() {
        let set = set_of(&[5, 6]);
        assert_eq!(set.index_of(6), Some(1));
        assert_eq!(set.index_of(7), None);
    }

    #[test]
    fn move_forward_and_backward() {
        let mut set = set_of(&[1, 2, 3, 4]);
        set.move_item(0, 3).unwrap();
        assert_eq!(set.as_slice(), &[2, 3, 4, 1]);
        set.move_item(3, 1).unwrap();
        assert_eq!(set.as_slice(), &[2, 1, 3, 4]);
    }

    #[test]
    fn move_to_same_index_is_noop() {
        for len in 1..6u32 {
            let items: Vec<u32> = (0..len).collect();
            for index in 0..len as usize {
                let mut set = set_of(&items);
                set.move_item(index, index).unwrap();
                assert_eq!(set.as_slice(), items.as_slice());
            }
        }
    }

    #[test]
    fn move_out_of_range_fails_for_every_size() {
        for len in 0..4u32 {
            let items: Vec<u32> = (0..len).collect();
            let mut set = set_of(&items);
            let len = len as usize;
            assert_eq!(set.move_item(len, 0), Err(IndexOutOfRange { index: len, len }));
            assert_eq!(set.move_item(0, len + 3).map_err(|e| e.len), Err(len));
            assert_eq!(set.as_slice(), items.as_slice());
        }
    }

    #[test]
    fn clear_and_len() {
        let mut set = set_of(&[1, 2, 3]);
        assert_eq!(set.len(), 3);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.get(0), None);
    }
}
