//! Recency-ordered list stored in an arena of slots.
//!
//! Links between entries are slot indices rather than pointers. Vacated slots
//! go onto a free-list and are reused by the next insertion, so a full cache
//! never grows the arena past its capacity.

/// Stable position of an entry inside a [`RecencySequence`]. Valid until the
/// entry is removed; the sequence never moves an entry to another slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle(usize);

#[derive(Debug)]
struct Slot<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Front is the most recently used entry, back the least recently used.
#[derive(Debug)]
pub(crate) struct RecencySequence<K, V> {
    slots: Vec<Option<Slot<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> RecencySequence<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn push_front(&mut self, key: K, value: V) -> Handle {
        let slot = Slot {
            key,
            value,
            prev: None,
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                index
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };
        self.link_front(index);
        self.len += 1;
        Handle(index)
    }

    pub(crate) fn move_to_front(&mut self, handle: Handle) {
        let index = handle.0;
        if self.head == Some(index) || self.slot(index).is_none() {
            return;
        }
        self.unlink(index);
        self.link_front(index);
    }

    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let index = self.tail?;
        self.take(index)
    }

    pub(crate) fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        self.take(handle.0)
    }

    pub(crate) fn get(&self, handle: Handle) -> Option<(&K, &V)> {
        self.slot(handle.0).map(|slot| (&slot.key, &slot.value))
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> Option<&mut V> {
        self.slot_mut(handle.0).map(|slot| &mut slot.value)
    }

    pub(crate) fn back(&self) -> Option<(&K, &V)> {
        self.tail.and_then(|index| self.get(Handle(index)))
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            sequence: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn slot(&self, index: usize) -> Option<&Slot<K, V>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut Slot<K, V>> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    fn take(&mut self, index: usize) -> Option<(K, V)> {
        self.slot(index)?;
        self.unlink(index);
        let slot = self.slots[index].take()?;
        self.free.push(index);
        self.len -= 1;
        Some((slot.key, slot.value))
    }

    fn link_front(&mut self, index: usize) {
        let old_head = self.head;
        if let Some(slot) = self.slot_mut(index) {
            slot.prev = None;
            slot.next = old_head;
        }
        match old_head {
            Some(head) => {
                if let Some(slot) = self.slot_mut(head) {
                    slot.prev = Some(index);
                }
            }
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }

    fn unlink(&mut self, index: usize) {
        let (prev, next) = match self.slot_mut(index) {
            Some(slot) => (slot.prev.take(), slot.next.take()),
            None => return,
        };

        match prev {
            Some(prev) => {
                if let Some(slot) = self.slot_mut(prev) {
                    slot.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next) => {
                if let Some(slot) = self.slot_mut(next) {
                    slot.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

pub(crate) struct Iter<'a, K, V> {
    sequence: &'a RecencySequence<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.sequence.slot(self.cursor?)?;
        self.cursor = slot.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&slot.key, &slot.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(sequence: &RecencySequence<&'static str, i32>) -> Vec<&'static str> {
        sequence.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut sequence = RecencySequence::with_capacity(3);
        sequence.push_front("a", 1);
        sequence.push_front("b", 2);
        sequence.push_front("c", 3);

        assert_eq!(sequence.len(), 3);
        assert_eq!(keys(&sequence), vec!["c", "b", "a"]);
        assert_eq!(sequence.back(), Some((&"a", &1)));
    }

    #[test]
    fn move_to_front_relinks_neighbours() {
        let mut sequence = RecencySequence::with_capacity(3);
        let a = sequence.push_front("a", 1);
        let b = sequence.push_front("b", 2);
        sequence.push_front("c", 3);

        sequence.move_to_front(b);
        assert_eq!(keys(&sequence), vec!["b", "c", "a"]);

        sequence.move_to_front(a);
        assert_eq!(keys(&sequence), vec!["a", "b", "c"]);
        assert_eq!(sequence.back(), Some((&"c", &3)));

        // Moving the head is a no-op.
        sequence.move_to_front(a);
        assert_eq!(keys(&sequence), vec!["a", "b", "c"]);
    }

    #[test]
    fn pop_back_drains_oldest_first() {
        let mut sequence = RecencySequence::with_capacity(2);
        sequence.push_front("a", 1);
        sequence.push_front("b", 2);

        assert_eq!(sequence.pop_back(), Some(("a", 1)));
        assert_eq!(sequence.pop_back(), Some(("b", 2)));
        assert_eq!(sequence.pop_back(), None);
        assert_eq!(sequence.len(), 0);
        assert!(sequence.iter().next().is_none());
    }

    #[test]
    fn remove_from_middle_keeps_links() {
        let mut sequence = RecencySequence::with_capacity(3);
        sequence.push_front("a", 1);
        let b = sequence.push_front("b", 2);
        sequence.push_front("c", 3);

        assert_eq!(sequence.remove(b), Some(("b", 2)));
        assert_eq!(keys(&sequence), vec!["c", "a"]);
        assert_eq!(sequence.get(b), None);
        assert_eq!(sequence.remove(b), None);
    }

    #[test]
    fn vacated_slots_are_reused() {
        let mut sequence = RecencySequence::with_capacity(2);
        sequence.push_front("a", 1);
        sequence.push_front("b", 2);

        for value in 3..10 {
            sequence.pop_back();
            sequence.push_front("x", value);
        }

        assert_eq!(sequence.slots.len(), 2);
        assert_eq!(sequence.len(), 2);
    }

    #[test]
    fn value_mut_updates_in_place() {
        let mut sequence = RecencySequence::with_capacity(1);
        let a = sequence.push_front("a", 1);
        if let Some(value) = sequence.value_mut(a) {
            *value = 42;
        }
        assert_eq!(sequence.get(a), Some((&"a", &42)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut sequence = RecencySequence::with_capacity(2);
        sequence.push_front("a", 1);
        sequence.push_front("b", 2);
        sequence.clear();

        assert_eq!(sequence.len(), 0);
        assert_eq!(sequence.back(), None);
        sequence.push_front("c", 3);
        assert_eq!(keys(&sequence), vec!["c"]);
    }
}
