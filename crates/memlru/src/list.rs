//! Recency list
//!
//! Index-based doubly-linked list over an arena of entries. Slots are plain
//! `usize` handles into `entries`; freed slots are recycled through
//! `free_list`. Head is the most recently used entry, tail the least.

/// A cached entry and its position in recency order
#[cfg_attr(test, derive(Clone))]
pub(crate) struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) size: usize,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<V> Entry<V> {
    pub(crate) fn new(key: String, value: V, size: usize) -> Self {
        Self {
            key,
            value,
            size,
            prev: None,
            next: None,
        }
    }
}

/// Arena-backed recency list
#[cfg_attr(test, derive(Clone))]
pub(crate) struct RecencyList<V> {
    entries: Vec<Option<Entry<V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<V> RecencyList<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn tail(&self) -> Option<usize> {
        self.tail
    }

    pub(crate) fn get(&self, slot: usize) -> Option<&Entry<V>> {
        self.entries.get(slot).and_then(Option::as_ref)
    }

    /// Store `entry` in a free slot and link it at the head
    pub(crate) fn insert(&mut self, entry: Entry<V>) -> usize {
        let slot = self.alloc(entry);
        self.push_front(slot);
        self.len += 1;
        slot
    }

    /// Unlink the entry at `slot` and release the slot
    pub(crate) fn take(&mut self, slot: usize) -> Option<Entry<V>> {
        self.get(slot)?;
        self.unlink(slot);
        let entry = self.entries[slot].take()?;
        self.free_list.push(slot);
        self.len -= 1;
        Some(entry)
    }

    /// Move the entry at `slot` to the head.
    ///
    /// Runs the full unlink/push even when the entry already is the head.
    pub(crate) fn touch(&mut self, slot: usize) {
        self.unlink(slot);
        self.push_front(slot);
    }

    /// Detach `slot` from its neighbours. The slot must currently be linked.
    fn unlink(&mut self, slot: usize) {
        let (prev, next) = match &mut self.entries[slot] {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev_slot) => {
                if let Some(prev_entry) = &mut self.entries[prev_slot] {
                    prev_entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_slot) => {
                if let Some(next_entry) = &mut self.entries[next_slot] {
                    next_entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Link a detached `slot` ahead of the current head
    fn push_front(&mut self, slot: usize) {
        let old_head = self.head;

        if let Some(entry) = &mut self.entries[slot] {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head {
            Some(head_slot) => {
                if let Some(head) = &mut self.entries[head_slot] {
                    head.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }

        self.head = Some(slot);
    }

    fn alloc(&mut self, entry: Entry<V>) -> usize {
        if let Some(slot) = self.free_list.pop() {
            self.entries[slot] = Some(entry);
            slot
        } else {
            self.entries.push(Some(entry));
            self.entries.len() - 1
        }
    }

    /// Drop every entry and release the arena
    pub(crate) fn clear(&mut self) -> Vec<Entry<V>> {
        self.head = None;
        self.tail = None;
        self.free_list.clear();
        self.len = 0;
        self.entries.drain(..).flatten().collect()
    }

    /// Iterate entries from most to least recently used
    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Walk the list in both directions and verify link consistency.
    /// Returns the slots in head-to-tail order.
    #[cfg(test)]
    pub(crate) fn check_links(&self) -> Result<Vec<usize>, String> {
        let mut forward = Vec::new();
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            if forward.len() > self.len {
                return Err("cycle in forward links".to_string());
            }
            let entry = self.get(slot).ok_or_else(|| format!("dangling slot {slot}"))?;
            if entry.prev != prev {
                return Err(format!("slot {slot} has prev {:?}, expected {prev:?}", entry.prev));
            }
            forward.push(slot);
            prev = Some(slot);
            cursor = entry.next;
        }
        if self.tail != prev {
            return Err(format!("tail {:?} does not end the list ({prev:?})", self.tail));
        }
        if forward.len() != self.len {
            return Err(format!("{} linked, {} counted", forward.len(), self.len));
        }
        if self.head.is_none() != self.tail.is_none() {
            return Err("head/tail disagree on emptiness".to_string());
        }
        let occupied = self.entries.iter().filter(|e| e.is_some()).count();
        if occupied != self.len {
            return Err(format!("{occupied} occupied slots, {} linked", self.len));
        }
        Ok(forward)
    }
}

/// Head-to-tail iterator over a [`RecencyList`]
pub(crate) struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: Option<usize>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.cursor?)?;
        self.cursor = entry.next;
        Some(entry)
    }
}
