/// Frequency-ordered queue used while merging the Huffman tree.
///
/// Entries are kept sorted by descending frequency, so the two cheapest
/// nodes always sit at the tail and popping them is O(1).
#[derive(Debug, Clone)]
pub struct SortedQueue<T> {
    elements: Vec<Entry<T>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry<T> {
    frequency: u64,
    item: T,
}

impl<T> SortedQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        SortedQueue {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Appends an entry that must not outrank the current tail.
    ///
    /// Used to seed the queue from a list already in descending order, which
    /// keeps the seed order intact for equal frequencies.
    pub fn push_back(&mut self, frequency: u64, item: T) {
        debug_assert!(self
            .elements
            .last()
            .map_or(true, |tail| tail.frequency >= frequency));
        self.elements.push(Entry { frequency, item });
    }

    /// Inserts behind every entry of greater or equal frequency.
    pub fn insert(&mut self, frequency: u64, item: T) {
        let at = self
            .elements
            .partition_point(|entry| entry.frequency >= frequency);
        self.elements.insert(at, Entry { frequency, item });
    }

    /// Removes the lowest-frequency entry.
    pub fn pop_min(&mut self) -> Option<(u64, T)> {
        self.elements
            .pop()
            .map(|entry| (entry.frequency, entry.item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut queue: SortedQueue<char>) -> Vec<(u64, char)> {
        let mut out = vec![];
        while let Some(entry) = queue.pop_min() {
            out.push(entry);
        }
        out
    }

    #[test]
    fn pops_lowest_first() {
        let mut queue = SortedQueue::with_capacity(4);
        queue.push_back(9, 'a');
        queue.push_back(4, 'b');
        queue.push_back(1, 'c');
        queue.insert(5, 'd');
        assert_eq!(drain(queue), vec![(1, 'c'), (4, 'b'), (5, 'd'), (9, 'a')]);
    }

    #[test]
    fn insert_goes_behind_equal_frequencies() {
        let mut queue = SortedQueue::with_capacity(4);
        queue.push_back(3, 'a');
        queue.push_back(3, 'b');
        queue.push_back(1, 'c');
        queue.insert(3, 'n');
        // 'n' sits after the existing threes, nearer the tail
        assert_eq!(drain(queue), vec![(1, 'c'), (3, 'n'), (3, 'b'), (3, 'a')]);
    }

    #[test]
    fn empty_queue_pops_nothing() {
        let mut queue: SortedQueue<u8> = SortedQueue::with_capacity(4);
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.pop_min(), None);
        queue.insert(7, 1);
        assert_eq!(queue.len(), 1);
    }
}
