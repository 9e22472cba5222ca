use std::collections::VecDeque;

const WORD_BITS: usize = 64;

/// A bucketed priority queue with FIFO order inside each bucket.
///
/// Priorities are small non-negative integers (move counts). The bucket array grows on
/// demand, and a bitmap over the buckets makes `pop_min` a scan over words rather than over
/// buckets.
pub struct PriorityQueue<T> {
    buckets: Vec<VecDeque<T>>,
    bitmap: Vec<u64>,
    len: usize,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            bitmap: Vec::new(),
            len: 0,
        }
    }

    pub fn push(&mut self, priority: usize, item: T) {
        if priority >= self.buckets.len() {
            self.buckets.resize_with(priority + 1, VecDeque::new);
            self.bitmap.resize(priority / WORD_BITS + 1, 0);
        }
        self.buckets[priority].push_back(item);
        self.bitmap[priority / WORD_BITS] |= 1u64 << (priority % WORD_BITS);
        self.len += 1;
    }

    pub fn pop_min(&mut self) -> Option<T> {
        let word_idx = self.bitmap.iter().position(|&word| word != 0)?;
        let bit_idx = self.bitmap[word_idx].trailing_zeros() as usize;
        let priority = word_idx * WORD_BITS + bit_idx;

        let item = self.buckets[priority].pop_front()?;
        if self.buckets[priority].is_empty() {
            self.bitmap[word_idx] &= !(1u64 << bit_idx);
        }
        self.len -= 1;

        Some(item)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
