use std::iter::Peekable;
use std::mem;

/// Splits a market sweep into dispatchable batches.
///
/// A batch is flushed when it reaches `capacity` or when the last market has
/// been appended, so a list of N markets always yields ceil(N / capacity)
/// batches and only the final one may be short.
pub struct Batches<I: Iterator<Item = String>> {
    markets: Peekable<I>,
    capacity: usize,
    buffer: Vec<String>,
}

impl<I: Iterator<Item = String>> Batches<I> {
    pub fn new(markets: I, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Batches {
            markets: markets.peekable(),
            capacity,
            buffer: Vec::with_capacity(capacity),
        }
    }
}

impl<I: Iterator<Item = String>> Iterator for Batches<I> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Vec<String>> {
        while let Some(market) = self.markets.next() {
            self.buffer.push(market);

            if self.buffer.len() == self.capacity || self.markets.peek().is_none() {
                let batch = mem::replace(&mut self.buffer, Vec::with_capacity(self.capacity));
                return Some(batch);
            }
        }
        None
    }
}
