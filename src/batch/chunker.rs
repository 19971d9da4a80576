//! Fixed-size contiguous chunking.

use crate::{Error, Result};

/// Largest number of terms the service accepts in one batch request.
/// Requested steps are clamped to this bound.
pub const MAX_QUERY: usize = 1000;

/// Default batch size.
pub const DEFAULT_STEP: usize = 1000;

/// Lazy partition of an ordered slice into contiguous chunks of at most
/// `step` items, yielding each chunk with the running cumulative count.
///
/// Chunks cover the input exactly once, in order; the final chunk may be
/// shorter. An empty input yields no chunks.
#[derive(Debug, Clone)]
pub struct Chunks<'a, T> {
    items: &'a [T],
    step: usize,
    pos: usize,
}

impl<'a, T> Chunks<'a, T> {
    /// `step` is clamped to [`MAX_QUERY`]; zero is rejected.
    pub fn new(items: &'a [T], step: usize) -> Result<Self> {
        if step == 0 {
            return Err(Error::invalid_argument("step must be a positive integer"));
        }
        Ok(Self {
            items,
            step: step.min(MAX_QUERY),
            pos: 0,
        })
    }

    /// The step bound actually applied, after clamping.
    pub fn effective_step(&self) -> usize {
        self.step
    }

    /// Number of chunks this partition will yield.
    pub fn chunk_count(&self) -> usize {
        self.items.len().div_ceil(self.step)
    }
}

impl<'a, T> Iterator for Chunks<'a, T> {
    type Item = (&'a [T], usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.items.len() {
            return None;
        }
        let end = (self.pos + self.step).min(self.items.len());
        let chunk = &self.items[self.pos..end];
        self.pos = end;
        Some((chunk, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_partition_input_exactly() {
        let items: Vec<u32> = (0..2500).collect();
        let chunks = Chunks::new(&items, 1000).unwrap();
        assert_eq!(chunks.chunk_count(), 3);

        let collected: Vec<(Vec<u32>, usize)> = chunks.map(|(c, n)| (c.to_vec(), n)).collect();
        assert_eq!(collected.len(), 3);
        assert_eq!(collected[0].0.len(), 1000);
        assert_eq!(collected[1].0.len(), 1000);
        assert_eq!(collected[2].0.len(), 500);
        assert_eq!(collected[0].1, 1000);
        assert_eq!(collected[1].1, 2000);
        assert_eq!(collected[2].1, 2500);

        let flattened: Vec<u32> = collected.into_iter().flat_map(|(c, _)| c).collect();
        assert_eq!(flattened, items);
    }

    #[test]
    fn test_exact_multiple_has_no_short_tail() {
        let items: Vec<u32> = (0..9).collect();
        let sizes: Vec<usize> = Chunks::new(&items, 3).unwrap().map(|(c, _)| c.len()).collect();
        assert_eq!(sizes, vec![3, 3, 3]);
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let items: Vec<u32> = Vec::new();
        let chunks = Chunks::new(&items, 10).unwrap();
        assert_eq!(chunks.chunk_count(), 0);
        assert_eq!(chunks.collect::<Vec<_>>().len(), 0);
    }

    #[test]
    fn test_zero_step_is_invalid() {
        let items = vec![1, 2, 3];
        let err = Chunks::new(&items, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_step_clamped_to_max_query() {
        let items: Vec<u32> = (0..1500).collect();
        let chunks = Chunks::new(&items, 5000).unwrap();
        assert_eq!(chunks.effective_step(), MAX_QUERY);
        assert_eq!(chunks.chunk_count(), 2);
    }
}
