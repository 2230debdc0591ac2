//! Looped content buffer
//!
//! A rail shows its items twice in a row so the viewport can slide over the
//! seam without a visible jump. The doubled sequence is a read-only view over
//! the shared source list; the items themselves are never copied or touched.

use std::sync::Arc;

use tracing::debug;

/// Anything a rail can carry
pub trait RailItem {
    /// Stable identity of the item (image src, testimonial attribution, ...)
    fn source_id(&self) -> &str;
}

/// The source sequence repeated twice, order preserved in each half
#[derive(Debug)]
pub struct LoopedSequence<T> {
    source: Arc<[T]>,
}

impl<T> Clone for LoopedSequence<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<T> LoopedSequence<T> {
    pub fn new(source: Arc<[T]>) -> Self {
        Self { source }
    }

    /// Replace the source list, keeping the current view when it is the same list
    ///
    /// Returns `true` when the sequence was rebuilt.
    pub fn refresh(&mut self, source: &Arc<[T]>) -> bool {
        if Arc::ptr_eq(&self.source, source) {
            return false;
        }
        debug!(items = source.len(), "looped sequence rebuilt");
        self.source = Arc::clone(source);
        true
    }

    /// Length of the doubled sequence
    pub fn len(&self) -> usize {
        self.source.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Length of one half, i.e. the original sequence
    pub fn period(&self) -> usize {
        self.source.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        self.source.get(index % self.source.len())
    }

    pub fn source(&self) -> &Arc<[T]> {
        &self.source
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.source.iter().chain(self.source.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Card(&'static str);

    impl RailItem for Card {
        fn source_id(&self) -> &str {
            self.0
        }
    }

    fn cards(ids: &[&'static str]) -> Arc<[Card]> {
        ids.iter().map(|id| Card(id)).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_loop_invariant() {
        for n in 1..6 {
            let ids = ["a", "b", "c", "d", "e"];
            let looped = LoopedSequence::new(cards(&ids[..n]));
            assert_eq!(looped.len(), 2 * n);
            for i in 0..n {
                assert_eq!(looped.get(i), looped.get(i + n));
            }
            let order: Vec<&str> = looped.iter().map(|c| c.source_id()).collect();
            assert_eq!(&order[..n], &ids[..n]);
            assert_eq!(&order[n..], &ids[..n]);
        }
    }

    #[test]
    fn test_empty_source() {
        let looped = LoopedSequence::new(cards(&[]));
        assert!(looped.is_empty());
        assert_eq!(looped.len(), 0);
        assert!(looped.get(0).is_none());
    }

    #[test]
    fn test_out_of_range_index() {
        let looped = LoopedSequence::new(cards(&["a", "b"]));
        assert!(looped.get(4).is_none());
    }

    #[test]
    fn test_refresh_memoizes_on_identity() {
        let first = cards(&["a", "b"]);
        let mut looped = LoopedSequence::new(Arc::clone(&first));
        assert!(!looped.refresh(&first));

        // Equal contents, different list: rebuilt
        let second = cards(&["a", "b"]);
        assert!(looped.refresh(&second));
        assert!(Arc::ptr_eq(looped.source(), &second));
    }
}
