//! Fixed-capacity rolling buffer.

use std::collections::VecDeque;

use super::error::DomainError;

/// Rolling FIFO buffer that evicts the oldest entry once full.
///
/// Insertion order is preserved; iteration runs oldest to newest.
///
/// ```
/// use polypulse::domain::history::BoundedHistory;
///
/// let mut history = BoundedHistory::try_new(3).unwrap();
/// for value in 1..=4 {
///     history.push(value);
/// }
/// assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// Create an empty buffer.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ZeroCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, DomainError> {
        if capacity == 0 {
            return Err(DomainError::ZeroCapacity);
        }
        Ok(Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append an item, returning the evicted oldest item when full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// The newest `n` items, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &T> {
        self.items.iter().skip(self.items.len().saturating_sub(n))
    }
}

impl<T: Clone> BoundedHistory<T> {
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(
            BoundedHistory::<u8>::try_new(0).unwrap_err(),
            DomainError::ZeroCapacity
        );
    }

    #[test]
    fn evicts_oldest_first() {
        let mut history = BoundedHistory::try_new(3).unwrap();
        assert_eq!(history.push(1), None);
        assert_eq!(history.push(2), None);
        assert_eq!(history.push(3), None);
        assert_eq!(history.push(4), Some(1));
        assert_eq!(history.len(), 3);
        assert_eq!(history.to_vec(), vec![2, 3, 4]);
        assert_eq!(history.last(), Some(&4));
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut history = BoundedHistory::try_new(200).unwrap();
        for i in 0..1_000 {
            history.push(i);
            assert!(history.len() <= 200);
        }
        assert_eq!(history.iter().next(), Some(&800));
    }

    #[test]
    fn recent_returns_newest_in_order() {
        let mut history = BoundedHistory::try_new(5).unwrap();
        for i in 0..5 {
            history.push(i);
        }
        assert_eq!(history.recent(2).copied().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(history.recent(10).count(), 5);
    }
}
