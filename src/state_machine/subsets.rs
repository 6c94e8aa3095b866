//! Lazy generators for the exponential enumerations.
//!
//! Neither generator recurses or materialises the full family of subsets up front.

use crate::config::MAX_POWER_SET_BITS;

/// Every non-empty ordered subsequence of `0..len`, as index lists.
///
/// Produced in depth-first lexicographic order, e.g. for three elements:
/// `[0] [0,1] [0,1,2] [0,2] [1] [1,2] [2]`. Yields exactly `2^len - 1` items.
#[derive(Debug, Clone)]
pub struct Subsequences {
    len: usize,
    current: Vec<usize>,
    started: bool,
}

impl Subsequences {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: Vec::with_capacity(len),
            started: false,
        }
    }
}

impl Iterator for Subsequences {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            if self.len == 0 {
                return None;
            }
            self.current.push(0);
            return Some(self.current.clone());
        }

        let &last = self.current.last()?;
        if last + 1 < self.len {
            self.current.push(last + 1);
        } else {
            self.current.pop();
            // Advance the new tail; it is always below the popped index.
            let tail = self.current.last_mut()?;
            *tail += 1;
        }
        Some(self.current.clone())
    }
}

/// Every subset of `0..len` (the empty set included), as ascending index lists.
///
/// Subsets are indexed by a bitmask counter, so `len` is capped at
/// [`MAX_POWER_SET_BITS`]; callers enforce their own, smaller, ceiling first.
#[derive(Debug, Clone)]
pub struct PowerSet {
    len: usize,
    next: u64,
    end: u64,
}

impl PowerSet {
    pub fn new(len: usize) -> Self {
        let len = len.min(MAX_POWER_SET_BITS);
        Self {
            len,
            next: 0,
            end: 1u64 << len,
        }
    }
}

impl Iterator for PowerSet {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let mask = self.next;
        self.next += 1;
        Some((0..self.len).filter(|bit| mask & (1 << bit) != 0).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsequence_order() {
        let all: Vec<Vec<usize>> = Subsequences::new(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0],
                vec![0, 1],
                vec![0, 1, 2],
                vec![0, 2],
                vec![1],
                vec![1, 2],
                vec![2],
            ]
        );
    }

    #[test]
    fn test_subsequence_count() {
        for n in 0..=10 {
            assert_eq!(Subsequences::new(n).count(), (1usize << n) - 1);
        }
    }

    #[test]
    fn test_power_set() {
        let all: Vec<Vec<usize>> = PowerSet::new(2).collect();
        assert_eq!(all, vec![vec![], vec![0], vec![1], vec![0, 1]]);
        assert_eq!(PowerSet::new(0).count(), 1);
        assert_eq!(PowerSet::new(5).count(), 32);
        assert_eq!(PowerSet::new(5).size_hint(), (32, Some(32)));
    }
}
