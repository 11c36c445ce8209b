//! Fixed-size paging over the store's display order.

use crate::domain::EventId;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 40;

/// Cursor over one generation of ordered ids.
///
/// Emits each id at most once until [`Paginator::reset`] is called.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    cursor: usize,
    exhausted: bool,
}

impl Paginator {
    /// Create a paginator. A zero page size is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            cursor: 0,
            exhausted: false,
        }
    }

    /// Slice the next page out of `ordered`.
    ///
    /// Returns `None` once everything has been handed out; never returns an
    /// empty page.
    pub fn next_page(&mut self, ordered: &[EventId]) -> Option<Vec<EventId>> {
        if self.exhausted {
            return None;
        }
        if self.cursor >= ordered.len() {
            self.exhausted = true;
            return None;
        }

        let end = (self.cursor + self.page_size).min(ordered.len());
        let page = ordered[self.cursor..end].to_vec();
        self.cursor = end;
        if end == ordered.len() {
            self.exhausted = true;
        }
        Some(page)
    }

    /// Start over. Call only when the ordered sequence was fully replaced.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.exhausted = false;
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: i64) -> Vec<EventId> {
        (1..=n).map(EventId::new).collect()
    }

    #[test]
    fn test_pages_cover_sequence_exactly_once() {
        for (n, page_size) in [(100, 40), (80, 40), (1, 40), (7, 3), (40, 1)] {
            let ordered = ids(n);
            let mut paginator = Paginator::new(page_size);

            let mut pages = Vec::new();
            while let Some(page) = paginator.next_page(&ordered) {
                pages.push(page);
            }

            let expected_pages = (n as usize).div_ceil(page_size);
            assert_eq!(pages.len(), expected_pages, "n={n} page_size={page_size}");
            assert_eq!(pages.concat(), ordered);
            assert!(paginator.next_page(&ordered).is_none());
            assert!(paginator.is_exhausted());
        }
    }

    #[test]
    fn test_empty_sequence_yields_none() {
        let mut paginator = Paginator::new(40);
        assert!(paginator.next_page(&[]).is_none());
        assert!(paginator.is_exhausted());
    }

    #[test]
    fn test_hundred_records_page_forty() {
        let ordered = ids(100);
        let mut paginator = Paginator::new(40);

        assert_eq!(paginator.next_page(&ordered).unwrap().len(), 40);
        assert_eq!(paginator.next_page(&ordered).unwrap().len(), 40);
        assert_eq!(paginator.next_page(&ordered).unwrap().len(), 20);
        assert!(paginator.next_page(&ordered).is_none());
        assert_eq!(paginator.cursor(), 100);
    }

    #[test]
    fn test_reset_starts_new_cycle() {
        let ordered = ids(5);
        let mut paginator = Paginator::new(10);

        assert_eq!(paginator.next_page(&ordered).unwrap().len(), 5);
        assert!(paginator.next_page(&ordered).is_none());

        paginator.reset();
        assert!(!paginator.is_exhausted());
        assert_eq!(paginator.next_page(&ordered).unwrap(), ordered);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        assert_eq!(Paginator::new(0).page_size(), 1);
    }
}
