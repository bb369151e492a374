use serde::Serialize;

/// Pagination metadata reported by the backend for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: Option<u32>,
    pub total_count: Option<u64>,
}

/// One page of mapped items, ready to be applied to the list store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<V> {
    pub items: Vec<V>,
    pub page: u32,
    pub limit: u32,
    pub meta: Option<PageMeta>,
    /// Raw records the view-model mapper rejected.
    pub dropped_records: usize,
}

impl<V> PageResult<V> {
    pub fn has_next(&self) -> bool {
        has_next(self.meta.as_ref(), self.items.len(), self.limit)
    }
}

/// Whether another page follows.
///
/// With a known `last_page` this compares page numbers. Without it, a full page
/// is taken to mean more data exists, which over-reports by one page when the
/// final page happens to be exactly full.
pub fn has_next(meta: Option<&PageMeta>, item_count: usize, limit: u32) -> bool {
    match meta {
        Some(PageMeta {
            current_page,
            last_page: Some(last_page),
            ..
        }) => current_page < last_page,
        _ => item_count >= limit as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::{has_next, PageMeta};

    fn meta(current_page: u32, last_page: Option<u32>) -> PageMeta {
        PageMeta {
            current_page,
            last_page,
            total_count: None,
        }
    }

    #[test]
    fn known_last_page_decides() {
        assert!(has_next(Some(&meta(2, Some(5))), 0, 10));
        assert!(!has_next(Some(&meta(5, Some(5))), 10, 10));
    }

    #[test]
    fn full_page_heuristic_without_last_page() {
        assert!(has_next(None, 10, 10));
        assert!(!has_next(None, 9, 10));
        assert!(has_next(Some(&meta(3, None)), 10, 10));
        assert!(!has_next(Some(&meta(3, None)), 0, 10));
    }
}
