use fleet_core::{FetchRequest, PageMeta, PageResult};

use crate::{ListResponse, RawRecord};

/// Converts a raw backend record into a display view-model.
///
/// Returning `None` marks the record unmappable; it is skipped, never fatal.
pub trait ViewModelMapper<V>: Send + Sync {
    fn map(&self, raw: &RawRecord) -> Option<V>;
}

impl<V, F> ViewModelMapper<V> for F
where
    F: Fn(&RawRecord) -> Option<V> + Send + Sync,
{
    fn map(&self, raw: &RawRecord) -> Option<V> {
        self(raw)
    }
}

/// Builds the page to apply for `request` from a list response.
pub fn build_page<V>(
    request: &FetchRequest,
    response: ListResponse,
    mapper: &dyn ViewModelMapper<V>,
) -> PageResult<V> {
    let received = response.data.len();
    let items: Vec<V> = response
        .data
        .iter()
        .filter_map(|raw| mapper.map(raw))
        .collect();
    let dropped_records = received - items.len();

    let page = response
        .meta
        .map_or(request.page, |meta| meta.current_page.max(1));
    let limit = response
        .meta
        .and_then(|meta| meta.per_page)
        .filter(|per_page| *per_page > 0)
        .unwrap_or(request.limit);

    PageResult {
        items,
        page,
        limit,
        meta: response.meta.map(PageMeta::from),
        dropped_records,
    }
}
