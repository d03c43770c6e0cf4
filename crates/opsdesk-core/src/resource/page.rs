//! List responses and the snapshot a list displays.

use serde::Serialize;
use tracing::warn;

use super::descriptor::ResourceDescriptor;
use super::query::QueryState;

/// One list response as returned by a resource client.
///
/// For unpaged resources this holds every record and `page`/`page_size`
/// describe the whole set.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: Option<u32>,
}

/// The records currently displayed, plus counts derived from the last
/// successful fetch.
///
/// Holds `total >= items.len()` and `items.len() <= page_size`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    /// Whether an optimistic patch has been applied since the fetch.
    #[serde(skip)]
    pub patched: bool,
}

impl<T> ListSnapshot<T> {
    /// An empty snapshot for `query`.
    pub fn empty(query: &QueryState) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: query.page(),
            page_size: query.page_size(),
            total_pages: 0,
            patched: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn recompute_pages(&mut self) {
        self.total_pages = page_count(self.total, self.page_size);
    }
}

impl<T: Serialize> ListSnapshot<T> {
    /// Build the displayed snapshot from a fetched page.
    ///
    /// Applies client-side filters, paginates unpaged resources in memory,
    /// and clamps counts the server got wrong.
    pub fn from_page(
        descriptor: &ResourceDescriptor,
        query: &QueryState,
        page: ListPage<T>,
    ) -> Self {
        let local = query.has_local_filters(descriptor);
        let mut items: Vec<T> = if local {
            page.items
                .into_iter()
                .filter(|r| query.matches_local(descriptor, r))
                .collect()
        } else {
            page.items
        };

        let page_size = query.page_size();
        let (mut total, current) = if descriptor.list.is_whole_set() {
            let total = items.len() as u64;
            let start = (query.page() as usize - 1).saturating_mul(page_size as usize);
            let current: Vec<T> = items
                .drain(..)
                .skip(start)
                .take(page_size as usize)
                .collect();
            (total, current)
        } else {
            let total = if local { items.len() as u64 } else { page.total };
            (total, items)
        };

        let mut current = current;
        if current.len() > page_size as usize {
            warn!(
                resource = descriptor.name,
                received = current.len(),
                page_size,
                "Server returned more records than the page size"
            );
            current.truncate(page_size as usize);
        }
        if total < current.len() as u64 {
            warn!(
                resource = descriptor.name,
                total,
                received = current.len(),
                "Server total is smaller than the page"
            );
            total = current.len() as u64;
        }

        let mut snapshot = Self {
            items: current,
            total,
            page: query.page(),
            page_size,
            total_pages: 0,
            patched: false,
        };
        snapshot.recompute_pages();
        snapshot
    }
}

fn page_count(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::descriptor::{ListShape, OnFetchError};
    use crate::resource::query::{FilterKind, FilterSpec, FilterValue};
    use serde_json::{Value, json};

    const FILTERS: &[FilterSpec] = &[FilterSpec::local("keyword", FilterKind::Text, &["title"])];

    const fn descriptor(list: ListShape) -> ResourceDescriptor {
        ResourceDescriptor {
            name: "events",
            path: "/events",
            id_field: "id",
            list,
            page_size_param: "pageSize",
            default_page_size: 2,
            get: None,
            create: None,
            update: None,
            delete: None,
            status: None,
            filters: FILTERS,
            permission_gated: false,
            on_fetch_error: OnFetchError::KeepLast,
        }
    }

    fn records(n: usize) -> Vec<Value> {
        (1..=n)
            .map(|i| json!({"id": i, "title": format!("event {}", i)}))
            .collect()
    }

    #[test]
    fn unpaged_lists_are_sliced_in_memory() {
        let d = descriptor(ListShape::Unpaged);
        let mut q = QueryState::new(&d);
        q.set_page(2, 2);

        let page = ListPage {
            items: records(5),
            total: 5,
            page: 1,
            page_size: 5,
            total_pages: None,
        };
        let snap = ListSnapshot::from_page(&d, &q, page);

        assert_eq!(snap.total, 5);
        assert_eq!(snap.total_pages, 3);
        assert_eq!(snap.items, vec![records(5)[2].clone(), records(5)[3].clone()]);
    }

    #[test]
    fn wrapped_lists_are_sliced_like_bare_arrays() {
        let d = descriptor(ListShape::Wrapped { items_key: "list" });
        let q = QueryState::new(&d);
        let page = ListPage {
            items: records(3),
            total: 3,
            page: 1,
            page_size: 3,
            total_pages: None,
        };
        let snap = ListSnapshot::from_page(&d, &q, page);

        assert_eq!(snap.items.len(), 2);
        assert_eq!(snap.total, 3);
        assert_eq!(snap.total_pages, 2);
    }

    #[test]
    fn oversized_pages_are_clamped() {
        let d = descriptor(ListShape::Paged { items_key: "list" });
        let q = QueryState::new(&d);
        let page = ListPage {
            items: records(3),
            total: 1,
            page: 1,
            page_size: 2,
            total_pages: None,
        };
        let snap = ListSnapshot::from_page(&d, &q, page);

        assert_eq!(snap.items.len(), 2);
        assert!(snap.total >= snap.items.len() as u64);
    }

    #[test]
    fn local_filters_narrow_the_set_before_paging() {
        let d = descriptor(ListShape::Unpaged);
        let mut q = QueryState::new(&d);
        q.set_filter(&d, "keyword", FilterValue::Text("event 4".into()))
            .unwrap();

        let page = ListPage {
            items: records(5),
            total: 5,
            page: 1,
            page_size: 5,
            total_pages: None,
        };
        let snap = ListSnapshot::from_page(&d, &q, page);

        assert_eq!(snap.total, 1);
        assert_eq!(snap.items[0]["id"], 4);
    }
}
