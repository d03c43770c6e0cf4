//! Optimistic reconciliation of a committed write into the displayed list.
//!
//! Trades a refetch for eventual consistency: server-computed fields of an
//! updated record stay stale, and a re-sorted server list is not noticed,
//! until the next refresh.

use tracing::debug;

use crate::resource::{InsertPosition, ListSnapshot, Mutation, Resource};

/// Patch `snapshot` with a committed mutation.
///
/// - Created: placed at `position` and counted in `total`. A record whose
///   id is already displayed is replaced in place instead, so ids stay
///   unique. Appending to a full page only bumps `total`.
/// - Updated: the sent draft is copied onto the matching record.
/// - Deleted: the record is removed and `total` decremented.
/// - StatusChanged: the status is written onto the matching record.
///
/// Marks the snapshot as patched.
pub fn apply<R: Resource>(
    snapshot: &mut ListSnapshot<R::Record>,
    position: InsertPosition,
    mutation: &Mutation<R>,
) {
    let page_size = snapshot.page_size as usize;

    match mutation {
        Mutation::Created(record) => {
            let id = R::id(record);
            if let Some(existing) = snapshot.items.iter_mut().find(|r| R::id(r) == id) {
                *existing = record.clone();
            } else {
                match position {
                    InsertPosition::Prepend => {
                        snapshot.items.insert(0, record.clone());
                        snapshot.items.truncate(page_size);
                    }
                    InsertPosition::Append => {
                        if snapshot.items.len() < page_size {
                            snapshot.items.push(record.clone());
                        }
                    }
                }
                snapshot.total += 1;
            }
        }
        Mutation::Updated { id, draft, .. } => {
            if let Some(existing) = snapshot.items.iter_mut().find(|r| R::id(r) == *id) {
                R::apply_draft(existing, draft);
            }
        }
        Mutation::Deleted(id) => {
            let before = snapshot.items.len();
            snapshot.items.retain(|r| R::id(r) != *id);
            if snapshot.items.len() < before {
                snapshot.total = snapshot.total.saturating_sub(1);
            }
        }
        Mutation::StatusChanged { id, status } => {
            if let Some(existing) = snapshot.items.iter_mut().find(|r| R::id(r) == *id) {
                R::set_status(existing, status);
            }
        }
    }

    snapshot.total = snapshot.total.max(snapshot.items.len() as u64);
    snapshot.recompute_pages();
    snapshot.patched = true;

    debug!(
        resource = R::DESCRIPTOR.name,
        operation = mutation.operation().as_str(),
        items = snapshot.items.len(),
        total = snapshot.total,
        "Applied optimistic patch"
    );
}
