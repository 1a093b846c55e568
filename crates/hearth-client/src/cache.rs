// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource-keyed cache invalidation.
//!
//! The server owns all data; the client keeps read-through snapshots per
//! view. Rather than each screen re-calling its own fetch after a mutation,
//! every mutation bumps a generation counter for its resource type and any
//! view holding a stale snapshot re-fetches on next read
//! (invalidate-then-refetch; the client never transitions state locally).

use std::future::Future;

use dashmap::DashMap;
use hearth_core::HearthError;
use strum::Display;
use tracing::debug;

/// Resource families the client caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    Bookings,
    Properties,
    Payments,
    Wishlist,
    Reviews,
    Notifications,
    AgentApplications,
}

/// Shared generation counters, one per resource family.
#[derive(Debug, Default)]
pub struct CacheTracker {
    generations: DashMap<Resource, u64>,
}

impl CacheTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every cached snapshot of this resource stale.
    pub fn invalidate(&self, resource: Resource) {
        let mut entry = self.generations.entry(resource).or_insert(0);
        *entry += 1;
        debug!(resource = %resource, generation = *entry, "cache invalidated");
    }

    /// The current generation for a resource; snapshots taken at an older
    /// generation are stale.
    pub fn generation(&self, resource: Resource) -> u64 {
        self.generations.get(&resource).map(|g| *g).unwrap_or(0)
    }
}

/// A view's read-through snapshot of one query.
#[derive(Debug)]
pub struct CachedQuery<T> {
    resource: Resource,
    snapshot: Option<(u64, T)>,
}

impl<T> CachedQuery<T> {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            snapshot: None,
        }
    }

    /// Whether the next read would re-fetch.
    pub fn is_stale(&self, tracker: &CacheTracker) -> bool {
        match &self.snapshot {
            None => true,
            Some((generation, _)) => *generation != tracker.generation(self.resource),
        }
    }

    /// Returns the cached value, re-fetching first if any mutation has
    /// invalidated this resource since the snapshot was taken.
    pub async fn get_or_refresh<F, Fut>(
        &mut self,
        tracker: &CacheTracker,
        fetch: F,
    ) -> Result<&T, HearthError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, HearthError>>,
    {
        let current = tracker.generation(self.resource);
        let fresh = matches!(&self.snapshot, Some((generation, _)) if *generation == current);
        if !fresh {
            let value = fetch().await?;
            self.snapshot = Some((current, value));
        }
        Ok(&self.snapshot.as_ref().expect("snapshot just set").1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn fetches_once_until_invalidated() {
        let tracker = CacheTracker::new();
        let mut query = CachedQuery::new(Resource::Bookings);
        let fetches = AtomicU32::new(0);

        for _ in 0..3 {
            let value = query
                .get_or_refresh(&tracker, || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, HearthError>(vec!["bk1"])
                })
                .await
                .unwrap();
            assert_eq!(value, &vec!["bk1"]);
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        tracker.invalidate(Resource::Bookings);
        assert!(query.is_stale(&tracker));
        query
            .get_or_refresh(&tracker, || async {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok::<_, HearthError>(vec!["bk1", "bk2"])
            })
            .await
            .unwrap();
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidation_is_scoped_to_the_resource() {
        let tracker = CacheTracker::new();
        let mut bookings = CachedQuery::new(Resource::Bookings);
        bookings
            .get_or_refresh(&tracker, || async { Ok::<_, HearthError>(1u32) })
            .await
            .unwrap();

        tracker.invalidate(Resource::Wishlist);
        assert!(!bookings.is_stale(&tracker));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_query_stale() {
        let tracker = CacheTracker::new();
        let mut query: CachedQuery<u32> = CachedQuery::new(Resource::Notifications);
        let err = query
            .get_or_refresh(&tracker, || async {
                Err(HearthError::api("boom", 500))
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(query.is_stale(&tracker));
    }
}
