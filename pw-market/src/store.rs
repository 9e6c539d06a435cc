//! Shared land cache injected into the purchase flow.
//!
//! Components read snapshots and subscribe for refreshes; they never hold a
//! reference into the cache itself.
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::land::{Land, LandId, LandStatus};

/// Handle returned by [`LandStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type LandListener = Rc<dyn Fn(&Land)>;

/// Client-side view of land inventory shared between components.
pub trait LandStore {
    /// Copy of the current record, if cached.
    fn snapshot(&self, id: LandId) -> Option<Land>;

    /// All cached records, ordered by identifier.
    fn lands(&self) -> Vec<Land>;

    /// Insert or replace a record, notifying subscribers.
    fn upsert(&self, land: Land);

    /// Apply the optimistic ownership transition after a confirmed purchase.
    fn mark_purchased(&self, id: LandId, owner_id: Option<u64>) -> Option<Land>;

    fn subscribe(&self, listener: LandListener) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);

    /// Cached parcels currently owned.
    fn owned(&self) -> Vec<Land> {
        self.lands()
            .into_iter()
            .filter(|land| land.status == LandStatus::Owned)
            .collect()
    }
}

#[derive(Default)]
struct Inner {
    lands: BTreeMap<LandId, Land>,
    listeners: Vec<(SubscriptionId, LandListener)>,
    next_subscription: u64,
}

/// Single-threaded in-memory store. Clones share the same cache.
#[derive(Clone, Default)]
pub struct MemoryLandStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryLandStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lands(lands: impl IntoIterator<Item = Land>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.borrow_mut();
            for land in lands {
                inner.lands.insert(land.id, land);
            }
        }
        store
    }

    /// Whether two handles share one cache.
    #[must_use]
    pub fn same_store(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self, land: &Land) {
        // Listeners may read the store, so release the borrow first.
        let listeners: Vec<LandListener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(land);
        }
    }
}

impl LandStore for MemoryLandStore {
    fn snapshot(&self, id: LandId) -> Option<Land> {
        self.inner.borrow().lands.get(&id).cloned()
    }

    fn lands(&self) -> Vec<Land> {
        self.inner.borrow().lands.values().cloned().collect()
    }

    fn upsert(&self, land: Land) {
        self.inner.borrow_mut().lands.insert(land.id, land.clone());
        self.notify(&land);
    }

    fn mark_purchased(&self, id: LandId, owner_id: Option<u64>) -> Option<Land> {
        let updated = {
            let mut inner = self.inner.borrow_mut();
            let land = inner.lands.get_mut(&id)?;
            land.mark_purchased(owner_id);
            land.clone()
        };
        self.notify(&updated);
        Some(updated)
    }

    fn subscribe(&self, listener: LandListener) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        inner.next_subscription += 1;
        let id = SubscriptionId(inner.next_subscription);
        inner.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(existing, _)| *existing != id);
    }
}
