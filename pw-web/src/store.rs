//! Land store handle shared through component props.
use pw_market::{Land, LandStore, MemoryLandStore};
use std::rc::Rc;
use yew::prelude::*;

/// Props-friendly wrapper comparing stores by identity.
#[derive(Clone, Default)]
pub struct StoreHandle(pub MemoryLandStore);

impl StoreHandle {
    #[must_use]
    pub fn new(store: MemoryLandStore) -> Self {
        Self(store)
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0.same_store(&other.0)
    }
}

impl std::ops::Deref for StoreHandle {
    type Target = MemoryLandStore;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Re-render the calling component whenever the store changes.
#[hook]
pub fn use_store_updates(store: &StoreHandle) {
    let trigger = use_force_update();
    use_effect_with(store.clone(), move |store| {
        let subscription = store.subscribe(Rc::new(move |_: &Land| trigger.force_update()));
        let store = store.clone();
        move || store.unsubscribe(subscription)
    });
}
