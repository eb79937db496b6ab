//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is the
//! shared cache several hook instances can mirror; hooks receive an explicit
//! handle built here rather than reaching for the store themselves.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::hooks::CacheHandle;
use crate::models::{OutputConsumption, ProductionInput};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Inputs of the currently open production record
    pub production_inputs: Vec<ProductionInput>,
    /// Consumptions of the currently open production record
    pub consumptions: Vec<OutputConsumption>,
    /// Production record the caches above belong to
    pub cached_production_id: Option<u32>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Reset the per-production caches when another record is opened.
pub fn store_open_production(store: &AppStore, production_id: u32) {
    if store.cached_production_id().get_untracked() == Some(production_id) {
        return;
    }
    store.cached_production_id().set(Some(production_id));
    store.production_inputs().set(Vec::new());
    store.consumptions().set(Vec::new());
}

/// Cache handle for the open production's inputs
pub fn inputs_cache(store: &AppStore) -> CacheHandle<ProductionInput> {
    let store = *store;
    CacheHandle::new(
        Signal::derive(move || store.production_inputs().get()),
        Callback::new(move |items| store.production_inputs().set(items)),
    )
}

/// Cache handle for the open production's consumptions
pub fn consumptions_cache(store: &AppStore) -> CacheHandle<OutputConsumption> {
    let store = *store;
    CacheHandle::new(
        Signal::derive(move || store.consumptions().get()),
        Callback::new(move |items| store.consumptions().set(items)),
    )
}
