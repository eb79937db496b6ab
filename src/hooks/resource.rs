//! Optimistic Resource Hook Core
//!
//! Owns a local copy of one parent record's line items and keeps it in
//! agreement with either an injected shared cache or the server. The
//! per-resource hooks layer their mutation protocol on top of this state.

use leptos::prelude::*;

use crate::cancel::CancelToken;

/// Read/write handle to an externally owned cache of the same list. When a
/// hook gets one, the cache is the source of truth and the hook is a mirror;
/// without one the hook owns its list for its lifetime.
#[derive(Clone)]
pub struct CacheHandle<T: Clone + Send + Sync + 'static> {
    read: Signal<Vec<T>>,
    write: Callback<Vec<T>>,
}

impl<T: Clone + Send + Sync + 'static> CacheHandle<T> {
    pub fn new(read: Signal<Vec<T>>, write: Callback<Vec<T>>) -> Self {
        Self { read, write }
    }

    pub fn read(&self) -> Signal<Vec<T>> {
        self.read
    }

    pub fn set(&self, items: Vec<T>) {
        self.write.run(items);
    }
}

/// Lifecycle of a hook instance. `Ready` self-transitions on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
}

/// Stable content fingerprint of a list: its saved ids, sorted and joined.
/// Good enough while items cannot change without an id change.
pub fn fingerprint_ids(ids: impl Iterator<Item = u32>) -> String {
    let mut ids: Vec<u32> = ids.collect();
    ids.sort_unstable();
    let mut out = String::new();
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&id.to_string());
    }
    out
}

#[derive(Clone)]
pub struct OptimisticList<T: Clone + Send + Sync + 'static> {
    items: RwSignal<Vec<T>>,
    phase: RwSignal<Phase>,
    error: RwSignal<Option<String>>,
    fingerprint: StoredValue<String>,
    cache: Option<CacheHandle<T>>,
    on_refresh: Option<Callback<()>>,
    cancel: CancelToken,
    id_of: fn(&T) -> u32,
}

impl<T: Clone + Send + Sync + 'static> OptimisticList<T> {
    pub fn new(
        cache: Option<CacheHandle<T>>,
        on_refresh: Option<Callback<()>>,
        id_of: fn(&T) -> u32,
    ) -> Self {
        let list = Self {
            items: RwSignal::new(Vec::new()),
            phase: RwSignal::new(Phase::Uninitialized),
            error: RwSignal::new(None),
            fingerprint: StoredValue::new(String::new()),
            cache,
            on_refresh,
            cancel: CancelToken::new(),
            id_of,
        };

        {
            let cancel = list.cancel.clone();
            on_cleanup(move || cancel.cancel());
        }

        // Mirror external cache writes made by other hook instances watching
        // the same parent. Compared by fingerprint so our own propagation
        // does not loop.
        if let Some(cache) = list.cache.clone() {
            let list = list.clone();
            Effect::new(move |_| {
                let items = cache.read().get();
                if list.phase.get_untracked() != Phase::Ready {
                    return;
                }
                let fp = fingerprint_ids(items.iter().map(list.id_of));
                if fp != list.fingerprint.get_value() {
                    list.fingerprint.set_value(fp);
                    list.items.set(items);
                }
            });
        }

        list
    }

    pub fn items(&self) -> Signal<Vec<T>> {
        self.items.into()
    }

    /// Current list without subscribing, for mutation snapshots.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.get_untracked()
    }

    pub fn phase(&self) -> Signal<Phase> {
        let phase = self.phase;
        Signal::derive(move || phase.get())
    }

    pub fn is_loading(&self) -> bool {
        self.phase.get() == Phase::Loading
    }

    pub fn error(&self) -> Signal<Option<String>> {
        let error = self.error;
        Signal::derive(move || error.get())
    }

    pub fn cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Claim initialization. True exactly once, so at most one first fetch
    /// is ever issued.
    pub fn begin_init(&self) -> bool {
        if self.phase.get_untracked() != Phase::Uninitialized {
            return false;
        }
        self.phase.set(Phase::Loading);
        true
    }

    /// Adopt a warm shared cache without touching the network. False when
    /// there is no cache or it is empty.
    pub fn try_adopt_cache(&self) -> bool {
        let Some(cache) = &self.cache else {
            return false;
        };
        let items = cache.read().get_untracked();
        if items.is_empty() {
            return false;
        }
        self.fingerprint
            .set_value(fingerprint_ids(items.iter().map(self.id_of)));
        self.items.set(items);
        self.phase.set(Phase::Ready);
        true
    }

    /// Short-circuit to ready with no items (parent relationship absent).
    pub fn ready_empty(&self) {
        self.items.set(Vec::new());
        self.fingerprint.set_value(String::new());
        self.phase.set(Phase::Ready);
    }

    /// First fetch landed.
    pub fn finish_init(&self, items: Vec<T>) {
        self.error.set(None);
        self.replace(items);
        self.phase.set(Phase::Ready);
    }

    /// First fetch failed: record the error, stay usable with an empty list.
    pub fn init_failed(&self, message: String) {
        self.error.set(Some(message));
        self.phase.set(Phase::Ready);
    }

    /// Replace local state with a confirmed server list and propagate it:
    /// through the cache when mirroring, else through the refresh callback.
    pub fn replace(&self, items: Vec<T>) {
        self.fingerprint
            .set_value(fingerprint_ids(items.iter().map(self.id_of)));
        self.items.set(items.clone());
        if let Some(cache) = &self.cache {
            cache.set(items);
        } else if let Some(on_refresh) = &self.on_refresh {
            on_refresh.run(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fingerprint_ids;

    #[test]
    fn test_fingerprint_is_order_independent() {
        let a = fingerprint_ids([3, 1, 2].into_iter());
        let b = fingerprint_ids([2, 3, 1].into_iter());
        assert_eq!(a, b);
        assert_eq!(a, "1,2,3");
    }

    #[test]
    fn test_fingerprint_distinguishes_content() {
        assert_ne!(
            fingerprint_ids([1, 2].into_iter()),
            fingerprint_ids([1, 2, 3].into_iter())
        );
        assert_eq!(fingerprint_ids(std::iter::empty()), "");
    }
}
