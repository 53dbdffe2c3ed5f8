//! Registry - concurrent map from payload type to its sorted subscriber list
//!
//! Lists are copy-on-write: an update builds a new `Arc<[Subscriber]>` and swaps
//! it in under the key's shard lock. Readers clone the `Arc` and drop the lock
//! immediately, so an emission in flight keeps iterating its own snapshot while
//! later subscriptions land.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::subscriber::Subscriber;
use crate::type_key::TypeKey;

/// Immutable snapshot of one key's subscribers, highest priority first.
pub type SubscriberList = Arc<[Subscriber]>;

#[derive(Debug, Default)]
pub struct Registry {
    entries: DashMap<TypeKey, SubscriberList>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current list for `key`, or `None` if nothing was ever registered.
    pub fn get(&self, key: &TypeKey) -> Option<SubscriberList> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Replace the list for `key` with `f(current)`.
    ///
    /// `f` sees an empty slice when the key is absent and runs while holding the
    /// key's write lock, so concurrent updates to one key are serialised. If `f`
    /// panics the stored list is left untouched and the panic propagates.
    pub fn update<F>(&self, key: TypeKey, f: F) -> SubscriberList
    where
        F: FnOnce(&[Subscriber]) -> Vec<Subscriber>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                let next: SubscriberList = f(occupied.get()).into();
                occupied.insert(Arc::clone(&next));
                next
            }
            Entry::Vacant(vacant) => {
                let next: SubscriberList = f(&[]).into();
                vacant.insert(Arc::clone(&next));
                next
            }
        }
    }

    /// Append `subscriber` to its key and restore priority order.
    ///
    /// Returns the resulting list length.
    pub fn insert(&self, subscriber: Subscriber) -> usize {
        let list = self.update(subscriber.key(), move |current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend_from_slice(current);
            next.push(subscriber);
            // stable: equal priorities keep subscription order
            next.sort_by(|a, b| b.priority().cmp(&a.priority()));
            next
        });
        list.len()
    }

    pub fn len(&self, key: &TypeKey) -> usize {
        self.entries.get(key).map_or(0, |entry| entry.len())
    }

    /// Number of distinct payload types with at least one subscriber.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{Context, HandlerError, Priority};
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::thread;

    fn noop(priority: i32) -> Subscriber {
        Subscriber::new(
            |_: &Context, _: &u8| -> Result<(), HandlerError> { Ok(()) },
            Priority::new(priority),
        )
    }

    fn priorities(list: &[Subscriber]) -> Vec<i32> {
        list.iter().map(|s| s.priority().value()).collect()
    }

    #[test]
    fn test_get_missing_key() {
        let registry = Registry::new();
        assert!(registry.get(&TypeKey::of::<u8>()).is_none());
        assert_eq!(registry.len(&TypeKey::of::<u8>()), 0);
    }

    #[test]
    fn test_insert_sorts_descending() {
        let registry = Registry::new();
        for p in [0, 100, -100, 50] {
            registry.insert(noop(p));
        }

        let list = registry.get(&TypeKey::of::<u8>()).unwrap();
        assert_eq!(priorities(&list), [100, 50, 0, -100]);
        assert_eq!(registry.key_count(), 1);
    }

    #[test]
    fn test_snapshot_is_not_mutated_by_later_insert() {
        let registry = Registry::new();
        registry.insert(noop(0));
        let before = registry.get(&TypeKey::of::<u8>()).unwrap();

        registry.insert(noop(10));

        assert_eq!(before.len(), 1);
        assert_eq!(registry.len(&TypeKey::of::<u8>()), 2);
    }

    #[test]
    fn test_panicking_update_keeps_previous_list() {
        let registry = Registry::new();
        registry.insert(noop(1));

        let result = catch_unwind(AssertUnwindSafe(|| {
            registry.update(TypeKey::of::<u8>(), |_| panic!("transform failed"));
        }));
        assert!(result.is_err());

        // lock released and data intact
        assert_eq!(registry.len(&TypeKey::of::<u8>()), 1);
        registry.insert(noop(2));
        assert_eq!(registry.len(&TypeKey::of::<u8>()), 2);
    }

    #[test]
    fn test_concurrent_inserts_stay_sorted() {
        let registry = Arc::new(Registry::new());
        let mut workers = Vec::new();

        for t in 0..8 {
            let registry = Arc::clone(&registry);
            workers.push(thread::spawn(move || {
                for i in 0..50 {
                    registry.insert(noop((t * 50 + i) % 17 - 8));
                    let list = registry.get(&TypeKey::of::<u8>()).unwrap();
                    let p = priorities(&list);
                    assert!(p.windows(2).all(|w| w[0] >= w[1]));
                }
            }));
        }
        for w in workers {
            w.join().unwrap();
        }

        assert_eq!(registry.len(&TypeKey::of::<u8>()), 400);
    }
}
