use crate::{deps::Deps, key::Key, memoizer::Memoizer, record::Record};
use std::{any::Any, rc::Rc};

/// A memoizer bound to one owner.
///
/// Cheap to create; `Memoizer::bind` hands one out per call. All operations
/// resolve against the owner's identity, so two scopes bound to the same
/// owner see the same slots.
pub struct Scope {
    memoizer: Rc<Memoizer>,
    owner: Rc<dyn Any>,
}

impl Scope {
    pub(crate) fn new(memoizer: Rc<Memoizer>, owner: Rc<dyn Any>) -> Scope {
        Scope { memoizer, owner }
    }

    /// Compute `producer` once for this owner and return the cached value on
    /// every later call. No key, no dependencies: the slot never invalidates.
    pub fn memo_once<T: 'static>(&self, producer: impl FnOnce() -> T) -> Rc<T> {
        self.memoize(Key::Unkeyed, Deps::NONE, || Rc::new(producer()))
    }

    /// Compute `producer` once per (owner, key) and cache forever.
    pub fn memo_keyed<T: 'static>(
        &self,
        key: impl Into<Key>,
        producer: impl FnOnce() -> T,
    ) -> Rc<T> {
        self.memoize(key.into(), Deps::NONE, || Rc::new(producer()))
    }

    /// Dependency-checked memoization: recompute exactly when `deps` no
    /// longer matches the sequence the cached value was computed from
    /// (see [`Deps`] for the comparison rules).
    ///
    /// A hit panics if the slot holds a different type than `T`; a recompute
    /// replaces the slot's type along with its value.
    pub fn memo_with_deps<T: 'static>(
        &self,
        key: impl Into<Key>,
        deps: Deps,
        producer: impl FnOnce() -> T,
    ) -> Rc<T> {
        self.memoize(key.into(), deps, || Rc::new(producer()))
    }

    /// Cache `callback` itself for this owner, without ever invoking it.
    /// Returns the first callback stored; later ones are dropped.
    pub fn callback_once<F: 'static>(&self, callback: F) -> Rc<F> {
        self.memoize(Key::Unkeyed, Deps::NONE, || Rc::new(callback))
    }

    /// Cache `callback` itself per (owner, key), without ever invoking it.
    pub fn callback_keyed<F: 'static>(&self, key: impl Into<Key>, callback: F) -> Rc<F> {
        self.memoize(key.into(), Deps::NONE, || Rc::new(callback))
    }

    /// Cache `callback` itself, replaced when `deps` stops matching.
    pub fn callback_with_deps<F: 'static>(
        &self,
        key: impl Into<Key>,
        deps: Deps,
        callback: F,
    ) -> Rc<F> {
        self.memoize(key.into(), deps, || Rc::new(callback))
    }

    /// The shared lookup/compare/recompute routine.
    ///
    /// `produce` runs with no engine borrow held, so a producer may re-enter
    /// this scope; the last completed write for a slot wins. A panicking
    /// producer propagates before anything is written, leaving any prior
    /// record untouched.
    ///
    /// Values are stored type-erased; only a cache hit downcasts to the
    /// requested type, and panics on a mismatch. A call whose dependencies
    /// no longer match recomputes and may store a different type in the slot.
    fn memoize<T: 'static>(
        &self,
        key: Key,
        deps: Deps,
        produce: impl FnOnce() -> Rc<T>,
    ) -> Rc<T> {
        let cached = self.memoizer.with_records(&self.owner, |records| {
            let record = records.get(&key)?;
            if cfg!(debug_assertions) && record.deps.len() != deps.len() {
                log::warn!(
                    "dependency list for {:?} changed length ({} -> {}); \
                     only the overlapping prefix is compared",
                    key,
                    record.deps.len(),
                    deps.len(),
                );
            }
            record
                .deps
                .matches(&deps)
                .then(|| record.value.clone())
        });
        if let Some(value) = cached {
            return downcast(&key, value);
        }

        let value = produce();
        log::trace!("computed value for {key:?}");
        self.memoizer.with_records(&self.owner, |records| {
            let stored = value.clone() as Rc<dyn Any>;
            records.insert(key, Record { deps, value: stored });
        });
        value
    }
}

fn downcast<T: 'static>(key: &Key, value: Rc<dyn Any>) -> Rc<T> {
    match value.downcast::<T>() {
        Ok(value) => value,
        Err(_) => panic!("cached value for {key:?} has a different type than requested"),
    }
}
