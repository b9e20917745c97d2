use crate::{record::KeyedRecords, scope::Scope};
use std::{
    any::Any,
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

/// The identity-keyed outer cache.
///
/// Maps owner objects to their memoized slots. Owners are held by `Weak`
/// references, so an entry never keeps its owner alive; once the owner is
/// dropped everywhere else, the entry is dead weight and gets swept on the
/// next `bind`.
///
/// Independent memoizers never share storage. A hosting framework is expected
/// to construct one memoizer per logical instance and reuse it across
/// re-entries.
pub struct Memoizer {
    owners: RefCell<HashMap<OwnerAddr, OwnerSlot>>,
}

/// Allocation address of an owner. Identity only, never dereferenced.
type OwnerAddr = *const ();

struct OwnerSlot {
    /// Liveness witness for the address. A slot whose weak no longer
    /// upgrades is stale and treated as absent.
    owner: Weak<dyn Any>,
    records: KeyedRecords,
}

impl Memoizer {
    pub fn new() -> Rc<Memoizer> {
        Rc::new(Memoizer {
            owners: RefCell::new(HashMap::new()),
        })
    }

    /// Bind an owner, yielding the accessor for its memoized slots.
    ///
    /// Repeated binds of the same owner route to the same underlying slots;
    /// that is enforced by owner identity, not by caching the returned
    /// handle. The handle holds a strong reference for its own lifetime, so
    /// the identity it resolves against cannot be recycled mid-use.
    pub fn bind<O: 'static>(self: &Rc<Self>, owner: &Rc<O>) -> Scope {
        self.sweep();
        Scope::new(self.clone(), owner.clone() as Rc<dyn Any>)
    }

    /// Run `f` over the record table for `owner`, creating the table on
    /// first use. A table left behind by a dead previous occupant of the
    /// same address is discarded and replaced with a fresh one.
    pub(crate) fn with_records<R>(
        &self,
        owner: &Rc<dyn Any>,
        f: impl FnOnce(&mut KeyedRecords) -> R,
    ) -> R {
        let addr = Rc::as_ptr(owner) as OwnerAddr;
        let mut owners = self.owners.borrow_mut();
        let slot = owners.entry(addr).or_insert_with(|| OwnerSlot {
            owner: Rc::downgrade(owner),
            records: KeyedRecords::new(),
        });
        if slot.owner.strong_count() == 0 {
            slot.owner = Rc::downgrade(owner);
            slot.records.clear();
        }
        f(&mut slot.records)
    }

    /// Drop entries whose owner has been deallocated.
    fn sweep(&self) {
        let mut owners = self.owners.borrow_mut();
        let before = owners.len();
        owners.retain(|_, slot| slot.owner.strong_count() != 0);
        let swept = before - owners.len();
        if swept != 0 {
            log::trace!("swept {swept} dead owner slot(s)");
        }
    }

    #[cfg(test)]
    pub(crate) fn owner_count(&self) -> usize {
        self.owners.borrow().len()
    }
}
