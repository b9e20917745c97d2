use crate::{deps::Deps, key::Key};
use std::{any::Any, collections::HashMap, rc::Rc};

/// The stored (dependencies, value) pair for one (owner, key) slot.
///
/// Both fields are overwritten together on recomputation.
pub(crate) struct Record {
    pub(crate) deps: Deps,
    pub(crate) value: Rc<dyn Any>,
}

/// The per-owner table of memoized slots. Keys are held strongly for the
/// life of the owner's entry.
pub(crate) type KeyedRecords = HashMap<Key, Record>;
