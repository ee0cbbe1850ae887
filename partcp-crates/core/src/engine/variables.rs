use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use crate::containers::StorageKey;
#[cfg(doc)]
use crate::engine::Store;

/// Identifies a [`Store`]. Every store created in a process receives a distinct id.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StoreId(u32);

impl StoreId {
    pub(crate) fn next() -> StoreId {
        static NEXT_STORE_ID: AtomicU32 = AtomicU32::new(0);
        StoreId(NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The index of a variable within the [`Store`] which created it.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct VariableId(u32);

impl StorageKey for VariableId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        VariableId(index as u32)
    }
}

/// A handle to an integer variable.
///
/// The handle remembers which [`Store`] created it; every store operation that receives a
/// handle from another store reports [`crate::ModelError::OwnershipMismatch`] (or panics, for
/// the plain accessors).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct DomainId {
    pub(crate) store: StoreId,
    pub(crate) variable: VariableId,
}

impl DomainId {
    pub(crate) fn new(store: StoreId, variable: VariableId) -> DomainId {
        DomainId { store, variable }
    }

    /// The position of the variable in the order of declaration.
    pub fn index(&self) -> usize {
        self.variable.index()
    }

    pub fn store(&self) -> StoreId {
        self.store
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.variable.0)
    }
}
