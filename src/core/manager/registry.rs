//=========================================================================
// Manager Registry
//=========================================================================
//
// Ordered, type-keyed store of manager instances.
//
// Architecture:
//   RegistryBuilder ──with(Box<M>)──> build() ──> ManagerRegistry<M>
//                                                   └─ entries: Vec<Box<M>>
//
// Resolution:
//   resolve::<T>(exact_only)
//     1. first entry whose concrete type is T
//     2. (unless exact_only) first entry whose lineage contains T
//
// Same type-erasure approach as a TypeId-keyed message bus, but entries
// stay in registration order so base-type resolution is deterministic.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::collections::HashSet;

use log::debug;

//=== Internal Dependencies ===============================================

use super::AnyManager;
use crate::core::error::{GameflowError, Result};

//=== RegistryBuilder =====================================================

/// Collects managers before freezing them into a [`ManagerRegistry`].
pub struct RegistryBuilder<M: ?Sized + AnyManager> {
    entries: Vec<Box<M>>,
}

impl<M: ?Sized + AnyManager> RegistryBuilder<M> {
    /// Appends a manager. Registration order is resolution order.
    pub fn with(mut self, manager: Box<M>) -> Self {
        self.entries.push(manager);
        self
    }

    /// Appends a manager in place.
    pub fn push(&mut self, manager: Box<M>) {
        self.entries.push(manager);
    }

    /// Freezes the registry.
    ///
    /// # Errors
    ///
    /// Returns [`GameflowError::DuplicateManager`] if two managers share a
    /// concrete type.
    pub fn build(self) -> Result<ManagerRegistry<M>> {
        let mut seen = HashSet::with_capacity(self.entries.len());

        for entry in &self.entries {
            let manager: &M = entry;
            if !seen.insert(manager.as_any().type_id()) {
                return Err(GameflowError::DuplicateManager {
                    type_name: manager.type_name(),
                });
            }
        }

        debug!("Built manager registry with {} entries", self.entries.len());

        Ok(ManagerRegistry {
            entries: self.entries,
        })
    }
}

//=== ManagerRegistry =====================================================

/// Fixed set of managers, one per concrete type, in registration order.
///
/// The set never changes after construction; only the managers themselves
/// are mutable.
pub struct ManagerRegistry<M: ?Sized + AnyManager> {
    entries: Vec<Box<M>>,
}

impl<M: ?Sized + AnyManager> ManagerRegistry<M> {
    //--- Construction -----------------------------------------------------

    /// Starts an empty builder.
    pub fn builder() -> RegistryBuilder<M> {
        RegistryBuilder {
            entries: Vec::new(),
        }
    }

    /// A registry with no managers.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    //--- Resolution -------------------------------------------------------

    /// Resolves a manager of type `T`.
    ///
    /// An exact concrete match always wins. Otherwise, unless `exact_only`
    /// is set, the first registered manager that extends `T` is returned.
    pub fn resolve<T: Any>(&self, exact_only: bool) -> Option<&T> {
        let index = self.position::<T>(exact_only)?;
        let manager: &M = &self.entries[index];

        match manager.as_any().downcast_ref::<T>() {
            Some(exact) => Some(exact),
            None => manager
                .upcast(TypeId::of::<T>())
                .and_then(|base| base.downcast_ref::<T>()),
        }
    }

    /// Mutable counterpart of [`ManagerRegistry::resolve`].
    pub fn resolve_mut<T: Any>(&mut self, exact_only: bool) -> Option<&mut T> {
        let index = self.position::<T>(exact_only)?;
        let manager: &mut M = &mut self.entries[index];

        if (*manager).as_any().is::<T>() {
            manager.as_any_mut().downcast_mut::<T>()
        } else {
            manager
                .upcast_mut(TypeId::of::<T>())
                .and_then(|base| base.downcast_mut::<T>())
        }
    }

    /// Returns true if `T` resolves.
    pub fn contains<T: Any>(&self, exact_only: bool) -> bool {
        self.position::<T>(exact_only).is_some()
    }

    /// Returns true if any manager resolves as the type with the given id.
    pub(crate) fn contains_type_id(&self, target: TypeId) -> bool {
        self.entries.iter().any(|entry| {
            let manager: &M = entry;
            manager.as_any().type_id() == target || manager.upcast(target).is_some()
        })
    }

    fn position<T: Any>(&self, exact_only: bool) -> Option<usize> {
        let target = TypeId::of::<T>();

        let exact = self.entries.iter().position(|entry| {
            let manager: &M = entry;
            manager.as_any().is::<T>()
        });

        if exact.is_some() || exact_only {
            return exact;
        }

        self.entries.iter().position(|entry| {
            let manager: &M = entry;
            manager.upcast(target).is_some()
        })
    }

    //--- Iteration --------------------------------------------------------

    /// Iterates managers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.entries.iter().map(|entry| &**entry)
    }

    /// Iterates managers mutably in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut M> {
        self.entries.iter_mut().map(|entry| &mut **entry)
    }

    /// Number of registered managers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no managers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concrete type names in registration order.
    pub fn type_names(&self) -> Vec<&'static str> {
        self.iter().map(|manager| manager.type_name()).collect()
    }
}

impl<M: ?Sized + AnyManager> Default for ManagerRegistry<M> {
    fn default() -> Self {
        Self::empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
