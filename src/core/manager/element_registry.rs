//=========================================================================
// Element Registry
//=========================================================================
//
// Scene manager that tracks elements registering themselves on spawn and
// unregistering on despawn (enemies, pickups, spawn points, ...).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use super::{AnyManager, Lifecycle, SceneTier};

//=== ElementRegistry =====================================================

/// Set of elements of type `E` currently alive in the scene.
///
/// Register it as a scene manager, then resolve it from the scene root:
///
/// ```
/// # use gameflow::prelude::*;
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// struct EnemyId(u32);
///
/// let mut scene = SceneRoot::builder("Arena")
///     .with_manager(Box::new(ElementRegistry::<EnemyId>::new()))
///     .build()
///     .unwrap();
///
/// if let Some(enemies) = scene.manager_mut::<ElementRegistry<EnemyId>>() {
///     enemies.register(EnemyId(1));
/// }
/// ```
#[derive(Debug)]
pub struct ElementRegistry<E: Eq + Hash> {
    elements: HashSet<E>,
}

impl<E: Eq + Hash> ElementRegistry<E> {
    pub fn new() -> Self {
        Self {
            elements: HashSet::new(),
        }
    }

    /// Adds an element. Returns false if it was already registered.
    pub fn register(&mut self, element: E) -> bool {
        self.elements.insert(element)
    }

    /// Removes an element. Returns false if it was not registered.
    pub fn unregister(&mut self, element: &E) -> bool {
        self.elements.remove(element)
    }

    pub fn contains(&self, element: &E) -> bool {
        self.elements.contains(element)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates registered elements in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.elements.iter()
    }
}

impl<E: Eq + Hash> Default for ElementRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Eq + Hash + 'static> Lifecycle for ElementRegistry<E> {
    fn on_exit(&mut self) {
        self.elements.clear();
    }
}

impl<E: Eq + Hash + 'static> AnyManager for ElementRegistry<E> {
    type Tier = SceneTier;
}

//=========================================================================
// Unit Tests
//=========================================================================
