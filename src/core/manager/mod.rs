//=========================================================================
// Managers
//=========================================================================
//
// Capability traits for managers and the registry that resolves them.
//
// Architecture:
//   AnyManager (AsAny + Lifecycle, Tier)
//     ├─ Manager            Tier = SceneTier        scene-scoped
//     └─ PersistentManager  Tier = PersistentTier   process-scoped (+ SceneAware)
//
//   ManagerRegistry<dyn Manager>            owned by SceneRoot
//   ManagerRegistry<dyn PersistentManager>  owned by PersistentRoot
//
// Managers compose instead of inheriting: a specialised manager embeds
// its base and exposes it through `AnyManager::upcast`, which the registry
// uses for base-type resolution.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::fmt;

//=== Module Declarations =================================================

mod element_registry;
mod registry;
mod requirements;

//=== Public API ==========================================================

pub use element_registry::ElementRegistry;
pub use registry::{ManagerRegistry, RegistryBuilder};
pub use requirements::{MissingDependency, Requirement, Requirements, RequiresManagers, ValidationReport};

pub(crate) use requirements::validate;

use crate::core::scene::SceneInfo;

//=== AsAny ===============================================================

/// Type-erased access to a concrete value.
///
/// Implemented for every `'static` type. Call it through a trait object
/// (`&dyn Manager`), never through a `Box`, so the concrete type is the
/// one reported.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

//=== Capability Traits ===================================================

/// Enter/exit hooks run when the owning root starts or shuts down.
pub trait Lifecycle {
    /// Called once the owning root is installed.
    fn on_enter(&mut self) {}

    /// Called before the owning root is dropped.
    fn on_exit(&mut self) {}
}

/// Scene swap notifications delivered to persistent managers.
pub trait SceneAware {
    /// Called once a new scene has been swapped in and has settled.
    fn on_scene_loaded(&mut self, _scene: &SceneInfo) {}

    /// Called just before a new scene starts loading.
    fn on_scene_exit(&mut self) {}
}

/// Registry tier marker carried by every manager type.
pub trait Tier {
    const KIND: ManagerKind;
}

/// Tier of managers owned by a [`SceneRoot`](crate::core::scene::SceneRoot).
pub struct SceneTier;

impl Tier for SceneTier {
    const KIND: ManagerKind = ManagerKind::Scene;
}

/// Tier of managers owned by the [`PersistentRoot`](crate::core::globals::PersistentRoot).
pub struct PersistentTier;

impl Tier for PersistentTier {
    const KIND: ManagerKind = ManagerKind::Persistent;
}

/// Shared base of both manager tiers, stored in a [`ManagerRegistry`].
///
/// `Tier` fixes which registry the type belongs to. A type implements this
/// trait once, so it is either a [`Manager`] or a [`PersistentManager`],
/// never both. Only `upcast`/`upcast_mut` need overriding, and only by
/// managers that extend another manager type.
///
/// ```
/// # use std::any::{Any, TypeId};
/// # use gameflow::prelude::*;
/// # use gameflow::core::manager::{extends, extends_mut};
/// #[derive(Default)]
/// struct AudioManager { volume: f32 }
/// impl Lifecycle for AudioManager {}
/// impl AnyManager for AudioManager {
///     type Tier = SceneTier;
/// }
///
/// #[derive(Default)]
/// struct SpatialAudioManager { base: AudioManager }
/// impl Lifecycle for SpatialAudioManager {}
/// impl AnyManager for SpatialAudioManager {
///     type Tier = SceneTier;
///
///     fn upcast(&self, base: TypeId) -> Option<&dyn Any> {
///         extends(base, &self.base)
///     }
///     fn upcast_mut(&mut self, base: TypeId) -> Option<&mut dyn Any> {
///         extends_mut(base, &mut self.base)
///     }
/// }
///
/// fn scene_only<M: Manager>() {}
/// scene_only::<SpatialAudioManager>();
/// ```
pub trait AnyManager: AsAny + Lifecycle {
    type Tier: Tier;

    /// Returns the embedded manager of type `base`, if this manager extends it.
    fn upcast(&self, _base: TypeId) -> Option<&dyn Any> {
        None
    }

    /// Mutable counterpart of [`AnyManager::upcast`].
    fn upcast_mut(&mut self, _base: TypeId) -> Option<&mut dyn Any> {
        None
    }
}

/// A manager owned by the current scene root.
pub trait Manager: AnyManager<Tier = SceneTier> {}

impl<T: AnyManager<Tier = SceneTier>> Manager for T {}

/// A manager that lives for the whole process and follows scene swaps.
pub trait PersistentManager: AnyManager<Tier = PersistentTier> + SceneAware {}

impl<T: AnyManager<Tier = PersistentTier> + SceneAware> PersistentManager for T {}

//=== Lineage Helpers =====================================================

/// Resolves `base` against an embedded base manager, walking its own lineage.
pub fn extends<B: AnyManager>(base: TypeId, inner: &B) -> Option<&dyn Any> {
    if base == TypeId::of::<B>() {
        Some(inner)
    } else {
        inner.upcast(base)
    }
}

/// Mutable counterpart of [`extends`].
pub fn extends_mut<B: AnyManager>(base: TypeId, inner: &mut B) -> Option<&mut dyn Any> {
    if base == TypeId::of::<B>() {
        Some(inner)
    } else {
        inner.upcast_mut(base)
    }
}

//=== ManagerKind =========================================================

/// Registry tier a manager belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerKind {
    /// Owned by the current scene root, recreated on every scene load.
    Scene,

    /// Owned by the persistent root, alive for the whole process.
    Persistent,
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scene => write!(f, "scene"),
            Self::Persistent => write!(f, "persistent"),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Base {
        hits: u32,
    }
    impl Lifecycle for Base {}
    impl AnyManager for Base {
        type Tier = SceneTier;
    }

    #[derive(Default)]
    struct Middle {
        base: Base,
    }
    impl Lifecycle for Middle {}
    impl AnyManager for Middle {
        type Tier = SceneTier;

        fn upcast(&self, base: TypeId) -> Option<&dyn Any> {
            extends(base, &self.base)
        }
        fn upcast_mut(&mut self, base: TypeId) -> Option<&mut dyn Any> {
            extends_mut(base, &mut self.base)
        }
    }

    #[derive(Default)]
    struct Leaf {
        middle: Middle,
    }
    impl Lifecycle for Leaf {}
    impl AnyManager for Leaf {
        type Tier = SceneTier;

        fn upcast(&self, base: TypeId) -> Option<&dyn Any> {
            extends(base, &self.middle)
        }
        fn upcast_mut(&mut self, base: TypeId) -> Option<&mut dyn Any> {
            extends_mut(base, &mut self.middle)
        }
    }

    #[test]
    fn as_any_reports_concrete_type_through_trait_object() {
        let leaf: Box<dyn Manager> = Box::new(Leaf::default());
        let erased: &dyn Manager = &*leaf;

        assert!(erased.as_any().is::<Leaf>());
        assert!(erased.type_name().ends_with("Leaf"));
    }

    #[test]
    fn upcast_walks_nested_lineage() {
        let mut leaf = Leaf::default();

        assert!(leaf.upcast(TypeId::of::<Middle>()).is_some());
        assert!(leaf.upcast(TypeId::of::<Base>()).is_some());
        assert!(leaf.upcast(TypeId::of::<Leaf>()).is_none());

        let base = leaf
            .upcast_mut(TypeId::of::<Base>())
            .and_then(|b| b.downcast_mut::<Base>())
            .unwrap();
        base.hits += 1;

        assert_eq!(leaf.middle.base.hits, 1);
    }

    #[test]
    fn unrelated_type_does_not_upcast() {
        let middle = Middle::default();
        assert!(middle.upcast(TypeId::of::<Leaf>()).is_none());
        assert!(middle.upcast(TypeId::of::<String>()).is_none());
    }

    #[test]
    fn manager_kind_display() {
        assert_eq!(ManagerKind::Scene.to_string(), "scene");
        assert_eq!(ManagerKind::Persistent.to_string(), "persistent");
    }
}
