//=========================================================================
// Manager Requirements
//=========================================================================
//
// Declarative manager dependencies and the validation pass over them.
//
// Architecture:
//   RequiresManagers::requirements() → Requirements (one per dependent)
//                                          ↓
//   validate(&[Requirements], persistent registry, scene registry)
//          ├─ wrong tier          → Err(ConfigurationFault), pass aborted
//          ├─ no scene root       → Err(MissingSceneRoot), pass aborted
//          └─ not registered      → MissingDependency (warn, continue)
//
// Declarations are explicit tables built once, checked out-of-band before
// gameplay relies on them. Runtime lookups still return `Option`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::fmt;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{AnyManager, Manager, ManagerKind, ManagerRegistry, PersistentManager, Tier};
use crate::core::error::{GameflowError, Result};

//=== Requirement =========================================================

/// One declared dependency of a component on a manager type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    /// Type name of the component declaring the dependency.
    pub dependent: &'static str,

    /// Type name of the required manager.
    pub required: &'static str,

    /// Tier the manager is expected to live in.
    pub kind: ManagerKind,

    type_id: TypeId,
}

//=== Requirements ========================================================

/// The manager dependencies declared by one component type.
///
/// ```
/// # use gameflow::prelude::*;
/// # struct Inventory;
/// # impl Lifecycle for Inventory {}
/// # impl AnyManager for Inventory { type Tier = SceneTier; }
/// # struct SaveSystem;
/// # impl Lifecycle for SaveSystem {}
/// # impl AnyManager for SaveSystem { type Tier = PersistentTier; }
/// # impl SceneAware for SaveSystem {}
/// struct ShopKeeper;
///
/// impl RequiresManagers for ShopKeeper {
///     fn requirements() -> Requirements {
///         Requirements::of::<Self>()
///             .persistent::<SaveSystem>()
///             .manager::<Inventory>()
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Requirements {
    dependent: &'static str,
    entries: Vec<Requirement>,
}

impl Requirements {
    /// Starts an empty declaration for the dependent type `D`.
    pub fn of<D: ?Sized + 'static>() -> Self {
        Self {
            dependent: std::any::type_name::<D>(),
            entries: Vec::new(),
        }
    }

    /// Requires a scene-scoped manager resolvable as `T`.
    ///
    /// A persistent manager is rejected whether or not it is registered:
    ///
    /// ```compile_fail
    /// # use gameflow::prelude::*;
    /// struct SaveSystem;
    /// impl Lifecycle for SaveSystem {}
    /// impl AnyManager for SaveSystem { type Tier = PersistentTier; }
    /// impl SceneAware for SaveSystem {}
    ///
    /// struct Hud;
    /// let _ = Requirements::of::<Hud>().manager::<SaveSystem>();
    /// ```
    pub fn manager<T: Manager>(self) -> Self {
        self.require::<T>()
    }

    /// Requires a persistent manager resolvable as `T`.
    ///
    /// ```compile_fail
    /// # use gameflow::prelude::*;
    /// struct Inventory;
    /// impl Lifecycle for Inventory {}
    /// impl AnyManager for Inventory { type Tier = SceneTier; }
    ///
    /// struct Hud;
    /// let _ = Requirements::of::<Hud>().persistent::<Inventory>();
    /// ```
    pub fn persistent<T: PersistentManager>(self) -> Self {
        self.require::<T>()
    }

    fn require<T: AnyManager>(mut self) -> Self {
        self.entries.push(Requirement {
            dependent: self.dependent,
            required: std::any::type_name::<T>(),
            kind: <T::Tier as Tier>::KIND,
            type_id: TypeId::of::<T>(),
        });
        self
    }

    /// Type name of the declaring component.
    pub fn dependent(&self) -> &'static str {
        self.dependent
    }

    /// Declared requirements in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.iter()
    }

    /// Returns true if nothing is required.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn requires(&self, kind: ManagerKind) -> bool {
        self.entries.iter().any(|entry| entry.kind == kind)
    }
}

//=== RequiresManagers ====================================================

/// Implemented by components that depend on managers being registered.
pub trait RequiresManagers {
    fn requirements() -> Requirements;
}

//=== ValidationReport ====================================================

/// A required manager that no registry provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDependency {
    pub dependent: &'static str,
    pub required: &'static str,
    pub kind: ManagerKind,
}

impl fmt::Display for MissingDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = match self.kind {
            ManagerKind::Scene => "scene root",
            ManagerKind::Persistent => "persistent root",
        };
        write!(
            f,
            "{} requires {} but it is missing from the {}",
            self.dependent, self.required, owner
        )
    }
}

/// Outcome of a validation pass that found no configuration fault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Number of requirements checked.
    pub checked: usize,

    /// Requirements that resolved to nothing.
    pub missing: Vec<MissingDependency>,
}

impl ValidationReport {
    /// Returns true if every requirement resolved.
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }
}

//=== Validation ==========================================================

/// Checks declared requirements against both registry tiers.
///
/// Persistent requirements are checked before scene requirements for each
/// dependent, and each dependent type is checked once.
///
/// # Errors
///
/// - [`GameflowError::ConfigurationFault`] if a required type is only found
///   in the other tier.
/// - [`GameflowError::MissingSceneRoot`] if scene managers are required but
///   `scene` is `None`.
pub(crate) fn validate(
    declarations: &[Requirements],
    persistent: &ManagerRegistry<dyn PersistentManager>,
    scene: Option<&ManagerRegistry<dyn Manager>>,
) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    let mut seen: Vec<&'static str> = Vec::with_capacity(declarations.len());

    for declaration in declarations {
        if seen.contains(&declaration.dependent) {
            continue;
        }
        seen.push(declaration.dependent);

        if declaration.requires(ManagerKind::Scene) && scene.is_none() {
            warn!("{} requires scene managers but no scene root is installed", declaration.dependent);
            return Err(GameflowError::MissingSceneRoot {
                dependent: declaration.dependent,
            });
        }

        let ordered = declaration
            .iter()
            .filter(|r| r.kind == ManagerKind::Persistent)
            .chain(declaration.iter().filter(|r| r.kind == ManagerKind::Scene));

        for requirement in ordered {
            report.checked += 1;

            let in_persistent = persistent.contains_type_id(requirement.type_id);
            let in_scene = scene.is_some_and(|registry| registry.contains_type_id(requirement.type_id));

            let (expected_found, other_found, other_kind) = match requirement.kind {
                ManagerKind::Persistent => (in_persistent, in_scene, ManagerKind::Scene),
                ManagerKind::Scene => (in_scene, in_persistent, ManagerKind::Persistent),
            };

            if expected_found {
                continue;
            }

            if other_found {
                warn!(
                    "{} requires {} as a {} manager, but it is registered as a {} manager",
                    requirement.dependent, requirement.required, requirement.kind, other_kind
                );
                return Err(GameflowError::ConfigurationFault {
                    dependent: requirement.dependent,
                    required: requirement.required,
                    expected: requirement.kind,
                    found: other_kind,
                });
            }

            let missing = MissingDependency {
                dependent: requirement.dependent,
                required: requirement.required,
                kind: requirement.kind,
            };
            warn!("{}", missing);
            report.missing.push(missing);
        }
    }

    debug!(
        "Validated {} requirements ({} missing)",
        report.checked,
        report.missing.len()
    );

    Ok(report)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manager::{extends, extends_mut, Lifecycle, PersistentTier, SceneAware, SceneTier};

    //--- Test Managers ----------------------------------------------------

    struct Inventory;
    impl Lifecycle for Inventory {}
    impl AnyManager for Inventory {
        type Tier = SceneTier;
    }

    struct Spawner;
    impl Lifecycle for Spawner {}
    impl AnyManager for Spawner {
        type Tier = SceneTier;
    }

    struct SaveSystem;
    impl Lifecycle for SaveSystem {}
    impl AnyManager for SaveSystem {
        type Tier = PersistentTier;
    }
    impl SceneAware for SaveSystem {}

    struct Audio;
    impl Lifecycle for Audio {}
    impl AnyManager for Audio {
        type Tier = PersistentTier;
    }
    impl SceneAware for Audio {}

    struct ShopKeeper;
    impl RequiresManagers for ShopKeeper {
        fn requirements() -> Requirements {
            Requirements::of::<Self>()
                .manager::<Inventory>()
                .persistent::<SaveSystem>()
        }
    }

    fn persistent_with_saves() -> ManagerRegistry<dyn PersistentManager> {
        ManagerRegistry::<dyn PersistentManager>::builder()
            .with(Box::new(SaveSystem))
            .build()
            .unwrap()
    }

    fn scene_with_inventory() -> ManagerRegistry<dyn Manager> {
        ManagerRegistry::<dyn Manager>::builder()
            .with(Box::new(Inventory))
            .build()
            .unwrap()
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn declaration_records_dependent_and_kinds() {
        let requirements = ShopKeeper::requirements();

        assert!(requirements.dependent().ends_with("ShopKeeper"));
        let kinds: Vec<_> = requirements.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ManagerKind::Scene, ManagerKind::Persistent]);
    }

    #[test]
    fn satisfied_requirements_produce_clean_report() {
        let persistent = persistent_with_saves();
        let scene = scene_with_inventory();

        let report = validate(&[ShopKeeper::requirements()], &persistent, Some(&scene)).unwrap();

        assert_eq!(report.checked, 2);
        assert!(report.is_satisfied());
    }

    #[test]
    fn missing_manager_is_reported_not_fatal() {
        let persistent = persistent_with_saves();
        let scene = scene_with_inventory();

        let declarations = [
            Requirements::of::<ShopKeeper>().manager::<Spawner>(),
            Requirements::of::<Spawner>().persistent::<Audio>(),
        ];

        let report = validate(&declarations, &persistent, Some(&scene)).unwrap();

        assert_eq!(report.checked, 2);
        assert_eq!(report.missing.len(), 2);
        assert!(report.missing[0].required.ends_with("Spawner"));
        assert_eq!(report.missing[1].kind, ManagerKind::Persistent);
        assert!(report.missing[1].to_string().contains("persistent root"));
    }

    #[test]
    fn declared_tier_follows_manager_type() {
        let requirements = Requirements::of::<ShopKeeper>()
            .persistent::<Audio>()
            .manager::<Spawner>();

        let kinds: Vec<_> = requirements.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ManagerKind::Persistent, ManagerKind::Scene]);
        assert_eq!(<<SaveSystem as AnyManager>::Tier as Tier>::KIND, ManagerKind::Persistent);
        assert_eq!(<<Inventory as AnyManager>::Tier as Tier>::KIND, ManagerKind::Scene);
    }

    #[test]
    fn persistent_manager_embedded_in_scene_manager_is_fault() {
        struct SaveMirror {
            base: SaveSystem,
        }
        impl Lifecycle for SaveMirror {}
        impl AnyManager for SaveMirror {
            type Tier = SceneTier;

            fn upcast(&self, base: TypeId) -> Option<&dyn std::any::Any> {
                extends(base, &self.base)
            }
            fn upcast_mut(&mut self, base: TypeId) -> Option<&mut dyn std::any::Any> {
                extends_mut(base, &mut self.base)
            }
        }

        let persistent = ManagerRegistry::<dyn PersistentManager>::empty();
        let scene = ManagerRegistry::<dyn Manager>::builder()
            .with(Box::new(SaveMirror { base: SaveSystem }))
            .build()
            .unwrap();

        let declarations = [Requirements::of::<ShopKeeper>().persistent::<SaveSystem>()];

        match validate(&declarations, &persistent, Some(&scene)) {
            Err(GameflowError::ConfigurationFault { expected, found, .. }) => {
                assert_eq!(expected, ManagerKind::Persistent);
                assert_eq!(found, ManagerKind::Scene);
            }
            other => panic!("expected configuration fault, got {:?}", other),
        }
    }

    #[test]
    fn unregistered_persistent_requirement_is_missing_not_fault() {
        let persistent = ManagerRegistry::<dyn PersistentManager>::empty();
        let scene = scene_with_inventory();

        let declarations = [Requirements::of::<ShopKeeper>().persistent::<Audio>()];
        let report = validate(&declarations, &persistent, Some(&scene)).unwrap();

        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].kind, ManagerKind::Persistent);
    }

    #[test]
    fn scene_requirements_without_scene_root_abort_pass() {
        let persistent = persistent_with_saves();

        let result = validate(&[ShopKeeper::requirements()], &persistent, None);
        assert!(matches!(result, Err(GameflowError::MissingSceneRoot { .. })));
    }

    #[test]
    fn persistent_only_requirements_validate_without_scene_root() {
        let persistent = persistent_with_saves();
        let declarations = [Requirements::of::<ShopKeeper>().persistent::<SaveSystem>()];

        let report = validate(&declarations, &persistent, None).unwrap();
        assert!(report.is_satisfied());
    }

    #[test]
    fn each_dependent_checked_once() {
        let persistent = persistent_with_saves();
        let scene = scene_with_inventory();

        let declarations = [ShopKeeper::requirements(), ShopKeeper::requirements()];
        let report = validate(&declarations, &persistent, Some(&scene)).unwrap();

        assert_eq!(report.checked, 2);
    }
}
