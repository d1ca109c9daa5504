//=========================================================================
// Persistent Root
//=========================================================================
//
// Owner of everything that survives scene swaps.
//
// Architecture:
//   PersistentRootBuilder ──build()──> PersistentRoot
//                                        ├─ managers   (persistent tier)
//                                        ├─ catalog    (build index ↔ name)
//                                        ├─ transition (Idle/Loading state machine)
//                                        └─ current    (active SceneRoot)
//
// Flow:
//   load_scene(host, "Game") → tick() each frame → current swapped on completion
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::Result;
use crate::core::manager::{
    validate, ManagerRegistry, PersistentManager, RegistryBuilder, Requirements, ValidationReport,
};
use crate::core::scene::{
    replace_root, ProgressSubscription, SceneCatalog, SceneHost, SceneRoot, SceneTransitionCoordinator,
    SubscriberId, TransitionState, TransitionStep,
};

//=== Constants ===========================================================

/// Samples buffered per progress subscriber unless configured otherwise.
pub const DEFAULT_PROGRESS_CAPACITY: usize = 128;

//=== PersistentRoot ======================================================

/// Process-lifetime root: persistent managers, scene catalog, transitions
/// and the active scene root.
pub struct PersistentRoot {
    managers: ManagerRegistry<dyn PersistentManager>,
    catalog: SceneCatalog,
    transition: SceneTransitionCoordinator,
    current: Option<SceneRoot>,
    entered: bool,
}

impl PersistentRoot {
    pub fn builder() -> PersistentRootBuilder {
        PersistentRootBuilder {
            managers: ManagerRegistry::builder(),
            catalog: SceneCatalog::default(),
            progress_capacity: DEFAULT_PROGRESS_CAPACITY,
        }
    }

    //--- Managers ---------------------------------------------------------

    /// Persistent manager resolvable as `T`, including managers extending `T`.
    pub fn manager<T: PersistentManager>(&self) -> Option<&T> {
        self.managers.resolve::<T>(false)
    }

    /// Persistent manager whose concrete type is exactly `T`.
    pub fn manager_exact<T: PersistentManager>(&self) -> Option<&T> {
        self.managers.resolve::<T>(true)
    }

    pub fn manager_mut<T: PersistentManager>(&mut self) -> Option<&mut T> {
        self.managers.resolve_mut::<T>(false)
    }

    pub fn managers(&self) -> &ManagerRegistry<dyn PersistentManager> {
        &self.managers
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    //--- Scene Root -------------------------------------------------------

    pub fn current_scene(&self) -> Option<&SceneRoot> {
        self.current.as_ref()
    }

    pub fn current_scene_mut(&mut self) -> Option<&mut SceneRoot> {
        self.current.as_mut()
    }

    /// Makes `root` the active scene root and starts it.
    ///
    /// A live root is shut down and replaced; the last install wins. Outside
    /// a transition, persistent managers then receive `on_scene_loaded` for
    /// the installed scene, so the boot scene is announced like any other.
    pub fn install_scene_root(&mut self, root: SceneRoot) {
        if let Some(previous) = &self.current {
            warn!(
                "Scene root \"{}\" replaces live scene root \"{}\"",
                root.name(),
                previous.name()
            );
        }

        info!("Installing scene root \"{}\"", root.name());
        let scene = self.catalog.info(root.name());
        replace_root(&mut self.current, Some(root));

        if self.transition.is_idle() {
            for manager in self.managers.iter_mut() {
                manager.on_scene_loaded(&scene);
            }
        }
    }

    /// Shuts down and drops the active scene root.
    ///
    /// Returns false if none was installed.
    pub fn unload_scene_root(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        replace_root(&mut self.current, None);
        true
    }

    //--- Scene Loading ----------------------------------------------------

    /// Requests a transition to the scene called `name`.
    ///
    /// Returns false if a transition is already in flight.
    pub fn load_scene(&mut self, host: &mut dyn SceneHost, name: &str) -> bool {
        let scene = self.catalog.info(name);
        self.transition.request_load(host, scene, &mut self.managers)
    }

    /// Requests a transition to the scene at catalog position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GameflowError::UnknownSceneIndex`](crate::core::error::GameflowError::UnknownSceneIndex)
    /// if the catalog has no such index.
    pub fn load_scene_by_index(&mut self, host: &mut dyn SceneHost, index: usize) -> Result<bool> {
        let scene = self.catalog.info_at(index)?;
        Ok(self.transition.request_load(host, scene, &mut self.managers))
    }

    /// Advances any in-flight transition by one tick.
    pub fn tick(&mut self) -> TransitionStep {
        self.transition.tick(&mut self.managers, &mut self.current)
    }

    pub fn transition_state(&self) -> TransitionState {
        self.transition.state()
    }

    pub fn is_loading(&self) -> bool {
        !self.transition.is_idle()
    }

    pub fn subscribe_progress(&mut self) -> ProgressSubscription {
        self.transition.subscribe()
    }

    pub fn unsubscribe_progress(&mut self, id: SubscriberId) -> bool {
        self.transition.unsubscribe(id)
    }

    //--- Validation -------------------------------------------------------

    /// Checks declared manager dependencies against both tiers.
    ///
    /// # Errors
    ///
    /// Fails on a tier mismatch, or on scene requirements while no scene
    /// root is installed. Missing managers are reported, not errors.
    pub fn validate(&self, declarations: &[Requirements]) -> Result<ValidationReport> {
        validate(
            declarations,
            &self.managers,
            self.current.as_ref().map(SceneRoot::managers),
        )
    }

    //--- Lifecycle --------------------------------------------------------

    pub(crate) fn enter(&mut self) {
        if self.entered {
            return;
        }

        for manager in self.managers.iter_mut() {
            manager.on_enter();
        }

        self.entered = true;
        info!("Persistent root entered with {} managers", self.managers.len());
    }

    pub(crate) fn exit(&mut self) {
        if !self.entered {
            return;
        }

        self.unload_scene_root();

        for manager in self.managers.iter_mut() {
            manager.on_exit();
        }

        self.entered = false;
        info!("Persistent root exited");
    }
}

//=== PersistentRootBuilder ===============================================

/// Declares the persistent managers and scene catalog of a game.
pub struct PersistentRootBuilder {
    managers: RegistryBuilder<dyn PersistentManager>,
    catalog: SceneCatalog,
    progress_capacity: usize,
}

impl PersistentRootBuilder {
    /// Registers a persistent manager. Registration order is resolution order.
    pub fn with_manager(mut self, manager: Box<dyn PersistentManager>) -> Self {
        self.managers.push(manager);
        self
    }

    pub fn with_catalog(mut self, catalog: SceneCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets how many progress samples each subscriber buffers.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_progress_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Progress capacity must be positive");
        self.progress_capacity = capacity;
        self
    }

    /// Builds the root.
    ///
    /// # Errors
    ///
    /// Returns [`GameflowError::DuplicateManager`](crate::core::error::GameflowError::DuplicateManager)
    /// if two persistent managers share a concrete type.
    pub fn build(self) -> Result<PersistentRoot> {
        let managers = self.managers.build()?;

        debug!(
            "Built persistent root with {} managers and {} catalogued scenes",
            managers.len(),
            self.catalog.len()
        );

        Ok(PersistentRoot {
            managers,
            catalog: self.catalog,
            transition: SceneTransitionCoordinator::new(self.progress_capacity),
            current: None,
            entered: false,
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
