//=========================================================================
// Game Context
//=========================================================================
//
// Explicitly passed holder of the single persistent root.
//
// Gameplay code receives `&GameContext` / `&mut GameContext` and resolves
// managers and controllers through it. Every getter returns `Option`:
// nothing installed, nothing registered and wrong type all read as `None`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::PersistentRoot;
use crate::core::control::{Character, Controller};
use crate::core::input::ActionEvent;
use crate::core::manager::{Manager, PersistentManager};
use crate::core::scene::{SceneHost, SceneRoot, TransitionStep};

//=== RootInstall =========================================================

/// Outcome of [`GameContext::install`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootInstall {
    /// The root is now the process root.
    Installed,

    /// A root was already installed; the new one was dropped.
    DuplicateDestroyed,
}

//=== GameContext =========================================================

/// Holds at most one [`PersistentRoot`].
#[derive(Default)]
pub struct GameContext {
    root: Option<PersistentRoot>,
}

impl GameContext {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Root Slot --------------------------------------------------------

    /// Installs `root` unless one is already installed.
    ///
    /// The first root survives; a later one is dropped without running any
    /// of its hooks.
    pub fn install(&mut self, mut root: PersistentRoot) -> RootInstall {
        if self.root.is_some() {
            warn!("A persistent root is already installed, dropping the duplicate");
            return RootInstall::DuplicateDestroyed;
        }

        root.enter();
        self.root = Some(root);
        RootInstall::Installed
    }

    /// Shuts down and drops the installed root, clearing the slot.
    ///
    /// Returns false if nothing was installed.
    pub fn teardown(&mut self) -> bool {
        match self.root.take() {
            Some(mut root) => {
                root.exit();
                info!("Persistent root torn down");
                true
            }
            None => false,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<&PersistentRoot> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut PersistentRoot> {
        self.root.as_mut()
    }

    //--- Managers ---------------------------------------------------------

    /// Persistent manager resolvable as `T`.
    pub fn persistent_manager<T: PersistentManager>(&self) -> Option<&T> {
        self.root()?.manager::<T>()
    }

    pub fn persistent_manager_mut<T: PersistentManager>(&mut self) -> Option<&mut T> {
        self.root_mut()?.manager_mut::<T>()
    }

    /// Manager of the active scene resolvable as `T`.
    pub fn manager<T: Manager>(&self) -> Option<&T> {
        self.scene_root()?.manager::<T>()
    }

    pub fn manager_mut<T: Manager>(&mut self) -> Option<&mut T> {
        self.scene_root_mut()?.manager_mut::<T>()
    }

    //--- Scene Root -------------------------------------------------------

    pub fn scene_root(&self) -> Option<&SceneRoot> {
        self.root()?.current_scene()
    }

    pub fn scene_root_mut(&mut self) -> Option<&mut SceneRoot> {
        self.root_mut()?.current_scene_mut()
    }

    /// Installs `scene` as the active scene root.
    ///
    /// Returns false, dropping `scene`, if no persistent root is installed.
    pub fn register_scene_root(&mut self, scene: SceneRoot) -> bool {
        match self.root_mut() {
            Some(root) => {
                root.install_scene_root(scene);
                true
            }
            None => {
                warn!(
                    "Scene root \"{}\" has no persistent root to register with",
                    scene.name()
                );
                false
            }
        }
    }

    pub fn player_controller<T: Controller>(&self) -> Option<&T> {
        self.scene_root()?.player_controller::<T>()
    }

    pub fn camera_controller<T: Controller>(&self) -> Option<&T> {
        self.scene_root()?.camera_controller::<T>()
    }

    pub fn ui_controller<T: Controller>(&self) -> Option<&T> {
        self.scene_root()?.ui_controller::<T>()
    }

    /// Character driven by the active scene's player controller.
    pub fn controlled_character<T: Character>(&self) -> Option<&T> {
        self.scene_root()?.controlled_character::<T>()
    }

    /// Routes an action event into the active scene.
    pub fn route_action(&mut self, event: &ActionEvent) -> bool {
        self.scene_root_mut()
            .map(|scene| scene.route_action(event))
            .unwrap_or(false)
    }

    //--- Scene Loading ----------------------------------------------------

    /// Requests a transition to `name`.
    ///
    /// Returns false if no root is installed or a transition is in flight.
    pub fn load_scene(&mut self, host: &mut dyn SceneHost, name: &str) -> bool {
        match self.root_mut() {
            Some(root) => root.load_scene(host, name),
            None => false,
        }
    }

    /// Drives the transition coordinator once.
    pub fn tick(&mut self) -> TransitionStep {
        match self.root_mut() {
            Some(root) => root.tick(),
            None => TransitionStep::Idle,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
