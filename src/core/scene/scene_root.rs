//=========================================================================
// Scene Root
//=========================================================================
//
// Per-scene owner of scene managers, controller slots and characters.
//
// Architecture:
//   SceneRootBuilder ──build()──> SceneRoot
//                                   ├─ managers: ManagerRegistry<dyn Manager>
//                                   ├─ player:   Box<dyn Controller> + ControllerKey
//                                   ├─ camera:   Box<dyn Controller>
//                                   ├─ ui:       Box<dyn Controller>
//                                   └─ pawns:    PossessionLink
//
// Lifecycle:
//   start()    on install: managers.on_enter → controllers.on_enter → possess start character
//   shutdown() on replace: controllers.on_exit → release player → managers.on_exit
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::control::{Character, CharacterKey, Controller, ControllerKey, PossessionLink};
use crate::core::error::Result;
use crate::core::input::ActionEvent;
use crate::core::manager::{Manager, ManagerRegistry, RegistryBuilder};

//=== SceneRoot ===========================================================

/// Root of one loaded scene.
pub struct SceneRoot {
    name: String,
    managers: ManagerRegistry<dyn Manager>,

    player: Option<Box<dyn Controller>>,
    player_key: Option<ControllerKey>,
    camera: Option<Box<dyn Controller>>,
    ui: Option<Box<dyn Controller>>,

    pawns: PossessionLink,
    start_character: Option<CharacterKey>,
    started: bool,
}

impl SceneRoot {
    /// Starts building the root of scene `name`.
    pub fn builder(name: impl Into<String>) -> SceneRootBuilder {
        SceneRootBuilder {
            name: name.into(),
            managers: ManagerRegistry::builder(),
            player: None,
            camera: None,
            ui: None,
            characters: Vec::new(),
            start_character: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true between `start` and `shutdown`.
    pub fn is_started(&self) -> bool {
        self.started
    }

    //--- Managers ---------------------------------------------------------

    /// Scene manager resolvable as `T`, including managers extending `T`.
    pub fn manager<T: Manager>(&self) -> Option<&T> {
        self.managers.resolve::<T>(false)
    }

    /// Scene manager whose concrete type is exactly `T`.
    pub fn manager_exact<T: Manager>(&self) -> Option<&T> {
        self.managers.resolve::<T>(true)
    }

    pub fn manager_mut<T: Manager>(&mut self) -> Option<&mut T> {
        self.managers.resolve_mut::<T>(false)
    }

    pub fn managers(&self) -> &ManagerRegistry<dyn Manager> {
        &self.managers
    }

    //--- Controller Slots -------------------------------------------------

    /// The player controller, if it is a `T`.
    pub fn player_controller<T: Controller>(&self) -> Option<&T> {
        downcast_slot(&self.player)
    }

    pub fn player_controller_mut<T: Controller>(&mut self) -> Option<&mut T> {
        downcast_slot_mut(&mut self.player)
    }

    /// The camera controller, if it is a `T`.
    pub fn camera_controller<T: Controller>(&self) -> Option<&T> {
        downcast_slot(&self.camera)
    }

    pub fn camera_controller_mut<T: Controller>(&mut self) -> Option<&mut T> {
        downcast_slot_mut(&mut self.camera)
    }

    /// The UI controller, if it is a `T`.
    pub fn ui_controller<T: Controller>(&self) -> Option<&T> {
        downcast_slot(&self.ui)
    }

    pub fn ui_controller_mut<T: Controller>(&mut self) -> Option<&mut T> {
        downcast_slot_mut(&mut self.ui)
    }

    /// Routes an action event: UI first, then player, then camera.
    ///
    /// Stops at the first controller that handles it.
    pub fn route_action(&mut self, event: &ActionEvent) -> bool {
        [&mut self.ui, &mut self.player, &mut self.camera]
            .into_iter()
            .flatten()
            .any(|controller| controller.dispatch(event))
    }

    //--- Characters -------------------------------------------------------

    pub fn pawns(&self) -> &PossessionLink {
        &self.pawns
    }

    pub fn pawns_mut(&mut self) -> &mut PossessionLink {
        &mut self.pawns
    }

    /// Possession key of the player controller, if one is set.
    pub fn player_key(&self) -> Option<ControllerKey> {
        self.player_key
    }

    /// Character the player takes control of when the scene starts.
    pub fn start_character(&self) -> Option<CharacterKey> {
        self.start_character
    }

    /// Gives the player controller control of `character`.
    ///
    /// Returns false if the scene has no player controller.
    ///
    /// # Panics
    ///
    /// Panics if `character` is not spawned in this scene.
    pub fn possess_player(&mut self, character: CharacterKey) -> bool {
        let Some(player) = self.player_key else {
            warn!("Scene \"{}\" has no player controller to possess with", self.name);
            return false;
        };

        self.pawns.possess(player, character);
        true
    }

    /// Releases the player's character. Returns false if none was held.
    pub fn unpossess_player(&mut self) -> bool {
        match self.player_key {
            Some(player) => self.pawns.unpossess(player),
            None => false,
        }
    }

    /// The character the player drives, if it is a `T`.
    pub fn controlled_character<T: Character>(&self) -> Option<&T> {
        self.player_key.and_then(|player| self.pawns.controlled::<T>(player))
    }

    pub fn controlled_character_mut<T: Character>(&mut self) -> Option<&mut T> {
        let player = self.player_key?;
        self.pawns.controlled_mut::<T>(player)
    }

    //--- Lifecycle --------------------------------------------------------

    pub(crate) fn start(&mut self) {
        if self.started {
            return;
        }

        for manager in self.managers.iter_mut() {
            manager.on_enter();
        }

        for controller in [&mut self.player, &mut self.camera, &mut self.ui].into_iter().flatten() {
            controller.on_enter();
        }

        if let Some(character) = self.start_character {
            self.possess_player(character);
        }

        self.started = true;
        info!("Scene root \"{}\" started", self.name);
    }

    pub(crate) fn shutdown(&mut self) {
        if !self.started {
            return;
        }

        for controller in [&mut self.ui, &mut self.camera, &mut self.player].into_iter().flatten() {
            controller.on_exit();
        }

        self.unpossess_player();

        for manager in self.managers.iter_mut() {
            manager.on_exit();
        }

        self.started = false;
        info!("Scene root \"{}\" shut down", self.name);
    }
}

//=== Slot Helpers ========================================================

fn downcast_slot<T: Controller>(slot: &Option<Box<dyn Controller>>) -> Option<&T> {
    slot.as_deref()
        .and_then(|controller| controller.as_any().downcast_ref::<T>())
}

fn downcast_slot_mut<T: Controller>(slot: &mut Option<Box<dyn Controller>>) -> Option<&mut T> {
    slot.as_deref_mut()
        .and_then(|controller| controller.as_any_mut().downcast_mut::<T>())
}

/// Swaps the root in `slot`, shutting the old one down and starting the new one.
pub(crate) fn replace_root(slot: &mut Option<SceneRoot>, next: Option<SceneRoot>) {
    if let Some(mut previous) = slot.take() {
        previous.shutdown();
        debug!("Scene root \"{}\" dropped", previous.name);
    }

    *slot = next;

    if let Some(root) = slot.as_mut() {
        root.start();
    }
}

//=== SceneRootBuilder ====================================================

/// Declares what a scene root owns.
pub struct SceneRootBuilder {
    name: String,
    managers: RegistryBuilder<dyn Manager>,
    player: Option<Box<dyn Controller>>,
    camera: Option<Box<dyn Controller>>,
    ui: Option<Box<dyn Controller>>,
    characters: Vec<Box<dyn Character>>,
    start_character: Option<Box<dyn Character>>,
}

impl SceneRootBuilder {
    /// Registers a scene manager. Registration order is resolution order.
    pub fn with_manager(mut self, manager: Box<dyn Manager>) -> Self {
        self.managers.push(manager);
        self
    }

    pub fn with_player_controller(mut self, controller: Box<dyn Controller>) -> Self {
        self.player = Some(controller);
        self
    }

    pub fn with_camera_controller(mut self, controller: Box<dyn Controller>) -> Self {
        self.camera = Some(controller);
        self
    }

    pub fn with_ui_controller(mut self, controller: Box<dyn Controller>) -> Self {
        self.ui = Some(controller);
        self
    }

    /// Spawns a character present from the start of the scene.
    pub fn with_character(mut self, character: Box<dyn Character>) -> Self {
        self.characters.push(character);
        self
    }

    /// Spawns the character the player possesses when the scene starts.
    pub fn with_start_character(mut self, character: Box<dyn Character>) -> Self {
        self.start_character = Some(character);
        self
    }

    /// Builds the scene root.
    ///
    /// # Errors
    ///
    /// Returns [`GameflowError::DuplicateManager`](crate::core::error::GameflowError::DuplicateManager)
    /// if two scene managers share a concrete type.
    pub fn build(self) -> Result<SceneRoot> {
        let managers = self.managers.build()?;

        let mut pawns = PossessionLink::new();
        let player_key = self.player.as_ref().map(|_| pawns.add_controller());

        for character in self.characters {
            pawns.spawn_character(character);
        }

        let start_character = self.start_character.map(|character| pawns.spawn_character(character));

        if start_character.is_some() && player_key.is_none() {
            warn!(
                "Scene \"{}\" declares a start character but no player controller",
                self.name
            );
        }

        debug!(
            "Built scene root \"{}\" with {} managers and {} characters",
            self.name,
            managers.len(),
            pawns.character_count()
        );

        Ok(SceneRoot {
            name: self.name,
            managers,
            player: self.player,
            player_key,
            camera: self.camera,
            ui: self.ui,
            pawns,
            start_character,
            started: false,
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
