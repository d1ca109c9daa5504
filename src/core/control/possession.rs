//=========================================================================
// Possession
//=========================================================================
//
// Symmetric controller ↔ character relation.
//
// Architecture:
//   characters:  SlotMap<CharacterKey, Pawn>
//                  Pawn { character: Box<dyn Character>, controlled_by }
//   controllers: SlotMap<ControllerKey, Option<CharacterKey>>
//
// Invariant: controllers[c] == Some(p) iff characters[p].controlled_by == Some(c).
// Every mutation goes through possess/unpossess so both sides move together.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use slotmap::{new_key_type, SlotMap};

//=== Internal Dependencies ===============================================

use crate::core::manager::AsAny;

//=== Keys ================================================================

new_key_type! {
    /// Handle to a character spawned in a [`PossessionLink`].
    pub struct CharacterKey;

    /// Handle to a controller registered in a [`PossessionLink`].
    pub struct ControllerKey;
}

//=== Character ===========================================================

/// A body a controller can drive.
pub trait Character: AsAny {
    /// Called after `controller` took control.
    fn on_possessed(&mut self, _controller: ControllerKey) {}

    /// Called before `controller` releases control.
    fn on_unpossessed(&mut self, _controller: ControllerKey) {}
}

//=== Pawn ================================================================

struct Pawn {
    character: Box<dyn Character>,
    controlled_by: Option<ControllerKey>,
}

impl Pawn {
    fn get(&self) -> &dyn Character {
        &*self.character
    }

    fn get_mut(&mut self) -> &mut dyn Character {
        &mut *self.character
    }
}

//=== PossessionLink ======================================================

/// Characters of a scene and which controller drives each of them.
#[derive(Default)]
pub struct PossessionLink {
    characters: SlotMap<CharacterKey, Pawn>,
    controllers: SlotMap<ControllerKey, Option<CharacterKey>>,
}

impl PossessionLink {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Membership -------------------------------------------------------

    /// Adds a character, initially uncontrolled.
    pub fn spawn_character(&mut self, character: Box<dyn Character>) -> CharacterKey {
        let key = self.characters.insert(Pawn {
            character,
            controlled_by: None,
        });
        debug!("Spawned character {:?}", key);
        key
    }

    /// Removes a character, releasing its controller first.
    pub fn despawn_character(&mut self, key: CharacterKey) -> Option<Box<dyn Character>> {
        if let Some(controller) = self.controlled_by(key) {
            self.unpossess(controller);
        }
        self.characters.remove(key).map(|pawn| pawn.character)
    }

    /// Registers a controller able to possess characters.
    pub fn add_controller(&mut self) -> ControllerKey {
        self.controllers.insert(None)
    }

    /// Removes a controller, releasing its character first.
    ///
    /// Returns false if the key was not live.
    pub fn remove_controller(&mut self, key: ControllerKey) -> bool {
        self.unpossess(key);
        self.controllers.remove(key).is_some()
    }

    //--- Possession -------------------------------------------------------

    /// Gives `controller` control of `character`.
    ///
    /// A character the controller already drives is left untouched. A
    /// different character it drives is released first, as is any other
    /// controller currently driving `character`.
    ///
    /// # Panics
    ///
    /// Panics if either key is not live. Use [`PossessionLink::unpossess`]
    /// to release a character.
    pub fn possess(&mut self, controller: ControllerKey, character: CharacterKey) {
        assert!(
            self.controllers.contains_key(controller),
            "possess called with a controller that is not registered"
        );
        assert!(
            self.characters.contains_key(character),
            "possess called with a character that is not spawned, use unpossess to release control"
        );

        let current = self.controllers[controller];
        match current {
            Some(held) if held == character => return,
            Some(_) => {
                self.unpossess(controller);
            }
            None => {}
        }

        if let Some(previous) = self.characters[character].controlled_by {
            self.unpossess(previous);
        }

        self.controllers[controller] = Some(character);
        let pawn = &mut self.characters[character];
        pawn.controlled_by = Some(controller);
        pawn.get_mut().on_possessed(controller);

        debug!("Controller {:?} possessed character {:?}", controller, character);
    }

    /// Releases whatever `controller` drives.
    ///
    /// Returns false, firing no callback, if it drives nothing.
    pub fn unpossess(&mut self, controller: ControllerKey) -> bool {
        let Some(character) = self.controllers.get_mut(controller).and_then(Option::take) else {
            return false;
        };

        if let Some(pawn) = self.characters.get_mut(character) {
            pawn.get_mut().on_unpossessed(controller);
            pawn.controlled_by = None;
        }

        debug!("Controller {:?} released character {:?}", controller, character);
        true
    }

    //--- Queries ----------------------------------------------------------

    /// Controller driving `character`, if any.
    pub fn controlled_by(&self, character: CharacterKey) -> Option<ControllerKey> {
        self.characters.get(character).and_then(|pawn| pawn.controlled_by)
    }

    /// Character driven by `controller`, if any.
    pub fn character_of(&self, controller: ControllerKey) -> Option<CharacterKey> {
        self.controllers.get(controller).copied().flatten()
    }

    /// The character behind `key`, if it is a `T`.
    pub fn character<T: Character>(&self, key: CharacterKey) -> Option<&T> {
        self.characters
            .get(key)
            .and_then(|pawn| pawn.get().as_any().downcast_ref::<T>())
    }

    pub fn character_mut<T: Character>(&mut self, key: CharacterKey) -> Option<&mut T> {
        self.characters
            .get_mut(key)
            .and_then(|pawn| pawn.get_mut().as_any_mut().downcast_mut::<T>())
    }

    /// The character `controller` drives, if it is a `T`.
    pub fn controlled<T: Character>(&self, controller: ControllerKey) -> Option<&T> {
        self.character_of(controller).and_then(|key| self.character::<T>(key))
    }

    pub fn controlled_mut<T: Character>(&mut self, controller: ControllerKey) -> Option<&mut T> {
        let key = self.character_of(controller)?;
        self.character_mut::<T>(key)
    }

    /// First character of concrete type `T`, in slot order.
    pub fn find<T: Character>(&self) -> Option<CharacterKey> {
        self.characters
            .iter()
            .find(|(_, pawn)| pawn.get().as_any().is::<T>())
            .map(|(key, _)| key)
    }

    pub fn contains_character(&self, key: CharacterKey) -> bool {
        self.characters.contains_key(key)
    }

    /// Keys of every spawned character.
    pub fn characters(&self) -> impl Iterator<Item = CharacterKey> + '_ {
        self.characters.keys()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
