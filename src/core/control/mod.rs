//=========================================================================
// Controllers
//=========================================================================
//
// Controllers receive action events and drive characters.
//
// Architecture:
//   Controller (AsAny + Lifecycle)
//     ├─ input(): ControllerInput   enabled flag + current action map
//     └─ handle_action()            usually an ActionTable<Self> lookup
//
//   PossessionLink
//     ├─ characters:  CharacterKey  → Pawn { character, controlled_by }
//     └─ controllers: ControllerKey → Option<CharacterKey>
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::input::ActionEvent;
use crate::core::listeners::Listeners;
use crate::core::manager::{AsAny, Lifecycle};

//=== Module Declarations =================================================

mod possession;

//=== Public API ==========================================================

pub use possession::{Character, CharacterKey, ControllerKey, PossessionLink};

//=== ControllerInput =====================================================

/// Input gate shared by every controller.
#[derive(Debug)]
pub struct ControllerInput {
    enabled: bool,
    action_map: Option<String>,
    map_changes: Listeners<String>,
}

impl ControllerInput {
    /// Enabled, accepting events from any action map.
    pub fn new() -> Self {
        Self {
            enabled: true,
            action_map: None,
            map_changes: Listeners::new(),
        }
    }

    /// Enabled, accepting only events from `map` (and untagged events).
    pub fn with_action_map(map: impl Into<String>) -> Self {
        Self {
            enabled: true,
            action_map: Some(map.into()),
            map_changes: Listeners::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn action_map(&self) -> Option<&str> {
        self.action_map.as_deref()
    }

    /// Switches the action map events must come from.
    ///
    /// Subscribers receive the new map name on every switch.
    pub fn set_action_map(&mut self, map: impl Into<String>) {
        let map = map.into();
        debug!("Action map switched to \"{}\"", map);
        self.map_changes.notify(&map);
        self.action_map = Some(map);
    }

    /// Receives the name of each action map switched to from now on.
    pub fn subscribe_map_changes(&mut self) -> Receiver<String> {
        self.map_changes.subscribe()
    }

    /// Returns true if `event` should reach the controller.
    pub fn accepts(&self, event: &ActionEvent) -> bool {
        if !self.enabled {
            return false;
        }

        match (&self.action_map, &event.map) {
            (Some(current), Some(map)) => current == map,
            _ => true,
        }
    }
}

impl Default for ControllerInput {
    fn default() -> Self {
        Self::new()
    }
}

//=== Controller ==========================================================

/// Something that reacts to action events: player, camera or UI.
///
/// ```
/// # use gameflow::prelude::*;
/// struct MenuController {
///     input: ControllerInput,
///     confirmed: bool,
/// }
///
/// impl MenuController {
///     fn on_submit(&mut self, _event: &ActionEvent) {
///         self.confirmed = true;
///     }
/// }
///
/// impl Lifecycle for MenuController {}
///
/// impl Controller for MenuController {
///     fn input(&self) -> &ControllerInput { &self.input }
///     fn input_mut(&mut self) -> &mut ControllerInput { &mut self.input }
///
///     fn handle_action(&mut self, event: &ActionEvent) -> bool {
///         ActionTable::new().with("Submit", Self::on_submit).dispatch(self, event)
///     }
/// }
/// ```
pub trait Controller: AsAny + Lifecycle {
    fn input(&self) -> &ControllerInput;
    fn input_mut(&mut self) -> &mut ControllerInput;

    /// Handles an event that passed the input gate.
    fn handle_action(&mut self, _event: &ActionEvent) -> bool {
        false
    }

    /// Delivers an event. Returns true if something handled it.
    fn dispatch(&mut self, event: &ActionEvent) -> bool {
        if !self.input().accepts(event) {
            return false;
        }
        self.handle_action(event)
    }

    fn enable_inputs(&mut self) {
        self.input_mut().enable();
    }

    fn disable_inputs(&mut self) {
        self.input_mut().disable();
    }

    fn set_action_map(&mut self, map: &str) {
        self.input_mut().set_action_map(map);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::ActionTable;

    struct Pilot {
        input: ControllerInput,
        boosts: u32,
    }

    impl Pilot {
        fn on_boost(&mut self, _event: &ActionEvent) {
            self.boosts += 1;
        }
    }

    impl Lifecycle for Pilot {}

    impl Controller for Pilot {
        fn input(&self) -> &ControllerInput {
            &self.input
        }
        fn input_mut(&mut self) -> &mut ControllerInput {
            &mut self.input
        }
        fn handle_action(&mut self, event: &ActionEvent) -> bool {
            ActionTable::new().with("Boost", Self::on_boost).dispatch(self, event)
        }
    }

    fn pilot() -> Pilot {
        Pilot {
            input: ControllerInput::with_action_map("Flight"),
            boosts: 0,
        }
    }

    #[test]
    fn accepted_event_reaches_handler() {
        let mut pilot = pilot();

        assert!(pilot.dispatch(&ActionEvent::performed("Boost").in_map("Flight")));
        assert!(pilot.dispatch(&ActionEvent::performed("Boost")));
        assert_eq!(pilot.boosts, 2);
    }

    #[test]
    fn disabled_input_drops_events() {
        let mut pilot = pilot();
        pilot.disable_inputs();

        assert!(!pilot.dispatch(&ActionEvent::performed("Boost")));
        assert_eq!(pilot.boosts, 0);

        pilot.enable_inputs();
        assert!(pilot.dispatch(&ActionEvent::performed("Boost")));
    }

    #[test]
    fn events_from_other_maps_are_filtered() {
        let mut pilot = pilot();

        assert!(!pilot.dispatch(&ActionEvent::performed("Boost").in_map("Menu")));

        pilot.set_action_map("Menu");
        assert_eq!(pilot.input().action_map(), Some("Menu"));
        assert!(pilot.dispatch(&ActionEvent::performed("Boost").in_map("Menu")));
    }

    #[test]
    fn map_switches_reach_subscribers() {
        let mut pilot = pilot();
        let changes = pilot.input_mut().subscribe_map_changes();

        pilot.set_action_map("Menu");
        pilot.set_action_map("Flight");

        assert_eq!(changes.try_iter().collect::<Vec<_>>(), vec!["Menu", "Flight"]);
    }

    #[test]
    fn unmapped_input_accepts_any_map() {
        let input = ControllerInput::new();
        assert!(input.accepts(&ActionEvent::performed("Jump").in_map("Anything")));
    }
}
