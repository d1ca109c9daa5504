//=========================================================================
// UI Controller
//=========================================================================
//
// Controller owning the UI panels of a scene.
//
// Panels are looked up by exact concrete type; a scene holds at most one
// panel of each type that it intends to look up. Visibility changes are
// announced to subscribers as `PanelVisibility` events.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use log::debug;

//=== Internal Dependencies ===============================================

use super::UiPanel;
use crate::core::control::{Controller, ControllerInput};
use crate::core::input::ActionEvent;
use crate::core::listeners::Listeners;
use crate::core::manager::Lifecycle;

//=== PanelVisibility =====================================================

/// A panel was shown or hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelVisibility {
    /// Concrete type name of the panel.
    pub panel: &'static str,
    pub visible: bool,
}

//=== UiController ========================================================

/// Holds panels and forwards action events to the visible ones.
#[derive(Default)]
pub struct UiController {
    input: ControllerInput,
    panels: Vec<Box<dyn UiPanel>>,
    visibility: Listeners<PanelVisibility>,
}

impl UiController {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_panel(mut self, panel: Box<dyn UiPanel>) -> Self {
        self.add_panel(panel);
        self
    }

    pub fn add_panel(&mut self, panel: Box<dyn UiPanel>) {
        self.panels.push(panel);
    }

    //--- Lookup -----------------------------------------------------------

    /// The panel whose concrete type is exactly `T`.
    pub fn panel<T: UiPanel>(&self) -> Option<&T> {
        self.panels
            .iter()
            .find_map(|panel| (**panel).as_any().downcast_ref::<T>())
    }

    pub fn panel_mut<T: UiPanel>(&mut self) -> Option<&mut T> {
        self.panels
            .iter_mut()
            .find_map(|panel| (**panel).as_any_mut().downcast_mut::<T>())
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    //--- Visibility -------------------------------------------------------

    /// Shows the `T` panel. Returns false if absent or already visible.
    pub fn show<T: UiPanel>(&mut self) -> bool {
        let Some(panel) = self.find::<T>() else {
            return false;
        };

        if !panel.state_mut().show() {
            return false;
        }

        let name = (*panel).type_name();
        debug!("Panel {} shown", name);
        panel.on_show();
        self.visibility.notify(&PanelVisibility {
            panel: name,
            visible: true,
        });
        true
    }

    /// Hides the `T` panel. Returns false if absent or already hidden.
    pub fn hide<T: UiPanel>(&mut self) -> bool {
        let Some(panel) = self.find::<T>() else {
            return false;
        };

        if !panel.state_mut().hide() {
            return false;
        }

        let name = (*panel).type_name();
        debug!("Panel {} hidden", name);
        panel.on_hide();
        self.visibility.notify(&PanelVisibility {
            panel: name,
            visible: false,
        });
        true
    }

    /// Hides every visible panel.
    pub fn hide_all(&mut self) {
        for panel in &mut self.panels {
            if panel.state_mut().hide() {
                panel.on_hide();
                self.visibility.notify(&PanelVisibility {
                    panel: (**panel).type_name(),
                    visible: false,
                });
            }
        }
    }

    /// Receives a [`PanelVisibility`] event for every later show or hide.
    pub fn subscribe_visibility(&mut self) -> Receiver<PanelVisibility> {
        self.visibility.subscribe()
    }

    /// Number of panels currently visible.
    pub fn visible_count(&self) -> usize {
        self.panels.iter().filter(|panel| panel.state().is_visible()).count()
    }

    fn find<T: UiPanel>(&mut self) -> Option<&mut dyn UiPanel> {
        let index = self
            .panels
            .iter()
            .position(|panel| (**panel).as_any().is::<T>())?;
        Some(&mut *self.panels[index])
    }
}

impl Lifecycle for UiController {}

impl Controller for UiController {
    fn input(&self) -> &ControllerInput {
        &self.input
    }

    fn input_mut(&mut self) -> &mut ControllerInput {
        &mut self.input
    }

    /// Forwards to every visible panel that accepts input, in panel order.
    fn handle_action(&mut self, event: &ActionEvent) -> bool {
        let mut handled = false;

        for panel in &mut self.panels {
            let state = panel.state();
            if state.is_visible() && state.forwards_input() {
                handled |= panel.handle_action(event);
            }
        }

        handled
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ui::PanelState;

    struct PauseMenu {
        state: PanelState,
        shown: u32,
        resumes: u32,
    }

    impl PauseMenu {
        fn new() -> Self {
            Self {
                state: PanelState::new(false),
                shown: 0,
                resumes: 0,
            }
        }
    }

    impl UiPanel for PauseMenu {
        fn state(&self) -> &PanelState {
            &self.state
        }
        fn state_mut(&mut self) -> &mut PanelState {
            &mut self.state
        }
        fn on_show(&mut self) {
            self.shown += 1;
        }
        fn handle_action(&mut self, event: &ActionEvent) -> bool {
            if event.action == "Resume" {
                self.resumes += 1;
                return true;
            }
            false
        }
    }

    struct Hud {
        state: PanelState,
    }

    impl UiPanel for Hud {
        fn state(&self) -> &PanelState {
            &self.state
        }
        fn state_mut(&mut self) -> &mut PanelState {
            &mut self.state
        }
    }

    fn ui() -> UiController {
        UiController::new()
            .with_panel(Box::new(Hud {
                state: PanelState::new(true),
            }))
            .with_panel(Box::new(PauseMenu::new()))
    }

    #[test]
    fn panel_lookup_is_by_exact_type() {
        let ui = ui();

        assert!(ui.panel::<Hud>().is_some());
        assert!(ui.panel::<PauseMenu>().is_some());
        assert_eq!(ui.panel_count(), 2);
        assert_eq!(ui.visible_count(), 1);
    }

    #[test]
    fn show_fires_hook_only_on_change() {
        let mut ui = ui();

        assert!(ui.show::<PauseMenu>());
        assert!(!ui.show::<PauseMenu>());
        assert_eq!(ui.panel::<PauseMenu>().unwrap().shown, 1);
        assert_eq!(ui.visible_count(), 2);
    }

    #[test]
    fn hidden_panels_receive_no_input() {
        let mut ui = ui();
        let resume = ActionEvent::performed("Resume");

        assert!(!ui.dispatch(&resume));

        ui.show::<PauseMenu>();
        assert!(ui.dispatch(&resume));

        ui.hide::<PauseMenu>();
        assert!(!ui.dispatch(&resume));
        assert_eq!(ui.panel::<PauseMenu>().unwrap().resumes, 1);
    }

    #[test]
    fn hide_all_hides_every_panel() {
        let mut ui = ui();
        ui.show::<PauseMenu>();

        ui.hide_all();

        assert_eq!(ui.visible_count(), 0);
        assert!(!ui.hide::<Hud>());
    }

    #[test]
    fn visibility_changes_reach_subscribers() {
        let mut ui = ui();
        let events = ui.subscribe_visibility();

        ui.show::<PauseMenu>();
        ui.show::<PauseMenu>();
        ui.hide_all();

        let seen: Vec<(bool, bool)> = events
            .try_iter()
            .map(|event| (event.panel.ends_with("PauseMenu"), event.visible))
            .collect();
        assert_eq!(seen, vec![(true, true), (false, false), (true, false)]);
    }

    #[test]
    fn disabled_controller_forwards_nothing() {
        let mut ui = ui();
        ui.show::<PauseMenu>();
        ui.disable_inputs();

        assert!(!ui.dispatch(&ActionEvent::performed("Resume")));
    }
}
