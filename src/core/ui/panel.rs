//=========================================================================
// UI Panels
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::input::ActionEvent;
use crate::core::manager::AsAny;

//=== GroupFlags ==========================================================

/// Interaction flags applied to a panel's element group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupFlags {
    pub interactable: bool,
    pub blocks_raycasts: bool,
    pub ignore_parent_groups: bool,
}

impl GroupFlags {
    /// Flags of a hidden panel: inert and detached from parent groups.
    pub const HIDDEN: Self = Self {
        interactable: false,
        blocks_raycasts: false,
        ignore_parent_groups: true,
    };
}

impl Default for GroupFlags {
    fn default() -> Self {
        Self {
            interactable: true,
            blocks_raycasts: true,
            ignore_parent_groups: false,
        }
    }
}

//=== PanelState ==========================================================

/// Visibility and input state of one panel.
///
/// `show` and `hide` only act on an actual change of visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    visible: bool,

    /// Flags restored whenever the panel becomes visible.
    group: GroupFlags,

    /// Start forwarding input on show, stop on hide.
    forward_input_on_show: bool,

    forward_input: bool,
    alpha: f32,
}

impl PanelState {
    //--- Construction -----------------------------------------------------

    pub fn new(visible_on_start: bool) -> Self {
        Self {
            visible: visible_on_start,
            group: GroupFlags::default(),
            forward_input_on_show: true,
            forward_input: visible_on_start,
            alpha: 1.0,
        }
    }

    /// Sets the flags applied while visible.
    pub fn with_group(mut self, group: GroupFlags) -> Self {
        self.group = group;
        self
    }

    pub fn with_forward_input_on_show(mut self, forward: bool) -> Self {
        self.forward_input_on_show = forward;
        self.forward_input = forward && self.visible;
        self
    }

    //--- Visibility -------------------------------------------------------

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Makes the panel visible. Returns false if it already was.
    pub fn show(&mut self) -> bool {
        if self.visible {
            return false;
        }

        self.visible = true;
        if self.forward_input_on_show {
            self.forward_input = true;
        }
        true
    }

    /// Hides the panel. Returns false if it already was hidden.
    pub fn hide(&mut self) -> bool {
        if !self.visible {
            return false;
        }

        self.visible = false;
        if self.forward_input_on_show {
            self.forward_input = false;
        }
        true
    }

    /// Flags the host should apply right now.
    pub fn group(&self) -> GroupFlags {
        if self.visible {
            self.group
        } else {
            GroupFlags::HIDDEN
        }
    }

    //--- Input ------------------------------------------------------------

    pub fn forwards_input(&self) -> bool {
        self.forward_input
    }

    /// Starts or stops forwarding input to the panel.
    ///
    /// Setting the current value again is a no-op and returns false.
    pub fn set_forward_input(&mut self, forward: bool) -> bool {
        if self.forward_input == forward {
            warn!("Panel input forwarding already set to {}", forward);
            return false;
        }
        self.forward_input = forward;
        true
    }

    //--- Appearance -------------------------------------------------------

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }
}

//=== UiPanel =============================================================

/// A panel owned by a [`UiController`](super::UiController).
pub trait UiPanel: AsAny {
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    /// Called after the panel became visible.
    fn on_show(&mut self) {}

    /// Called after the panel was hidden.
    fn on_hide(&mut self) {}

    /// Handles a forwarded action event.
    fn handle_action(&mut self, _event: &ActionEvent) -> bool {
        false
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_on_start_uses_hidden_flags() {
        let state = PanelState::new(false);

        assert!(!state.is_visible());
        assert!(!state.forwards_input());
        assert_eq!(state.group(), GroupFlags::HIDDEN);
    }

    #[test]
    fn show_and_hide_act_only_on_change() {
        let mut state = PanelState::new(false);

        assert!(state.show());
        assert!(!state.show());
        assert!(state.forwards_input());
        assert_eq!(state.group(), GroupFlags::default());

        assert!(state.hide());
        assert!(!state.hide());
        assert!(!state.forwards_input());
    }

    #[test]
    fn custom_group_restored_on_show() {
        let flags = GroupFlags {
            interactable: false,
            blocks_raycasts: true,
            ignore_parent_groups: false,
        };
        let mut state = PanelState::new(false).with_group(flags);

        state.show();
        assert_eq!(state.group(), flags);
    }

    #[test]
    fn forwarding_can_be_decoupled_from_visibility() {
        let mut state = PanelState::new(true).with_forward_input_on_show(false);
        assert!(!state.forwards_input());

        state.hide();
        state.show();
        assert!(!state.forwards_input());

        assert!(state.set_forward_input(true));
        assert!(!state.set_forward_input(true));
        assert!(state.forwards_input());
    }

    #[test]
    fn alpha_is_clamped() {
        let mut state = PanelState::new(true);
        state.set_alpha(1.5);
        assert_eq!(state.alpha(), 1.0);
        state.set_alpha(-0.2);
        assert_eq!(state.alpha(), 0.0);
    }
}
