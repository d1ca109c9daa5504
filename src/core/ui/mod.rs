//=========================================================================
// UI Layer
//=========================================================================
//
// Panel visibility state and the controller that owns the panels.
//
// Architecture:
//   UiController (Controller)
//     └─ panels: Vec<Box<dyn UiPanel>>
//          └─ PanelState { visible, group flags, forward_input, alpha }
//
//   dispatch(event) → visible panels forwarding input, in panel order
//   show/hide       → on_show/on_hide hooks, then PanelVisibility listeners
//
// Layout and drawing stay with the host; panels only carry the state the
// host needs to apply.
//
//=========================================================================

//=== Module Declarations =================================================

mod controller;
mod panel;

//=== Public API ==========================================================

pub use controller::{PanelVisibility, UiController};
pub use panel::{GroupFlags, PanelState, UiPanel};
