//=========================================================================
// Input Dispatch
//=========================================================================
//
// Named action events delivered by the host and the registration tables
// that route them to handlers.
//
// Architecture:
//   host ──ActionEvent──> Controller::dispatch ──> ActionTable<T>
//                                                    └─ "Jump" → fn(&mut T, &ActionEvent)
//
// Device handling stays with the host: this layer only sees action names,
// the action map they came from, a phase and a value.
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod dispatch;

//=== Public API ==========================================================

pub use action::{ActionEvent, ActionPhase};
pub use dispatch::{ActionHandler, ActionTable};
