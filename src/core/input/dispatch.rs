//=========================================================================
// Action Table
//=========================================================================
//
// Static mapping from action name to handler function.
//
// Architecture:
//   ActionTable<T>: HashMap<String, fn(&mut T, &ActionEvent)>
//
//   dispatch(target, event)
//     ├─ name bound   → handler(target, event), true
//     └─ name unbound → ignored, false
//
// Tables are built once at startup with explicit `bind` calls, so every
// handler a type answers to is visible at its construction site.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::ActionEvent;

//=== ActionHandler =======================================================

/// Handler bound to an action name.
pub type ActionHandler<T> = fn(&mut T, &ActionEvent);

//=== ActionTable =========================================================

/// Action-name → handler table for targets of type `T`.
///
/// ```
/// # use gameflow::prelude::*;
/// #[derive(Default)]
/// struct Avatar { jumps: u32 }
///
/// impl Avatar {
///     fn on_jump(&mut self, _event: &ActionEvent) {
///         self.jumps += 1;
///     }
/// }
///
/// let table = ActionTable::new().with("Jump", Avatar::on_jump);
/// let mut avatar = Avatar::default();
///
/// assert!(table.dispatch(&mut avatar, &ActionEvent::performed("Jump")));
/// assert!(!table.dispatch(&mut avatar, &ActionEvent::performed("Crouch")));
/// assert_eq!(avatar.jumps, 1);
/// ```
pub struct ActionTable<T> {
    handlers: HashMap<String, ActionHandler<T>>,
}

impl<T> ActionTable<T> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Binds `action` and returns the table.
    pub fn with(mut self, action: impl Into<String>, handler: ActionHandler<T>) -> Self {
        self.bind(action, handler);
        self
    }

    /// Binds `action` to `handler`, replacing any previous binding.
    pub fn bind(&mut self, action: impl Into<String>, handler: ActionHandler<T>) {
        let action = action.into();
        if self.handlers.insert(action.clone(), handler).is_some() {
            warn!("Action \"{}\" was already bound, previous handler replaced", action);
        }
    }

    /// Removes the binding for `action`. Returns false if it was unbound.
    pub fn unbind(&mut self, action: &str) -> bool {
        self.handlers.remove(action).is_some()
    }

    //--- Dispatch ---------------------------------------------------------

    /// Calls the handler bound to `event.action`, if any.
    ///
    /// Returns true if a handler ran.
    pub fn dispatch(&self, target: &mut T, event: &ActionEvent) -> bool {
        match self.handlers.get(event.action.as_str()) {
            Some(handler) => {
                handler(target, event);
                true
            }
            None => {
                trace!("No handler bound for action \"{}\"", event.action);
                false
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn handles(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for ActionTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
