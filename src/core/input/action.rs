//=========================================================================
// Action Events
//=========================================================================
//
// A named input action as delivered by the host.
//
//=========================================================================

//=== ActionPhase =========================================================

/// Stage of an action interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    /// Input started (e.g. button went down).
    Started,

    /// Input completed its interaction.
    Performed,

    /// Input was released or interrupted.
    Canceled,
}

//=== ActionEvent =========================================================

/// One triggered action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvent {
    /// Action name, e.g. `"Jump"`.
    pub action: String,

    /// Name of the action map the action belongs to, if the host reports one.
    pub map: Option<String>,

    pub phase: ActionPhase,

    /// Scalar value carried by the action (1.0 for buttons).
    pub value: f32,
}

impl ActionEvent {
    //--- Construction -----------------------------------------------------

    pub fn new(action: impl Into<String>, phase: ActionPhase) -> Self {
        Self {
            action: action.into(),
            map: None,
            phase,
            value: 1.0,
        }
    }

    pub fn started(action: impl Into<String>) -> Self {
        Self::new(action, ActionPhase::Started)
    }

    pub fn performed(action: impl Into<String>) -> Self {
        Self::new(action, ActionPhase::Performed)
    }

    pub fn canceled(action: impl Into<String>) -> Self {
        let mut event = Self::new(action, ActionPhase::Canceled);
        event.value = 0.0;
        event
    }

    /// Tags the event with the action map it came from.
    pub fn in_map(mut self, map: impl Into<String>) -> Self {
        self.map = Some(map.into());
        self
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_performed(&self) -> bool {
        self.phase == ActionPhase::Performed
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
