//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use gameflow::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Errors
pub use crate::core::error::GameflowError;

// Roots
pub use crate::core::globals::{GameContext, PersistentRoot, PersistentRootBuilder, RootInstall};

// Managers
pub use crate::core::manager::{
    AnyManager, AsAny, ElementRegistry, Lifecycle, Manager, ManagerKind, ManagerRegistry, PersistentManager,
    PersistentTier, Requirements, RequiresManagers, SceneAware, SceneTier, ValidationReport,
};

// Scenes
pub use crate::core::scene::{
    LoadProgress, LoadStatus, LoadedScene, PendingLoad, SceneCatalog, SceneHost, SceneInfo, SceneRoot,
    SceneRootBuilder, TransitionState, TransitionStep,
};

// Controllers and input
pub use crate::core::control::{Character, CharacterKey, Controller, ControllerInput, ControllerKey, PossessionLink};
pub use crate::core::input::{ActionEvent, ActionPhase, ActionTable};

// UI
pub use crate::core::ui::{GroupFlags, PanelState, PanelVisibility, UiController, UiPanel};
