//=========================================================================
// Gameflow Core
//=========================================================================
//
// Manager registries, roots, scene transitions, possession and the thin
// controller/UI layer.
//
// Architecture:
//   globals   GameContext → PersistentRoot → SceneRoot
//   manager   capability traits, ManagerRegistry, requirement validation
//   scene     SceneRoot, SceneTransitionCoordinator, progress, catalog
//   control   Controller, PossessionLink
//   input     ActionEvent, ActionTable
//   ui        UiController, UiPanel, PanelState
//   listeners bounded fan-out for visibility and action map changes
//
// Everything runs on one logical update thread; the host calls `tick()`
// once per frame and no state is shared across threads.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod control;
pub mod error;
pub mod globals;
pub mod input;
pub mod listeners;
pub mod manager;
pub mod scene;
pub mod ui;
