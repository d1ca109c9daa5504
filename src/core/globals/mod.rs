//=========================================================================
// Gameflow Roots
//=========================================================================
//
// Process-wide state, passed explicitly instead of living in globals.
//
// Architecture:
//   GameContext
//     └─ root: Option<PersistentRoot>        at most one, first install wins
//          ├─ managers: ManagerRegistry<dyn PersistentManager>
//          ├─ catalog: SceneCatalog
//          ├─ transition: SceneTransitionCoordinator
//          └─ current: Option<SceneRoot>     last install wins
//
//=========================================================================

//=== Module Declarations =================================================

mod game_context;
mod persistent_root;

//=== Public API ==========================================================

pub use game_context::{GameContext, RootInstall};
pub use persistent_root::{PersistentRoot, PersistentRootBuilder, DEFAULT_PROGRESS_CAPACITY};
