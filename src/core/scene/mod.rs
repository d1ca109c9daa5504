//=========================================================================
// Scene System
//=========================================================================
//
// Per-scene roots and the tick-driven scene swap.
//
// Architecture:
//   SceneTransitionCoordinator
//     ├─ phase: Idle | Loading(PendingLoad) | Settling
//     └─ progress: ProgressChannel ──> subscribers (crossbeam)
//
//   SceneRoot (one per loaded scene)
//     ├─ managers: ManagerRegistry<dyn Manager>
//     ├─ player / camera / ui controller slots
//     └─ pawns: PossessionLink
//
// Flow:
//   request_load() → on_scene_exit() → host.begin_load()
//   tick() … poll → Done → swap SceneRoot → +1 tick → on_scene_loaded()
//
//=========================================================================

//=== Module Declarations =================================================

mod catalog;
mod host;
mod progress;
mod scene_root;
mod transition;

//=== Public API ==========================================================

pub use catalog::SceneCatalog;
pub use host::{LoadStatus, LoadedScene, PendingLoad, SceneHost};
pub use progress::{LoadProgress, ProgressChannel, ProgressSubscription, SubscriberId};
pub use scene_root::{SceneRoot, SceneRootBuilder};
pub use transition::{SceneTransitionCoordinator, TransitionState, TransitionStep, SETTLE_TICKS};

pub(crate) use scene_root::replace_root;

//=== SceneInfo ===========================================================

/// Identifies a scene handed to persistent managers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneInfo {
    /// Scene name as known to the host.
    pub name: String,

    /// Position in the scene catalog, if the scene is listed there.
    pub build_index: Option<usize>,
}

impl SceneInfo {
    pub fn new(name: impl Into<String>, build_index: Option<usize>) -> Self {
        Self {
            name: name.into(),
            build_index,
        }
    }
}
