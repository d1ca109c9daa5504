//=========================================================================
// Scene Host Interface
//=========================================================================
//
// Contract between the transition coordinator and whatever actually loads
// scenes (an engine, a test double, a headless server).
//
// The coordinator only consumes progress and completion; the loading
// mechanics stay on the host side.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneRoot;

//=== LoadStatus ==========================================================

/// Result of polling a pending load once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadStatus {
    /// Still loading, with the host-reported progress.
    Pending(f32),

    /// The scene is loaded and ready to be swapped in.
    Done,
}

//=== LoadedScene =========================================================

/// What a finished load hands back.
pub struct LoadedScene {
    /// Name of the scene that was loaded.
    pub name: String,

    /// The scene's root, if the scene declares one.
    pub root: Option<SceneRoot>,
}

//=== Host Traits =========================================================

/// An in-flight asynchronous scene load.
pub trait PendingLoad {
    /// Polled once per tick until it returns [`LoadStatus::Done`].
    fn poll(&mut self) -> LoadStatus;

    /// Called exactly once, after `poll` reported `Done`.
    fn finish(self: Box<Self>) -> LoadedScene;
}

/// Something able to start scene loads.
pub trait SceneHost {
    /// Starts loading `scene`, replacing the current scene when done.
    fn begin_load(&mut self, scene: &str) -> Box<dyn PendingLoad>;
}
