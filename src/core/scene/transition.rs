//=========================================================================
// Scene Transition Coordinator
//=========================================================================
//
// Tick-driven state machine sequencing a scene swap.
//
// Architecture:
//   Idle ──request_load()──> Loading ──poll() == Done──> Settling ──> Idle
//          on_scene_exit()    publish(progress)  swap root   publish(1.0)
//                                                            on_scene_loaded()
//
// Only one transition is in flight at a time; requests made while busy
// are ignored. There is no cancellation and no timeout: a host that never
// reports `Done` keeps the coordinator in `Loading`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::progress::{LoadProgress, ProgressChannel, ProgressSubscription, SubscriberId};
use super::{replace_root, LoadStatus, PendingLoad, SceneHost, SceneInfo, SceneRoot};
use crate::core::manager::{ManagerRegistry, PersistentManager};

//=== Constants ===========================================================

/// Ticks waited after the host reports a finished load before persistent
/// managers are told the new scene is ready. Hides the swap hitch.
pub const SETTLE_TICKS: u32 = 1;

//=== TransitionState =====================================================

/// Externally visible state of the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionState {
    /// No transition in flight.
    Idle,

    /// A transition towards `target` is in flight.
    Loading { target: String, progress: f32 },
}

//=== TransitionStep ======================================================

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionStep {
    /// Nothing in flight.
    Idle,

    /// The host is still loading; `progress` was published.
    Loading { progress: f32 },

    /// The host finished; the new scene root was swapped in.
    Swapped { scene: String },

    /// Waiting out the settle delay.
    Settling,

    /// Persistent managers were notified; back to idle.
    Completed(SceneInfo),
}

//=== Phase ===============================================================

enum Phase {
    Idle,
    Loading {
        scene: SceneInfo,
        progress: f32,
        pending: Box<dyn PendingLoad>,
    },
    Settling {
        scene: SceneInfo,
        progress: f32,
        remaining: u32,
    },
}

enum Next {
    Poll(LoadStatus),
    Wait,
    Complete,
}

//=== SceneTransitionCoordinator ==========================================

/// Sequences scene swaps and publishes their progress.
pub struct SceneTransitionCoordinator {
    phase: Phase,
    progress: ProgressChannel,
}

impl SceneTransitionCoordinator {
    //--- Construction -----------------------------------------------------

    /// Creates an idle coordinator.
    ///
    /// # Panics
    ///
    /// Panics if `progress_capacity == 0`.
    pub fn new(progress_capacity: usize) -> Self {
        Self {
            phase: Phase::Idle,
            progress: ProgressChannel::new(progress_capacity),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> TransitionState {
        match &self.phase {
            Phase::Idle => TransitionState::Idle,
            Phase::Loading { scene, progress, .. } | Phase::Settling { scene, progress, .. } => {
                TransitionState::Loading {
                    target: scene.name.clone(),
                    progress: *progress,
                }
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    //--- Progress Subscription --------------------------------------------

    pub fn subscribe(&mut self) -> ProgressSubscription {
        self.progress.subscribe()
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.progress.unsubscribe(id)
    }

    //--- Transition Control -----------------------------------------------

    /// Starts a transition to `scene`.
    ///
    /// Returns false, without side effects, if a transition is already in
    /// flight. Otherwise every persistent manager receives
    /// `on_scene_exit()` before the host load begins.
    pub fn request_load(
        &mut self,
        host: &mut dyn SceneHost,
        scene: SceneInfo,
        managers: &mut ManagerRegistry<dyn PersistentManager>,
    ) -> bool {
        if let Phase::Loading { scene: current, .. } | Phase::Settling { scene: current, .. } = &self.phase {
            info!(
                "Ignoring load of \"{}\": \"{}\" is still loading",
                scene.name, current.name
            );
            return false;
        }

        info!("Loading scene \"{}\"", scene.name);

        for manager in managers.iter_mut() {
            manager.on_scene_exit();
        }

        let pending = host.begin_load(&scene.name);
        self.phase = Phase::Loading {
            scene,
            progress: 0.0,
            pending,
        };

        true
    }

    /// Advances the transition by one scheduling tick.
    ///
    /// `current` is the slot holding the active scene root; it is replaced
    /// on the tick the host reports completion.
    pub fn tick(
        &mut self,
        managers: &mut ManagerRegistry<dyn PersistentManager>,
        current: &mut Option<SceneRoot>,
    ) -> TransitionStep {
        let next = match &mut self.phase {
            Phase::Idle => return TransitionStep::Idle,
            Phase::Loading { pending, .. } => Next::Poll(pending.poll()),
            Phase::Settling { remaining, .. } => {
                if *remaining > 1 {
                    *remaining -= 1;
                    Next::Wait
                } else {
                    Next::Complete
                }
            }
        };

        match next {
            Next::Poll(LoadStatus::Pending(sample)) => self.sample(sample),
            Next::Poll(LoadStatus::Done) => self.swap(current),
            Next::Wait => TransitionStep::Settling,
            Next::Complete => self.complete(managers),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn sample(&mut self, sample: f32) -> TransitionStep {
        let Phase::Loading { scene, progress, .. } = &mut self.phase else {
            return TransitionStep::Idle;
        };

        // NaN samples keep the previous value
        if !sample.is_nan() {
            *progress = progress.max(sample.clamp(0.0, 1.0));
        }

        let value = *progress;
        self.progress.publish(LoadProgress {
            scene: scene.name.clone(),
            progress: value,
        });

        TransitionStep::Loading { progress: value }
    }

    fn swap(&mut self, current: &mut Option<SceneRoot>) -> TransitionStep {
        let Phase::Loading {
            scene,
            progress,
            pending,
        } = std::mem::replace(&mut self.phase, Phase::Idle)
        else {
            return TransitionStep::Idle;
        };

        let loaded = pending.finish();
        debug!("Scene \"{}\" finished loading, swapping roots", loaded.name);

        replace_root(current, loaded.root);

        let name = scene.name.clone();
        self.phase = Phase::Settling {
            scene,
            progress,
            remaining: SETTLE_TICKS,
        };

        TransitionStep::Swapped { scene: name }
    }

    fn complete(&mut self, managers: &mut ManagerRegistry<dyn PersistentManager>) -> TransitionStep {
        let Phase::Settling { scene, .. } = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return TransitionStep::Idle;
        };

        self.progress.publish(LoadProgress {
            scene: scene.name.clone(),
            progress: 1.0,
        });

        for manager in managers.iter_mut() {
            manager.on_scene_loaded(&scene);
        }

        info!("Scene \"{}\" ready", scene.name);
        TransitionStep::Completed(scene)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
