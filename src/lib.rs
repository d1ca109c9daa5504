//=========================================================================
// Gameflow — Library Root
//
// Host-independent gameplay framework core: two-tier manager registries,
// persistent and per-scene roots, a tick-driven scene transition state
// machine, controller/character possession and UI panel state.
//
// Typical usage:
// ```ignore
// use gameflow::prelude::*;
//
// let mut context = GameContext::new();
// context.install(PersistentRoot::builder().with_catalog(catalog).build()?);
//
// context.load_scene(&mut host, "Menu");
// loop {
//     context.tick();
// }
// ```
//
// The crate installs no logger; output goes through the `log` facade.
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every subsystem. Most applications only need the prelude.
//
pub mod core;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use crate::core::error::{GameflowError, Result};
pub use crate::core::globals::{GameContext, PersistentRoot};
pub use crate::core::scene::SceneRoot;
