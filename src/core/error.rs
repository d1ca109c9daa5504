//=========================================================================
// Gameflow Errors
//=========================================================================
//
// Error taxonomy for configuration and setup faults.
//
// Absence of a manager or controller is never an error: lookups return
// `Option`. Errors are reserved for setups that cannot be honoured
// (duplicate registrations, tier mismatches, bad scene indices, unreadable
// catalogs).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::manager::ManagerKind;

//=== GameflowError =======================================================

/// Faults raised while building or validating a gameflow setup.
#[derive(Debug, Error)]
pub enum GameflowError {
    /// Two managers of the same concrete type were given to one registry.
    #[error("manager {type_name} is registered more than once")]
    DuplicateManager { type_name: &'static str },

    /// A declared dependency lives in the wrong registry tier.
    #[error("{dependent} requires {required} as a {expected} manager, but it is registered as a {found} manager")]
    ConfigurationFault {
        dependent: &'static str,
        required: &'static str,
        expected: ManagerKind,
        found: ManagerKind,
    },

    /// Scene managers were required while no scene root is installed.
    #[error("{dependent} requires scene managers but no scene root is installed")]
    MissingSceneRoot { dependent: &'static str },

    /// A scene build index outside the catalog.
    #[error("scene index {index} is out of range (catalog holds {count} scenes)")]
    UnknownSceneIndex { index: usize, count: usize },

    /// The scene catalog file could not be read.
    #[error("failed to read scene catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scene catalog file is not valid TOML for a catalog.
    #[error("failed to parse scene catalog: {0}")]
    CatalogParse(#[from] toml::de::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GameflowError>;

//=========================================================================
// Unit Tests
//=========================================================================
