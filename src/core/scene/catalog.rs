//=========================================================================
// Scene Catalog
//=========================================================================
//
// Ordered list of the scenes shipped with the game, one name per build
// index. Stored as TOML:
//
//   scene_names = ["Boot", "Menu", "Game"]
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::debug;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use super::SceneInfo;
use crate::core::error::{GameflowError, Result};

//=== SceneCatalog ========================================================

/// Build-index ↔ scene-name table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SceneCatalog {
    #[serde(default)]
    scene_names: Vec<String>,
}

impl SceneCatalog {
    //--- Construction -----------------------------------------------------

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scene_names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(text)?;
        debug!("Parsed scene catalog with {} scenes", catalog.len());
        Ok(catalog)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GameflowError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    //--- Queries ----------------------------------------------------------

    /// Build index of `name`, if listed.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.scene_names.iter().position(|n| n == name)
    }

    /// Scene name at `index`, if in range.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.scene_names.get(index).map(String::as_str)
    }

    /// Scene info for `name`, with its build index when listed.
    pub fn info(&self, name: &str) -> SceneInfo {
        SceneInfo::new(name, self.index_of(name))
    }

    /// Scene info for `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GameflowError::UnknownSceneIndex`] if `index` is out of range.
    pub fn info_at(&self, index: usize) -> Result<SceneInfo> {
        self.name_of(index)
            .map(|name| SceneInfo::new(name, Some(index)))
            .ok_or(GameflowError::UnknownSceneIndex {
                index,
                count: self.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.scene_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene_names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scene_names.iter().map(String::as_str)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
