//! Action catalog loader.
//!
//! Builds an [`ActionCatalog`] from RON entries describing how each action
//! kind is configured.

use std::path::Path;

use arena_core::{ActionCatalog, ActionKind, AttackAction, name};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Action entry as written in RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub kind: ActionKind,
    #[serde(default)]
    pub hit_effect: Option<String>,
}

/// Loader for action catalogs from RON files.
pub struct ActionLoader;

impl ActionLoader {
    /// Catalog shipped with the crate (`data/actions.ron`).
    pub fn embedded() -> LoadResult<ActionCatalog> {
        Self::parse(include_str!("../../data/actions.ron"))
    }

    pub fn load(path: &Path) -> LoadResult<ActionCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ActionCatalog> {
        let specs: Vec<ActionSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action catalog RON: {}", e))?;

        let mut catalog = ActionCatalog::new();
        for spec in specs {
            match spec.kind {
                ActionKind::MeleeAttack => {
                    let action = match spec.hit_effect.as_deref() {
                        Some(effect) => AttackAction::with_hit_effect(name(effect)?),
                        None => AttackAction::default(),
                    };
                    catalog.register(action);
                }
            }
        }
        Ok(catalog)
    }
}
