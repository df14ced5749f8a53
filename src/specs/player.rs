// src/specs/player.rs
//! Player search results and detail records.
//!
//! Detail shape (only the fields used here):
//! ```text
//! { "player": {
//!     "experience": [ { "skill_id": 2, "quantity": 12345 }, ... ],
//!     "skillMap":   { "2": { "name": "Mining" }, ... } } }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use serde_json::Value;

use super::roster::{scalar_text, EntityId};
use crate::levels::LevelCurve;

/// `players?q=<name>` response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub players: Vec<SearchHit>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "entityId", default)]
    pub entity_id: Value,
}

impl SearchResponse {
    /// Usable identifiers in upstream order; hits without one are ignored.
    pub fn candidates(&self) -> Vec<EntityId> {
        self.players.iter().filter_map(|h| EntityId::from_value(&h.entity_id)).collect()
    }
}

/// `players/<id>` response wrapper.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlayerEnvelope {
    #[serde(default)]
    pub player: Option<PlayerDetail>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetail {
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skill_map: HashMap<String, SkillInfo>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub skill_id: Value,
    #[serde(default)]
    pub quantity: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SkillInfo {
    #[serde(default)]
    pub name: String,
}

/// Map each experience entry to `skill name → level`.
/// Entries whose skill id is not in the record's own skill map are skipped.
pub fn flatten(detail: &PlayerDetail, curve: &LevelCurve) -> BTreeMap<String, u32> {
    let mut out = BTreeMap::new();

    for exp in &detail.experience {
        let Some(id) = scalar_text(&exp.skill_id) else { continue };
        let Some(skill) = detail.skill_map.get(&id) else { continue };
        let name = skill.name.trim();
        if name.is_empty() { continue; }

        out.insert(s!(name), curve.level_for(exp.quantity.unwrap_or(0.0)));
    }

    out
}
