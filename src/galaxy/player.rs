use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;

/// A player as seen by the combat core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Researched weapons level before specialist adjustments
    pub weapons_level: u32,
    #[serde(default)]
    pub credits: i64,
}

impl Player {
    pub fn new(id: PlayerId, name: String, weapons_level: u32) -> Self {
        Self {
            id,
            name,
            weapons_level,
            credits: 0,
        }
    }
}
