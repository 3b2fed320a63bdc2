use serde::Deserialize;

use crate::types::MiningCategory;

// Top-level blocks config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlockDef {
    pub name: String,
    // Assigned sequentially after the highest explicit id when omitted.
    #[serde(default)]
    pub id: Option<u8>,
    #[serde(default)]
    pub texture: Option<TextureDef>,
    #[serde(default)]
    pub colors: Option<[u32; 2]>,
    #[serde(default)]
    pub liquid: bool,
    #[serde(default)]
    pub see_through: bool,
    #[serde(default)]
    pub invisible: bool,
    #[serde(default)]
    pub health: Option<u32>,
    #[serde(default)]
    pub mining: Option<MiningCategory>,
}

// Texture config supports either a single layer for every face or per-face
// overrides on top of a base layer.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum TextureDef {
    All(u8),
    Faces {
        #[serde(default)]
        all: u8,
        #[serde(default)]
        top: Option<u8>,
        #[serde(default)]
        bottom: Option<u8>,
        #[serde(default)]
        side: Option<u8>,
        #[serde(default)]
        front: Option<u8>,
        #[serde(default)]
        back: Option<u8>,
        #[serde(default)]
        left: Option<u8>,
        #[serde(default)]
        right: Option<u8>,
    },
}
