//! Built-in block tables.

use crate::registry::BlockTable;
use crate::types::{BlockType, FaceTextures, MiningCategory};

struct Preset {
    name: &'static str,
    textures: FaceTextures,
    colors: [u32; 2],
    mining: MiningCategory,
    health: u32,
    liquid: bool,
    see_through: bool,
}

const fn solid(name: &'static str, tex: u8, colors: [u32; 2], mining: MiningCategory, health: u32) -> Preset {
    Preset {
        name,
        textures: FaceTextures::uniform(tex),
        colors,
        mining,
        health,
        liquid: false,
        see_through: false,
    }
}

const fn top_bottom(
    name: &'static str,
    side: u8,
    top: u8,
    bottom: u8,
    colors: [u32; 2],
    mining: MiningCategory,
    health: u32,
) -> Preset {
    let mut textures = FaceTextures::uniform(side);
    textures.top = top;
    textures.bottom = bottom;
    Preset {
        name,
        textures,
        colors,
        mining,
        health,
        liquid: false,
        see_through: false,
    }
}

const DEFAULTS: &[Preset] = &[
    solid("dirt", 1, [0x110A00FF, 0x201200FF], MiningCategory::Shovel, 2000),
    top_bottom("grass", 16, 0, 1, [0x081200FF, 0x110A00FF], MiningCategory::Shovel, 2500),
    solid("stone", 2, [0x5E5E5EFF, 0x484848FF], MiningCategory::Pickaxe, 8000),
    solid("coal", 3, [0x262626FF, 0x101010FF], MiningCategory::Pickaxe, 7000),
    solid("spruce_log", 4, [0x251B05FF, 0x1D1607FF], MiningCategory::Axe, 6000),
    solid("spruce_leaves", 5, [0x122C01FF, 0x0F2501FF], MiningCategory::Hand, 1000),
    top_bottom("dry_grass", 22, 6, 1, [0x4B6411FF, 0x4F230AFF], MiningCategory::Shovel, 2000),
    solid("roots", 7, [0x3E3214FF, 0x29200DFF], MiningCategory::Shovel, 5000),
    solid("obsidian", 8, [0x222222FF, 0x171717FF], MiningCategory::Pickaxe, 14000),
    solid("oak_log", 9, [0x3C2C08FF, 0x2E2408FF], MiningCategory::Axe, 7000),
    solid("oak_leaves", 10, [0x274200FF, 0x183300FF], MiningCategory::Hand, 1000),
    solid("sand", 12, [0xC2B280FF, 0xA89868FF], MiningCategory::Shovel, 1500),
    Preset {
        name: "water",
        textures: FaceTextures::uniform(24),
        colors: [0x1A4A8CFF, 0x133A70FF],
        mining: MiningCategory::Hand,
        health: 0,
        liquid: true,
        see_through: true,
    },
    Preset {
        name: "glass",
        textures: FaceTextures::uniform(25),
        colors: [0xC8E4F0FF, 0xA0C8DCFF],
        mining: MiningCategory::Pickaxe,
        health: 500,
        liquid: false,
        see_through: true,
    },
];

/// Block table used when no config file is supplied.
pub fn default_block_table() -> BlockTable {
    let mut types = vec![BlockType::air()];
    for (i, preset) in DEFAULTS.iter().enumerate() {
        types.push(BlockType {
            id: (i + 1) as u8,
            name: preset.name.to_string(),
            textures: preset.textures,
            colors: preset.colors,
            liquid: preset.liquid,
            see_through: preset.see_through,
            invisible: false,
            health: preset.health,
            mining: preset.mining,
        });
    }
    BlockTable::from_types(types)
}

/// 256-entry table for stand-alone voxel models: id `i` uses texture `i - 1`
/// on every face, id 0 is void, nothing else is see-through.
pub fn identity_block_table() -> BlockTable {
    let mut types = Vec::with_capacity(256);
    types.push(BlockType::air());
    for id in 1..=255u8 {
        types.push(BlockType {
            id,
            name: format!("voxel_{id}"),
            textures: FaceTextures::uniform(id - 1),
            colors: [0, 0],
            liquid: false,
            see_through: false,
            invisible: false,
            health: 100,
            mining: MiningCategory::Hand,
        });
    }
    BlockTable::from_types(types)
}
