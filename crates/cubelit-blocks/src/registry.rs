use std::collections::HashMap;
use std::fs;
use std::path::Path;

use cubelit_geom::Face;
use thiserror::Error;

use super::config::{BlockDef, BlocksConfig, TextureDef};
use super::types::{AIR, BlockId, BlockType, FaceTextures, MiningCategory};

const FLAG_KNOWN: u8 = 1;
const FLAG_SEE_THROUGH: u8 = 1 << 1;
const FLAG_INVISIBLE: u8 = 1 << 2;

const MAX_TYPES: usize = 256;

#[derive(Debug, Error)]
pub enum BlockConfigError {
    #[error("failed to read block config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse block config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("block id 0 is reserved for air (claimed by `{0}`)")]
    ReservedId(String),
    #[error("block id {id} defined twice (`{first}` and `{second}`)")]
    DuplicateId {
        id: BlockId,
        first: String,
        second: String,
    },
    #[error("block name `{0}` defined twice")]
    DuplicateName(String),
    #[error("no free block id left for `{0}` (at most 256 types)")]
    TooMany(String),
    #[error("block id {0} is not defined; ids must be contiguous")]
    MissingId(usize),
}

/// Dense, read-only table of block types indexed by id.
///
/// Id 0 is always air. Per-id flags are precomputed into a 256-entry lookup so
/// meshing can classify any byte without bounds checks against `types`.
#[derive(Clone, Debug)]
pub struct BlockTable {
    types: Vec<BlockType>,
    by_name: HashMap<String, BlockId>,
    flags: [u8; MAX_TYPES],
}

impl BlockTable {
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.types.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.types.iter()
    }

    /// Whether `id` names a defined block type.
    #[inline]
    pub fn contains(&self, id: BlockId) -> bool {
        self.flags[id as usize] & FLAG_KNOWN != 0
    }

    /// Neighbouring faces show through this block. Undefined ids report false.
    #[inline]
    pub fn is_see_through(&self, id: BlockId) -> bool {
        self.flags[id as usize] & FLAG_SEE_THROUGH != 0
    }

    #[inline]
    pub fn is_invisible(&self, id: BlockId) -> bool {
        self.flags[id as usize] & FLAG_INVISIBLE != 0
    }

    /// Texture layer for `face` of block `id`, or `None` for undefined ids.
    #[inline]
    pub fn texture(&self, id: BlockId, face: Face) -> Option<u8> {
        self.get(id).map(|ty| ty.texture(face))
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, BlockConfigError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        build_block_table(cfg.blocks)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, BlockConfigError> {
        let s = fs::read_to_string(path.as_ref())?;
        let table = Self::from_toml_str(&s)?;
        log::info!(
            target: "blocks",
            "loaded {} block types from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    pub(crate) fn from_types(types: Vec<BlockType>) -> Self {
        let mut flags = [0u8; MAX_TYPES];
        let mut by_name = HashMap::with_capacity(types.len());
        for ty in &types {
            let mut f = FLAG_KNOWN;
            if ty.see_through || ty.invisible {
                f |= FLAG_SEE_THROUGH;
            }
            if ty.invisible {
                f |= FLAG_INVISIBLE;
            }
            flags[ty.id as usize] = f;
            by_name.insert(ty.name.clone(), ty.id);
        }
        Self {
            types,
            by_name,
            flags,
        }
    }
}

/// Builds the block table from definitions.
///
/// Ids default to the next slot after everything placed so far. Air is
/// inserted at id 0 and may not be redefined; the final id range must have no
/// holes.
pub fn build_block_table<I>(defs: I) -> Result<BlockTable, BlockConfigError>
where
    I: IntoIterator<Item = BlockDef>,
{
    let mut slots: Vec<Option<BlockType>> = vec![Some(BlockType::air())];
    let mut names: HashMap<String, BlockId> = HashMap::new();
    names.insert("air".into(), AIR);

    for def in defs {
        let id = match def.id {
            Some(0) => return Err(BlockConfigError::ReservedId(def.name)),
            Some(id) => id as usize,
            None => slots.len(),
        };
        if id >= MAX_TYPES {
            return Err(BlockConfigError::TooMany(def.name));
        }
        if slots.len() <= id {
            slots.resize_with(id + 1, || None);
        }
        if let Some(existing) = &slots[id] {
            return Err(BlockConfigError::DuplicateId {
                id: id as BlockId,
                first: existing.name.clone(),
                second: def.name,
            });
        }
        if names.insert(def.name.clone(), id as BlockId).is_some() {
            return Err(BlockConfigError::DuplicateName(def.name));
        }
        slots[id] = Some(compile_def(id as BlockId, def));
    }

    let mut types = Vec::with_capacity(slots.len());
    for (i, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(ty) => types.push(ty),
            None => return Err(BlockConfigError::MissingId(i)),
        }
    }
    Ok(BlockTable::from_types(types))
}

fn compile_def(id: BlockId, def: BlockDef) -> BlockType {
    let textures = match def.texture {
        None => FaceTextures::default(),
        Some(TextureDef::All(t)) => FaceTextures::uniform(t),
        Some(TextureDef::Faces {
            all,
            top,
            bottom,
            side,
            front,
            back,
            left,
            right,
        }) => {
            let side = side.unwrap_or(all);
            FaceTextures {
                top: top.unwrap_or(all),
                bottom: bottom.unwrap_or(all),
                front: front.unwrap_or(side),
                back: back.unwrap_or(side),
                left: left.unwrap_or(side),
                right: right.unwrap_or(side),
            }
        }
    };
    BlockType {
        id,
        name: def.name,
        textures,
        colors: def.colors.unwrap_or([0xff88_22ff, 0xff11_aaff]),
        liquid: def.liquid,
        see_through: def.see_through || def.invisible,
        invisible: def.invisible,
        health: def.health.unwrap_or(100),
        mining: def.mining.unwrap_or(MiningCategory::Pickaxe),
    }
}
