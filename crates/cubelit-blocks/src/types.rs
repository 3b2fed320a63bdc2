use cubelit_geom::Face;
use serde::Deserialize;

/// Block ids are single bytes; chunk buffers store them directly.
pub type BlockId = u8;

/// Reserved id for empty space.
pub const AIR: BlockId = 0;

/// Texture-array layer per cube face.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FaceTextures {
    pub top: u8,
    pub bottom: u8,
    pub front: u8,
    pub back: u8,
    pub left: u8,
    pub right: u8,
}

impl FaceTextures {
    /// Same texture on all six faces.
    #[inline]
    pub const fn uniform(tex: u8) -> Self {
        Self {
            top: tex,
            bottom: tex,
            front: tex,
            back: tex,
            left: tex,
            right: tex,
        }
    }

    #[inline]
    pub fn for_face(&self, face: Face) -> u8 {
        match face {
            Face::Top => self.top,
            Face::Bottom => self.bottom,
            Face::Front => self.front,
            Face::Back => self.back,
            Face::Left => self.left,
            Face::Right => self.right,
        }
    }
}

/// Tool class that mines a block fastest.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MiningCategory {
    #[default]
    Pickaxe,
    Axe,
    Shovel,
    /// Breaks by hand at the same speed with any tool.
    Hand,
}

/// Immutable description of one block species.
#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub textures: FaceTextures,
    /// Two RGBA colours used for particles and map rendering.
    pub colors: [u32; 2],
    pub liquid: bool,
    pub see_through: bool,
    /// Never rendered; implies `see_through`.
    pub invisible: bool,
    pub health: u32,
    pub mining: MiningCategory,
}

impl BlockType {
    pub fn air() -> Self {
        Self {
            id: AIR,
            name: "air".into(),
            textures: FaceTextures::default(),
            colors: [0, 0],
            liquid: false,
            see_through: true,
            invisible: true,
            health: 0,
            mining: MiningCategory::Hand,
        }
    }

    #[inline]
    pub fn texture(&self, face: Face) -> u8 {
        self.textures.for_face(face)
    }
}
