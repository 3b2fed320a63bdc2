use cubelit_blocks::{AIR, BlockId};
use cubelit_chunk::{Chunk, ChunkError};
use cubelit_geom::{CHUNK_SIZE, ChunkCoord};
use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;

/// How chunks are filled the first time they are requested.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum WorldGenMode {
    /// Every chunk is air.
    Empty,
    /// Solid `block` at and below world height `surface_y`.
    Flat { surface_y: i32, block: BlockId },
    /// 2D noise heightfield: `block` below the surface, `top_block` on it.
    Hills {
        seed: i32,
        base: i32,
        amplitude: f32,
        #[serde(default = "default_frequency")]
        frequency: f32,
        block: BlockId,
        #[serde(default)]
        top_block: Option<BlockId>,
    },
}

fn default_frequency() -> f32 {
    0.01
}

impl Default for WorldGenMode {
    fn default() -> Self {
        WorldGenMode::Flat {
            surface_y: 0,
            block: 3,
        }
    }
}

pub(crate) struct Generator {
    mode: WorldGenMode,
    terrain: Option<FastNoiseLite>,
}

impl Generator {
    pub(crate) fn new(mode: WorldGenMode) -> Self {
        let terrain = match &mode {
            WorldGenMode::Hills { seed, frequency, .. } => {
                let mut n = FastNoiseLite::with_seed(*seed);
                n.set_noise_type(Some(NoiseType::OpenSimplex2));
                n.set_frequency(Some(*frequency));
                Some(n)
            }
            _ => None,
        };
        Self { mode, terrain }
    }

    pub(crate) fn mode(&self) -> &WorldGenMode {
        &self.mode
    }

    pub(crate) fn generate(&self, coord: ChunkCoord, tick: u64) -> Result<Chunk, ChunkError> {
        let (ox, oy, oz) = coord.origin();
        let mut blocks = vec![AIR; CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE];
        match self.mode {
            WorldGenMode::Empty => {}
            WorldGenMode::Flat { surface_y, block } => {
                let top = (surface_y - oy + 1).clamp(0, CHUNK_SIZE as i32) as usize;
                for y in 0..top {
                    let start = Chunk::idx(0, y, 0);
                    blocks[start..start + CHUNK_SIZE * CHUNK_SIZE].fill(block);
                }
            }
            WorldGenMode::Hills {
                base,
                amplitude,
                block,
                top_block,
                ..
            } => {
                let Some(noise) = self.terrain.as_ref() else {
                    return Chunk::from_blocks(coord, blocks, tick);
                };
                for z in 0..CHUNK_SIZE {
                    for x in 0..CHUNK_SIZE {
                        let wx = ox + x as i32;
                        let wz = oz + z as i32;
                        let h = noise.get_noise_2d(wx as f32, wz as f32);
                        let surface = base + (h * amplitude).round() as i32;
                        for y in 0..CHUNK_SIZE {
                            let wy = oy + y as i32;
                            if wy > surface {
                                break;
                            }
                            blocks[Chunk::idx(x, y, z)] = if wy == surface {
                                top_block.unwrap_or(block)
                            } else {
                                block
                            };
                        }
                    }
                }
            }
        }
        Chunk::from_blocks(coord, blocks, tick)
    }
}
