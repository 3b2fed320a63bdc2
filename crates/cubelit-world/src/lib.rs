//! In-memory chunk store with lazy generation and a tick clock.
#![forbid(unsafe_code)]

mod worldgen;

use cubelit_blocks::BlockId;
use cubelit_chunk::{Chunk, ChunkError, ChunkProvider};
use cubelit_geom::{CHUNK_SIZE, ChunkCoord};
use hashbrown::HashMap;
use serde::Deserialize;

pub use worldgen::WorldGenMode;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub terrain: WorldGenMode,
    /// Lowest loadable chunk layer, inclusive. Unbounded when absent.
    #[serde(default)]
    pub min_cy: Option<i32>,
    /// Highest loadable chunk layer, inclusive. Unbounded when absent.
    #[serde(default)]
    pub max_cy: Option<i32>,
}

pub struct World {
    chunks: HashMap<ChunkCoord, Chunk>,
    generator: worldgen::Generator,
    min_cy: Option<i32>,
    max_cy: Option<i32>,
    tick: u64,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        log::info!(target: "world", "world gen mode {:?}", config.terrain);
        Self {
            chunks: HashMap::new(),
            generator: worldgen::Generator::new(config.terrain),
            min_cy: config.min_cy,
            max_cy: config.max_cy,
            tick: 1,
        }
    }

    pub fn with_mode(mode: WorldGenMode) -> Self {
        Self::new(WorldConfig {
            terrain: mode,
            ..Default::default()
        })
    }

    pub fn mode(&self) -> &WorldGenMode {
        self.generator.mode()
    }

    /// Current tick. Starts at 1; tick 0 is reserved for "never".
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn advance_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    pub fn loaded_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    pub fn in_bounds(&self, coord: ChunkCoord) -> bool {
        self.min_cy.is_none_or(|lo| coord.cy >= lo) && self.max_cy.is_none_or(|hi| coord.cy <= hi)
    }

    /// Inserts a prebuilt chunk, replacing whatever was loaded at its coordinate.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Result<(), ChunkError> {
        if !self.in_bounds(chunk.coord) {
            return Err(ChunkError::OutOfBounds(chunk.coord));
        }
        self.chunks.insert(chunk.coord, chunk);
        Ok(())
    }

    pub fn get_block(&mut self, wx: i32, wy: i32, wz: i32) -> Result<BlockId, ChunkError> {
        let coord = ChunkCoord::containing(wx, wy, wz);
        let m = CHUNK_SIZE as i32 - 1;
        let chunk = self.get_or_gen_chunk(coord)?;
        Ok(chunk.get_block((wx & m) as usize, (wy & m) as usize, (wz & m) as usize))
    }

    /// Writes a voxel at world position and invalidates every loaded chunk
    /// whose halo border contains it.
    pub fn set_block(&mut self, wx: i32, wy: i32, wz: i32, id: BlockId) -> Result<(), ChunkError> {
        let tick = self.tick;
        let coord = ChunkCoord::containing(wx, wy, wz);
        let m = CHUNK_SIZE as i32 - 1;
        let (lx, ly, lz) = (wx & m, wy & m, wz & m);
        self.get_or_gen_chunk(coord)?
            .set_block(lx as usize, ly as usize, lz as usize, id, tick);

        let side = |l: i32| -> &'static [i32] {
            if l == 0 {
                &[-1, 0]
            } else if l == m {
                &[0, 1]
            } else {
                &[0]
            }
        };
        for &dy in side(ly) {
            for &dz in side(lz) {
                for &dx in side(lx) {
                    if (dx, dy, dz) == (0, 0, 0) {
                        continue;
                    }
                    if let Some(n) = self.chunks.get_mut(&coord.offset(dx, dy, dz)) {
                        n.invalidate(tick);
                    }
                }
            }
        }
        Ok(())
    }
}

impl ChunkProvider for World {
    fn get_or_gen_chunk(&mut self, coord: ChunkCoord) -> Result<&mut Chunk, ChunkError> {
        if !self.in_bounds(coord) {
            return Err(ChunkError::OutOfBounds(coord));
        }
        if !self.chunks.contains_key(&coord) {
            let chunk = self.generator.generate(coord, self.tick)?;
            log::trace!(target: "world", "generated chunk {:?}", coord);
            self.chunks.insert(coord, chunk);
        }
        self.chunks
            .get_mut(&coord)
            .ok_or(ChunkError::OutOfBounds(coord))
    }
}
