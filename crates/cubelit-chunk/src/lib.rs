//! Chunk voxel/light buffers and the capability used to resolve neighbours.
#![forbid(unsafe_code)]

use std::cell::Cell;

use cubelit_blocks::{AIR, BlockId};
use cubelit_geom::{CHUNK_SIZE, CHUNK_VOLUME, ChunkCoord, MAX_LIGHT, chunk_index};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error("chunk ({}, {}, {}) is outside the world", .0.cx, .0.cy, .0.cz)]
    OutOfBounds(ChunkCoord),
    #[error("chunk buffer has {got} voxels, expected {expected}")]
    BadLength { expected: usize, got: usize },
}

/// Resolves any chunk by coordinate, generating it on first access.
pub trait ChunkProvider {
    fn get_or_gen_chunk(&mut self, coord: ChunkCoord) -> Result<&mut Chunk, ChunkError>;
}

/// A 32³ cube of block ids plus its derived light field.
///
/// `last_updated` advances on every block write and strictly increases, so
/// light is valid exactly while `light_last_updated >= last_updated`. Tick 0
/// means "never lit".
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    blocks: Box<[BlockId]>,
    light: Box<[u8]>,
    last_updated: u64,
    light_last_updated: u64,
    empty_check: Cell<Option<(u64, bool)>>,
}

impl Chunk {
    /// All-air chunk created at `tick`, with stale light.
    pub fn new(coord: ChunkCoord, tick: u64) -> Self {
        Self {
            coord,
            blocks: vec![AIR; CHUNK_VOLUME].into_boxed_slice(),
            light: vec![0; CHUNK_VOLUME].into_boxed_slice(),
            last_updated: tick.max(1),
            light_last_updated: 0,
            empty_check: Cell::new(None),
        }
    }

    pub fn from_blocks(coord: ChunkCoord, blocks: Vec<BlockId>, tick: u64) -> Result<Self, ChunkError> {
        if blocks.len() != CHUNK_VOLUME {
            return Err(ChunkError::BadLength {
                expected: CHUNK_VOLUME,
                got: blocks.len(),
            });
        }
        let mut c = Self::new(coord, tick);
        c.blocks = blocks.into_boxed_slice();
        Ok(c)
    }

    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        chunk_index(x, y, z)
    }

    #[inline]
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    #[inline]
    pub fn light(&self) -> &[u8] {
        &self.light
    }

    #[inline]
    pub fn last_updated(&self) -> u64 {
        self.last_updated
    }

    #[inline]
    pub fn light_last_updated(&self) -> u64 {
        self.light_last_updated
    }

    #[inline]
    pub fn light_is_stale(&self) -> bool {
        self.light_last_updated < self.last_updated
    }

    #[inline]
    pub fn get_block(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[Self::idx(x, y, z)]
    }

    /// Writes one voxel and marks the chunk changed as of `tick`.
    /// Coordinates are local and wrap into `0..32`.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, id: BlockId, tick: u64) {
        let m = CHUNK_SIZE - 1;
        let i = Self::idx(x & m, y & m, z & m);
        self.blocks[i] = id;
        self.invalidate(tick);
    }

    /// Fills an axis-aligned box given in local coordinates; parts outside
    /// the chunk are skipped.
    pub fn fill_box(
        &mut self,
        min: (usize, usize, usize),
        size: (usize, usize, usize),
        id: BlockId,
        tick: u64,
    ) {
        let x1 = min.0.saturating_add(size.0).min(CHUNK_SIZE);
        let y1 = min.1.saturating_add(size.1).min(CHUNK_SIZE);
        let z1 = min.2.saturating_add(size.2).min(CHUNK_SIZE);
        for y in min.1..y1 {
            for z in min.2..z1 {
                for x in min.0..x1 {
                    self.blocks[Self::idx(x, y, z)] = id;
                }
            }
        }
        self.invalidate(tick);
    }

    /// Marks the chunk contents changed without writing a voxel.
    pub fn invalidate(&mut self, tick: u64) {
        self.last_updated = tick.max(self.last_updated + 1);
    }

    /// Replaces the light field and marks it valid for the current contents.
    /// Values above 15 are clamped.
    pub fn store_light(&mut self, light: &[u8]) {
        for (dst, src) in self.light.iter_mut().zip(light) {
            *dst = (*src).min(MAX_LIGHT);
        }
        self.light_last_updated = self.last_updated;
    }

    /// Mutable access to the light field for in-place recomputation; call
    /// [`Chunk::mark_light_valid`] once done.
    pub fn light_and_blocks_mut(&mut self) -> (&mut [u8], &[BlockId]) {
        (&mut self.light, &self.blocks)
    }

    #[inline]
    pub fn mark_light_valid(&mut self) {
        self.light_last_updated = self.last_updated;
    }

    /// True when every voxel is air. The scan runs at most once per content version.
    pub fn is_empty(&self) -> bool {
        if let Some((tick, result)) = self.empty_check.get() {
            if tick == self.last_updated {
                return result;
            }
        }
        let result = self.blocks.iter().all(|b| *b == AIR);
        self.empty_check.set(Some((self.last_updated, result)));
        result
    }
}
