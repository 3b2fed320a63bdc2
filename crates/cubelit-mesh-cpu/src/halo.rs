use cubelit_blocks::{AIR, BlockId};
use cubelit_chunk::ChunkProvider;
use cubelit_geom::{
    CHUNK_SIZE, CHUNK_VOLUME, ChunkCoord, HALO_SIZE, HALO_VOLUME, MAX_LIGHT, chunk_index,
    halo_index,
};
use cubelit_lighting::refresh_chunk_light;

use crate::MeshError;

/// A chunk's blocks and light padded with a one-voxel border from its 26
/// neighbours. Owned so it can be shipped to a worker thread.
#[derive(Clone, Debug)]
pub struct HaloBuffers {
    pub coord: ChunkCoord,
    pub blocks: Box<[BlockId]>,
    pub light: Box<[u8]>,
    /// Light already crosses chunk seams; the mesher then only applies occlusion.
    pub light_finished: bool,
    /// `last_updated` of the centre chunk when the halo was taken.
    pub source_version: u64,
}

impl Default for HaloBuffers {
    fn default() -> Self {
        Self::new()
    }
}

// (source start, halo start, length) along one axis for neighbour offset `d`.
#[inline]
fn axis_span(d: i32) -> (usize, usize, usize) {
    match d {
        -1 => (CHUNK_SIZE - 1, 0, 1),
        0 => (0, 1, CHUNK_SIZE),
        _ => (0, HALO_SIZE - 1, 1),
    }
}

impl HaloBuffers {
    pub fn new() -> Self {
        Self {
            coord: ChunkCoord::default(),
            blocks: vec![AIR; HALO_VOLUME].into_boxed_slice(),
            light: vec![0; HALO_VOLUME].into_boxed_slice(),
            light_finished: false,
            source_version: 0,
        }
    }

    /// Rebuilds both buffers for `coord` from its 3×3×3 neighbourhood,
    /// relighting any chunk whose light is stale first. Stops at the first
    /// chunk the provider cannot resolve.
    pub fn assemble<P: ChunkProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        coord: ChunkCoord,
    ) -> Result<(), MeshError> {
        self.coord = coord;
        self.light_finished = false;
        let mut relit = 0usize;
        for (offset, c) in coord.neighborhood() {
            let chunk = provider.get_or_gen_chunk(c)?;
            if refresh_chunk_light(chunk) {
                relit += 1;
            }
            if offset == (0, 0, 0) {
                self.source_version = chunk.last_updated();
            }
            self.blit(offset, chunk.blocks(), chunk.light());
        }
        if relit > 0 {
            log::trace!(target: "light", "relit {} chunks around {:?}", relit, coord);
        }
        Ok(())
    }

    /// Copies the part of a neighbouring chunk that lands in this halo.
    /// `offset` is the neighbour's position relative to the centre chunk.
    /// Light is clamped to 15 on the way in.
    pub fn blit<B, L>(&mut self, offset: (i32, i32, i32), blocks: B, light: L)
    where
        B: AsRef<[BlockId]>,
        L: AsRef<[u8]>,
    {
        let (blocks, light) = (blocks.as_ref(), light.as_ref());
        debug_assert_eq!(blocks.len(), CHUNK_VOLUME);
        debug_assert_eq!(light.len(), CHUNK_VOLUME);
        let (sx, hx, nx) = axis_span(offset.0);
        let (sy, hy, ny) = axis_span(offset.1);
        let (sz, hz, nz) = axis_span(offset.2);
        for y in 0..ny {
            for z in 0..nz {
                let src = chunk_index(sx, sy + y, sz + z);
                let dst = halo_index(hx, hy + y, hz + z);
                self.blocks[dst..dst + nx].copy_from_slice(&blocks[src..src + nx]);
                for (d, s) in self.light[dst..dst + nx].iter_mut().zip(&light[src..src + nx]) {
                    *d = (*s).min(MAX_LIGHT);
                }
            }
        }
    }

    /// Halo for a stand-alone 32³ model: empty border lit at `border_light`.
    pub fn from_model<B, L>(blocks: B, light: L, border_light: u8) -> Self
    where
        B: AsRef<[BlockId]>,
        L: AsRef<[u8]>,
    {
        let mut halo = Self::new();
        halo.light.fill(border_light.min(MAX_LIGHT));
        halo.blit((0, 0, 0), blocks, light);
        halo
    }

    #[inline]
    pub fn block(&self, hx: usize, hy: usize, hz: usize) -> BlockId {
        self.blocks[halo_index(hx, hy, hz)]
    }
}
