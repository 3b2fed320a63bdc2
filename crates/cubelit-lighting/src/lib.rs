//! Per-chunk sunlight seeding, separable light blur and ambient occlusion.
#![forbid(unsafe_code)]

mod blur;
mod sunlight;

pub use blur::{apply_ambient_occlusion, blur_light};
pub use sunlight::seed_sunlight;

use cubelit_blocks::BlockId;
use cubelit_chunk::Chunk;
use cubelit_geom::{CHUNK_SIZE, HALO_SIZE};

/// Recomputes a chunk's stored light (seed, blur, occlusion) and marks it
/// valid for the chunk's current contents. Returns false when the light was
/// already fresh and nothing ran.
pub fn refresh_chunk_light(chunk: &mut Chunk) -> bool {
    if !chunk.light_is_stale() {
        return false;
    }
    let (light, blocks) = chunk.light_and_blocks_mut();
    light_chunk_buffer(blocks, light);
    chunk.mark_light_valid();
    log::trace!(target: "light", "relit chunk {:?}", chunk.coord);
    true
}

/// Finishes a 34³ light halo for meshing. Unless `light_finished` is set the
/// halo is blurred again so light crosses chunk seams, which also lifts the
/// occluded voxels copied from stored chunk light; occlusion always runs.
pub fn finish_halo_light(light: &mut [u8], blocks: &[BlockId], light_finished: bool) {
    if !light_finished {
        blur_light::<HALO_SIZE>(light);
    }
    apply_ambient_occlusion(light, blocks);
}

/// Full light pipeline for a stand-alone 32³ buffer: seed, blur, occlude.
pub fn light_chunk_buffer(blocks: &[BlockId], light: &mut [u8]) {
    seed_sunlight(blocks, light);
    blur_light::<CHUNK_SIZE>(light);
    apply_ambient_occlusion(light, blocks);
}

#[cfg(test)]
mod tests;
