use cubelit_blocks::{AIR, BlockId};
use cubelit_geom::{CHUNK_SIZE, MAX_LIGHT, PLANE_AREA, chunk_index};

/// Fills `light` with a top-down sunlight estimate for one chunk.
///
/// Each of the 32×32 columns is scanned from y=31 down with an accumulator
/// starting at 15. A non-empty voxel resets it to 0 and gets light 0; an empty
/// voxel bumps it (capped at 15) and takes its value. Chunks above are never
/// consulted.
pub fn seed_sunlight(blocks: &[BlockId], light: &mut [u8]) {
    debug_assert_eq!(blocks.len(), CHUNK_SIZE * PLANE_AREA);
    debug_assert_eq!(light.len(), blocks.len());
    let mut column = [MAX_LIGHT; PLANE_AREA];
    for y in (0..CHUNK_SIZE).rev() {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let i = chunk_index(x, y, z);
                let acc = &mut column[z * CHUNK_SIZE + x];
                *acc = if blocks[i] == AIR {
                    (*acc + 1).min(MAX_LIGHT)
                } else {
                    0
                };
                light[i] = *acc;
            }
        }
    }
}
