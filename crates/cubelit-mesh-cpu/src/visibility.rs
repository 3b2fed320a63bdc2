use cubelit_blocks::{AIR, BlockTable};
use cubelit_geom::{CHUNK_SIZE, CHUNK_VOLUME, Face, chunk_index, halo_index};

use crate::MeshError;
use crate::constants::VIS_SEE_THROUGH;

/// Fills `out` (32³) with one mask byte per core voxel.
///
/// Bits 0..6 follow [`Face::index`]: set when the neighbour in that direction
/// lets the face show. Bit 6 marks the voxel itself as see-through; such a
/// voxel only shows faces towards see-through neighbours of a different id.
/// Empty and invisible voxels get 0.
///
/// Any id missing from `table`, border included, is an error.
pub fn compute_side_visibility(
    halo_blocks: &[u8],
    table: &BlockTable,
    out: &mut [u8],
) -> Result<(), MeshError> {
    debug_assert_eq!(out.len(), CHUNK_VOLUME);
    if let Some(&id) = halo_blocks.iter().find(|&&b| !table.contains(b)) {
        return Err(MeshError::UnknownBlockId { id });
    }

    let steps: [isize; 6] = Face::ALL.map(|f| {
        let (dx, dy, dz) = f.delta();
        halo_index((1 + dx) as usize, (1 + dy) as usize, (1 + dz) as usize) as isize
            - halo_index(1, 1, 1) as isize
    });

    for y in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let hi = halo_index(x + 1, y + 1, z + 1);
                let id = halo_blocks[hi];
                let slot = &mut out[chunk_index(x, y, z)];
                if id == AIR || table.is_invisible(id) {
                    *slot = 0;
                    continue;
                }
                let own_see_through = table.is_see_through(id);
                let mut mask = if own_see_through { VIS_SEE_THROUGH } else { 0 };
                for (bit, step) in steps.iter().enumerate() {
                    let nb = halo_blocks[(hi as isize + step) as usize];
                    let open = table.is_see_through(nb) && (!own_see_through || nb != id);
                    if open {
                        mask |= 1 << bit;
                    }
                }
                *slot = mask;
            }
        }
    }
    Ok(())
}
