use std::sync::OnceLock;

use cubelit_blocks::{BlockTable, identity_block_table};
use cubelit_geom::{CHUNK_SIZE, CHUNK_VOLUME, MAX_LIGHT};
use cubelit_lighting::{blur_light, seed_sunlight};

use crate::halo::HaloBuffers;
use crate::mesh_build::MeshBuild;
use crate::mesher::{MeshScratch, mesh_halo};
use crate::MeshError;

fn model_table() -> &'static BlockTable {
    static TABLE: OnceLock<BlockTable> = OnceLock::new();
    TABLE.get_or_init(identity_block_table)
}

/// Meshes a stand-alone 32³ voxel model (id `i` uses texture `i - 1`, id 0
/// is void). The model sits in empty space lit at full brightness; interior
/// light comes from sunlight seeding and blur, then occlusion.
pub fn mesh_voxel_model(blocks: &[u8; CHUNK_VOLUME]) -> Result<MeshBuild, MeshError> {
    let mut light = vec![0u8; CHUNK_VOLUME];
    seed_sunlight(blocks, &mut light);
    blur_light::<CHUNK_SIZE>(&mut light);
    let mut halo = HaloBuffers::from_model(blocks, &light, MAX_LIGHT);
    halo.light_finished = true;
    mesh_halo(&halo, model_table(), &mut MeshScratch::default())
}
