//! CPU meshing: halo assembly, side visibility, and the greedy mesher that
//! packs chunk faces into per-region vertex buffers.
#![forbid(unsafe_code)]

pub mod constants;
mod emit;
mod error;
mod halo;
mod mesh_build;
mod mesher;
mod model;
mod plane;
mod visibility;

pub use constants::{PASS_COUNT, REGION_COUNT, VIS_SEE_THROUGH};
pub use error::MeshError;
pub use halo::HaloBuffers;
pub use mesh_build::{MeshBuild, PackedVertex, Pass, Region, RegionTable};
pub use mesher::{ChunkMesher, MeshScratch, mesh_chunk, mesh_halo};
pub use model::mesh_voxel_model;
pub use plane::{PlaneRect, PlaneScratch};
pub use visibility::compute_side_visibility;

use cubelit_blocks::BlockTable;
use cubelit_geom::{ChunkCoord, FaceMask};

/// Explicit inputs threaded into every meshing call.
#[derive(Copy, Clone, Debug)]
pub struct MeshContext<'a> {
    pub blocks: &'a BlockTable,
    pub tick: u64,
}

impl<'a> MeshContext<'a> {
    pub fn new(blocks: &'a BlockTable, tick: u64) -> Self {
        Self { blocks, tick }
    }
}

/// Draw mask for a chunk at `chunk` seen from a camera in `camera`: the face
/// directions whose regions can face the camera.
pub fn visible_faces(chunk: ChunkCoord, camera: ChunkCoord) -> FaceMask {
    FaceMask::facing_camera((
        chunk.cx - camera.cx,
        chunk.cy - camera.cy,
        chunk.cz - camera.cz,
    ))
}
