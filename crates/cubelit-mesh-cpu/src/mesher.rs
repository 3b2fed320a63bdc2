use std::time::Instant;

use cubelit_blocks::BlockTable;
use cubelit_chunk::ChunkProvider;
use cubelit_geom::{
    Axis, CHUNK_SIZE, CHUNK_VOLUME, ChunkCoord, Face, HALO_VOLUME, MAX_LIGHT, chunk_index,
    halo_index,
};
use cubelit_lighting::finish_halo_light;

use crate::constants::{CORNER_OFFSETS, VIS_SEE_THROUGH};
use crate::emit::emit_quad;
use crate::halo::HaloBuffers;
use crate::mesh_build::{MeshBuild, Pass, Region, RegionTable};
use crate::plane::PlaneScratch;
use crate::visibility::compute_side_visibility;
use crate::{MeshContext, MeshError};

/// Per-executor working memory. Overwritten by every call; never share one
/// between jobs running at the same time.
#[derive(Clone, Debug)]
pub struct MeshScratch {
    light: Box<[u8]>,
    visibility: Box<[u8]>,
    plane: PlaneScratch,
}

impl Default for MeshScratch {
    fn default() -> Self {
        Self {
            light: vec![0; HALO_VOLUME].into_boxed_slice(),
            visibility: vec![0; CHUNK_VOLUME].into_boxed_slice(),
            plane: PlaneScratch::default(),
        }
    }
}

impl MeshScratch {
    /// Visibility masks from the last call, one byte per core voxel.
    pub fn visibility(&self) -> &[u8] {
        &self.visibility
    }
}

#[inline]
fn compose(face: Face, u: usize, v: usize, n: usize) -> (usize, usize, usize) {
    let (ua, va) = face.plane_axes();
    let mut p = [0usize; 3];
    for (axis, value) in [(ua, u), (va, v), (face.normal_axis(), n)] {
        p[match axis {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }] = value;
    }
    (p[0], p[1], p[2])
}

// Four corner nibbles for the cell at (u, v), sampled from the halo layer
// just outside the face.
#[inline]
fn light_word(light: &[u8], face: Face, u: usize, v: usize, layer: usize) -> u16 {
    let mut word = 0u16;
    for (k, (cu, cv)) in CORNER_OFFSETS.iter().enumerate() {
        let mut sum = 0u32;
        for (su, sv) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let (x, y, z) = compose(face, u + cu + su, v + cv + sv, layer);
            sum += u32::from(light[halo_index(x, y, z)]);
        }
        let avg = (sum / 4).min(u32::from(MAX_LIGHT)) as u16;
        word |= avg << (k * 4);
    }
    word
}

/// Meshes an assembled halo into packed quads.
///
/// Light is finished on a private copy (blur unless `halo.light_finished`,
/// then occlusion), so the same halo always yields the same output. The
/// see-through pass only runs when the opaque pass skipped a visible
/// see-through face; its regions are otherwise empty.
pub fn mesh_halo(
    halo: &HaloBuffers,
    table: &BlockTable,
    scratch: &mut MeshScratch,
) -> Result<MeshBuild, MeshError> {
    let MeshScratch {
        light,
        visibility,
        plane,
    } = scratch;
    light.copy_from_slice(&halo.light);
    finish_halo_light(light, &halo.blocks, halo.light_finished);
    compute_side_visibility(&halo.blocks, table, visibility)?;

    let mut out = MeshBuild::default();
    let mut saw_see_through = false;
    for pass in Pass::ALL {
        for face in Face::ALL {
            let start_v = out.vertices.len() as u32;
            let start_i = out.indices.len() as u32;
            if pass == Pass::Opaque || saw_see_through {
                for slice in 0..CHUNK_SIZE {
                    let layer = if face.is_positive() { slice + 2 } else { slice };
                    plane.reset();
                    let mut any = false;
                    for v in 0..CHUNK_SIZE {
                        for u in 0..CHUNK_SIZE {
                            let (x, y, z) = compose(face, u, v, slice);
                            let mask = visibility[chunk_index(x, y, z)];
                            if mask & face.bit() == 0 {
                                continue;
                            }
                            let see_through = mask & VIS_SEE_THROUGH != 0;
                            if pass == Pass::Opaque && see_through {
                                saw_see_through = true;
                                continue;
                            }
                            if pass == Pass::SeeThrough && !see_through {
                                continue;
                            }
                            let id = halo.blocks[halo_index(x + 1, y + 1, z + 1)];
                            plane.set(u, v, id, light_word(light, face, u, v, layer));
                            any = true;
                        }
                    }
                    if !any {
                        continue;
                    }
                    plane.merge();
                    let depth = if face.is_positive() { slice + 1 } else { slice };
                    for rect in plane.rects() {
                        let texture = table
                            .texture(rect.block, face)
                            .ok_or(MeshError::UnknownBlockId { id: rect.block })?;
                        emit_quad(&mut out, face, depth, &rect, texture);
                    }
                }
            }
            out.regions.set(
                RegionTable::slot(pass, face),
                Region {
                    vertex_offset: start_v,
                    vertex_count: out.vertices.len() as u32 - start_v,
                    index_offset: start_i,
                    index_count: out.indices.len() as u32 - start_i,
                },
            );
        }
    }
    Ok(out)
}

/// Inline executor: owns one halo and one scratch set and meshes chunks
/// straight from a [`ChunkProvider`].
#[derive(Clone, Debug, Default)]
pub struct ChunkMesher {
    halo: HaloBuffers,
    scratch: MeshScratch,
}

impl ChunkMesher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn halo(&self) -> &HaloBuffers {
        &self.halo
    }

    pub fn scratch(&self) -> &MeshScratch {
        &self.scratch
    }

    /// Assembles the halo around `coord` (relighting stale neighbours) and
    /// meshes it. Returns the mesh with the centre chunk's `last_updated`.
    pub fn mesh_chunk<P: ChunkProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        coord: ChunkCoord,
        ctx: &MeshContext<'_>,
    ) -> Result<(MeshBuild, u64), MeshError> {
        let started = Instant::now();
        self.halo.assemble(provider, coord)?;
        let mesh = mesh_halo(&self.halo, ctx.blocks, &mut self.scratch)?;
        log::debug!(
            target: "mesh",
            "meshed {:?} at tick {}: {} quads, {} vertices in {:.2?}",
            coord,
            ctx.tick,
            mesh.quad_count(),
            mesh.vertices.len(),
            started.elapsed()
        );
        Ok((mesh, self.halo.source_version))
    }
}

/// Meshes `coord` with a throwaway mesher. Prefer a long-lived
/// [`ChunkMesher`] when meshing repeatedly.
pub fn mesh_chunk<P: ChunkProvider + ?Sized>(
    provider: &mut P,
    coord: ChunkCoord,
    ctx: &MeshContext<'_>,
) -> Result<MeshBuild, MeshError> {
    ChunkMesher::new()
        .mesh_chunk(provider, coord, ctx)
        .map(|(mesh, _)| mesh)
}
