use bytemuck::{Pod, Zeroable};
use cubelit_geom::Face;

use crate::constants::{REGION_COUNT, VERTS_PER_QUAD};

/// Transparency pass a region belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    Opaque = 0,
    SeeThrough = 1,
}

impl Pass {
    pub const ALL: [Pass; 2] = [Pass::Opaque, Pass::SeeThrough];
}

/// Five-byte vertex: position relative to the chunk origin (0..=32), texture
/// layer, and `face | light << 4`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedVertex {
    pub pos: [u8; 3],
    pub texture: u8,
    pub face_light: u8,
}

impl PackedVertex {
    #[inline]
    pub fn new(pos: [u8; 3], texture: u8, face: Face, light: u8) -> Self {
        Self {
            pos,
            texture,
            face_light: face.index() as u8 | (light.min(15) << 4),
        }
    }

    #[inline]
    pub fn face(self) -> Option<Face> {
        Face::from_index((self.face_light & 0x0f) as usize)
    }

    #[inline]
    pub fn light(self) -> u8 {
        self.face_light >> 4
    }
}

/// Counts and offsets of one draw region within the shared buffers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    pub vertex_offset: u32,
    pub vertex_count: u32,
    pub index_offset: u32,
    pub index_count: u32,
}

/// Twelve regions, `pass * 6 + face`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionTable {
    regions: [Region; REGION_COUNT],
}

impl RegionTable {
    #[inline]
    pub fn slot(pass: Pass, face: Face) -> usize {
        pass as usize * 6 + face.index()
    }

    #[inline]
    pub fn get(&self, pass: Pass, face: Face) -> Region {
        self.regions[Self::slot(pass, face)]
    }

    pub fn as_slice(&self) -> &[Region] {
        &self.regions
    }

    pub fn vertex_counts(&self) -> [u32; REGION_COUNT] {
        self.regions.map(|r| r.vertex_count)
    }

    pub fn total_vertices(&self) -> u32 {
        self.regions.iter().map(|r| r.vertex_count).sum()
    }

    pub(crate) fn set(&mut self, slot: usize, region: Region) {
        self.regions[slot] = region;
    }
}

/// Output of one meshing call: vertices, `u32` indices (6 per quad) and the
/// region table slicing both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshBuild {
    pub vertices: Vec<PackedVertex>,
    pub indices: Vec<u32>,
    pub regions: RegionTable,
}

impl MeshBuild {
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / VERTS_PER_QUAD
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw vertex bytes for upload, 5 per vertex.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn region_vertices(&self, pass: Pass, face: Face) -> &[PackedVertex] {
        let r = self.regions.get(pass, face);
        let start = r.vertex_offset as usize;
        &self.vertices[start..start + r.vertex_count as usize]
    }

    pub fn region_indices(&self, pass: Pass, face: Face) -> &[u32] {
        let r = self.regions.get(pass, face);
        let start = r.index_offset as usize;
        &self.indices[start..start + r.index_count as usize]
    }
}
