//! Shared constants for cubelit-mesh-cpu.

/// Opaque and see-through.
pub const PASS_COUNT: usize = 2;
/// One draw region per (pass, face), laid out `pass * 6 + face`.
pub const REGION_COUNT: usize = PASS_COUNT * 6;

pub(crate) const VERTS_PER_QUAD: usize = 4;
pub(crate) const INDICES_PER_QUAD: usize = 6;

/// Visibility mask bit marking a see-through voxel; bits 0..6 are faces.
pub const VIS_SEE_THROUGH: u8 = 1 << 6;

// Quad corner order in the light word and vertex emission: (u,v), (u+w,v), (u+w,v+h), (u,v+h).
pub(crate) const CORNER_OFFSETS: [(usize, usize); VERTS_PER_QUAD] = [(0, 0), (1, 0), (1, 1), (0, 1)];

// Triangle index patterns, relative to the quad's first vertex.
pub(crate) const SPLIT_02: [u32; INDICES_PER_QUAD] = [0, 1, 2, 2, 3, 0];
pub(crate) const SPLIT_13: [u32; INDICES_PER_QUAD] = [3, 0, 1, 1, 2, 3];
pub(crate) const SPLIT_02_FLIPPED: [u32; INDICES_PER_QUAD] = [0, 2, 1, 2, 0, 3];
pub(crate) const SPLIT_13_FLIPPED: [u32; INDICES_PER_QUAD] = [3, 1, 0, 1, 3, 2];
