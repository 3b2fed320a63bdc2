//! Chunk dimensions, coordinates, and face directions shared by the engine crates.
#![forbid(unsafe_code)]

mod chunk_coord;
mod face;

pub use chunk_coord::ChunkCoord;
pub use face::{Axis, Face, FaceMask};

/// Edge length of a chunk in voxels.
pub const CHUNK_SIZE: usize = 32;
/// Number of voxels in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;
/// Edge length of a chunk padded with a one-voxel border on every side.
pub const HALO_SIZE: usize = CHUNK_SIZE + 2;
/// Number of voxels in a halo buffer.
pub const HALO_VOLUME: usize = HALO_SIZE * HALO_SIZE * HALO_SIZE;
/// Voxels in one slice of a chunk.
pub const PLANE_AREA: usize = CHUNK_SIZE * CHUNK_SIZE;
/// Brightest light level; all light values live in `0..=MAX_LIGHT`.
pub const MAX_LIGHT: u8 = 15;

/// Linear index into a cube of edge `N`, x fastest then z then y.
#[inline]
pub const fn cube_index<const N: usize>(x: usize, y: usize, z: usize) -> usize {
    (y * N + z) * N + x
}

/// Linear index into a chunk-sized buffer.
#[inline]
pub const fn chunk_index(x: usize, y: usize, z: usize) -> usize {
    cube_index::<CHUNK_SIZE>(x, y, z)
}

/// Linear index into a halo-sized buffer, in halo coordinates (0..34).
#[inline]
pub const fn halo_index(x: usize, y: usize, z: usize) -> usize {
    cube_index::<HALO_SIZE>(x, y, z)
}

/// Inverse of [`cube_index`].
#[inline]
pub const fn cube_coords<const N: usize>(i: usize) -> (usize, usize, usize) {
    let x = i % N;
    let z = (i / N) % N;
    let y = i / (N * N);
    (x, y, z)
}
